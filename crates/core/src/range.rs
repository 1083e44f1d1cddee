use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::{BookingError, BookingResult};

/// A closed interval of instants used for range queries and cache lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub(crate) start: DateTime<Utc>,
    pub(crate) end: DateTime<Utc>,
}

impl DateRange {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> BookingResult<Self> {
        if start > end {
            return Err(BookingError::Validation(format!(
                "Range start {start} is after its end {end}"
            )));
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    /// Inclusive on both bounds.
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.start <= instant && instant <= self.end
    }

    /// Whether data fetched for `self` can answer a query for `requested`.
    pub fn covers(&self, requested: &DateRange) -> bool {
        self.start <= requested.start && self.end >= requested.end
    }
}
