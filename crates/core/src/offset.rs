//! Display wall-clock ↔ stored instant conversions.
//!
//! Requests are submitted as display-local wall-clock times without an
//! offset. When a request is approved its times are shifted by a fixed
//! amount before they are written to a slot. Existing clients read slots with
//! that shift baked in, so the default must stay at +05:30 until the display
//! timezone is resolved properly. Keep every use of the shift behind
//! [`StorageOffset::apply_display_to_storage_offset`].

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};

use crate::errors::{BookingError, BookingResult};

/// Minutes added to a display wall-clock time when it is materialized.
pub const DEFAULT_STORAGE_OFFSET_MINUTES: i64 = 330;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StorageOffset(Duration);

impl Default for StorageOffset {
    fn default() -> Self {
        Self::from_minutes(DEFAULT_STORAGE_OFFSET_MINUTES)
    }
}

impl StorageOffset {
    pub fn from_minutes(minutes: i64) -> Self {
        Self(Duration::minutes(minutes))
    }

    /// `2024-06-03T07:30` becomes `2024-06-03T13:00:00Z` with the default offset.
    ///
    /// Times the shift would push past the calendar's edge are rejected.
    pub fn apply_display_to_storage_offset(
        &self,
        wall_clock: NaiveDateTime,
    ) -> BookingResult<DateTime<Utc>> {
        wall_clock
            .checked_add_signed(self.0)
            .map(|shifted| Utc.from_utc_datetime(&shifted))
            .ok_or_else(|| {
                BookingError::Validation(format!(
                    "Time {wall_clock} is outside the supported calendar"
                ))
            })
    }

    pub fn storage_range(
        &self,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> BookingResult<(DateTime<Utc>, DateTime<Utc>)> {
        Ok((
            self.apply_display_to_storage_offset(start)?,
            self.apply_display_to_storage_offset(end)?,
        ))
    }
}

/// The instant a grid cell stands for: its day and window start, read as UTC.
pub fn wall_clock_instant(day: NaiveDate, time: NaiveTime) -> DateTime<Utc> {
    Utc.from_utc_datetime(&day.and_time(time))
}
