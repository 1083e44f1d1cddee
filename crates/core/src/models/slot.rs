use std::{fmt, str::FromStr};

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{BookingError, BookingResult};

/// Length of a booking posted without an explicit end.
pub const DEFAULT_SLOT_MINUTES: i64 = 90;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlotStatus {
    #[default]
    Available,
    Booked,
}

impl SlotStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SlotStatus::Available => "available",
            SlotStatus::Booked => "booked",
        }
    }
}

impl fmt::Display for SlotStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SlotStatus {
    type Err = BookingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "available" => Ok(SlotStatus::Available),
            "booked" => Ok(SlotStatus::Booked),
            other => Err(BookingError::Validation(format!("Unknown slot status: {other}"))),
        }
    }
}

/// A materialized booking: a room held for an absolute time range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slot {
    pub id: Uuid,
    pub slot_start: DateTime<Utc>,
    pub slot_end: DateTime<Utc>,
    pub status: SlotStatus,
    pub band_id: Option<Uuid>,
    pub room_id: Uuid,
}

impl Slot {
    pub fn is_booked(&self) -> bool {
        self.status == SlotStatus::Booked
    }

    /// Half-open containment, `[slot_start, slot_end)`.
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.slot_start <= instant && instant < self.slot_end
    }

    pub fn overlaps(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> bool {
        self.slot_start < end && start < self.slot_end
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSlot {
    pub slot_start: DateTime<Utc>,
    pub slot_end: DateTime<Utc>,
    pub status: SlotStatus,
    pub band_id: Option<Uuid>,
    pub room_id: Uuid,
}

/// Body of a direct booking.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookSlotRequest {
    #[serde(deserialize_with = "instant::deserialize")]
    pub slot_start: DateTime<Utc>,
    #[serde(default, deserialize_with = "instant::deserialize_option")]
    pub slot_end: Option<DateTime<Utc>>,
    pub band_id: Option<Uuid>,
    pub room_id: Uuid,
}

impl BookSlotRequest {
    pub fn resolved_end(&self) -> BookingResult<DateTime<Utc>> {
        match self.slot_end {
            Some(end) => Ok(end),
            None => self
                .slot_start
                .checked_add_signed(Duration::minutes(DEFAULT_SLOT_MINUTES))
                .ok_or_else(|| {
                    BookingError::Validation(format!(
                        "Slot starting at {} has no representable end",
                        self.slot_start
                    ))
                }),
        }
    }
}

/// Absolute slot times. Accepts RFC 3339, a naive date-time (read as UTC) or
/// a bare date (midnight UTC).
pub mod instant {
    use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};
    use serde::{de, Deserialize, Deserializer};

    use crate::models::request::wall_clock;

    pub fn parse(value: &str) -> Option<DateTime<Utc>> {
        let value = value.trim();
        if let Ok(instant) = DateTime::parse_from_rfc3339(value) {
            return Some(instant.with_timezone(&Utc));
        }
        if let Some(naive) = wall_clock::parse(value) {
            return Some(Utc.from_utc_datetime(&naive));
        }
        NaiveDate::parse_from_str(value, "%Y-%m-%d")
            .ok()
            .map(|date| Utc.from_utc_datetime(&date.and_time(NaiveTime::MIN)))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).ok_or_else(|| de::Error::custom(format!("invalid timestamp: {raw}")))
    }

    pub fn deserialize_option<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<DateTime<Utc>>, D::Error> {
        match Option::<String>::deserialize(deserializer)? {
            Some(raw) => parse(&raw)
                .map(Some)
                .ok_or_else(|| de::Error::custom(format!("invalid timestamp: {raw}"))),
            None => Ok(None),
        }
    }
}

/// A slot joined with the names clients display next to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotView {
    #[serde(flatten)]
    pub slot: Slot,
    pub band_name: Option<String>,
    pub room_number: Option<i32>,
}
