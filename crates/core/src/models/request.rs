use std::{fmt, str::FromStr};

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{de, Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use crate::errors::BookingError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    #[default]
    Pending,
    Approved,
    Denied,
}

impl RequestStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestStatus::Pending => "pending",
            RequestStatus::Approved => "approved",
            RequestStatus::Denied => "denied",
        }
    }

    /// Approved and denied are answers; pending is not.
    pub fn is_response(&self) -> bool {
        !matches!(self, RequestStatus::Pending)
    }
}

impl fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RequestStatus {
    type Err = BookingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pending" => Ok(RequestStatus::Pending),
            "approved" => Ok(RequestStatus::Approved),
            "denied" => Ok(RequestStatus::Denied),
            other => Err(BookingError::Validation(format!(
                "Unknown request status: {other}"
            ))),
        }
    }
}

/// An ask for a room and time window, separate from the slot it may turn into.
///
/// `slot_start`/`slot_end` are kept exactly as submitted: display wall-clock
/// without an offset. They only become absolute instants when the request is
/// approved (see [`crate::offset::StorageOffset`]).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotRequest {
    pub id: Uuid,
    pub user_id: Uuid,
    pub room_id: Uuid,
    pub status: RequestStatus,
    pub slot_start: NaiveDateTime,
    pub slot_end: NaiveDateTime,
    pub request_date: DateTime<Utc>,
    pub response_date: Option<DateTime<Utc>>,
    pub slot_id: Option<Uuid>,
}

impl SlotRequest {
    pub fn is_approved(&self) -> bool {
        self.status == RequestStatus::Approved
    }

    /// Merges a partial update. Only the fields clients may edit are touched;
    /// `slot_id` and the dates are owned by the workflow.
    pub fn apply(&mut self, changes: &RequestChanges) {
        if let Some(user_id) = changes.user_id {
            self.user_id = user_id;
        }
        if let Some(room_id) = changes.room_id {
            self.room_id = room_id;
        }
        if let Some(status) = changes.status {
            self.status = status;
        }
        if let Some(slot_start) = changes.slot_start {
            self.slot_start = slot_start;
        }
        if let Some(slot_end) = changes.slot_end {
            self.slot_end = slot_end;
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateSlotRequest {
    pub user_id: Uuid,
    #[serde(deserialize_with = "wall_clock::deserialize")]
    pub slot_start: NaiveDateTime,
    #[serde(deserialize_with = "wall_clock::deserialize")]
    pub slot_end: NaiveDateTime,
    /// Sent by the booking form; the band is resolved from the user at approval.
    #[serde(default, deserialize_with = "empty_uuid_as_none")]
    pub band_id: Option<Uuid>,
    pub room_id: Uuid,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSlotRequest {
    pub user_id: Uuid,
    pub room_id: Uuid,
    pub slot_start: NaiveDateTime,
    pub slot_end: NaiveDateTime,
}

impl From<CreateSlotRequest> for NewSlotRequest {
    fn from(request: CreateSlotRequest) -> Self {
        Self {
            user_id: request.user_id,
            room_id: request.room_id,
            slot_start: request.slot_start,
            slot_end: request.slot_end,
        }
    }
}

/// Partial update of a request. An empty `user_id` is treated as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestChanges {
    #[serde(default, deserialize_with = "empty_uuid_as_none")]
    pub user_id: Option<Uuid>,
    #[serde(default)]
    pub room_id: Option<Uuid>,
    #[serde(default)]
    pub status: Option<RequestStatus>,
    #[serde(default, deserialize_with = "wall_clock::deserialize_option")]
    pub slot_start: Option<NaiveDateTime>,
    #[serde(default, deserialize_with = "wall_clock::deserialize_option")]
    pub slot_end: Option<NaiveDateTime>,
}

/// A request joined with the requester's name and band.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestView {
    #[serde(flatten)]
    pub request: SlotRequest,
    pub user_name: Option<String>,
    pub band_name: Option<String>,
}

pub fn empty_uuid_as_none<'de, D>(deserializer: D) -> Result<Option<Uuid>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)?.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(raw) => Uuid::parse_str(raw).map(Some).map_err(de::Error::custom),
    }
}

/// Submitted request times. Browsers post `toISOString()` output, while admin
/// edits and older clients post bare `YYYY-MM-DDTHH:MM`. Either way the value
/// is kept as the wall-clock it spells in UTC.
pub mod wall_clock {
    use chrono::{DateTime, NaiveDateTime};
    use serde::{de, Deserialize, Deserializer};

    pub fn parse(value: &str) -> Option<NaiveDateTime> {
        if let Ok(instant) = DateTime::parse_from_rfc3339(value) {
            return Some(instant.naive_utc());
        }
        ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S%.f"]
            .iter()
            .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDateTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).ok_or_else(|| de::Error::custom(format!("invalid timestamp: {raw}")))
    }

    pub fn deserialize_option<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<NaiveDateTime>, D::Error> {
        match Option::<String>::deserialize(deserializer)? {
            Some(raw) => parse(&raw)
                .map(Some)
                .ok_or_else(|| de::Error::custom(format!("invalid timestamp: {raw}"))),
            None => Ok(None),
        }
    }
}
