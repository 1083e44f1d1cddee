use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A recurring time-of-day window. It is not tied to any date; every day of
/// the week gets one ladder row per enabled config.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotConfig {
    pub id: Uuid,
    #[serde(with = "time_of_day")]
    pub start_time: NaiveTime,
    #[serde(with = "time_of_day")]
    pub end_time: NaiveTime,
    pub enabled: bool,
}

fn default_enabled() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateSlotConfigRequest {
    #[serde(with = "time_of_day")]
    pub start_time: NaiveTime,
    #[serde(with = "time_of_day")]
    pub end_time: NaiveTime,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

/// Partial update. The id travels in the body, matching the admin dashboard.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateSlotConfigRequest {
    pub id: Option<Uuid>,
    #[serde(default, with = "time_of_day::option")]
    pub start_time: Option<NaiveTime>,
    #[serde(default, with = "time_of_day::option")]
    pub end_time: Option<NaiveTime>,
    pub enabled: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DeleteSlotConfigRequest {
    pub id: Option<Uuid>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SlotConfigChanges {
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
    pub enabled: Option<bool>,
}

impl SlotConfig {
    pub fn apply(&mut self, changes: SlotConfigChanges) {
        if let Some(start_time) = changes.start_time {
            self.start_time = start_time;
        }
        if let Some(end_time) = changes.end_time {
            self.end_time = end_time;
        }
        if let Some(enabled) = changes.enabled {
            self.enabled = enabled;
        }
    }
}

impl From<&UpdateSlotConfigRequest> for SlotConfigChanges {
    fn from(request: &UpdateSlotConfigRequest) -> Self {
        Self {
            start_time: request.start_time,
            end_time: request.end_time,
            enabled: request.enabled,
        }
    }
}

/// Times of day travel as `HH:MM:SS`; `HH:MM` (what a time input produces)
/// is accepted on the way in.
pub mod time_of_day {
    use chrono::NaiveTime;
    use serde::{de, Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%H:%M:%S";

    pub fn parse(value: &str) -> Option<NaiveTime> {
        NaiveTime::parse_from_str(value, FORMAT)
            .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M"))
            .ok()
    }

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&time.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).ok_or_else(|| de::Error::custom(format!("invalid time of day: {raw}")))
    }

    pub mod option {
        use chrono::NaiveTime;
        use serde::{de, Deserialize, Deserializer, Serializer};

        pub fn serialize<S: Serializer>(
            time: &Option<NaiveTime>,
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            match time {
                Some(time) => super::serialize(time, serializer),
                None => serializer.serialize_none(),
            }
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<Option<NaiveTime>, D::Error> {
            match Option::<String>::deserialize(deserializer)? {
                Some(raw) => super::parse(&raw)
                    .map(Some)
                    .ok_or_else(|| de::Error::custom(format!("invalid time of day: {raw}"))),
                None => Ok(None),
            }
        }
    }
}
