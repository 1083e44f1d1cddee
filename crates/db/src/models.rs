use chrono::{DateTime, NaiveDateTime, NaiveTime, Utc};
use jamroom_core::{
    errors::BookingError,
    models::{
        band::Band,
        request::SlotRequest,
        room::Room,
        slot::Slot,
        slot_config::SlotConfig,
        user::User,
    },
};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbSlotConfig {
    pub id: Uuid,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub enabled: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbRoom {
    pub id: Uuid,
    pub number: i32,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbBand {
    pub id: Uuid,
    pub name: String,
    pub color: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbUser {
    pub id: Uuid,
    pub username: String,
    pub name: String,
    pub hashed_password: String,
    pub role: String,
    pub band_id: Option<Uuid>,
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbSlot {
    pub id: Uuid,
    pub slot_start: DateTime<Utc>,
    pub slot_end: DateTime<Utc>,
    pub status: String,
    pub band_id: Option<Uuid>,
    pub room_id: Uuid,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbRequest {
    pub id: Uuid,
    pub user_id: Uuid,
    pub room_id: Uuid,
    pub status: String,
    pub slot_start: NaiveDateTime,
    pub slot_end: NaiveDateTime,
    pub request_date: DateTime<Utc>,
    pub response_date: Option<DateTime<Utc>>,
    pub slot_id: Option<Uuid>,
}

impl From<DbSlotConfig> for SlotConfig {
    fn from(row: DbSlotConfig) -> Self {
        Self {
            id: row.id,
            start_time: row.start_time,
            end_time: row.end_time,
            enabled: row.enabled,
        }
    }
}

impl From<DbRoom> for Room {
    fn from(row: DbRoom) -> Self {
        Self {
            id: row.id,
            number: row.number,
            name: row.name,
        }
    }
}

impl From<DbBand> for Band {
    fn from(row: DbBand) -> Self {
        Self {
            id: row.id,
            name: row.name,
            color: row.color,
        }
    }
}

impl TryFrom<DbUser> for User {
    type Error = BookingError;

    fn try_from(row: DbUser) -> Result<Self, Self::Error> {
        Ok(Self {
            id: row.id,
            username: row.username,
            name: row.name,
            hashed_password: row.hashed_password,
            role: row.role.parse()?,
            band_id: row.band_id,
            email: row.email,
        })
    }
}

impl TryFrom<DbSlot> for Slot {
    type Error = BookingError;

    fn try_from(row: DbSlot) -> Result<Self, Self::Error> {
        Ok(Self {
            id: row.id,
            slot_start: row.slot_start,
            slot_end: row.slot_end,
            status: row.status.parse()?,
            band_id: row.band_id,
            room_id: row.room_id,
        })
    }
}

impl TryFrom<DbRequest> for SlotRequest {
    type Error = BookingError;

    fn try_from(row: DbRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            id: row.id,
            user_id: row.user_id,
            room_id: row.room_id,
            status: row.status.parse()?,
            slot_start: row.slot_start,
            slot_end: row.slot_end,
            request_date: row.request_date,
            response_date: row.response_date,
            slot_id: row.slot_id,
        })
    }
}

/// Converts a batch of rows, failing on the first malformed one.
pub fn convert_all<R, T>(rows: Vec<R>) -> Result<Vec<T>, BookingError>
where
    T: TryFrom<R, Error = BookingError>,
{
    rows.into_iter().map(T::try_from).collect()
}
