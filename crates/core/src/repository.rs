//! Persistence seams.
//!
//! One trait per entity for plain reads and admin CRUD, plus a unit of work
//! ([`BookingStore`] / [`BookingTransaction`]) for the multi-row writes that
//! must land together: request edits with their slot side effects, request
//! deletion and direct slot booking.

use async_trait::async_trait;
use chrono::{DateTime, NaiveTime, Utc};
use uuid::Uuid;

use crate::{
    errors::BookingResult,
    models::{
        band::{Band, NewBand},
        request::{NewSlotRequest, SlotRequest},
        room::Room,
        slot::{NewSlot, Slot},
        slot_config::{SlotConfig, SlotConfigChanges},
        user::{NewUser, User},
    },
    range::DateRange,
};

#[async_trait]
pub trait SlotConfigRepository: Send + Sync {
    /// All configs, enabled or not, ordered by start time.
    async fn list(&self) -> BookingResult<Vec<SlotConfig>>;
    async fn create(
        &self,
        start_time: NaiveTime,
        end_time: NaiveTime,
        enabled: bool,
    ) -> BookingResult<SlotConfig>;
    async fn update(&self, id: Uuid, changes: SlotConfigChanges) -> BookingResult<Option<SlotConfig>>;
    /// Returns `false` when nothing was deleted.
    async fn delete(&self, id: Uuid) -> BookingResult<bool>;
}

#[async_trait]
pub trait RoomRepository: Send + Sync {
    /// Ordered by room number.
    async fn list(&self) -> BookingResult<Vec<Room>>;
    async fn find(&self, id: Uuid) -> BookingResult<Option<Room>>;
    async fn find_by_number(&self, number: i32) -> BookingResult<Option<Room>>;
}

#[async_trait]
pub trait BandRepository: Send + Sync {
    async fn list(&self) -> BookingResult<Vec<Band>>;
    async fn create(&self, band: NewBand) -> BookingResult<Band>;
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn list(&self) -> BookingResult<Vec<User>>;
    async fn find(&self, id: Uuid) -> BookingResult<Option<User>>;
    async fn find_by_username(&self, username: &str) -> BookingResult<Option<User>>;
    async fn create(&self, user: NewUser) -> BookingResult<User>;
}

/// Filter for slot listings. Both parts are optional.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SlotFilter {
    /// Matches on `slot_start`, inclusive on both ends.
    pub range: Option<DateRange>,
    pub room_id: Option<Uuid>,
}

#[async_trait]
pub trait SlotRepository: Send + Sync {
    /// Ordered by `slot_start`.
    async fn list(&self, filter: SlotFilter) -> BookingResult<Vec<Slot>>;
}

#[async_trait]
pub trait RequestRepository: Send + Sync {
    /// Ordered by `request_date`, optionally restricted to one room.
    async fn list(&self, room_id: Option<Uuid>) -> BookingResult<Vec<SlotRequest>>;
    async fn find(&self, id: Uuid) -> BookingResult<Option<SlotRequest>>;
    /// Stores a new `pending` request.
    async fn create(&self, request: NewSlotRequest) -> BookingResult<SlotRequest>;
}

/// Opens units of work.
#[async_trait]
pub trait BookingStore: Send + Sync {
    async fn begin(&self) -> BookingResult<Box<dyn BookingTransaction>>;
}

/// Writes inside one unit of work. Nothing is visible to other readers until
/// [`BookingTransaction::commit`]; dropping the transaction discards it.
#[async_trait]
pub trait BookingTransaction: Send {
    async fn find_request(&mut self, id: Uuid) -> BookingResult<Option<SlotRequest>>;
    /// Writes every column of `request` back to its row.
    async fn save_request(&mut self, request: &SlotRequest) -> BookingResult<SlotRequest>;
    async fn delete_request(&mut self, id: Uuid) -> BookingResult<()>;

    /// `None` when the user does not exist, `Some(None)` when they have no band.
    async fn user_band(&mut self, user_id: Uuid) -> BookingResult<Option<Option<Uuid>>>;

    async fn find_slot(&mut self, id: Uuid) -> BookingResult<Option<Slot>>;
    async fn find_slot_at(
        &mut self,
        room_id: Uuid,
        slot_start: DateTime<Utc>,
    ) -> BookingResult<Option<Slot>>;
    /// First booked slot in `room_id` overlapping `[start, end)`, ignoring `exclude`.
    async fn find_booked_overlap(
        &mut self,
        room_id: Uuid,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        exclude: Option<Uuid>,
    ) -> BookingResult<Option<Slot>>;
    async fn insert_slot(&mut self, slot: NewSlot) -> BookingResult<Slot>;
    async fn save_slot(&mut self, slot: &Slot) -> BookingResult<Slot>;
    async fn delete_slot(&mut self, id: Uuid) -> BookingResult<()>;

    async fn commit(self: Box<Self>) -> BookingResult<()>;
}
