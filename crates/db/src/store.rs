//! Postgres-backed implementations of the repository traits.

use async_trait::async_trait;
use chrono::{DateTime, NaiveTime, Utc};
use jamroom_core::{
    errors::{BookingError, BookingResult},
    models::{
        band::{Band, NewBand},
        request::{NewSlotRequest, SlotRequest},
        room::Room,
        slot::{NewSlot, Slot},
        slot_config::{SlotConfig, SlotConfigChanges},
        user::{NewUser, User},
    },
    repository::{
        BandRepository, BookingStore, BookingTransaction, RequestRepository, RoomRepository,
        SlotConfigRepository, SlotFilter, SlotRepository, UserRepository,
    },
};
use sqlx::{Postgres, Transaction};
use tracing::warn;
use uuid::Uuid;

use crate::{
    models::convert_all,
    repositories::{band, request, room, slot, slot_config, user},
    DbPool,
};

const SERIALIZATION_FAILURE: &str = "40001";
const UNIQUE_VIOLATION: &str = "23505";

/// Maps a repository failure onto the domain error. Serialization failures
/// and unique violations are the caller's conflict, not a server fault.
pub fn database_error(report: eyre::Report) -> BookingError {
    let code = report
        .downcast_ref::<sqlx::Error>()
        .and_then(|err| err.as_database_error())
        .and_then(|err| err.code())
        .map(|code| code.into_owned());

    match code.as_deref() {
        Some(SERIALIZATION_FAILURE) => {
            warn!("Serializable transaction aborted by a concurrent write");
            BookingError::Conflict("Concurrent update, please retry".to_string())
        }
        Some(UNIQUE_VIOLATION) => BookingError::Conflict("Record already exists".to_string()),
        _ => BookingError::Database(report),
    }
}

#[derive(Clone)]
pub struct PgSlotConfigRepository {
    pool: DbPool,
}

impl PgSlotConfigRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SlotConfigRepository for PgSlotConfigRepository {
    async fn list(&self) -> BookingResult<Vec<SlotConfig>> {
        let rows = slot_config::list_slot_configs(&self.pool)
            .await
            .map_err(database_error)?;
        Ok(rows.into_iter().map(SlotConfig::from).collect())
    }

    async fn create(
        &self,
        start_time: NaiveTime,
        end_time: NaiveTime,
        enabled: bool,
    ) -> BookingResult<SlotConfig> {
        let row = slot_config::create_slot_config(&self.pool, start_time, end_time, enabled)
            .await
            .map_err(database_error)?;
        Ok(row.into())
    }

    async fn update(&self, id: Uuid, changes: SlotConfigChanges) -> BookingResult<Option<SlotConfig>> {
        let row = slot_config::update_slot_config(
            &self.pool,
            id,
            changes.start_time,
            changes.end_time,
            changes.enabled,
        )
        .await
        .map_err(database_error)?;
        Ok(row.map(SlotConfig::from))
    }

    async fn delete(&self, id: Uuid) -> BookingResult<bool> {
        slot_config::delete_slot_config(&self.pool, id)
            .await
            .map_err(database_error)
    }
}

#[derive(Clone)]
pub struct PgRoomRepository {
    pool: DbPool,
}

impl PgRoomRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RoomRepository for PgRoomRepository {
    async fn list(&self) -> BookingResult<Vec<Room>> {
        let rows = room::list_rooms(&self.pool).await.map_err(database_error)?;
        Ok(rows.into_iter().map(Room::from).collect())
    }

    async fn find(&self, id: Uuid) -> BookingResult<Option<Room>> {
        let row = room::get_room_by_id(&self.pool, id)
            .await
            .map_err(database_error)?;
        Ok(row.map(Room::from))
    }

    async fn find_by_number(&self, number: i32) -> BookingResult<Option<Room>> {
        let row = room::get_room_by_number(&self.pool, number)
            .await
            .map_err(database_error)?;
        Ok(row.map(Room::from))
    }
}

#[derive(Clone)]
pub struct PgBandRepository {
    pool: DbPool,
}

impl PgBandRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BandRepository for PgBandRepository {
    async fn list(&self) -> BookingResult<Vec<Band>> {
        let rows = band::list_bands(&self.pool).await.map_err(database_error)?;
        Ok(rows.into_iter().map(Band::from).collect())
    }

    async fn create(&self, new_band: NewBand) -> BookingResult<Band> {
        let row = band::create_band(&self.pool, &new_band.name, &new_band.color)
            .await
            .map_err(database_error)?;
        Ok(row.into())
    }
}

#[derive(Clone)]
pub struct PgUserRepository {
    pool: DbPool,
}

impl PgUserRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn list(&self) -> BookingResult<Vec<User>> {
        let rows = user::list_users(&self.pool).await.map_err(database_error)?;
        convert_all(rows)
    }

    async fn find(&self, id: Uuid) -> BookingResult<Option<User>> {
        user::get_user_by_id(&self.pool, id)
            .await
            .map_err(database_error)?
            .map(User::try_from)
            .transpose()
    }

    async fn find_by_username(&self, username: &str) -> BookingResult<Option<User>> {
        user::get_user_by_username(&self.pool, username)
            .await
            .map_err(database_error)?
            .map(User::try_from)
            .transpose()
    }

    async fn create(&self, new_user: NewUser) -> BookingResult<User> {
        let row = user::create_user(&self.pool, &new_user)
            .await
            .map_err(database_error)?;
        User::try_from(row)
    }
}

#[derive(Clone)]
pub struct PgSlotRepository {
    pool: DbPool,
}

impl PgSlotRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SlotRepository for PgSlotRepository {
    async fn list(&self, filter: SlotFilter) -> BookingResult<Vec<Slot>> {
        let (from, to) = match filter.range {
            Some(range) => (Some(range.start()), Some(range.end())),
            None => (None, None),
        };
        let rows = slot::list_slots(&self.pool, from, to, filter.room_id)
            .await
            .map_err(database_error)?;
        convert_all(rows)
    }
}

#[derive(Clone)]
pub struct PgRequestRepository {
    pool: DbPool,
}

impl PgRequestRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RequestRepository for PgRequestRepository {
    async fn list(&self, room_id: Option<Uuid>) -> BookingResult<Vec<SlotRequest>> {
        let rows = request::list_requests(&self.pool, room_id)
            .await
            .map_err(database_error)?;
        convert_all(rows)
    }

    async fn find(&self, id: Uuid) -> BookingResult<Option<SlotRequest>> {
        request::get_request_by_id(&self.pool, id)
            .await
            .map_err(database_error)?
            .map(SlotRequest::try_from)
            .transpose()
    }

    async fn create(&self, new_request: NewSlotRequest) -> BookingResult<SlotRequest> {
        let row = request::create_request(&self.pool, &new_request)
            .await
            .map_err(database_error)?;
        SlotRequest::try_from(row)
    }
}

/// Opens SERIALIZABLE transactions so concurrent approvals cannot both
/// pass the overlap check.
#[derive(Clone)]
pub struct PgBookingStore {
    pool: DbPool,
}

impl PgBookingStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BookingStore for PgBookingStore {
    async fn begin(&self) -> BookingResult<Box<dyn BookingTransaction>> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|err| database_error(err.into()))?;

        sqlx::query("SET TRANSACTION ISOLATION LEVEL SERIALIZABLE")
            .execute(&mut *tx)
            .await
            .map_err(|err| database_error(err.into()))?;

        Ok(Box::new(PgBookingTransaction { tx }))
    }
}

pub struct PgBookingTransaction {
    tx: Transaction<'static, Postgres>,
}

#[async_trait]
impl BookingTransaction for PgBookingTransaction {
    async fn find_request(&mut self, id: Uuid) -> BookingResult<Option<SlotRequest>> {
        request::get_request_by_id(&mut *self.tx, id)
            .await
            .map_err(database_error)?
            .map(SlotRequest::try_from)
            .transpose()
    }

    async fn save_request(&mut self, saved: &SlotRequest) -> BookingResult<SlotRequest> {
        let row = request::update_request(&mut *self.tx, saved)
            .await
            .map_err(database_error)?;
        SlotRequest::try_from(row)
    }

    async fn delete_request(&mut self, id: Uuid) -> BookingResult<()> {
        request::delete_request(&mut *self.tx, id)
            .await
            .map_err(database_error)
    }

    async fn user_band(&mut self, user_id: Uuid) -> BookingResult<Option<Option<Uuid>>> {
        let row = user::get_user_by_id(&mut *self.tx, user_id)
            .await
            .map_err(database_error)?;
        Ok(row.map(|user| user.band_id))
    }

    async fn find_slot(&mut self, id: Uuid) -> BookingResult<Option<Slot>> {
        slot::get_slot_by_id(&mut *self.tx, id)
            .await
            .map_err(database_error)?
            .map(Slot::try_from)
            .transpose()
    }

    async fn find_slot_at(
        &mut self,
        room_id: Uuid,
        slot_start: DateTime<Utc>,
    ) -> BookingResult<Option<Slot>> {
        slot::get_slot_at(&mut *self.tx, room_id, slot_start)
            .await
            .map_err(database_error)?
            .map(Slot::try_from)
            .transpose()
    }

    async fn find_booked_overlap(
        &mut self,
        room_id: Uuid,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        exclude: Option<Uuid>,
    ) -> BookingResult<Option<Slot>> {
        slot::find_booked_overlap(&mut *self.tx, room_id, start, end, exclude)
            .await
            .map_err(database_error)?
            .map(Slot::try_from)
            .transpose()
    }

    async fn insert_slot(&mut self, new_slot: NewSlot) -> BookingResult<Slot> {
        let row = slot::create_slot(&mut *self.tx, &new_slot)
            .await
            .map_err(database_error)?;
        Slot::try_from(row)
    }

    async fn save_slot(&mut self, saved: &Slot) -> BookingResult<Slot> {
        let row = slot::update_slot(&mut *self.tx, saved)
            .await
            .map_err(database_error)?;
        Slot::try_from(row)
    }

    async fn delete_slot(&mut self, id: Uuid) -> BookingResult<()> {
        slot::delete_slot(&mut *self.tx, id)
            .await
            .map_err(database_error)
    }

    async fn commit(self: Box<Self>) -> BookingResult<()> {
        self.tx
            .commit()
            .await
            .map_err(|err| database_error(err.into()))
    }
}
