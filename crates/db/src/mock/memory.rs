use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, NaiveTime, Utc};
use jamroom_core::{
    errors::{BookingError, BookingResult},
    models::{
        band::{Band, NewBand, DEFAULT_BAND_COLOR},
        request::{NewSlotRequest, RequestStatus, SlotRequest},
        room::Room,
        slot::{NewSlot, Slot},
        slot_config::{SlotConfig, SlotConfigChanges},
        user::{NewUser, User, UserRole},
    },
    repository::{
        BandRepository, BookingStore, BookingTransaction, RequestRepository, RoomRepository,
        SlotConfigRepository, SlotFilter, SlotRepository, UserRepository,
    },
};
use tokio::sync::{Mutex, OwnedMutexGuard};
use uuid::Uuid;

#[derive(Debug, Clone, Default)]
struct Tables {
    slot_configs: Vec<SlotConfig>,
    rooms: Vec<Room>,
    bands: Vec<Band>,
    users: Vec<User>,
    slots: Vec<Slot>,
    requests: Vec<SlotRequest>,
}

/// Shared in-memory tables implementing every repository trait.
///
/// A transaction takes the table lock for its whole lifetime and works on a
/// copy, so writes only become visible on commit and units of work are
/// serialized.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    tables: Arc<Mutex<Tables>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn add_room(&self, number: i32, name: &str) -> Room {
        let room = Room {
            id: Uuid::new_v4(),
            number,
            name: name.to_string(),
        };
        let mut tables = self.tables.lock().await;
        tables.rooms.push(room.clone());
        tables.rooms.sort_by_key(|room| room.number);
        room
    }

    pub async fn add_band(&self, name: &str) -> Band {
        let band = Band {
            id: Uuid::new_v4(),
            name: name.to_string(),
            color: DEFAULT_BAND_COLOR.to_string(),
        };
        self.tables.lock().await.bands.push(band.clone());
        band
    }

    pub async fn add_user(&self, username: &str, name: &str, band_id: Option<Uuid>) -> User {
        let user = User {
            id: Uuid::new_v4(),
            username: username.to_string(),
            name: name.to_string(),
            hashed_password: String::new(),
            role: UserRole::User,
            band_id,
            email: format!("{username}@example.com"),
        };
        self.tables.lock().await.users.push(user.clone());
        user
    }

    pub async fn add_slot(&self, slot: NewSlot) -> Slot {
        let slot = slot_from(slot);
        self.tables.lock().await.slots.push(slot.clone());
        slot
    }

    pub async fn slots(&self) -> Vec<Slot> {
        self.tables.lock().await.slots.clone()
    }

    pub async fn requests(&self) -> Vec<SlotRequest> {
        self.tables.lock().await.requests.clone()
    }
}

fn slot_from(slot: NewSlot) -> Slot {
    Slot {
        id: Uuid::new_v4(),
        slot_start: slot.slot_start,
        slot_end: slot.slot_end,
        status: slot.status,
        band_id: slot.band_id,
        room_id: slot.room_id,
    }
}

#[async_trait]
impl SlotConfigRepository for InMemoryStore {
    async fn list(&self) -> BookingResult<Vec<SlotConfig>> {
        let mut configs = self.tables.lock().await.slot_configs.clone();
        configs.sort_by_key(|config| config.start_time);
        Ok(configs)
    }

    async fn create(
        &self,
        start_time: NaiveTime,
        end_time: NaiveTime,
        enabled: bool,
    ) -> BookingResult<SlotConfig> {
        let config = SlotConfig {
            id: Uuid::new_v4(),
            start_time,
            end_time,
            enabled,
        };
        self.tables.lock().await.slot_configs.push(config.clone());
        Ok(config)
    }

    async fn update(&self, id: Uuid, changes: SlotConfigChanges) -> BookingResult<Option<SlotConfig>> {
        let mut tables = self.tables.lock().await;
        Ok(tables
            .slot_configs
            .iter_mut()
            .find(|config| config.id == id)
            .map(|config| {
                config.apply(changes);
                config.clone()
            }))
    }

    async fn delete(&self, id: Uuid) -> BookingResult<bool> {
        let mut tables = self.tables.lock().await;
        let before = tables.slot_configs.len();
        tables.slot_configs.retain(|config| config.id != id);
        Ok(tables.slot_configs.len() != before)
    }
}

#[async_trait]
impl RoomRepository for InMemoryStore {
    async fn list(&self) -> BookingResult<Vec<Room>> {
        Ok(self.tables.lock().await.rooms.clone())
    }

    async fn find(&self, id: Uuid) -> BookingResult<Option<Room>> {
        let tables = self.tables.lock().await;
        Ok(tables.rooms.iter().find(|room| room.id == id).cloned())
    }

    async fn find_by_number(&self, number: i32) -> BookingResult<Option<Room>> {
        let tables = self.tables.lock().await;
        Ok(tables.rooms.iter().find(|room| room.number == number).cloned())
    }
}

#[async_trait]
impl BandRepository for InMemoryStore {
    async fn list(&self) -> BookingResult<Vec<Band>> {
        let mut bands = self.tables.lock().await.bands.clone();
        bands.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(bands)
    }

    async fn create(&self, band: NewBand) -> BookingResult<Band> {
        let band = Band {
            id: Uuid::new_v4(),
            name: band.name,
            color: band.color,
        };
        self.tables.lock().await.bands.push(band.clone());
        Ok(band)
    }
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn list(&self) -> BookingResult<Vec<User>> {
        let mut users = self.tables.lock().await.users.clone();
        users.sort_by(|a, b| a.username.cmp(&b.username));
        Ok(users)
    }

    async fn find(&self, id: Uuid) -> BookingResult<Option<User>> {
        let tables = self.tables.lock().await;
        Ok(tables.users.iter().find(|user| user.id == id).cloned())
    }

    async fn find_by_username(&self, username: &str) -> BookingResult<Option<User>> {
        let tables = self.tables.lock().await;
        Ok(tables
            .users
            .iter()
            .find(|user| user.username == username)
            .cloned())
    }

    async fn create(&self, user: NewUser) -> BookingResult<User> {
        let mut tables = self.tables.lock().await;
        if tables
            .users
            .iter()
            .any(|existing| existing.username == user.username || existing.email == user.email)
        {
            return Err(BookingError::Conflict("Record already exists".to_string()));
        }

        let user = User {
            id: Uuid::new_v4(),
            username: user.username,
            name: user.name,
            hashed_password: user.hashed_password,
            role: user.role,
            band_id: user.band_id,
            email: user.email,
        };
        tables.users.push(user.clone());
        Ok(user)
    }
}

#[async_trait]
impl SlotRepository for InMemoryStore {
    async fn list(&self, filter: SlotFilter) -> BookingResult<Vec<Slot>> {
        let tables = self.tables.lock().await;
        let mut slots: Vec<Slot> = tables
            .slots
            .iter()
            .filter(|slot| filter.range.is_none_or(|range| range.contains(slot.slot_start)))
            .filter(|slot| filter.room_id.is_none_or(|room_id| slot.room_id == room_id))
            .cloned()
            .collect();
        slots.sort_by_key(|slot| slot.slot_start);
        Ok(slots)
    }
}

#[async_trait]
impl RequestRepository for InMemoryStore {
    async fn list(&self, room_id: Option<Uuid>) -> BookingResult<Vec<SlotRequest>> {
        let tables = self.tables.lock().await;
        let mut requests: Vec<SlotRequest> = tables
            .requests
            .iter()
            .filter(|request| room_id.is_none_or(|room_id| request.room_id == room_id))
            .cloned()
            .collect();
        requests.sort_by_key(|request| request.request_date);
        Ok(requests)
    }

    async fn find(&self, id: Uuid) -> BookingResult<Option<SlotRequest>> {
        let tables = self.tables.lock().await;
        Ok(tables.requests.iter().find(|request| request.id == id).cloned())
    }

    async fn create(&self, request: NewSlotRequest) -> BookingResult<SlotRequest> {
        let request = SlotRequest {
            id: Uuid::new_v4(),
            user_id: request.user_id,
            room_id: request.room_id,
            status: RequestStatus::Pending,
            slot_start: request.slot_start,
            slot_end: request.slot_end,
            request_date: Utc::now(),
            response_date: None,
            slot_id: None,
        };
        self.tables.lock().await.requests.push(request.clone());
        Ok(request)
    }
}

#[async_trait]
impl BookingStore for InMemoryStore {
    async fn begin(&self) -> BookingResult<Box<dyn BookingTransaction>> {
        let guard = self.tables.clone().lock_owned().await;
        let working = guard.clone();
        Ok(Box::new(InMemoryTransaction { guard, working }))
    }
}

struct InMemoryTransaction {
    guard: OwnedMutexGuard<Tables>,
    working: Tables,
}

#[async_trait]
impl BookingTransaction for InMemoryTransaction {
    async fn find_request(&mut self, id: Uuid) -> BookingResult<Option<SlotRequest>> {
        Ok(self
            .working
            .requests
            .iter()
            .find(|request| request.id == id)
            .cloned())
    }

    async fn save_request(&mut self, request: &SlotRequest) -> BookingResult<SlotRequest> {
        let row = self
            .working
            .requests
            .iter_mut()
            .find(|existing| existing.id == request.id)
            .ok_or_else(|| BookingError::NotFound(format!("Request with ID {} not found", request.id)))?;
        *row = request.clone();
        Ok(request.clone())
    }

    async fn delete_request(&mut self, id: Uuid) -> BookingResult<()> {
        self.working.requests.retain(|request| request.id != id);
        Ok(())
    }

    async fn user_band(&mut self, user_id: Uuid) -> BookingResult<Option<Option<Uuid>>> {
        Ok(self
            .working
            .users
            .iter()
            .find(|user| user.id == user_id)
            .map(|user| user.band_id))
    }

    async fn find_slot(&mut self, id: Uuid) -> BookingResult<Option<Slot>> {
        Ok(self.working.slots.iter().find(|slot| slot.id == id).cloned())
    }

    async fn find_slot_at(
        &mut self,
        room_id: Uuid,
        slot_start: DateTime<Utc>,
    ) -> BookingResult<Option<Slot>> {
        Ok(self
            .working
            .slots
            .iter()
            .find(|slot| slot.room_id == room_id && slot.slot_start == slot_start)
            .cloned())
    }

    async fn find_booked_overlap(
        &mut self,
        room_id: Uuid,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        exclude: Option<Uuid>,
    ) -> BookingResult<Option<Slot>> {
        Ok(self
            .working
            .slots
            .iter()
            .filter(|slot| slot.room_id == room_id && slot.is_booked())
            .filter(|slot| Some(slot.id) != exclude)
            .filter(|slot| slot.overlaps(start, end))
            .min_by_key(|slot| slot.slot_start)
            .cloned())
    }

    async fn insert_slot(&mut self, slot: NewSlot) -> BookingResult<Slot> {
        let slot = slot_from(slot);
        self.working.slots.push(slot.clone());
        Ok(slot)
    }

    async fn save_slot(&mut self, slot: &Slot) -> BookingResult<Slot> {
        let row = self
            .working
            .slots
            .iter_mut()
            .find(|existing| existing.id == slot.id)
            .ok_or_else(|| BookingError::NotFound(format!("Slot with ID {} not found", slot.id)))?;
        *row = slot.clone();
        Ok(slot.clone())
    }

    async fn delete_slot(&mut self, id: Uuid) -> BookingResult<()> {
        self.working.slots.retain(|slot| slot.id != id);
        for request in self.working.requests.iter_mut() {
            if request.slot_id == Some(id) {
                request.slot_id = None;
            }
        }
        Ok(())
    }

    async fn commit(self: Box<Self>) -> BookingResult<()> {
        let InMemoryTransaction { mut guard, working } = *self;
        *guard = working;
        Ok(())
    }
}
