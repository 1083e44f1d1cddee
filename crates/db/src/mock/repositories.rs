use async_trait::async_trait;
use chrono::NaiveTime;
use jamroom_core::{
    errors::BookingResult,
    models::{
        band::{Band, NewBand},
        request::{NewSlotRequest, SlotRequest},
        room::Room,
        slot::Slot,
        slot_config::{SlotConfig, SlotConfigChanges},
        user::{NewUser, User},
    },
    repository::{
        BandRepository, BookingStore, BookingTransaction, RequestRepository, RoomRepository,
        SlotConfigRepository, SlotFilter, SlotRepository, UserRepository,
    },
};
use mockall::mock;
use uuid::Uuid;

// Mock repositories for testing
mock! {
    pub SlotConfigRepo {}

    #[async_trait]
    impl SlotConfigRepository for SlotConfigRepo {
        async fn list(&self) -> BookingResult<Vec<SlotConfig>>;
        async fn create(
            &self,
            start_time: NaiveTime,
            end_time: NaiveTime,
            enabled: bool,
        ) -> BookingResult<SlotConfig>;
        async fn update(&self, id: Uuid, changes: SlotConfigChanges) -> BookingResult<Option<SlotConfig>>;
        async fn delete(&self, id: Uuid) -> BookingResult<bool>;
    }
}

mock! {
    pub RoomRepo {}

    #[async_trait]
    impl RoomRepository for RoomRepo {
        async fn list(&self) -> BookingResult<Vec<Room>>;
        async fn find(&self, id: Uuid) -> BookingResult<Option<Room>>;
        async fn find_by_number(&self, number: i32) -> BookingResult<Option<Room>>;
    }
}

mock! {
    pub BandRepo {}

    #[async_trait]
    impl BandRepository for BandRepo {
        async fn list(&self) -> BookingResult<Vec<Band>>;
        async fn create(&self, band: NewBand) -> BookingResult<Band>;
    }
}

mock! {
    pub UserRepo {}

    #[async_trait]
    impl UserRepository for UserRepo {
        async fn list(&self) -> BookingResult<Vec<User>>;
        async fn find(&self, id: Uuid) -> BookingResult<Option<User>>;
        async fn find_by_username(&self, username: &str) -> BookingResult<Option<User>>;
        async fn create(&self, user: NewUser) -> BookingResult<User>;
    }
}

mock! {
    pub SlotRepo {}

    #[async_trait]
    impl SlotRepository for SlotRepo {
        async fn list(&self, filter: SlotFilter) -> BookingResult<Vec<Slot>>;
    }
}

mock! {
    pub RequestRepo {}

    #[async_trait]
    impl RequestRepository for RequestRepo {
        async fn list(&self, room_id: Option<Uuid>) -> BookingResult<Vec<SlotRequest>>;
        async fn find(&self, id: Uuid) -> BookingResult<Option<SlotRequest>>;
        async fn create(&self, request: NewSlotRequest) -> BookingResult<SlotRequest>;
    }
}

mock! {
    pub Store {}

    #[async_trait]
    impl BookingStore for Store {
        async fn begin(&self) -> BookingResult<Box<dyn BookingTransaction>>;
    }
}
