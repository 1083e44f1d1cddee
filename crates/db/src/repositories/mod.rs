pub mod band;
pub mod request;
pub mod room;
pub mod slot;
pub mod slot_config;
pub mod user;
