pub mod band;
pub mod grid;
pub mod health;
pub mod request;
pub mod room;
pub mod slot;
pub mod slot_config;
pub mod user;
