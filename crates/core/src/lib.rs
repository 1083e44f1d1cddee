//! # Jamroom Core
//!
//! Domain types and the pure scheduling logic of the room booking service.
//!
//! - [`ladder`] turns slot templates into the daily ladder of bookable windows
//! - [`grid`] maps booked slots onto a week of ladder cells
//! - [`offset`] converts display wall-clock times to stored instants
//! - [`state_machine`] decides what an approval status change does to the calendar
//! - [`workflow`] runs those decisions inside a unit of work
//!
//! Nothing in this crate talks to a database directly; persistence is reached
//! through the traits in [`repository`].

pub mod errors;
pub mod grid;
pub mod ladder;
pub mod models;
pub mod offset;
pub mod range;
pub mod repository;
pub mod state_machine;
pub mod views;
pub mod workflow;
