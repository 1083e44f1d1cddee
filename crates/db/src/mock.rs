//! Test doubles: mockall mocks for single-call expectations and an
//! in-memory store for whole-workflow tests.

pub mod memory;
pub mod repositories;

pub use memory::InMemoryStore;
