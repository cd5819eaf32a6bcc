//! Business operations behind the handlers.
//!
//! Services take the store (and image storage where needed) as plain
//! arguments so tests can drive them with a `MemoryStore`.

pub mod clients;
pub mod dishes;
pub mod reservations;
