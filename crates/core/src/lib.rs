//! Domain rules for the restaurant backend.
//!
//! Everything here is pure: no I/O, no clock reads. Callers pass the current
//! instant explicitly so the time-based rules stay deterministic under test.

pub mod dish;
pub mod error;
pub mod images;
pub mod reservation;
pub mod types;
pub mod validation;
