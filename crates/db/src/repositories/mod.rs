//! sqlx repositories, one per table.
//!
//! Each repository is a unit struct with associated async functions taking
//! a `&PgPool`, returning raw `sqlx::Error`s. [`PgStore`](crate::PgStore)
//! adapts them to the [`Store`](crate::Store) traits.

pub mod client_repo;
pub mod dish_repo;
pub mod reservation_repo;

pub use client_repo::ClientRepo;
pub use dish_repo::DishRepo;
pub use reservation_repo::ReservationRepo;
