pub mod client;
pub mod dish;
pub mod reservation;
