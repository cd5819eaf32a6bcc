pub mod admin_clients;
pub mod admin_reservations;
pub mod auth;
pub mod dishes;
pub mod fallback;
pub mod health;
pub mod reservations;

use chrono::{DateTime, FixedOffset, Local};

/// Current time in the server's local offset, which defines "today" for
/// booking validation.
pub(crate) fn local_now() -> DateTime<FixedOffset> {
    Local::now().fixed_offset()
}
