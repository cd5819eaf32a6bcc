//! Reservation entity model and DTOs.

use bistro_core::reservation::ReservationStatus;
use bistro_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// Full row from the `reservations` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct Reservation {
    pub id: DbId,
    /// Owning client, if the booking was made by a signed-in client.
    pub client_id: Option<DbId>,
    pub client_name: String,
    pub client_email: String,
    pub client_phone: String,
    pub num_guests: i32,
    pub reservation_date: Timestamp,
    #[sqlx(try_from = "String")]
    pub status: ReservationStatus,
    pub special_notes: String,
    pub is_special_event: bool,
    pub event_description: String,
    pub wants_reminder: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Validated input for inserting a reservation.
#[derive(Debug, Clone)]
pub struct CreateReservation {
    pub client_id: Option<DbId>,
    pub client_name: String,
    pub client_email: String,
    pub client_phone: String,
    pub num_guests: i32,
    pub reservation_date: Timestamp,
    pub status: ReservationStatus,
    pub special_notes: String,
    pub is_special_event: bool,
    pub event_description: String,
    pub wants_reminder: bool,
}
