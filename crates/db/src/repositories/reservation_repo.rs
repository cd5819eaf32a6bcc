//! Repository for the `reservations` table.

use bistro_core::reservation::ReservationStatus;
use bistro_core::types::DbId;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::reservation::{CreateReservation, Reservation};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, client_id, client_name, client_email, client_phone, num_guests, \
                       reservation_date, status, special_notes, is_special_event, \
                       event_description, wants_reminder, created_at, updated_at";

/// Provides CRUD operations for reservations.
pub struct ReservationRepo;

impl ReservationRepo {
    /// Insert a new reservation with a fresh UUID, returning the created row.
    pub async fn create(
        pool: &PgPool,
        input: &CreateReservation,
    ) -> Result<Reservation, sqlx::Error> {
        let query = format!(
            "INSERT INTO reservations (id, client_id, client_name, client_email, client_phone,
                num_guests, reservation_date, status, special_notes, is_special_event,
                event_description, wants_reminder)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Reservation>(&query)
            .bind(Uuid::new_v4())
            .bind(input.client_id)
            .bind(&input.client_name)
            .bind(&input.client_email)
            .bind(&input.client_phone)
            .bind(input.num_guests)
            .bind(input.reservation_date)
            .bind(input.status.as_str())
            .bind(&input.special_notes)
            .bind(input.is_special_event)
            .bind(&input.event_description)
            .bind(input.wants_reminder)
            .fetch_one(pool)
            .await
    }

    /// Find a reservation by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Reservation>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM reservations WHERE id = $1");
        sqlx::query_as::<_, Reservation>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List reservations by date ascending, optionally restricted to one status.
    pub async fn list(
        pool: &PgPool,
        status: Option<ReservationStatus>,
    ) -> Result<Vec<Reservation>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM reservations
             WHERE ($1::TEXT IS NULL OR status = $1)
             ORDER BY reservation_date ASC, created_at ASC"
        );
        sqlx::query_as::<_, Reservation>(&query)
            .bind(status.map(ReservationStatus::as_str))
            .fetch_all(pool)
            .await
    }

    /// Overwrite every mutable column of an existing reservation.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn save(
        pool: &PgPool,
        reservation: &Reservation,
    ) -> Result<Option<Reservation>, sqlx::Error> {
        let query = format!(
            "UPDATE reservations SET
                client_id = $2,
                client_name = $3,
                client_email = $4,
                client_phone = $5,
                num_guests = $6,
                reservation_date = $7,
                status = $8,
                special_notes = $9,
                is_special_event = $10,
                event_description = $11,
                wants_reminder = $12,
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Reservation>(&query)
            .bind(reservation.id)
            .bind(reservation.client_id)
            .bind(&reservation.client_name)
            .bind(&reservation.client_email)
            .bind(&reservation.client_phone)
            .bind(reservation.num_guests)
            .bind(reservation.reservation_date)
            .bind(reservation.status.as_str())
            .bind(&reservation.special_notes)
            .bind(reservation.is_special_event)
            .bind(&reservation.event_description)
            .bind(reservation.wants_reminder)
            .fetch_optional(pool)
            .await
    }

    /// Hard-delete a reservation. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM reservations WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
