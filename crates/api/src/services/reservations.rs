//! Reservation lifecycle: client-facing booking and cancellation, plus the
//! admin listing and field-level edits.
//!
//! Every function takes the current local time explicitly so the temporal
//! rules can be exercised with a fixed clock.

use bistro_core::error::CoreError;
use bistro_core::reservation::{
    ensure_client_can_cancel, parse_status_filter, ReservationStatus, StatusFilter,
};
use bistro_core::types::{DbId, Timestamp};
use bistro_core::validation::{
    require_text, validate_booking_time, validate_email, validate_party_size,
    validate_rescheduled_time,
};
use bistro_db::models::reservation::{CreateReservation, Reservation};
use bistro_db::Store;
use chrono::{DateTime, FixedOffset};
use serde::Deserialize;

use crate::error::{AppError, AppResult};

const ENTITY: &str = "Reservation";

/// Body of a public booking request.
///
/// Fields the caller does not own (`id`, `status`, timestamps) are not part of
/// the type and are silently ignored when sent.
#[derive(Debug, Default, Deserialize)]
pub struct NewReservation {
    /// Signed-in client making the booking, if any.
    pub client_id: Option<DbId>,
    #[serde(default)]
    pub client_name: String,
    #[serde(default)]
    pub client_email: String,
    #[serde(default)]
    pub client_phone: String,
    #[serde(default)]
    pub num_guests: i32,
    pub reservation_date: Option<Timestamp>,
    #[serde(default)]
    pub special_notes: String,
    #[serde(default)]
    pub is_special_event: bool,
    #[serde(default)]
    pub event_description: String,
    #[serde(default)]
    pub wants_reminder: bool,
}

/// Admin edit: a present field is applied, an absent one is left untouched.
///
/// `status` stays a raw string so an unknown value surfaces as a validation
/// error rather than a deserialization failure.
#[derive(Debug, Default, Deserialize)]
pub struct ReservationPatch {
    pub status: Option<String>,
    pub client_name: Option<String>,
    pub client_email: Option<String>,
    pub client_phone: Option<String>,
    pub num_guests: Option<i32>,
    pub reservation_date: Option<Timestamp>,
    pub special_notes: Option<String>,
    pub is_special_event: Option<bool>,
    pub event_description: Option<String>,
    pub wants_reminder: Option<bool>,
}

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound { entity: ENTITY, id })
}

/// Validate and persist a new booking. Status always starts as `Pending`.
pub async fn create(
    store: &dyn Store,
    input: NewReservation,
    now: DateTime<FixedOffset>,
) -> AppResult<Reservation> {
    require_text("client_name", &input.client_name)?;
    require_text("client_email", &input.client_email)?;
    require_text("client_phone", &input.client_phone)?;
    validate_email(&input.client_email)?;
    validate_party_size(input.num_guests)?;
    let reservation_date = input.reservation_date.ok_or_else(|| {
        CoreError::Validation("reservation_date is required".into())
    })?;
    validate_booking_time(reservation_date, &now)?;

    if let Some(client_id) = input.client_id {
        if store.find_client(client_id).await?.is_none() {
            return Err(CoreError::Validation(format!("Client {client_id} does not exist")).into());
        }
    }

    let reservation = store
        .insert_reservation(&CreateReservation {
            client_id: input.client_id,
            client_name: input.client_name,
            client_email: input.client_email,
            client_phone: input.client_phone,
            num_guests: input.num_guests,
            reservation_date,
            status: ReservationStatus::Pending,
            special_notes: input.special_notes,
            is_special_event: input.is_special_event,
            event_description: input.event_description,
            wants_reminder: input.wants_reminder,
        })
        .await?;

    tracing::info!(
        reservation_id = %reservation.id,
        reservation_date = %reservation.reservation_date,
        num_guests = reservation.num_guests,
        "Reservation created"
    );
    Ok(reservation)
}

pub async fn get(store: &dyn Store, id: DbId) -> AppResult<Reservation> {
    store.find_reservation(id).await?.ok_or_else(|| not_found(id))
}

/// Client-side cancellation. A cancelled or completed booking cannot be
/// cancelled (again).
pub async fn cancel_by_client(store: &dyn Store, id: DbId) -> AppResult<Reservation> {
    let mut reservation = get(store, id).await?;
    ensure_client_can_cancel(reservation.status)?;

    reservation.status = ReservationStatus::Cancelled;
    let saved = store
        .save_reservation(&reservation)
        .await?
        .ok_or_else(|| not_found(id))?;

    tracing::info!(reservation_id = %id, "Reservation cancelled by client");
    Ok(saved)
}

/// Every reservation, date ascending, optionally restricted to one status.
///
/// `status_filter` of `None`, empty or `all` means unfiltered; a value that
/// is not a known status yields an empty list.
pub async fn admin_list(
    store: &dyn Store,
    status_filter: Option<&str>,
) -> AppResult<Vec<Reservation>> {
    let status = match parse_status_filter(status_filter) {
        StatusFilter::Any => None,
        StatusFilter::Only(status) => Some(status),
        StatusFilter::Nothing => return Ok(Vec::new()),
    };
    Ok(store.list_reservations(status).await?)
}

/// Apply an admin patch. Every present field is validated before any is
/// applied, so a rejected patch leaves the reservation untouched.
pub async fn admin_update(
    store: &dyn Store,
    id: DbId,
    patch: ReservationPatch,
    now: DateTime<FixedOffset>,
) -> AppResult<Reservation> {
    let current = get(store, id).await?;

    let status = patch
        .status
        .as_deref()
        .map(str::parse::<ReservationStatus>)
        .transpose()?;
    if let Some(email) = &patch.client_email {
        validate_email(email)?;
    }
    if let Some(num_guests) = patch.num_guests {
        validate_party_size(num_guests)?;
    }
    if let Some(at) = patch.reservation_date {
        validate_rescheduled_time(at, &now)?;
    }

    let updated = Reservation {
        status: status.unwrap_or(current.status),
        client_name: patch.client_name.unwrap_or(current.client_name),
        client_email: patch.client_email.unwrap_or(current.client_email),
        client_phone: patch.client_phone.unwrap_or(current.client_phone),
        num_guests: patch.num_guests.unwrap_or(current.num_guests),
        reservation_date: patch.reservation_date.unwrap_or(current.reservation_date),
        special_notes: patch.special_notes.unwrap_or(current.special_notes),
        is_special_event: patch.is_special_event.unwrap_or(current.is_special_event),
        event_description: patch.event_description.unwrap_or(current.event_description),
        wants_reminder: patch.wants_reminder.unwrap_or(current.wants_reminder),
        ..current
    };

    let saved = store
        .save_reservation(&updated)
        .await?
        .ok_or_else(|| not_found(id))?;

    tracing::info!(reservation_id = %id, status = %saved.status, "Reservation updated by admin");
    Ok(saved)
}

pub async fn admin_delete(store: &dyn Store, id: DbId) -> AppResult<()> {
    if !store.delete_reservation(id).await? {
        return Err(not_found(id));
    }
    tracing::info!(reservation_id = %id, "Reservation deleted");
    Ok(())
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use bistro_db::models::client::CreateClient;
    use bistro_db::{ClientStore, MemoryStore, ReservationStore};
    use chrono::{Duration, TimeZone, Utc};

    use super::*;

    /// 2025-06-17 14:30 at UTC+02:00.
    fn now() -> DateTime<FixedOffset> {
        FixedOffset::east_opt(2 * 3600)
            .unwrap()
            .with_ymd_and_hms(2025, 6, 17, 14, 30, 0)
            .unwrap()
    }

    fn booking(at: Timestamp) -> NewReservation {
        NewReservation {
            client_name: "Ada Lovelace".into(),
            client_email: "ada@example.com".into(),
            client_phone: "0600000000".into(),
            num_guests: 4,
            reservation_date: Some(at),
            special_notes: "Window seat".into(),
            ..Default::default()
        }
    }

    fn tomorrow() -> Timestamp {
        (now() + Duration::days(1)).with_timezone(&Utc)
    }

    async fn with_status(store: &MemoryStore, status: ReservationStatus) -> Reservation {
        let created = create(store, booking(tomorrow()), now()).await.unwrap();
        let patch = ReservationPatch {
            status: Some(status.as_str().into()),
            ..Default::default()
        };
        admin_update(store, created.id, patch, now()).await.unwrap()
    }

    #[tokio::test]
    async fn create_forces_pending_and_round_trips() {
        let store = MemoryStore::new();
        let at = Utc.with_ymd_and_hms(2025, 6, 17, 18, 0, 0).unwrap();
        let earlier = FixedOffset::east_opt(0)
            .unwrap()
            .with_ymd_and_hms(2025, 6, 17, 9, 0, 0)
            .unwrap();

        let created = create(&store, booking(at), earlier).await.unwrap();
        assert_eq!(created.status, ReservationStatus::Pending);
        assert_eq!(created.reservation_date, at);

        let fetched = get(&store, created.id).await.unwrap();
        assert_eq!(fetched, created);
    }

    #[tokio::test]
    async fn create_rejects_missing_and_malformed_fields() {
        let store = MemoryStore::new();

        let mut input = booking(tomorrow());
        input.client_name = "  ".into();
        assert_matches!(
            create(&store, input, now()).await,
            Err(AppError::Core(CoreError::Validation(msg))) if msg.contains("client_name")
        );

        let mut input = booking(tomorrow());
        input.client_email = "not-an-email".into();
        assert_matches!(
            create(&store, input, now()).await,
            Err(AppError::Core(CoreError::Validation(_)))
        );

        let mut input = booking(tomorrow());
        input.num_guests = 0;
        assert_matches!(
            create(&store, input, now()).await,
            Err(AppError::Core(CoreError::Validation(_)))
        );

        let mut input = booking(tomorrow());
        input.reservation_date = None;
        assert_matches!(
            create(&store, input, now()).await,
            Err(AppError::Core(CoreError::Validation(_)))
        );

        assert!(store.list_reservations(None).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn create_checks_day_then_time() {
        let store = MemoryStore::new();
        let yesterday = (now() - Duration::days(1)).with_timezone(&Utc);
        let past_hour_today = (now() - Duration::hours(1)).with_timezone(&Utc);

        assert_matches!(
            create(&store, booking(yesterday), now()).await,
            Err(AppError::Core(CoreError::Validation(_)))
        );
        assert_matches!(
            create(&store, booking(past_hour_today), now()).await,
            Err(AppError::Core(CoreError::Validation(_)))
        );
        assert!(create(&store, booking(tomorrow()), now()).await.is_ok());
    }

    #[tokio::test]
    async fn create_requires_known_client() {
        let store = MemoryStore::new();
        let mut input = booking(tomorrow());
        input.client_id = Some(uuid::Uuid::new_v4());
        assert_matches!(
            create(&store, input, now()).await,
            Err(AppError::Core(CoreError::Validation(_)))
        );

        let client = store
            .insert_client(&CreateClient {
                email: "ada@example.com".into(),
                last_name: "Lovelace".into(),
                first_name: "Ada".into(),
                phone: String::new(),
                address: String::new(),
                is_admin: false,
                password_hash: "hash".into(),
            })
            .await
            .unwrap();
        let mut input = booking(tomorrow());
        input.client_id = Some(client.id);
        let created = create(&store, input, now()).await.unwrap();
        assert_eq!(created.client_id, Some(client.id));
    }

    #[tokio::test]
    async fn open_reservations_cancel() {
        let store = MemoryStore::new();
        for status in [ReservationStatus::Pending, ReservationStatus::Confirmed] {
            let reservation = with_status(&store, status).await;
            let cancelled = cancel_by_client(&store, reservation.id).await.unwrap();
            assert_eq!(cancelled.status, ReservationStatus::Cancelled);
        }
    }

    #[tokio::test]
    async fn closed_reservations_refuse_cancel() {
        let store = MemoryStore::new();
        for status in [ReservationStatus::Cancelled, ReservationStatus::Completed] {
            let reservation = with_status(&store, status).await;
            assert_matches!(
                cancel_by_client(&store, reservation.id).await,
                Err(AppError::Core(CoreError::InvalidTransition(_)))
            );
            assert_eq!(get(&store, reservation.id).await.unwrap().status, status);
        }
    }

    #[tokio::test]
    async fn cancel_unknown_is_not_found() {
        let store = MemoryStore::new();
        assert_matches!(
            cancel_by_client(&store, uuid::Uuid::new_v4()).await,
            Err(AppError::Core(CoreError::NotFound { .. }))
        );
    }

    #[tokio::test]
    async fn unknown_status_leaves_reservation_untouched() {
        let store = MemoryStore::new();
        let created = create(&store, booking(tomorrow()), now()).await.unwrap();

        let patch = ReservationPatch {
            status: Some("Archived".into()),
            client_name: Some("Someone Else".into()),
            num_guests: Some(9),
            ..Default::default()
        };
        assert_matches!(
            admin_update(&store, created.id, patch, now()).await,
            Err(AppError::Core(CoreError::Validation(_)))
        );
        assert_eq!(get(&store, created.id).await.unwrap(), created);
    }

    #[tokio::test]
    async fn admin_update_applies_only_present_fields() {
        let store = MemoryStore::new();
        let created = create(&store, booking(tomorrow()), now()).await.unwrap();

        let patch = ReservationPatch {
            status: Some("Confirmed".into()),
            special_notes: Some(String::new()),
            wants_reminder: Some(true),
            ..Default::default()
        };
        let updated = admin_update(&store, created.id, patch, now()).await.unwrap();

        assert_eq!(updated.status, ReservationStatus::Confirmed);
        assert_eq!(updated.special_notes, "");
        assert!(updated.wants_reminder);
        assert_eq!(updated.client_name, created.client_name);
        assert_eq!(updated.num_guests, created.num_guests);
        assert_eq!(updated.reservation_date, created.reservation_date);
    }

    #[tokio::test]
    async fn admin_reschedule_uses_full_timestamp() {
        let store = MemoryStore::new();
        let created = create(&store, booking(tomorrow()), now()).await.unwrap();

        let earlier_today = (now() - Duration::minutes(5)).with_timezone(&Utc);
        let patch = ReservationPatch {
            reservation_date: Some(earlier_today),
            ..Default::default()
        };
        assert_matches!(
            admin_update(&store, created.id, patch, now()).await,
            Err(AppError::Core(CoreError::Validation(_)))
        );

        let later_today = (now() + Duration::minutes(5)).with_timezone(&Utc);
        let patch = ReservationPatch {
            reservation_date: Some(later_today),
            ..Default::default()
        };
        let updated = admin_update(&store, created.id, patch, now()).await.unwrap();
        assert_eq!(updated.reservation_date, later_today);
    }

    #[tokio::test]
    async fn admin_list_is_sorted_and_filtered() {
        let store = MemoryStore::new();
        for days in [5, 2, 9, 1] {
            let at = (now() + Duration::days(days)).with_timezone(&Utc);
            create(&store, booking(at), now()).await.unwrap();
        }
        let confirmed = with_status(&store, ReservationStatus::Confirmed).await;

        let all = admin_list(&store, None).await.unwrap();
        assert_eq!(all.len(), 5);
        assert!(all
            .windows(2)
            .all(|w| w[0].reservation_date <= w[1].reservation_date));

        assert_eq!(admin_list(&store, Some("all")).await.unwrap().len(), 5);

        let only = admin_list(&store, Some("Confirmed")).await.unwrap();
        assert_eq!(only.len(), 1);
        assert_eq!(only[0].id, confirmed.id);

        assert!(admin_list(&store, Some("Archived")).await.unwrap().is_empty());
        assert!(admin_list(&store, Some("confirmed")).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn admin_delete_is_hard_and_reports_missing() {
        let store = MemoryStore::new();
        let created = create(&store, booking(tomorrow()), now()).await.unwrap();

        admin_delete(&store, created.id).await.unwrap();
        assert_matches!(
            get(&store, created.id).await,
            Err(AppError::Core(CoreError::NotFound { .. }))
        );
        assert_matches!(
            admin_delete(&store, created.id).await,
            Err(AppError::Core(CoreError::NotFound { .. }))
        );
    }
}
