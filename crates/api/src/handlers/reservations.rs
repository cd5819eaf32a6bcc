//! Public reservation endpoints.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use bistro_core::types::DbId;
use bistro_db::models::reservation::Reservation;

use super::local_now;
use crate::error::AppResult;
use crate::extract::{ApiJson, ApiPath};
use crate::services::reservations::{self, NewReservation};
use crate::state::AppState;

/// POST /api/reservations
pub async fn create(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<NewReservation>,
) -> AppResult<(StatusCode, Json<Reservation>)> {
    let reservation = reservations::create(state.store.as_ref(), input, local_now()).await?;
    Ok((StatusCode::CREATED, Json(reservation)))
}

/// GET /api/reservations/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<DbId>,
) -> AppResult<Json<Reservation>> {
    let reservation = reservations::get(state.store.as_ref(), id).await?;
    Ok(Json(reservation))
}

/// PUT /api/reservations/cancel/{id}
///
/// 400 when the reservation is already cancelled or completed.
pub async fn cancel(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<DbId>,
) -> AppResult<Json<Reservation>> {
    let reservation = reservations::cancel_by_client(state.store.as_ref(), id).await?;
    Ok(Json(reservation))
}
