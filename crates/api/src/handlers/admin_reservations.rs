//! Admin reservation management.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use bistro_core::types::DbId;
use bistro_db::models::reservation::Reservation;
use serde::Deserialize;

use super::local_now;
use crate::error::AppResult;
use crate::extract::{ApiJson, ApiPath, ApiQuery};
use crate::middleware::admin::RequireAdmin;
use crate::services::reservations::{self, ReservationPatch};
use crate::state::AppState;

/// Query parameters for `GET /admin/reservations`.
#[derive(Debug, Deserialize)]
pub struct ListParams {
    /// One of the four statuses, or `all`.
    pub status: Option<String>,
}

/// GET /admin/reservations?status=
pub async fn list(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<ListParams>,
) -> AppResult<Json<Vec<Reservation>>> {
    let items = reservations::admin_list(state.store.as_ref(), params.status.as_deref()).await?;
    Ok(Json(items))
}

/// GET /admin/reservations/{id}
pub async fn get_by_id(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    ApiPath(id): ApiPath<DbId>,
) -> AppResult<Json<Reservation>> {
    let reservation = reservations::get(state.store.as_ref(), id).await?;
    Ok(Json(reservation))
}

/// PUT /admin/reservations/{id}
pub async fn update(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    ApiPath(id): ApiPath<DbId>,
    ApiJson(patch): ApiJson<ReservationPatch>,
) -> AppResult<Json<Reservation>> {
    let reservation =
        reservations::admin_update(state.store.as_ref(), id, patch, local_now()).await?;
    Ok(Json(reservation))
}

/// DELETE /admin/reservations/{id}
pub async fn delete(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    ApiPath(id): ApiPath<DbId>,
) -> AppResult<StatusCode> {
    reservations::admin_delete(state.store.as_ref(), id).await?;
    Ok(StatusCode::NO_CONTENT)
}
