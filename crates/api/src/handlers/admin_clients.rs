//! Admin client management. Responses never carry the password hash.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use bistro_core::types::DbId;
use bistro_db::models::client::ClientResponse;

use crate::error::AppResult;
use crate::extract::{ApiJson, ApiPath};
use crate::middleware::admin::RequireAdmin;
use crate::services::clients::{self, ClientPatch, NewClient};
use crate::state::AppState;

/// GET /admin/clients
pub async fn list(
    _admin: RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<ClientResponse>>> {
    let items = clients::list(state.store.as_ref()).await?;
    Ok(Json(items.iter().map(ClientResponse::from).collect()))
}

/// POST /admin/clients
pub async fn create(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    ApiJson(input): ApiJson<NewClient>,
) -> AppResult<(StatusCode, Json<ClientResponse>)> {
    let client = clients::admin_create(state.store.as_ref(), input).await?;
    Ok((StatusCode::CREATED, Json(ClientResponse::from(&client))))
}

/// GET /admin/clients/{id}
pub async fn get_by_id(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    ApiPath(id): ApiPath<DbId>,
) -> AppResult<Json<ClientResponse>> {
    let client = clients::get(state.store.as_ref(), id).await?;
    Ok(Json(ClientResponse::from(&client)))
}

/// PUT /admin/clients/{id}
pub async fn update(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    ApiPath(id): ApiPath<DbId>,
    ApiJson(patch): ApiJson<ClientPatch>,
) -> AppResult<Json<ClientResponse>> {
    let client = clients::admin_update(state.store.as_ref(), id, patch).await?;
    Ok(Json(ClientResponse::from(&client)))
}

/// DELETE /admin/clients/{id}
pub async fn delete(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    ApiPath(id): ApiPath<DbId>,
) -> AppResult<StatusCode> {
    clients::admin_delete(state.store.as_ref(), id).await?;
    Ok(StatusCode::NO_CONTENT)
}
