//! Handlers for public client signup and login.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use bistro_db::models::client::ClientResponse;

use crate::error::AppResult;
use crate::extract::ApiJson;
use crate::services::clients::{self, LoginRequest, SignupRequest};
use crate::state::AppState;

/// POST /signup
///
/// Create a regular (non-admin) client account. 409 if the email is taken.
pub async fn signup(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<SignupRequest>,
) -> AppResult<(StatusCode, Json<ClientResponse>)> {
    let client = clients::signup(state.store.as_ref(), input).await?;
    Ok((StatusCode::CREATED, Json(ClientResponse::from(&client))))
}

/// POST /login
///
/// Check email and password; returns the client profile without credential.
pub async fn login(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<LoginRequest>,
) -> AppResult<Json<ClientResponse>> {
    let client = clients::login(state.store.as_ref(), input).await?;
    Ok(Json(ClientResponse::from(&client)))
}
