//! Shared-secret gate for the `/admin` routes.
//!
//! Callers present the admin token either as `X-Admin-Token: <token>` or as
//! `Authorization: Bearer <token>`; the former wins when both are sent.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use bistro_core::error::CoreError;

use crate::error::AppError;
use crate::state::AppState;

/// Header carrying the admin token.
pub const ADMIN_TOKEN_HEADER: &str = "x-admin-token";

/// Requires a valid admin token. Rejects with 403 Forbidden otherwise, or
/// with 500 when the server has no token configured.
///
/// ```ignore
/// async fn admin_only(_admin: RequireAdmin) -> AppResult<Json<()>> {
///     Ok(Json(()))
/// }
/// ```
pub struct RequireAdmin;

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Some(expected) = state.config.admin_token.as_deref() else {
            return Err(AppError::Core(CoreError::Internal(
                "ADMIN_TOKEN is not configured".into(),
            )));
        };

        match presented_token(parts) {
            Some(token) if token == expected => Ok(RequireAdmin),
            presented => {
                tracing::warn!(
                    token = presented.unwrap_or(""),
                    path = %parts.uri.path(),
                    "Rejected admin token"
                );
                Err(AppError::Core(CoreError::Forbidden(
                    "Invalid or missing admin token".into(),
                )))
            }
        }
    }
}

/// An empty `X-Admin-Token` counts as absent, so Bearer still applies.
fn presented_token(parts: &Parts) -> Option<&str> {
    if let Some(value) = parts
        .headers
        .get(ADMIN_TOKEN_HEADER)
        .filter(|v| !v.is_empty())
    {
        return value.to_str().ok();
    }
    parts
        .headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
}
