//! Route definitions for the public `/api/reservations` resource.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::reservations;
use crate::state::AppState;

/// Routes mounted at `/api/reservations`.
///
/// ```text
/// POST /              -> create
/// GET  /{id}          -> get_by_id
/// PUT  /cancel/{id}   -> cancel
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(reservations::create))
        .route("/{id}", get(reservations::get_by_id))
        .route("/cancel/{id}", put(reservations::cancel))
}
