use axum::routing::get;
use axum::Router;

use crate::handlers::dishes;
use crate::state::AppState;

/// Public, unfiltered dish catalog.
pub fn router() -> Router<AppState> {
    Router::new().route("/dishes", get(dishes::list))
}
