//! Route definitions for the `/admin` area. Every handler requires the
//! admin token via [`RequireAdmin`](crate::middleware::admin::RequireAdmin).

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::{admin_clients, admin_reservations, dishes};
use crate::state::AppState;

/// Room for the text fields and multipart framing around an image.
const FORM_OVERHEAD_BYTES: usize = 64 * 1024;

/// Routes mounted at `/admin`.
///
/// ```text
/// GET                /reservations?status=
/// GET, PUT, DELETE   /reservations/{id}
/// GET, POST          /clients
/// GET, PUT, DELETE   /clients/{id}
/// POST               /dishes          (multipart)
/// PUT, DELETE        /dishes/{id}     (multipart on PUT)
/// ```
pub fn router(max_image_bytes: usize) -> Router<AppState> {
    let dish_routes = Router::new()
        .route("/dishes", post(dishes::create))
        .route("/dishes/{id}", put(dishes::update).delete(dishes::delete))
        .layer(DefaultBodyLimit::max(
            max_image_bytes.saturating_add(FORM_OVERHEAD_BYTES),
        ));

    Router::new()
        .route("/reservations", get(admin_reservations::list))
        .route(
            "/reservations/{id}",
            get(admin_reservations::get_by_id)
                .put(admin_reservations::update)
                .delete(admin_reservations::delete),
        )
        .route(
            "/clients",
            get(admin_clients::list).post(admin_clients::create),
        )
        .route(
            "/clients/{id}",
            get(admin_clients::get_by_id)
                .put(admin_clients::update)
                .delete(admin_clients::delete),
        )
        .merge(dish_routes)
}
