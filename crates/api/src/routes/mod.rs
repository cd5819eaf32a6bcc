pub mod admin;
pub mod auth;
pub mod dishes;
pub mod health;
pub mod reservations;

use axum::Router;
use bistro_core::images::UPLOADS_ROUTE;
use tower_http::services::ServeDir;

use crate::config::ServerConfig;
use crate::handlers::fallback;
use crate::state::AppState;

/// Build every application route (no middleware).
///
/// ```text
/// GET        /health
/// POST       /signup, /login
/// *          /api/reservations/...   public booking
/// GET        /dishes                 public catalog
/// *          /admin/...              admin token required
/// GET        /uploads/{file}         stored dish images
/// ```
///
/// Unknown paths and wrong methods answer with the usual JSON error body.
pub fn app_routes(config: &ServerConfig) -> Router<AppState> {
    Router::new()
        .merge(health::router())
        .merge(auth::router())
        .nest("/api/reservations", reservations::router())
        .merge(dishes::router())
        .nest("/admin", admin::router(config.max_image_bytes))
        .nest_service(UPLOADS_ROUTE, ServeDir::new(&config.upload_dir))
        .method_not_allowed_fallback(fallback::method_not_allowed)
        .fallback(fallback::not_found)
}
