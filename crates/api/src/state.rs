use std::sync::Arc;

use bistro_db::Store;

use crate::config::ServerConfig;
use crate::uploads::ImageStorage;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Persistence gateway (PostgreSQL or in-memory).
    pub store: Arc<dyn Store>,
    /// Server configuration (admin token, base URL, limits).
    pub config: Arc<ServerConfig>,
    /// Upload directory for dish images.
    pub images: ImageStorage,
}

impl AppState {
    pub fn new(store: Arc<dyn Store>, config: ServerConfig) -> Self {
        let images = ImageStorage::new(
            config.upload_dir.clone(),
            &config.server_url,
            config.max_image_bytes,
        );
        Self {
            store,
            config: Arc::new(config),
            images,
        }
    }
}
