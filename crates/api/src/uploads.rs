//! Storage for dish images uploaded through the admin API.
//!
//! Files live flat in the upload directory as `{uuid}.{ext}` and are served
//! under `{server_url}/uploads/`. Only URLs carrying that prefix are ever
//! removed from disk.

use std::path::PathBuf;

use bistro_core::error::CoreError;
use bistro_core::images::{managed_file_name, uploads_prefix};
use image::ImageFormat;
use uuid::Uuid;

use crate::error::{AppError, AppResult};

/// Where uploaded images are written and how they are linked.
#[derive(Debug, Clone)]
pub struct ImageStorage {
    dir: PathBuf,
    url_prefix: String,
    max_bytes: usize,
}

impl ImageStorage {
    pub fn new(dir: impl Into<PathBuf>, server_url: &str, max_bytes: usize) -> Self {
        Self {
            dir: dir.into(),
            url_prefix: uploads_prefix(server_url),
            max_bytes,
        }
    }

    /// Public URL prefix of managed images, ending in `/uploads/`.
    pub fn url_prefix(&self) -> &str {
        &self.url_prefix
    }

    /// Validate and write an uploaded image, returning its public URL.
    pub async fn save(&self, data: &[u8]) -> AppResult<String> {
        let ext = self.check(data)?;
        let file_name = format!("{}.{ext}", Uuid::new_v4());

        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| AppError::InternalError(e.to_string()))?;
        tokio::fs::write(self.dir.join(&file_name), data)
            .await
            .map_err(|e| AppError::InternalError(e.to_string()))?;

        tracing::info!(file = %file_name, bytes = data.len(), "Image stored");
        Ok(format!("{}{file_name}", self.url_prefix))
    }

    /// Remove the file behind `image_url` if it is server-managed.
    ///
    /// Returns whether a file was removed. External URLs are left alone and a
    /// failed removal is only logged; the database row is the source of truth.
    pub async fn remove_if_managed(&self, image_url: &str) -> bool {
        let Some(file_name) = managed_file_name(image_url, &self.url_prefix) else {
            return false;
        };
        match tokio::fs::remove_file(self.dir.join(file_name)).await {
            Ok(()) => {
                tracing::info!(file = %file_name, "Image removed");
                true
            }
            Err(e) => {
                tracing::warn!(file = %file_name, error = %e, "Failed to remove image file");
                false
            }
        }
    }

    /// Size and format checks. Returns the file extension to store under.
    fn check(&self, data: &[u8]) -> AppResult<&'static str> {
        if data.is_empty() {
            return Err(CoreError::Validation("Image file is empty".into()).into());
        }
        if data.len() > self.max_bytes {
            return Err(CoreError::Validation(format!(
                "Image exceeds the maximum size of {} bytes",
                self.max_bytes
            ))
            .into());
        }
        let ext = match image::guess_format(data) {
            Ok(ImageFormat::Png) => "png",
            Ok(ImageFormat::Jpeg) => "jpg",
            Ok(ImageFormat::Gif) => "gif",
            Ok(ImageFormat::WebP) => "webp",
            _ => {
                return Err(CoreError::Validation(
                    "Unsupported image format. Supported: PNG, JPEG, GIF, WebP".into(),
                )
                .into())
            }
        };
        Ok(ext)
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use assert_matches::assert_matches;

    use super::*;

    const PNG_HEADER: &[u8] = b"\x89PNG\r\n\x1a\n\0\0\0\rIHDR";

    fn storage(dir: &Path) -> ImageStorage {
        ImageStorage::new(dir, "http://localhost:8080", 64)
    }

    #[tokio::test]
    async fn saves_png_under_managed_url() {
        let tmp = tempfile::tempdir().unwrap();
        let images = storage(tmp.path());

        let url = images.save(PNG_HEADER).await.unwrap();
        assert!(url.starts_with("http://localhost:8080/uploads/"));
        assert!(url.ends_with(".png"));

        let name = url.rsplit('/').next().unwrap();
        assert!(tmp.path().join(name).exists());
    }

    #[tokio::test]
    async fn rejects_empty_oversized_and_unknown_payloads() {
        let tmp = tempfile::tempdir().unwrap();
        let images = storage(tmp.path());

        assert_matches!(
            images.save(b"").await,
            Err(AppError::Core(CoreError::Validation(_)))
        );
        let mut big = PNG_HEADER.to_vec();
        big.resize(65, 0);
        assert_matches!(
            images.save(&big).await,
            Err(AppError::Core(CoreError::Validation(_)))
        );
        assert_matches!(
            images.save(b"plain text, not an image").await,
            Err(AppError::Core(CoreError::Validation(_)))
        );
    }

    #[tokio::test]
    async fn removes_only_managed_files() {
        let tmp = tempfile::tempdir().unwrap();
        let images = storage(tmp.path());
        let url = images.save(PNG_HEADER).await.unwrap();

        assert!(!images.remove_if_managed("https://cdn.example.com/x.png").await);
        assert!(images.remove_if_managed(&url).await);
        // Already gone.
        assert!(!images.remove_if_managed(&url).await);
    }
}
