#![allow(dead_code)]

use std::path::Path;
use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use tempfile::TempDir;
use tower::ServiceExt;

use bistro_api::config::ServerConfig;
use bistro_api::router::build_app_router;
use bistro_api::state::AppState;
use bistro_db::MemoryStore;

pub const ADMIN_TOKEN: &str = "test-admin-token";
pub const SERVER_URL: &str = "http://localhost:8080";
pub const UPLOADS_PREFIX: &str = "http://localhost:8080/uploads/";

/// Smallest byte sequence recognised as a PNG.
pub const PNG: &[u8] = b"\x89PNG\r\n\x1a\n\0\0\0\rIHDR";
/// Smallest byte sequence recognised as a JPEG.
pub const JPEG: &[u8] = b"\xff\xd8\xff\xe0\0\x10JFIF\0";

const BOUNDARY: &str = "bistro-test-boundary";

/// A router over a fresh in-memory store, with uploads in a temp directory.
///
/// The temp directory lives as long as this value.
pub struct TestApp {
    pub router: Router,
    pub upload_dir: TempDir,
}

impl TestApp {
    pub fn upload_path(&self) -> &Path {
        self.upload_dir.path()
    }

    /// Location on disk of a server-managed image URL.
    pub fn file_for(&self, image_url: &str) -> std::path::PathBuf {
        let name = image_url
            .strip_prefix(UPLOADS_PREFIX)
            .expect("image URL should be server-managed");
        self.upload_path().join(name)
    }
}

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config(upload_dir: &Path) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        admin_token: Some(ADMIN_TOKEN.to_string()),
        server_url: SERVER_URL.to_string(),
        upload_dir: upload_dir.to_path_buf(),
        database_url: None,
        max_image_bytes: 1024,
        request_timeout_secs: 30,
    }
}

/// Build the full application router with all middleware layers.
pub fn build_test_app() -> TestApp {
    build_test_app_with(|_| {})
}

/// Like [`build_test_app`], with a hook to adjust the configuration.
pub fn build_test_app_with(adjust: impl FnOnce(&mut ServerConfig)) -> TestApp {
    let upload_dir = tempfile::tempdir().expect("temp dir");
    let mut config = test_config(upload_dir.path());
    adjust(&mut config);

    let state = AppState::new(Arc::new(MemoryStore::new()), config.clone());
    TestApp {
        router: build_app_router(state, &config),
        upload_dir,
    }
}

pub async fn send(router: &Router, request: Request<Body>) -> Response<Body> {
    router.clone().oneshot(request).await.unwrap()
}

fn json_request(method: Method, uri: &str, body: serde_json::Value, admin: bool) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json");
    if admin {
        builder = builder.header("x-admin-token", ADMIN_TOKEN);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

fn empty_request(method: Method, uri: &str, admin: bool) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if admin {
        builder = builder.header("x-admin-token", ADMIN_TOKEN);
    }
    builder.body(Body::empty()).unwrap()
}

pub async fn get(router: &Router, uri: &str) -> Response<Body> {
    send(router, empty_request(Method::GET, uri, false)).await
}

pub async fn post_json(router: &Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(router, json_request(Method::POST, uri, body, false)).await
}

pub async fn put_json(router: &Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(router, json_request(Method::PUT, uri, body, false)).await
}

pub async fn put(router: &Router, uri: &str) -> Response<Body> {
    send(router, empty_request(Method::PUT, uri, false)).await
}

pub async fn admin_get(router: &Router, uri: &str) -> Response<Body> {
    send(router, empty_request(Method::GET, uri, true)).await
}

pub async fn admin_post_json(router: &Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(router, json_request(Method::POST, uri, body, true)).await
}

pub async fn admin_put_json(router: &Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(router, json_request(Method::PUT, uri, body, true)).await
}

pub async fn admin_delete(router: &Router, uri: &str) -> Response<Body> {
    send(router, empty_request(Method::DELETE, uri, true)).await
}

/// One part of a multipart form.
pub enum Part<'a> {
    Text(&'a str, &'a str),
    /// Field name, file name, content.
    File(&'a str, &'a str, &'a [u8]),
}

pub fn multipart_body(parts: &[Part<'_>]) -> Vec<u8> {
    let mut body = Vec::new();
    for part in parts {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        match part {
            Part::Text(name, value) => {
                body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n").as_bytes(),
                );
                body.extend_from_slice(value.as_bytes());
            }
            Part::File(name, file_name, data) => {
                body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{name}\"; filename=\"{file_name}\"\r\n\
                         Content-Type: application/octet-stream\r\n\r\n"
                    )
                    .as_bytes(),
                );
                body.extend_from_slice(data);
            }
        }
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

/// Send a multipart form, with or without the admin token.
pub async fn multipart(
    router: &Router,
    method: Method,
    uri: &str,
    parts: &[Part<'_>],
    admin: bool,
) -> Response<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(
            "content-type",
            format!("multipart/form-data; boundary={BOUNDARY}"),
        );
    if admin {
        builder = builder.header("x-admin-token", ADMIN_TOKEN);
    }
    send(router, builder.body(Body::from(multipart_body(parts))).unwrap()).await
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
