use axum::http::{Method, Uri};

use crate::error::AppError;

/// Any path no route claims.
pub async fn not_found(uri: Uri) -> AppError {
    AppError::RouteNotFound(uri.path().to_string())
}

/// A known path hit with a method it does not serve.
pub async fn method_not_allowed(method: Method) -> AppError {
    AppError::MethodNotAllowed(method.to_string())
}
