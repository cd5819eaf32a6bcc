//! Dish catalog endpoints. Reads are public; writes are admin-only and take a
//! multipart form so an image can travel with the text fields.

use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::Json;
use bistro_core::types::DbId;
use bistro_db::models::dish::Dish;

use crate::error::{AppError, AppResult};
use crate::extract::{ApiMultipart, ApiPath};
use crate::middleware::admin::RequireAdmin;
use crate::services::dishes::{self, DishForm};
use crate::state::AppState;

/// Collect the known form fields; unknown fields are ignored.
///
/// An `image` part with neither a file name nor content (what browsers send
/// for an empty file input) counts as no upload.
async fn read_form(mut multipart: Multipart) -> AppResult<DishForm> {
    let mut form = DishForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            "image" => {
                let has_file_name = field.file_name().is_some_and(|f| !f.is_empty());
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;
                if has_file_name || !data.is_empty() {
                    form.image = Some(data.to_vec());
                }
            }
            "name" | "category" | "price" | "description" | "image_url" => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;
                let slot = match name.as_str() {
                    "name" => &mut form.name,
                    "category" => &mut form.category,
                    "price" => &mut form.price,
                    "description" => &mut form.description,
                    _ => &mut form.image_url,
                };
                *slot = Some(text);
            }
            _ => {} // ignore unknown fields
        }
    }

    Ok(form)
}

/// GET /dishes
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<Dish>>> {
    let items = dishes::list(state.store.as_ref()).await?;
    Ok(Json(items))
}

/// POST /admin/dishes
///
/// Multipart fields: `name`, `category`, `price`, `description`, and either an
/// `image` file or an `image_url`.
pub async fn create(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    ApiMultipart(multipart): ApiMultipart,
) -> AppResult<(StatusCode, Json<Dish>)> {
    let form = read_form(multipart).await?;
    let dish = dishes::create(state.store.as_ref(), &state.images, form).await?;
    Ok((StatusCode::CREATED, Json(dish)))
}

/// PUT /admin/dishes/{id}
pub async fn update(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    ApiPath(id): ApiPath<DbId>,
    ApiMultipart(multipart): ApiMultipart,
) -> AppResult<Json<Dish>> {
    let form = read_form(multipart).await?;
    let dish = dishes::update(state.store.as_ref(), &state.images, id, form).await?;
    Ok(Json(dish))
}

/// DELETE /admin/dishes/{id}
pub async fn delete(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    ApiPath(id): ApiPath<DbId>,
) -> AppResult<StatusCode> {
    dishes::delete(state.store.as_ref(), &state.images, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
