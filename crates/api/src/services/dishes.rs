//! Dish catalog with optional uploaded images.
//!
//! Image files are written before the row and removed after it, so a crash
//! in between can orphan a file but never leaves a row pointing at nothing
//! that the service wrote itself.

use bistro_core::dish::parse_price;
use bistro_core::error::CoreError;
use bistro_core::types::DbId;
use bistro_core::validation::require_text;
use bistro_db::models::dish::{CreateDish, Dish};
use bistro_db::Store;

use crate::error::{AppError, AppResult};
use crate::uploads::ImageStorage;

const ENTITY: &str = "Dish";

/// Fields of a dish create/update form.
///
/// `None` means the field was not sent. On update, blank text fields are
/// treated like absent ones, except `image_url` where blank clears the image.
#[derive(Debug, Default)]
pub struct DishForm {
    pub name: Option<String>,
    pub category: Option<String>,
    pub price: Option<String>,
    pub description: Option<String>,
    pub image_url: Option<String>,
    /// Raw bytes of an uploaded `image` file.
    pub image: Option<Vec<u8>>,
}

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound { entity: ENTITY, id })
}

fn required(field: &str, value: Option<String>) -> Result<String, CoreError> {
    let value = value.unwrap_or_default();
    require_text(field, &value)?;
    Ok(value.trim().to_string())
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Store the uploaded file, if any, and return its URL.
async fn store_upload(images: &ImageStorage, image: Option<&[u8]>) -> AppResult<Option<String>> {
    match image {
        Some(data) => Ok(Some(images.save(data).await?)),
        None => Ok(None),
    }
}

/// Undo a file write whose row never made it to the store.
async fn discard_upload(images: &ImageStorage, uploaded: Option<&str>) {
    if let Some(url) = uploaded {
        images.remove_if_managed(url).await;
    }
}

pub async fn list(store: &dyn Store) -> AppResult<Vec<Dish>> {
    Ok(store.list_dishes().await?)
}

pub async fn get(store: &dyn Store, id: DbId) -> AppResult<Dish> {
    store.find_dish(id).await?.ok_or_else(|| not_found(id))
}

pub async fn create(store: &dyn Store, images: &ImageStorage, form: DishForm) -> AppResult<Dish> {
    let name = required("name", form.name)?;
    let category = required("category", form.category)?;
    let price = parse_price(&required("price", form.price)?)?;
    let description = required("description", form.description)?;

    let uploaded = store_upload(images, form.image.as_deref()).await?;
    let image_url = uploaded.clone().or_else(|| non_blank(form.image_url));

    let input = CreateDish {
        name,
        category,
        price,
        description,
        image_url,
    };
    let dish = match store.insert_dish(&input).await {
        Ok(dish) => dish,
        Err(e) => {
            discard_upload(images, uploaded.as_deref()).await;
            return Err(e.into());
        }
    };

    tracing::info!(dish_id = %dish.id, name = %dish.name, "Dish created");
    Ok(dish)
}

/// Apply non-blank fields and swap the image if a new one was given.
///
/// A server-managed image that is no longer referenced is deleted once the
/// row has been saved.
pub async fn update(
    store: &dyn Store,
    images: &ImageStorage,
    id: DbId,
    form: DishForm,
) -> AppResult<Dish> {
    let current = get(store, id).await?;

    let price = match non_blank(form.price) {
        Some(raw) => parse_price(&raw)?,
        None => current.price,
    };

    let uploaded = store_upload(images, form.image.as_deref()).await?;
    let previous_image = current.image_url.clone();
    let image_url = match (&uploaded, form.image_url) {
        (Some(url), _) => Some(url.clone()),
        (None, Some(url)) => non_blank(Some(url)),
        (None, None) => current.image_url.clone(),
    };

    let updated = Dish {
        name: non_blank(form.name).unwrap_or(current.name),
        category: non_blank(form.category).unwrap_or(current.category),
        description: non_blank(form.description).unwrap_or(current.description),
        price,
        image_url,
        ..current
    };

    let saved = match store.save_dish(&updated).await {
        Ok(Some(dish)) => dish,
        Ok(None) => {
            discard_upload(images, uploaded.as_deref()).await;
            return Err(not_found(id));
        }
        Err(e) => {
            discard_upload(images, uploaded.as_deref()).await;
            return Err(e.into());
        }
    };

    if let Some(old) = previous_image {
        if saved.image_url.as_deref() != Some(old.as_str()) {
            images.remove_if_managed(&old).await;
        }
    }

    tracing::info!(dish_id = %id, "Dish updated");
    Ok(saved)
}

/// Delete the row, then its server-managed image if it has one.
pub async fn delete(store: &dyn Store, images: &ImageStorage, id: DbId) -> AppResult<()> {
    let dish = get(store, id).await?;
    if !store.delete_dish(id).await? {
        return Err(not_found(id));
    }
    if let Some(url) = &dish.image_url {
        images.remove_if_managed(url).await;
    }
    tracing::info!(dish_id = %id, "Dish deleted");
    Ok(())
}
