//! Dish entity model and DTOs.

use bistro_core::types::{DbId, Timestamp};
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::FromRow;

/// Full row from the `dishes` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct Dish {
    pub id: DbId,
    pub name: String,
    pub category: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub description: String,
    /// Absolute URL of the dish image; server-managed or external.
    pub image_url: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for inserting a dish.
#[derive(Debug, Clone)]
pub struct CreateDish {
    pub name: String,
    pub category: String,
    pub price: Decimal,
    pub description: String,
    pub image_url: Option<String>,
}
