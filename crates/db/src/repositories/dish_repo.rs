//! Repository for the `dishes` table.

use bistro_core::types::DbId;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::dish::{CreateDish, Dish};

const COLUMNS: &str = "id, name, category, price, description, image_url, created_at, updated_at";

/// Provides CRUD operations for dishes.
pub struct DishRepo;

impl DishRepo {
    /// Insert a new dish, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateDish) -> Result<Dish, sqlx::Error> {
        let query = format!(
            "INSERT INTO dishes (id, name, category, price, description, image_url)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Dish>(&query)
            .bind(Uuid::new_v4())
            .bind(&input.name)
            .bind(&input.category)
            .bind(input.price)
            .bind(&input.description)
            .bind(&input.image_url)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Dish>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM dishes WHERE id = $1");
        sqlx::query_as::<_, Dish>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List every dish, oldest first. The public menu is unfiltered.
    pub async fn list(pool: &PgPool) -> Result<Vec<Dish>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM dishes ORDER BY created_at ASC");
        sqlx::query_as::<_, Dish>(&query).fetch_all(pool).await
    }

    /// Overwrite every mutable column. Returns `None` if the row is gone.
    pub async fn save(pool: &PgPool, dish: &Dish) -> Result<Option<Dish>, sqlx::Error> {
        let query = format!(
            "UPDATE dishes SET
                name = $2,
                category = $3,
                price = $4,
                description = $5,
                image_url = $6,
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Dish>(&query)
            .bind(dish.id)
            .bind(&dish.name)
            .bind(&dish.category)
            .bind(dish.price)
            .bind(&dish.description)
            .bind(&dish.image_url)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM dishes WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
