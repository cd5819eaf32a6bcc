//! Repository for the `clients` table.

use bistro_core::types::DbId;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::client::{Client, CreateClient};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, email, last_name, first_name, phone, address, is_admin, \
                       password_hash, created_at, updated_at";

/// Provides CRUD operations for clients.
pub struct ClientRepo;

impl ClientRepo {
    /// Insert a new client, returning the created row.
    ///
    /// A duplicate email fails on the `uq_clients_email` constraint.
    pub async fn create(pool: &PgPool, input: &CreateClient) -> Result<Client, sqlx::Error> {
        let query = format!(
            "INSERT INTO clients (id, email, last_name, first_name, phone, address, is_admin,
                password_hash)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Client>(&query)
            .bind(Uuid::new_v4())
            .bind(&input.email)
            .bind(&input.last_name)
            .bind(&input.first_name)
            .bind(&input.phone)
            .bind(&input.address)
            .bind(input.is_admin)
            .bind(&input.password_hash)
            .fetch_one(pool)
            .await
    }

    /// Find a client by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Client>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM clients WHERE id = $1");
        sqlx::query_as::<_, Client>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a client by email (case-sensitive).
    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<Client>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM clients WHERE email = $1");
        sqlx::query_as::<_, Client>(&query)
            .bind(email)
            .fetch_optional(pool)
            .await
    }

    /// List all clients, oldest first.
    pub async fn list(pool: &PgPool) -> Result<Vec<Client>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM clients ORDER BY created_at ASC");
        sqlx::query_as::<_, Client>(&query).fetch_all(pool).await
    }

    /// Overwrite every mutable column, including the password hash.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn save(pool: &PgPool, client: &Client) -> Result<Option<Client>, sqlx::Error> {
        let query = format!(
            "UPDATE clients SET
                email = $2,
                last_name = $3,
                first_name = $4,
                phone = $5,
                address = $6,
                is_admin = $7,
                password_hash = $8,
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Client>(&query)
            .bind(client.id)
            .bind(&client.email)
            .bind(&client.last_name)
            .bind(&client.first_name)
            .bind(&client.phone)
            .bind(&client.address)
            .bind(client.is_admin)
            .bind(&client.password_hash)
            .fetch_optional(pool)
            .await
    }

    /// Hard-delete a client. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM clients WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
