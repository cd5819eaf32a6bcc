//! Client entity model and DTOs.

use bistro_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// Full row from the `clients` table.
///
/// Contains the password hash -- NEVER serialize this to API responses directly.
/// Use [`ClientResponse`] for external-facing output.
#[derive(Debug, Clone, FromRow)]
pub struct Client {
    pub id: DbId,
    pub email: String,
    pub last_name: String,
    pub first_name: String,
    pub phone: String,
    pub address: String,
    pub is_admin: bool,
    pub password_hash: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Safe client representation for API responses (no credential).
#[derive(Debug, Clone, Serialize)]
pub struct ClientResponse {
    pub id: DbId,
    pub email: String,
    pub last_name: String,
    pub first_name: String,
    pub phone: String,
    pub address: String,
    pub is_admin: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<&Client> for ClientResponse {
    fn from(client: &Client) -> Self {
        ClientResponse {
            id: client.id,
            email: client.email.clone(),
            last_name: client.last_name.clone(),
            first_name: client.first_name.clone(),
            phone: client.phone.clone(),
            address: client.address.clone(),
            is_admin: client.is_admin,
            created_at: client.created_at,
            updated_at: client.updated_at,
        }
    }
}

/// DTO for inserting a client. The password is already hashed.
#[derive(Debug, Clone)]
pub struct CreateClient {
    pub email: String,
    pub last_name: String,
    pub first_name: String,
    pub phone: String,
    pub address: String,
    pub is_admin: bool,
    pub password_hash: String,
}
