//! Client accounts: public signup and login, and the admin CRUD.

use bistro_core::error::CoreError;
use bistro_core::types::DbId;
use bistro_core::validation::{require_text, validate_email, validate_password};
use bistro_db::models::client::{Client, CreateClient};
use bistro_db::Store;
use serde::Deserialize;

use crate::auth::password::{hash_password, verify_password};
use crate::error::{AppError, AppResult};

const ENTITY: &str = "Client";

/// Generic message for every login failure.
const INVALID_CREDENTIALS: &str = "Invalid email or password";

/// Body of `POST /signup`.
///
/// There is deliberately no admin flag: public signup always creates a
/// regular client.
#[derive(Debug, Default, Deserialize)]
pub struct SignupRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub address: String,
}

/// Body of `POST /login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Body of `POST /admin/clients`.
#[derive(Debug, Default, Deserialize)]
pub struct NewClient {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub is_admin: bool,
}

/// Body of `PUT /admin/clients/{id}`.
///
/// Present fields overwrite; `new_password` resets the credential only when
/// it is non-empty.
#[derive(Debug, Default, Deserialize)]
pub struct ClientPatch {
    pub email: Option<String>,
    pub last_name: Option<String>,
    pub first_name: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub is_admin: Option<bool>,
    pub new_password: Option<String>,
}

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound { entity: ENTITY, id })
}

/// Shared by signup and admin creation.
async fn register(store: &dyn Store, input: NewClient) -> AppResult<Client> {
    validate_email(&input.email)?;
    require_text("last_name", &input.last_name)?;
    require_text("first_name", &input.first_name)?;
    validate_password(&input.password)?;

    // Checked up front to skip the hashing cost; the unique index still
    // settles concurrent signups.
    if store.find_client_by_email(&input.email).await?.is_some() {
        return Err(CoreError::Conflict(format!(
            "Email '{}' is already registered",
            input.email
        ))
        .into());
    }

    let password_hash = hash_password(&input.password)?;
    let client = store
        .insert_client(&CreateClient {
            email: input.email,
            last_name: input.last_name,
            first_name: input.first_name,
            phone: input.phone,
            address: input.address,
            is_admin: input.is_admin,
            password_hash,
        })
        .await?;
    Ok(client)
}

pub async fn signup(store: &dyn Store, input: SignupRequest) -> AppResult<Client> {
    let client = register(
        store,
        NewClient {
            email: input.email,
            password: input.password,
            last_name: input.last_name,
            first_name: input.first_name,
            phone: input.phone,
            address: input.address,
            is_admin: false,
        },
    )
    .await?;
    tracing::info!(client_id = %client.id, email = %client.email, "Client signed up");
    Ok(client)
}

/// Check credentials. The caller only ever learns "invalid email or password".
pub async fn login(store: &dyn Store, input: LoginRequest) -> AppResult<Client> {
    let unauthorized = || AppError::Core(CoreError::Unauthorized(INVALID_CREDENTIALS.into()));

    let Some(client) = store.find_client_by_email(&input.email).await? else {
        tracing::warn!(email = %input.email, "Login failed: unknown email");
        return Err(unauthorized());
    };

    let matches = verify_password(&input.password, &client.password_hash)?;
    if !matches {
        tracing::warn!(client_id = %client.id, "Login failed: wrong password");
        return Err(unauthorized());
    }

    tracing::info!(client_id = %client.id, "Client logged in");
    Ok(client)
}

pub async fn admin_create(store: &dyn Store, input: NewClient) -> AppResult<Client> {
    let client = register(store, input).await?;
    tracing::info!(client_id = %client.id, is_admin = client.is_admin, "Client created by admin");
    Ok(client)
}

pub async fn list(store: &dyn Store) -> AppResult<Vec<Client>> {
    Ok(store.list_clients().await?)
}

pub async fn get(store: &dyn Store, id: DbId) -> AppResult<Client> {
    store.find_client(id).await?.ok_or_else(|| not_found(id))
}

/// Apply an admin patch, validating every present field first.
pub async fn admin_update(store: &dyn Store, id: DbId, patch: ClientPatch) -> AppResult<Client> {
    let current = get(store, id).await?;

    if let Some(email) = &patch.email {
        validate_email(email)?;
    }
    let new_hash = match patch.new_password.as_deref() {
        Some(password) if !password.is_empty() => {
            validate_password(password)?;
            Some(hash_password(password)?)
        }
        _ => None,
    };
    let password_reset = new_hash.is_some();

    let updated = Client {
        email: patch.email.unwrap_or(current.email),
        last_name: patch.last_name.unwrap_or(current.last_name),
        first_name: patch.first_name.unwrap_or(current.first_name),
        phone: patch.phone.unwrap_or(current.phone),
        address: patch.address.unwrap_or(current.address),
        is_admin: patch.is_admin.unwrap_or(current.is_admin),
        password_hash: new_hash.unwrap_or(current.password_hash),
        ..current
    };

    let saved = store
        .save_client(&updated)
        .await?
        .ok_or_else(|| not_found(id))?;

    tracing::info!(client_id = %id, password_reset, "Client updated by admin");
    Ok(saved)
}

pub async fn admin_delete(store: &dyn Store, id: DbId) -> AppResult<()> {
    if !store.delete_client(id).await? {
        return Err(not_found(id));
    }
    tracing::info!(client_id = %id, "Client deleted");
    Ok(())
}
