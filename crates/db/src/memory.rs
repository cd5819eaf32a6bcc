//! In-process [`Store`] used by tests and by the server when no database
//! URL is configured.
//!
//! Mirrors the PostgreSQL schema's guarantees that the services rely on:
//! unique client emails, date-ordered reservation listings, and
//! `ON DELETE SET NULL` on a reservation's client reference.

use async_trait::async_trait;
use bistro_core::reservation::ReservationStatus;
use bistro_core::types::DbId;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::StoreError;
use crate::models::client::{Client, CreateClient};
use crate::models::dish::{CreateDish, Dish};
use crate::models::reservation::{CreateReservation, Reservation};
use crate::store::{ClientStore, DishStore, ReservationStore, Store};

/// Rows kept in insertion order so ties sort by creation.
#[derive(Default)]
struct Tables {
    clients: Vec<Client>,
    dishes: Vec<Dish>,
    reservations: Vec<Reservation>,
}

#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn duplicate_email() -> StoreError {
    StoreError::Conflict("Duplicate value violates unique constraint: uq_clients_email".into())
}

#[async_trait]
impl ReservationStore for MemoryStore {
    async fn insert_reservation(
        &self,
        input: &CreateReservation,
    ) -> Result<Reservation, StoreError> {
        let now = Utc::now();
        let reservation = Reservation {
            id: Uuid::new_v4(),
            client_id: input.client_id,
            client_name: input.client_name.clone(),
            client_email: input.client_email.clone(),
            client_phone: input.client_phone.clone(),
            num_guests: input.num_guests,
            reservation_date: input.reservation_date,
            status: input.status,
            special_notes: input.special_notes.clone(),
            is_special_event: input.is_special_event,
            event_description: input.event_description.clone(),
            wants_reminder: input.wants_reminder,
            created_at: now,
            updated_at: now,
        };
        self.tables
            .write()
            .await
            .reservations
            .push(reservation.clone());
        Ok(reservation)
    }

    async fn find_reservation(&self, id: DbId) -> Result<Option<Reservation>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables.reservations.iter().find(|r| r.id == id).cloned())
    }

    async fn list_reservations(
        &self,
        status: Option<ReservationStatus>,
    ) -> Result<Vec<Reservation>, StoreError> {
        let tables = self.tables.read().await;
        let mut rows: Vec<Reservation> = tables
            .reservations
            .iter()
            .filter(|r| status.map_or(true, |s| r.status == s))
            .cloned()
            .collect();
        rows.sort_by_key(|r| r.reservation_date);
        Ok(rows)
    }

    async fn save_reservation(
        &self,
        reservation: &Reservation,
    ) -> Result<Option<Reservation>, StoreError> {
        let mut tables = self.tables.write().await;
        let Some(row) = tables
            .reservations
            .iter_mut()
            .find(|r| r.id == reservation.id)
        else {
            return Ok(None);
        };
        *row = Reservation {
            created_at: row.created_at,
            updated_at: Utc::now(),
            ..reservation.clone()
        };
        Ok(Some(row.clone()))
    }

    async fn delete_reservation(&self, id: DbId) -> Result<bool, StoreError> {
        let mut tables = self.tables.write().await;
        let before = tables.reservations.len();
        tables.reservations.retain(|r| r.id != id);
        Ok(tables.reservations.len() < before)
    }
}

#[async_trait]
impl ClientStore for MemoryStore {
    async fn insert_client(&self, input: &CreateClient) -> Result<Client, StoreError> {
        let mut tables = self.tables.write().await;
        if tables.clients.iter().any(|c| c.email == input.email) {
            return Err(duplicate_email());
        }
        let now = Utc::now();
        let client = Client {
            id: Uuid::new_v4(),
            email: input.email.clone(),
            last_name: input.last_name.clone(),
            first_name: input.first_name.clone(),
            phone: input.phone.clone(),
            address: input.address.clone(),
            is_admin: input.is_admin,
            password_hash: input.password_hash.clone(),
            created_at: now,
            updated_at: now,
        };
        tables.clients.push(client.clone());
        Ok(client)
    }

    async fn find_client(&self, id: DbId) -> Result<Option<Client>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables.clients.iter().find(|c| c.id == id).cloned())
    }

    async fn find_client_by_email(&self, email: &str) -> Result<Option<Client>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables.clients.iter().find(|c| c.email == email).cloned())
    }

    async fn list_clients(&self) -> Result<Vec<Client>, StoreError> {
        Ok(self.tables.read().await.clients.clone())
    }

    async fn save_client(&self, client: &Client) -> Result<Option<Client>, StoreError> {
        let mut tables = self.tables.write().await;
        if tables
            .clients
            .iter()
            .any(|c| c.id != client.id && c.email == client.email)
        {
            return Err(duplicate_email());
        }
        let Some(row) = tables.clients.iter_mut().find(|c| c.id == client.id) else {
            return Ok(None);
        };
        *row = Client {
            created_at: row.created_at,
            updated_at: Utc::now(),
            ..client.clone()
        };
        Ok(Some(row.clone()))
    }

    async fn delete_client(&self, id: DbId) -> Result<bool, StoreError> {
        let mut tables = self.tables.write().await;
        let before = tables.clients.len();
        tables.clients.retain(|c| c.id != id);
        let removed = tables.clients.len() < before;
        if removed {
            for reservation in tables
                .reservations
                .iter_mut()
                .filter(|r| r.client_id == Some(id))
            {
                reservation.client_id = None;
            }
        }
        Ok(removed)
    }
}

#[async_trait]
impl DishStore for MemoryStore {
    async fn insert_dish(&self, input: &CreateDish) -> Result<Dish, StoreError> {
        let now = Utc::now();
        let dish = Dish {
            id: Uuid::new_v4(),
            name: input.name.clone(),
            category: input.category.clone(),
            price: input.price,
            description: input.description.clone(),
            image_url: input.image_url.clone(),
            created_at: now,
            updated_at: now,
        };
        self.tables.write().await.dishes.push(dish.clone());
        Ok(dish)
    }

    async fn find_dish(&self, id: DbId) -> Result<Option<Dish>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables.dishes.iter().find(|d| d.id == id).cloned())
    }

    async fn list_dishes(&self) -> Result<Vec<Dish>, StoreError> {
        Ok(self.tables.read().await.dishes.clone())
    }

    async fn save_dish(&self, dish: &Dish) -> Result<Option<Dish>, StoreError> {
        let mut tables = self.tables.write().await;
        let Some(row) = tables.dishes.iter_mut().find(|d| d.id == dish.id) else {
            return Ok(None);
        };
        *row = Dish {
            created_at: row.created_at,
            updated_at: Utc::now(),
            ..dish.clone()
        };
        Ok(Some(row.clone()))
    }

    async fn delete_dish(&self, id: DbId) -> Result<bool, StoreError> {
        let mut tables = self.tables.write().await;
        let before = tables.dishes.len();
        tables.dishes.retain(|d| d.id != id);
        Ok(tables.dishes.len() < before)
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
