//! The store abstraction the service layer is written against.
//!
//! One sub-trait per entity keeps call sites readable
//! (`store.find_reservation(id)`), and [`Store`] ties them together so the
//! application context can hold a single `Arc<dyn Store>`.

use async_trait::async_trait;
use bistro_core::reservation::ReservationStatus;
use bistro_core::types::DbId;

use crate::error::StoreError;
use crate::models::client::{Client, CreateClient};
use crate::models::dish::{CreateDish, Dish};
use crate::models::reservation::{CreateReservation, Reservation};
use crate::repositories::{ClientRepo, DishRepo, ReservationRepo};
use crate::DbPool;

#[async_trait]
pub trait ReservationStore: Send + Sync {
    async fn insert_reservation(&self, input: &CreateReservation)
        -> Result<Reservation, StoreError>;

    async fn find_reservation(&self, id: DbId) -> Result<Option<Reservation>, StoreError>;

    /// Reservations ordered by date ascending, optionally of one status only.
    async fn list_reservations(
        &self,
        status: Option<ReservationStatus>,
    ) -> Result<Vec<Reservation>, StoreError>;

    /// Persist every mutable field. `None` when the row no longer exists.
    async fn save_reservation(
        &self,
        reservation: &Reservation,
    ) -> Result<Option<Reservation>, StoreError>;

    async fn delete_reservation(&self, id: DbId) -> Result<bool, StoreError>;
}

#[async_trait]
pub trait ClientStore: Send + Sync {
    /// Fails with [`StoreError::Conflict`] when the email is taken.
    async fn insert_client(&self, input: &CreateClient) -> Result<Client, StoreError>;

    async fn find_client(&self, id: DbId) -> Result<Option<Client>, StoreError>;

    /// Exact, case-sensitive email lookup.
    async fn find_client_by_email(&self, email: &str) -> Result<Option<Client>, StoreError>;

    async fn list_clients(&self) -> Result<Vec<Client>, StoreError>;

    async fn save_client(&self, client: &Client) -> Result<Option<Client>, StoreError>;

    /// Removing a client detaches (but keeps) its reservations.
    async fn delete_client(&self, id: DbId) -> Result<bool, StoreError>;
}

#[async_trait]
pub trait DishStore: Send + Sync {
    async fn insert_dish(&self, input: &CreateDish) -> Result<Dish, StoreError>;

    async fn find_dish(&self, id: DbId) -> Result<Option<Dish>, StoreError>;

    async fn list_dishes(&self) -> Result<Vec<Dish>, StoreError>;

    async fn save_dish(&self, dish: &Dish) -> Result<Option<Dish>, StoreError>;

    async fn delete_dish(&self, id: DbId) -> Result<bool, StoreError>;
}

/// Everything the application needs from persistence.
#[async_trait]
pub trait Store: ReservationStore + ClientStore + DishStore {
    /// Confirm the backing storage is reachable.
    async fn ping(&self) -> Result<(), StoreError>;
}

/// [`Store`] backed by PostgreSQL through the sqlx repositories.
#[derive(Clone)]
pub struct PgStore {
    pool: DbPool,
}

impl PgStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }
}

#[async_trait]
impl ReservationStore for PgStore {
    async fn insert_reservation(
        &self,
        input: &CreateReservation,
    ) -> Result<Reservation, StoreError> {
        Ok(ReservationRepo::create(&self.pool, input).await?)
    }

    async fn find_reservation(&self, id: DbId) -> Result<Option<Reservation>, StoreError> {
        Ok(ReservationRepo::find_by_id(&self.pool, id).await?)
    }

    async fn list_reservations(
        &self,
        status: Option<ReservationStatus>,
    ) -> Result<Vec<Reservation>, StoreError> {
        Ok(ReservationRepo::list(&self.pool, status).await?)
    }

    async fn save_reservation(
        &self,
        reservation: &Reservation,
    ) -> Result<Option<Reservation>, StoreError> {
        Ok(ReservationRepo::save(&self.pool, reservation).await?)
    }

    async fn delete_reservation(&self, id: DbId) -> Result<bool, StoreError> {
        Ok(ReservationRepo::delete(&self.pool, id).await?)
    }
}

#[async_trait]
impl ClientStore for PgStore {
    async fn insert_client(&self, input: &CreateClient) -> Result<Client, StoreError> {
        Ok(ClientRepo::create(&self.pool, input).await?)
    }

    async fn find_client(&self, id: DbId) -> Result<Option<Client>, StoreError> {
        Ok(ClientRepo::find_by_id(&self.pool, id).await?)
    }

    async fn find_client_by_email(&self, email: &str) -> Result<Option<Client>, StoreError> {
        Ok(ClientRepo::find_by_email(&self.pool, email).await?)
    }

    async fn list_clients(&self) -> Result<Vec<Client>, StoreError> {
        Ok(ClientRepo::list(&self.pool).await?)
    }

    async fn save_client(&self, client: &Client) -> Result<Option<Client>, StoreError> {
        Ok(ClientRepo::save(&self.pool, client).await?)
    }

    async fn delete_client(&self, id: DbId) -> Result<bool, StoreError> {
        Ok(ClientRepo::delete(&self.pool, id).await?)
    }
}

#[async_trait]
impl DishStore for PgStore {
    async fn insert_dish(&self, input: &CreateDish) -> Result<Dish, StoreError> {
        Ok(DishRepo::create(&self.pool, input).await?)
    }

    async fn find_dish(&self, id: DbId) -> Result<Option<Dish>, StoreError> {
        Ok(DishRepo::find_by_id(&self.pool, id).await?)
    }

    async fn list_dishes(&self) -> Result<Vec<Dish>, StoreError> {
        Ok(DishRepo::list(&self.pool).await?)
    }

    async fn save_dish(&self, dish: &Dish) -> Result<Option<Dish>, StoreError> {
        Ok(DishRepo::save(&self.pool, dish).await?)
    }

    async fn delete_dish(&self, id: DbId) -> Result<bool, StoreError> {
        Ok(DishRepo::delete(&self.pool, id).await?)
    }
}

#[async_trait]
impl Store for PgStore {
    async fn ping(&self) -> Result<(), StoreError> {
        Ok(crate::health_check(&self.pool).await?)
    }
}
