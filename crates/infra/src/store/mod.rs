//! Persistence collaborator: one store trait per document collection.
//!
//! Every method is a single-document or simple-filter operation. Nothing here
//! spans collections, so callers that write twice (recording a payment) get no
//! atomicity between the writes.

pub mod memory;
pub mod postgres;

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use storefront_auth::{DirectoryError, Role, RoleDirectory, UserPatch, UserRecord};
use storefront_core::{DeleteResult, InsertResult, ProductId, PurchaseId, UpdateResult};
use storefront_products::{Product, Review};
use storefront_purchasing::{Payment, Purchase};

pub use memory::{InMemoryCollection, InMemoryStore};
pub use postgres::PostgresStore;

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("{0} collection lock poisoned")]
    LockPoisoned(&'static str),
}

#[async_trait]
pub trait UserStore: Send + Sync {
    /// Update-or-insert keyed by email, overwriting only the fields in `patch`.
    async fn upsert_user(&self, email: &str, patch: &UserPatch) -> StoreResult<UpdateResult>;
    async fn list_users(&self) -> StoreResult<Vec<UserRecord>>;
    async fn find_user(&self, email: &str) -> StoreResult<Option<UserRecord>>;
    /// Set the role of an existing record; never inserts.
    async fn set_role(&self, email: &str, role: Role) -> StoreResult<UpdateResult>;
}

#[async_trait]
pub trait ProductStore: Send + Sync {
    async fn insert_product(&self, product: Product) -> StoreResult<InsertResult>;
    async fn list_products(&self) -> StoreResult<Vec<Product>>;
    async fn find_product(&self, id: ProductId) -> StoreResult<Option<Product>>;
    async fn count_products(&self) -> StoreResult<u64>;
    async fn delete_product(&self, id: ProductId) -> StoreResult<DeleteResult>;
}

#[async_trait]
pub trait PurchaseStore: Send + Sync {
    async fn insert_purchase(&self, purchase: Purchase) -> StoreResult<InsertResult>;
    async fn list_purchases(&self) -> StoreResult<Vec<Purchase>>;
    async fn purchases_by_email(&self, email: &str) -> StoreResult<Vec<Purchase>>;
    /// Set `paid` and `transactionId` on the purchase matching both `id` and `email`.
    async fn mark_paid(&self, id: PurchaseId, email: &str, transaction_id: &str) -> StoreResult<UpdateResult>;
    async fn mark_shipped(&self, id: PurchaseId) -> StoreResult<UpdateResult>;
    /// Delete the oldest purchase placed by `email`, if any.
    async fn delete_purchase_by_email(&self, email: &str) -> StoreResult<DeleteResult>;
}

#[async_trait]
pub trait PaymentStore: Send + Sync {
    async fn insert_payment(&self, payment: Payment) -> StoreResult<InsertResult>;
    async fn payments_for_purchase(&self, purchase_id: PurchaseId) -> StoreResult<Vec<Payment>>;
}

#[async_trait]
pub trait ReviewStore: Send + Sync {
    async fn insert_review(&self, review: Review) -> StoreResult<InsertResult>;
    async fn list_reviews(&self) -> StoreResult<Vec<Review>>;
}

/// Role lookups for the authorization gate, served from the user collection.
#[derive(Clone)]
pub struct UserDirectory {
    users: Arc<dyn UserStore>,
}

impl UserDirectory {
    pub fn new(users: Arc<dyn UserStore>) -> Self {
        Self { users }
    }
}

#[async_trait]
impl RoleDirectory for UserDirectory {
    async fn role_of(&self, email: &str) -> Result<Option<Role>, DirectoryError> {
        let record = self
            .users
            .find_user(email)
            .await
            .map_err(|e| DirectoryError(e.to_string()))?;
        Ok(record.map(|r| r.role))
    }
}
