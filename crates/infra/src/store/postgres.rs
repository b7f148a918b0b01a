//! Postgres-backed document store.
//!
//! Each collection is a table of JSONB documents (`doc`) keyed by the
//! document id (`email` for users). Read-modify-write operations lock the one
//! row they touch (`SELECT ... FOR UPDATE`) inside a short transaction, which
//! gives the same single-document atomicity as the in-memory store and
//! nothing more.

use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};
use sqlx::{postgres::PgPoolOptions, types::Json, PgPool, Postgres, Transaction};
use tracing::instrument;
use uuid::Uuid;

use storefront_auth::{Role, UserPatch, UserRecord};
use storefront_core::{DeleteResult, InsertResult, ProductId, PurchaseId, UpdateResult};
use storefront_products::{Product, Review};
use storefront_purchasing::{Payment, Purchase};

use super::{PaymentStore, ProductStore, PurchaseStore, ReviewStore, StoreResult, UserStore};

const SCHEMA: &str = include_str!("../../migrations/0001_documents.sql");

#[derive(Debug, Clone)]
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connect and make sure the collection tables exist.
    pub async fn connect(database_url: &str) -> StoreResult<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(10)
            .connect(database_url)
            .await?;
        let store = Self::new(pool);
        store.migrate().await?;
        Ok(store)
    }

    pub async fn migrate(&self) -> StoreResult<()> {
        sqlx::raw_sql(SCHEMA).execute(&self.pool).await?;
        tracing::info!("document schema ready");
        Ok(())
    }

    async fn insert_doc<T>(&self, table: &'static str, id: Uuid, doc: &T) -> StoreResult<InsertResult>
    where
        T: Serialize + Sync,
    {
        let sql = format!("INSERT INTO {table} (id, doc) VALUES ($1, $2)");
        sqlx::query(&sql)
            .bind(id)
            .bind(Json(doc))
            .execute(&self.pool)
            .await?;
        Ok(InsertResult::inserted(id))
    }

    async fn all_docs<T>(&self, table: &'static str) -> StoreResult<Vec<T>>
    where
        T: DeserializeOwned + Send + Unpin + 'static,
    {
        let sql = format!("SELECT doc FROM {table} ORDER BY created_at, id");
        let rows = sqlx::query_scalar::<_, Json<T>>(&sql)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(|Json(doc)| doc).collect())
    }

    async fn docs_where<T>(&self, table: &'static str, field: &'static str, value: &str) -> StoreResult<Vec<T>>
    where
        T: DeserializeOwned + Send + Unpin + 'static,
    {
        let sql = format!("SELECT doc FROM {table} WHERE doc->>'{field}' = $1 ORDER BY created_at, id");
        let rows = sqlx::query_scalar::<_, Json<T>>(&sql)
            .bind(value)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(|Json(doc)| doc).collect())
    }

    /// Lock the row `id`, let `update` decide whether it matches and what
    /// changes, and write it back only if something changed.
    ///
    /// `update` returns `None` when the document does not satisfy the caller's
    /// filter, `Some(modified)` otherwise.
    async fn modify_doc<T, F>(&self, table: &'static str, id: Uuid, update: F) -> StoreResult<UpdateResult>
    where
        T: Serialize + DeserializeOwned + Send + Sync + Unpin + 'static,
        F: FnOnce(&mut T) -> Option<bool> + Send,
    {
        let mut tx = self.pool.begin().await?;

        let select = format!("SELECT doc FROM {table} WHERE id = $1 FOR UPDATE");
        let Some(Json(mut doc)) = sqlx::query_scalar::<_, Json<T>>(&select)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?
        else {
            return Ok(UpdateResult::unmatched());
        };

        let Some(modified) = update(&mut doc) else {
            return Ok(UpdateResult::unmatched());
        };

        if modified {
            let write = format!("UPDATE {table} SET doc = $2 WHERE id = $1");
            sqlx::query(&write)
                .bind(id)
                .bind(Json(&doc))
                .execute(&mut *tx)
                .await?;
        }
        tx.commit().await?;

        Ok(UpdateResult::matched(modified))
    }
}

/// Lock the user row for `email` and apply `update` to it.
///
/// `None` when no row exists; the row is written back only if `update`
/// reports a change.
async fn update_user<F>(
    tx: &mut Transaction<'_, Postgres>,
    email: &str,
    update: F,
) -> StoreResult<Option<UpdateResult>>
where
    F: FnOnce(&mut UserRecord) -> bool + Send,
{
    let Some(Json(mut record)) =
        sqlx::query_scalar::<_, Json<UserRecord>>("SELECT doc FROM users WHERE email = $1 FOR UPDATE")
            .bind(email)
            .fetch_optional(&mut **tx)
            .await?
    else {
        return Ok(None);
    };

    let modified = update(&mut record);
    if modified {
        sqlx::query("UPDATE users SET doc = $2 WHERE email = $1")
            .bind(email)
            .bind(Json(&record))
            .execute(&mut **tx)
            .await?;
    }
    Ok(Some(UpdateResult::matched(modified)))
}

#[async_trait]
impl UserStore for PostgresStore {
    #[instrument(skip(self, patch))]
    async fn upsert_user(&self, email: &str, patch: &UserPatch) -> StoreResult<UpdateResult> {
        let mut tx = self.pool.begin().await?;

        if let Some(result) = update_user(&mut tx, email, |record| record.apply(patch)).await? {
            tx.commit().await?;
            return Ok(result);
        }

        let record = UserRecord::from_patch(email, patch);
        let inserted = sqlx::query("INSERT INTO users (email, doc) VALUES ($1, $2) ON CONFLICT (email) DO NOTHING")
            .bind(email)
            .bind(Json(&record))
            .execute(&mut *tx)
            .await?
            .rows_affected();

        let result = if inserted == 1 {
            UpdateResult::upserted(email)
        } else {
            // A concurrent upsert created the row first; apply ours on top.
            update_user(&mut tx, email, |record| record.apply(patch))
                .await?
                .unwrap_or_else(UpdateResult::unmatched)
        };

        tx.commit().await?;
        Ok(result)
    }

    async fn list_users(&self) -> StoreResult<Vec<UserRecord>> {
        let rows = sqlx::query_scalar::<_, Json<UserRecord>>("SELECT doc FROM users ORDER BY created_at, email")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(|Json(doc)| doc).collect())
    }

    async fn find_user(&self, email: &str) -> StoreResult<Option<UserRecord>> {
        let row = sqlx::query_scalar::<_, Json<UserRecord>>("SELECT doc FROM users WHERE email = $1")
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(|Json(doc)| doc))
    }

    #[instrument(skip(self))]
    async fn set_role(&self, email: &str, role: Role) -> StoreResult<UpdateResult> {
        let mut tx = self.pool.begin().await?;
        let result = update_user(&mut tx, email, |record| record.set_role(role))
            .await?
            .unwrap_or_else(UpdateResult::unmatched);
        tx.commit().await?;
        Ok(result)
    }
}

#[async_trait]
impl ProductStore for PostgresStore {
    async fn insert_product(&self, product: Product) -> StoreResult<InsertResult> {
        self.insert_doc("products", product.id.into(), &product).await
    }

    async fn list_products(&self) -> StoreResult<Vec<Product>> {
        self.all_docs("products").await
    }

    async fn find_product(&self, id: ProductId) -> StoreResult<Option<Product>> {
        let row = sqlx::query_scalar::<_, Json<Product>>("SELECT doc FROM products WHERE id = $1")
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(|Json(doc)| doc))
    }

    async fn count_products(&self) -> StoreResult<u64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(&self.pool)
            .await?;
        Ok(count.max(0) as u64)
    }

    async fn delete_product(&self, id: ProductId) -> StoreResult<DeleteResult> {
        let done = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await?;
        Ok(DeleteResult::deleted(done.rows_affected()))
    }
}

#[async_trait]
impl PurchaseStore for PostgresStore {
    async fn insert_purchase(&self, purchase: Purchase) -> StoreResult<InsertResult> {
        self.insert_doc("purchases", purchase.id.into(), &purchase).await
    }

    async fn list_purchases(&self) -> StoreResult<Vec<Purchase>> {
        self.all_docs("purchases").await
    }

    async fn purchases_by_email(&self, email: &str) -> StoreResult<Vec<Purchase>> {
        self.docs_where("purchases", "email", email).await
    }

    #[instrument(skip(self))]
    async fn mark_paid(&self, id: PurchaseId, email: &str, transaction_id: &str) -> StoreResult<UpdateResult> {
        self.modify_doc("purchases", id.into(), |p: &mut Purchase| {
            (p.email == email).then(|| p.mark_paid(transaction_id))
        })
        .await
    }

    #[instrument(skip(self))]
    async fn mark_shipped(&self, id: PurchaseId) -> StoreResult<UpdateResult> {
        self.modify_doc("purchases", id.into(), |p: &mut Purchase| Some(p.mark_shipped()))
            .await
    }

    #[instrument(skip(self))]
    async fn delete_purchase_by_email(&self, email: &str) -> StoreResult<DeleteResult> {
        let done = sqlx::query(
            r#"
            DELETE FROM purchases
            WHERE id = (
                SELECT id FROM purchases
                WHERE doc->>'email' = $1
                ORDER BY created_at, id
                LIMIT 1
            )
            "#,
        )
        .bind(email)
        .execute(&self.pool)
        .await?;
        Ok(DeleteResult::deleted(done.rows_affected()))
    }
}

#[async_trait]
impl PaymentStore for PostgresStore {
    async fn insert_payment(&self, payment: Payment) -> StoreResult<InsertResult> {
        self.insert_doc("payments", payment.id.into(), &payment).await
    }

    async fn payments_for_purchase(&self, purchase_id: PurchaseId) -> StoreResult<Vec<Payment>> {
        self.docs_where("payments", "purchaseId", &purchase_id.to_string())
            .await
    }
}

#[async_trait]
impl ReviewStore for PostgresStore {
    async fn insert_review(&self, review: Review) -> StoreResult<InsertResult> {
        self.insert_doc("reviews", review.id.into(), &review).await
    }

    async fn list_reviews(&self) -> StoreResult<Vec<Review>> {
        self.all_docs("reviews").await
    }
}
