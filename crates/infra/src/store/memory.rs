//! In-memory document store for tests/dev.

use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;

use storefront_auth::{Role, UserPatch, UserRecord};
use storefront_core::{DeleteResult, Entity, InsertResult, ProductId, PurchaseId, UpdateResult};
use storefront_products::{Product, Review};
use storefront_purchasing::{Payment, Purchase};

use super::{PaymentStore, ProductStore, PurchaseStore, ReviewStore, StoreError, StoreResult, UserStore};

/// One collection of documents, kept in insertion order.
#[derive(Debug)]
pub struct InMemoryCollection<V> {
    name: &'static str,
    docs: RwLock<Vec<V>>,
}

impl<V> InMemoryCollection<V>
where
    V: Entity + Clone,
{
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            docs: RwLock::new(Vec::new()),
        }
    }

    fn read(&self) -> StoreResult<RwLockReadGuard<'_, Vec<V>>> {
        self.docs.read().map_err(|_| StoreError::LockPoisoned(self.name))
    }

    fn write(&self) -> StoreResult<RwLockWriteGuard<'_, Vec<V>>> {
        self.docs.write().map_err(|_| StoreError::LockPoisoned(self.name))
    }

    pub fn insert(&self, doc: V) -> StoreResult<InsertResult> {
        let id = doc.id();
        self.write()?.push(doc);
        Ok(InsertResult::inserted(id))
    }

    pub fn all(&self) -> StoreResult<Vec<V>> {
        Ok(self.read()?.clone())
    }

    pub fn find(&self, id: &V::Id) -> StoreResult<Option<V>> {
        Ok(self.read()?.iter().find(|d| d.id() == *id).cloned())
    }

    pub fn filter(&self, pred: impl Fn(&V) -> bool) -> StoreResult<Vec<V>> {
        Ok(self.read()?.iter().filter(|d| pred(d)).cloned().collect())
    }

    pub fn count(&self) -> StoreResult<u64> {
        Ok(self.read()?.len() as u64)
    }

    /// Apply `update` to the first document matching `pred`.
    pub fn update_one(
        &self,
        pred: impl Fn(&V) -> bool,
        update: impl FnOnce(&mut V) -> bool,
    ) -> StoreResult<UpdateResult> {
        let mut docs = self.write()?;
        Ok(match docs.iter_mut().find(|d| pred(d)) {
            Some(doc) => UpdateResult::matched(update(doc)),
            None => UpdateResult::unmatched(),
        })
    }

    /// Like `update_one`, but inserts `create()` when nothing matches.
    pub fn upsert_one(
        &self,
        pred: impl Fn(&V) -> bool,
        update: impl FnOnce(&mut V) -> bool,
        create: impl FnOnce() -> V,
    ) -> StoreResult<UpdateResult> {
        let mut docs = self.write()?;
        if let Some(doc) = docs.iter_mut().find(|d| pred(d)) {
            return Ok(UpdateResult::matched(update(doc)));
        }
        let doc = create();
        let key = doc.id().to_string();
        docs.push(doc);
        Ok(UpdateResult::upserted(key))
    }

    pub fn delete_one(&self, pred: impl Fn(&V) -> bool) -> StoreResult<DeleteResult> {
        let mut docs = self.write()?;
        Ok(match docs.iter().position(|d| pred(d)) {
            Some(index) => {
                docs.remove(index);
                DeleteResult::deleted(1)
            }
            None => DeleteResult::deleted(0),
        })
    }
}

/// All storefront collections held in process memory.
///
/// Used when no database is configured, and by tests.
#[derive(Debug)]
pub struct InMemoryStore {
    users: InMemoryCollection<UserRecord>,
    products: InMemoryCollection<Product>,
    purchases: InMemoryCollection<Purchase>,
    payments: InMemoryCollection<Payment>,
    reviews: InMemoryCollection<Review>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self {
            users: InMemoryCollection::new("users"),
            products: InMemoryCollection::new("products"),
            purchases: InMemoryCollection::new("purchases"),
            payments: InMemoryCollection::new("payments"),
            reviews: InMemoryCollection::new("reviews"),
        }
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserStore for InMemoryStore {
    async fn upsert_user(&self, email: &str, patch: &UserPatch) -> StoreResult<UpdateResult> {
        self.users.upsert_one(
            |u| u.email == email,
            |u| u.apply(patch),
            || UserRecord::from_patch(email, patch),
        )
    }

    async fn list_users(&self) -> StoreResult<Vec<UserRecord>> {
        self.users.all()
    }

    async fn find_user(&self, email: &str) -> StoreResult<Option<UserRecord>> {
        self.users.find(&email.to_string())
    }

    async fn set_role(&self, email: &str, role: Role) -> StoreResult<UpdateResult> {
        self.users.update_one(|u| u.email == email, |u| u.set_role(role))
    }
}

#[async_trait]
impl ProductStore for InMemoryStore {
    async fn insert_product(&self, product: Product) -> StoreResult<InsertResult> {
        self.products.insert(product)
    }

    async fn list_products(&self) -> StoreResult<Vec<Product>> {
        self.products.all()
    }

    async fn find_product(&self, id: ProductId) -> StoreResult<Option<Product>> {
        self.products.find(&id)
    }

    async fn count_products(&self) -> StoreResult<u64> {
        self.products.count()
    }

    async fn delete_product(&self, id: ProductId) -> StoreResult<DeleteResult> {
        self.products.delete_one(|p| p.id == id)
    }
}

#[async_trait]
impl PurchaseStore for InMemoryStore {
    async fn insert_purchase(&self, purchase: Purchase) -> StoreResult<InsertResult> {
        self.purchases.insert(purchase)
    }

    async fn list_purchases(&self) -> StoreResult<Vec<Purchase>> {
        self.purchases.all()
    }

    async fn purchases_by_email(&self, email: &str) -> StoreResult<Vec<Purchase>> {
        self.purchases.filter(|p| p.email == email)
    }

    async fn mark_paid(&self, id: PurchaseId, email: &str, transaction_id: &str) -> StoreResult<UpdateResult> {
        self.purchases
            .update_one(|p| p.id == id && p.email == email, |p| p.mark_paid(transaction_id))
    }

    async fn mark_shipped(&self, id: PurchaseId) -> StoreResult<UpdateResult> {
        self.purchases.update_one(|p| p.id == id, Purchase::mark_shipped)
    }

    async fn delete_purchase_by_email(&self, email: &str) -> StoreResult<DeleteResult> {
        self.purchases.delete_one(|p| p.email == email)
    }
}

#[async_trait]
impl PaymentStore for InMemoryStore {
    async fn insert_payment(&self, payment: Payment) -> StoreResult<InsertResult> {
        self.payments.insert(payment)
    }

    async fn payments_for_purchase(&self, purchase_id: PurchaseId) -> StoreResult<Vec<Payment>> {
        self.payments.filter(|p| p.purchase_id == purchase_id)
    }
}

#[async_trait]
impl ReviewStore for InMemoryStore {
    async fn insert_review(&self, review: Review) -> StoreResult<InsertResult> {
        self.reviews.insert(review)
    }

    async fn list_reviews(&self) -> StoreResult<Vec<Review>> {
        self.reviews.all()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::Utc;
    use storefront_auth::{lookup_admin_status, RoleDirectory};
    use storefront_products::NewProduct;
    use storefront_purchasing::{NewPurchase, RecordPayment};

    use super::*;
    use crate::store::UserDirectory;

    fn patch(json: serde_json::Value) -> UserPatch {
        serde_json::from_value(json).unwrap()
    }

    fn product(name: &str) -> Product {
        let new: NewProduct = serde_json::from_value(serde_json::json!({"name": name, "price": 10.0})).unwrap();
        Product::from_new(ProductId::new(), new)
    }

    fn purchase(email: &str) -> Purchase {
        let new: NewPurchase = serde_json::from_value(serde_json::json!({
            "email": email,
            "productId": "p-1",
            "quantity": 1,
            "price": 10.0,
        }))
        .unwrap();
        Purchase::from_new(PurchaseId::new(), new)
    }

    #[tokio::test]
    async fn upsert_twice_keeps_one_record() {
        let store = InMemoryStore::new();
        let body = patch(serde_json::json!({"name": "Alice"}));

        let first = store.upsert_user("a@x.com", &body).await.unwrap();
        let second = store.upsert_user("a@x.com", &body).await.unwrap();

        assert_eq!(first, UpdateResult::upserted("a@x.com"));
        assert_eq!(second, UpdateResult::matched(false));
        assert_eq!(store.list_users().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn set_role_does_not_insert() {
        let store = InMemoryStore::new();

        let result = store.set_role("ghost@x.com", Role::Admin).await.unwrap();

        assert_eq!(result, UpdateResult::unmatched());
        assert!(store.find_user("ghost@x.com").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn directory_reads_roles_from_users() {
        let store = Arc::new(InMemoryStore::new());
        store
            .upsert_user("a@x.com", &patch(serde_json::json!({"role": "admin"})))
            .await
            .unwrap();
        store.upsert_user("b@x.com", &UserPatch::default()).await.unwrap();
        let directory = UserDirectory::new(store);

        assert_eq!(directory.role_of("a@x.com").await.unwrap(), Some(Role::Admin));
        assert_eq!(directory.role_of("b@x.com").await.unwrap(), Some(Role::None));
        assert_eq!(directory.role_of("c@x.com").await.unwrap(), None);
        assert!(lookup_admin_status("a@x.com", &directory).await.unwrap());
    }

    #[tokio::test]
    async fn product_round_trip_count_and_delete() {
        let store = InMemoryStore::new();
        let drill = product("Drill");
        let id = drill.id;

        let inserted = store.insert_product(drill.clone()).await.unwrap();
        store.insert_product(product("Saw")).await.unwrap();

        assert_eq!(inserted.inserted_id, id.to_string());
        assert_eq!(store.find_product(id).await.unwrap(), Some(drill));
        assert_eq!(store.count_products().await.unwrap(), 2);

        assert_eq!(store.delete_product(id).await.unwrap().deleted_count, 1);
        assert_eq!(store.delete_product(id).await.unwrap().deleted_count, 0);
        assert_eq!(store.count_products().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn lists_keep_insertion_order() {
        let store = InMemoryStore::new();
        for name in ["a", "b", "c"] {
            store.insert_product(product(name)).await.unwrap();
        }

        let names: Vec<_> = store
            .list_products()
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(names, ["a", "b", "c"]);
    }

    #[tokio::test]
    async fn mark_paid_requires_matching_email() {
        let store = InMemoryStore::new();
        let order = purchase("a@x.com");
        let id = order.id;
        store.insert_purchase(order).await.unwrap();

        let wrong = store.mark_paid(id, "b@x.com", "tx1").await.unwrap();
        let right = store.mark_paid(id, "a@x.com", "tx1").await.unwrap();

        assert_eq!(wrong.matched_count, 0);
        assert_eq!(right, UpdateResult::matched(true));
        let stored = &store.purchases_by_email("a@x.com").await.unwrap()[0];
        assert!(stored.paid);
        assert_eq!(stored.transaction_id.as_deref(), Some("tx1"));
    }

    #[tokio::test]
    async fn delete_by_email_removes_oldest_only() {
        let store = InMemoryStore::new();
        let first = purchase("a@x.com");
        let first_id = first.id;
        store.insert_purchase(first).await.unwrap();
        store.insert_purchase(purchase("a@x.com")).await.unwrap();

        let result = store.delete_purchase_by_email("a@x.com").await.unwrap();

        assert_eq!(result.deleted_count, 1);
        let remaining = store.purchases_by_email("a@x.com").await.unwrap();
        assert_eq!(remaining.len(), 1);
        assert_ne!(remaining[0].id, first_id);
    }

    #[tokio::test]
    async fn payments_are_listed_per_purchase() {
        let store = InMemoryStore::new();
        let purchase_id = PurchaseId::new();
        let body = RecordPayment { transaction_id: "tx1".to_string() };
        store
            .insert_payment(Payment::record(purchase_id, "a@x.com", body, Utc::now()))
            .await
            .unwrap();

        assert_eq!(store.payments_for_purchase(purchase_id).await.unwrap().len(), 1);
        assert!(store.payments_for_purchase(PurchaseId::new()).await.unwrap().is_empty());
    }
}
