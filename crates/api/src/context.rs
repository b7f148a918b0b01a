//! Application context: everything a handler needs, built once at startup.

use std::sync::Arc;

use storefront_auth::{IdentityClaim, TokenKeys};
use storefront_infra::{
    InMemoryStore, PaymentGateway, PaymentStore, PostgresStore, ProductStore, PurchaseStore, ReviewStore,
    StoreResult, StripeGateway, UnconfiguredGateway, UserDirectory, UserStore,
};

use crate::config::AppConfig;

/// Shared, read-only handles injected into every handler and both auth stages.
#[derive(Clone)]
pub struct AppContext {
    pub users: Arc<dyn UserStore>,
    pub products: Arc<dyn ProductStore>,
    pub purchases: Arc<dyn PurchaseStore>,
    pub payments: Arc<dyn PaymentStore>,
    pub reviews: Arc<dyn ReviewStore>,
    pub directory: UserDirectory,
    pub keys: Arc<TokenKeys>,
    pub gateway: Arc<dyn PaymentGateway>,
}

impl AppContext {
    /// Wire every collection to one backing store.
    pub fn with_store<S>(store: Arc<S>, keys: TokenKeys, gateway: Arc<dyn PaymentGateway>) -> Self
    where
        S: UserStore + ProductStore + PurchaseStore + PaymentStore + ReviewStore + 'static,
    {
        let users: Arc<dyn UserStore> = store.clone();
        Self {
            directory: UserDirectory::new(users.clone()),
            users,
            products: store.clone(),
            purchases: store.clone(),
            payments: store.clone(),
            reviews: store,
            keys: Arc::new(keys),
            gateway,
        }
    }

    pub fn in_memory(keys: TokenKeys, gateway: Arc<dyn PaymentGateway>) -> Self {
        Self::with_store(Arc::new(InMemoryStore::new()), keys, gateway)
    }

    /// Build the context described by `config`, connecting to Postgres when
    /// a database URL is configured.
    pub async fn from_config(config: &AppConfig) -> StoreResult<Self> {
        let keys = TokenKeys::new(config.token_secret.as_bytes());

        let gateway: Arc<dyn PaymentGateway> = match &config.payment_secret_key {
            Some(key) => Arc::new(StripeGateway::new(&config.payment_api_base, key.clone())),
            None => {
                tracing::warn!("STRIPE_SECRET_KEY not set; payment intents will fail");
                Arc::new(UnconfiguredGateway)
            }
        };

        match &config.database_url {
            Some(url) => {
                let store = PostgresStore::connect(url).await?;
                tracing::info!("using postgres document store");
                Ok(Self::with_store(Arc::new(store), keys, gateway))
            }
            None => {
                tracing::warn!("DATABASE_URL not set; using in-memory store");
                Ok(Self::in_memory(keys, gateway))
            }
        }
    }
}

/// Verified identity for the current request, inserted by the credential stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityContext {
    claim: IdentityClaim,
}

impl IdentityContext {
    pub fn new(claim: IdentityClaim) -> Self {
        Self { claim }
    }

    pub fn claim(&self) -> &IdentityClaim {
        &self.claim
    }
}
