//! Infrastructure layer: persistence collaborator and payment provider.

pub mod payments;
pub mod store;

pub use payments::{
    PaymentGateway, PaymentGatewayError, PaymentIntent, StripeGateway, UnconfiguredGateway, STRIPE_API_BASE,
};
pub use store::{
    InMemoryStore, PaymentStore, PostgresStore, ProductStore, PurchaseStore, ReviewStore, StoreError,
    StoreResult, UserDirectory, UserStore,
};
