//! `storefront-core` — shared building blocks for the storefront documents.
//!
//! This crate contains **pure** primitives (no HTTP, no storage).

pub mod entity;
pub mod error;
pub mod id;
pub mod write_result;

pub use entity::Entity;
pub use error::{DomainError, DomainResult};
pub use id::{PaymentId, ProductId, PurchaseId, ReviewId};
pub use write_result::{DeleteResult, InsertResult, UpdateResult};
