//! Catalog documents: product listings and customer reviews.
//!
//! Plain data plus the mapping from request bodies to stored documents
//! (no IO, no HTTP, no storage).

pub mod product;
pub mod review;

pub use product::{NewProduct, Product};
pub use review::{NewReview, Review};
