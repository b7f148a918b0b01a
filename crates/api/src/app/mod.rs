//! HTTP application wiring (Axum router + guards).
//!
//! - `routes/`: handlers, one file per resource, plus the route table
//! - `dto.rs`: response payloads that are not persistence results
//! - `errors.rs`: error-to-response mapping

use axum::{Extension, Router};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::context::AppContext;

pub mod dto;
pub mod errors;
pub mod routes;

/// Build the full HTTP router (public entrypoint used by `main.rs`).
pub fn build_app(ctx: AppContext) -> Router {
    routes::router(&ctx).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive())
            .layer(Extension(ctx)),
    )
}
