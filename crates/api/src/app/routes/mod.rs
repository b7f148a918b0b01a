//! Route tables, grouped by guard.
//!
//! Guards are attached per method, so a method a path does not serve still
//! answers 405 instead of going through authentication.
//!
//! Every `/purchase/<segment>` route uses the same parameter name (`:key`):
//! depending on the method it carries an email or a purchase id.

use axum::{
    middleware::from_fn_with_state,
    routing::{delete, get, patch, post, put, MethodRouter},
    Router,
};

use crate::context::AppContext;
use crate::middleware;

pub mod payments;
pub mod products;
pub mod purchases;
pub mod reviews;
pub mod system;
pub mod users;

/// Only reachable with a verified identity.
fn identity(ctx: &AppContext, route: MethodRouter) -> MethodRouter {
    route.route_layer(from_fn_with_state(ctx.clone(), middleware::require_identity))
}

/// Only reachable with a verified identity whose user record is an admin.
fn admin(ctx: &AppContext, route: MethodRouter) -> MethodRouter {
    // Outermost layer runs first: identity, then the admin gate.
    identity(
        ctx,
        route.route_layer(from_fn_with_state(ctx.clone(), middleware::require_admin)),
    )
}

pub fn router(ctx: &AppContext) -> Router {
    Router::new()
        .route("/", get(system::hello))
        .route("/user", identity(ctx, get(users::list_users)))
        .route(
            "/user/:email",
            put(users::upsert_user).merge(identity(ctx, get(users::get_user))),
        )
        .route("/user/admin/:email", admin(ctx, put(users::make_admin)))
        .route("/admin/:email", get(users::admin_status))
        .route(
            "/product",
            get(products::list_products).merge(identity(ctx, post(products::create_product))),
        )
        .route(
            "/product/:id",
            get(products::get_product).merge(admin(ctx, delete(products::delete_product))),
        )
        .route("/productCount", get(products::count_products))
        .route(
            "/purchase",
            identity(ctx, post(purchases::create_purchase)).merge(admin(ctx, get(purchases::list_purchases))),
        )
        .route(
            "/purchase/:key",
            delete(purchases::delete_purchase)
                .merge(identity(ctx, get(purchases::purchases_for_email)))
                .merge(admin(ctx, patch(purchases::mark_shipped))),
        )
        .route("/purchase/:key/:id", identity(ctx, patch(purchases::record_payment)))
        .route(
            "/review",
            get(reviews::list_reviews).merge(identity(ctx, post(reviews::create_review))),
        )
        .route("/create-payment-intent", identity(ctx, post(payments::create_payment_intent)))
}
