//! The two request stages guarding protected routes.
//!
//! `require_identity` always runs first; `require_admin` is layered only on
//! admin routes and reads the identity the first stage attached.

use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::Response,
};
use chrono::Utc;

use storefront_auth::{authorize_admin, verify, AuthError};

use crate::app::errors::ApiError;
use crate::context::{AppContext, IdentityContext};

pub async fn require_identity(
    State(ctx): State<AppContext>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, ApiError> {
    let claim = verify(req.headers(), &ctx.keys, Utc::now()).inspect_err(|e| {
        tracing::debug!(error = %e, path = %req.uri().path(), "credential rejected");
    })?;

    req.extensions_mut().insert(IdentityContext::new(claim));
    Ok(next.run(req).await)
}

pub async fn require_admin(
    State(ctx): State<AppContext>,
    req: Request<Body>,
    next: Next,
) -> Result<Response, ApiError> {
    // Missing identity means the layers were stacked in the wrong order.
    let claim = req
        .extensions()
        .get::<IdentityContext>()
        .map(|identity| identity.claim().clone())
        .ok_or(ApiError::Auth(AuthError::MissingCredential))?;

    authorize_admin(&claim, &ctx.directory).await?;
    Ok(next.run(req).await)
}
