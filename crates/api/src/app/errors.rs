//! One error type for every handler, mapped to the fixed response bodies.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

use storefront_auth::{AuthError, DirectoryError, TokenError};
use storefront_core::DomainError;
use storefront_infra::{PaymentGatewayError, StoreError};

pub const UNAUTHORIZED_ACCESS: &str = "Unauthorized Access";
pub const FORBIDDEN_ACCESS: &str = "Forbidden Access";
pub const INTERNAL_SERVER_ERROR: &str = "Internal Server Error";

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Directory(#[from] DirectoryError),

    #[error(transparent)]
    Payment(#[from] PaymentGatewayError),

    #[error(transparent)]
    Token(#[from] TokenError),
}

pub type ApiResult<T> = Result<T, ApiError>;

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Auth(AuthError::Directory(e)) => internal_error(&e),
            ApiError::Auth(e) if e.is_unauthenticated() => message(StatusCode::UNAUTHORIZED, UNAUTHORIZED_ACCESS),
            ApiError::Auth(_) => message(StatusCode::FORBIDDEN, FORBIDDEN_ACCESS),
            ApiError::Domain(DomainError::InvalidId(msg)) => json_error(StatusCode::BAD_REQUEST, "invalid_id", msg),
            ApiError::Domain(DomainError::Validation(msg)) => {
                json_error(StatusCode::BAD_REQUEST, "validation_error", msg)
            }
            ApiError::Store(e) => internal_error(&e),
            ApiError::Directory(e) => internal_error(&e),
            ApiError::Payment(e) => internal_error(&e),
            ApiError::Token(e) => internal_error(&e),
        }
    }
}

/// Log the cause and answer with the generic 500 body.
fn internal_error(err: &dyn std::error::Error) -> Response {
    tracing::error!(error = %err, "request failed");
    message(StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_SERVER_ERROR)
}

fn message(status: StatusCode, message: &'static str) -> Response {
    (status, axum::Json(json!({ "message": message }))).into_response()
}

pub fn json_error(status: StatusCode, code: &'static str, message: impl Into<String>) -> Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}
