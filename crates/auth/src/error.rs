use thiserror::Error;

use crate::authorize::DirectoryError;

/// Failure to produce or accept a session token.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("token has expired")]
    Expired,

    #[error("token rejected: {0}")]
    Rejected(String),

    #[error("failed to sign token: {0}")]
    Signing(String),
}

/// Rejections produced by the credential verifier and the authorization gate.
///
/// The first three come from [`crate::verify`], the next two from
/// [`crate::authorize_admin`]. `Directory` is an infrastructure failure during
/// the gate's lookup, not a denial.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("no authorization header")]
    MissingCredential,

    #[error("authorization header is not a `<scheme> <token>` pair")]
    MalformedCredential,

    #[error("invalid credential: {0}")]
    InvalidCredential(TokenError),

    #[error("no user record for the authenticated email")]
    UnknownPrincipal,

    #[error("user is not an admin")]
    InsufficientPrivilege,

    #[error("role lookup failed: {0}")]
    Directory(#[from] DirectoryError),
}

impl AuthError {
    /// `true` when the request carried no credential at all.
    ///
    /// This is the only rejection reported as unauthenticated; every other
    /// denial is reported as forbidden.
    pub fn is_unauthenticated(&self) -> bool {
        matches!(self, AuthError::MissingCredential)
    }
}
