//! `storefront-auth` — credential verification and admin authorization.
//!
//! Two stages, always composed in this order:
//! 1. [`verify`] turns request headers into an [`IdentityClaim`] (no IO).
//! 2. [`authorize_admin`] checks the stored role of that identity through a
//!    [`RoleDirectory`].
//!
//! This crate knows nothing about routing or storage engines.

pub mod authorize;
pub mod claims;
pub mod credential;
pub mod error;
pub mod roles;
pub mod user;

pub use authorize::{authorize_admin, lookup_admin_status, DirectoryError, RoleDirectory};
pub use claims::{validate_claims, IdentityClaim, TokenKeys, TOKEN_TTL_DAYS};
pub use credential::{extract_bearer, verify};
pub use error::{AuthError, TokenError};
pub use roles::Role;
pub use user::{UserPatch, UserRecord};
