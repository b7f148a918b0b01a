//! Authorization gate and the role lookup it depends on.

use async_trait::async_trait;
use thiserror::Error;

use crate::{AuthError, IdentityClaim, Role};

/// The role lookup failed for infrastructure reasons.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct DirectoryError(pub String);

/// Read access to stored user roles.
///
/// `Ok(None)` means no user record exists for the email.
#[async_trait]
pub trait RoleDirectory: Send + Sync {
    async fn role_of(&self, email: &str) -> Result<Option<Role>, DirectoryError>;
}

/// Self-identity check: is the authenticated principal an admin?
///
/// Always runs after the credential verifier; the email comes from the
/// verified claim, never from the request path.
pub async fn authorize_admin<D>(claim: &IdentityClaim, directory: &D) -> Result<(), AuthError>
where
    D: RoleDirectory + ?Sized,
{
    match directory.role_of(&claim.email).await? {
        Some(Role::Admin) => Ok(()),
        Some(_) => {
            tracing::debug!(email = %claim.email, "admin check denied: insufficient privilege");
            Err(AuthError::InsufficientPrivilege)
        }
        None => {
            tracing::debug!(email = %claim.email, "admin check denied: unknown principal");
            Err(AuthError::UnknownPrincipal)
        }
    }
}

/// Path-parameter role check: is the user named by `email` an admin?
///
/// Unauthenticated: the caller chooses which email to inspect. An unknown
/// email is reported as not admin.
pub async fn lookup_admin_status<D>(email: &str, directory: &D) -> Result<bool, DirectoryError>
where
    D: RoleDirectory + ?Sized,
{
    Ok(directory
        .role_of(email)
        .await?
        .is_some_and(|role| role.is_admin()))
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use chrono::{Duration, Utc};

    use super::*;

    struct FakeDirectory(HashMap<&'static str, Role>);

    #[async_trait]
    impl RoleDirectory for FakeDirectory {
        async fn role_of(&self, email: &str) -> Result<Option<Role>, DirectoryError> {
            Ok(self.0.get(email).copied())
        }
    }

    struct BrokenDirectory;

    #[async_trait]
    impl RoleDirectory for BrokenDirectory {
        async fn role_of(&self, _email: &str) -> Result<Option<Role>, DirectoryError> {
            Err(DirectoryError("connection reset".to_string()))
        }
    }

    fn directory() -> FakeDirectory {
        FakeDirectory(HashMap::from([
            ("admin@x.com", Role::Admin),
            ("user@x.com", Role::None),
        ]))
    }

    fn claim(email: &str) -> IdentityClaim {
        IdentityClaim::new(email, Utc::now(), Duration::days(1))
    }

    #[tokio::test]
    async fn admin_is_allowed() {
        assert_eq!(authorize_admin(&claim("admin@x.com"), &directory()).await, Ok(()));
    }

    #[tokio::test]
    async fn non_admin_is_insufficient_privilege() {
        assert_eq!(
            authorize_admin(&claim("user@x.com"), &directory()).await,
            Err(AuthError::InsufficientPrivilege)
        );
    }

    #[tokio::test]
    async fn missing_record_is_unknown_principal() {
        assert_eq!(
            authorize_admin(&claim("ghost@x.com"), &directory()).await,
            Err(AuthError::UnknownPrincipal)
        );
    }

    #[tokio::test]
    async fn lookup_failure_is_not_a_denial() {
        let err = authorize_admin(&claim("admin@x.com"), &BrokenDirectory).await.unwrap_err();
        assert!(matches!(err, AuthError::Directory(_)));
    }

    #[tokio::test]
    async fn path_check_reports_status_for_any_email() {
        let dir = directory();
        assert!(lookup_admin_status("admin@x.com", &dir).await.unwrap());
        assert!(!lookup_admin_status("user@x.com", &dir).await.unwrap());
        assert!(!lookup_admin_status("ghost@x.com", &dir).await.unwrap());
    }

    #[tokio::test]
    async fn gate_works_through_trait_objects() {
        let dir: Box<dyn RoleDirectory> = Box::new(directory());
        assert!(authorize_admin(&claim("admin@x.com"), dir.as_ref()).await.is_ok());
    }
}
