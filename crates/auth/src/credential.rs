//! Credential verifier: request headers in, identity claim out.

use chrono::{DateTime, Utc};
use http::{header::AUTHORIZATION, HeaderMap};

use crate::{AuthError, IdentityClaim, TokenKeys};

/// Pull the token out of a `<scheme> <token>` authorization header.
///
/// The header is split on single spaces and the second element is taken; the
/// scheme itself is not checked. A header without a space, with an empty
/// second element, or with non-visible-ASCII bytes is malformed.
pub fn extract_bearer(headers: &HeaderMap) -> Result<&str, AuthError> {
    let header = headers
        .get(AUTHORIZATION)
        .ok_or(AuthError::MissingCredential)?;

    let header = header.to_str().map_err(|_| AuthError::MalformedCredential)?;

    match header.split(' ').nth(1) {
        Some(token) if !token.is_empty() => Ok(token),
        _ => Err(AuthError::MalformedCredential),
    }
}

/// Verify the request's bearer token and return the embedded identity.
///
/// Pure check: no persistence access.
pub fn verify(
    headers: &HeaderMap,
    keys: &TokenKeys,
    now: DateTime<Utc>,
) -> Result<IdentityClaim, AuthError> {
    let token = extract_bearer(headers)?;
    keys.decode(token, now).map_err(AuthError::InvalidCredential)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TokenError;
    use chrono::Duration;
    use http::HeaderValue;

    fn headers_with(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn missing_header_is_missing_credential() {
        let keys = TokenKeys::new(b"secret");
        let err = verify(&HeaderMap::new(), &keys, Utc::now()).unwrap_err();
        assert_eq!(err, AuthError::MissingCredential);
        assert!(err.is_unauthenticated());
    }

    #[test]
    fn header_without_space_is_malformed() {
        let keys = TokenKeys::new(b"secret");
        let token = keys.sign("a@x.com", Utc::now()).unwrap();

        let err = verify(&headers_with(&token), &keys, Utc::now()).unwrap_err();
        assert_eq!(err, AuthError::MalformedCredential);
        assert!(!err.is_unauthenticated());
    }

    #[test]
    fn trailing_space_without_token_is_malformed() {
        assert_eq!(
            extract_bearer(&headers_with("Bearer ")).unwrap_err(),
            AuthError::MalformedCredential
        );
    }

    #[test]
    fn scheme_is_not_checked() {
        assert_eq!(extract_bearer(&headers_with("Token abc")).unwrap(), "abc");
        assert_eq!(extract_bearer(&headers_with("Bearer abc extra")).unwrap(), "abc");
    }

    #[test]
    fn valid_bearer_yields_claim() {
        let keys = TokenKeys::new(b"secret");
        let now = Utc::now();
        let token = keys.sign("a@x.com", now).unwrap();

        let claim = verify(&headers_with(&format!("Bearer {token}")), &keys, now).unwrap();
        assert_eq!(claim.email, "a@x.com");
    }

    #[test]
    fn expired_bearer_is_invalid() {
        let keys = TokenKeys::new(b"secret");
        let issued = Utc::now() - Duration::days(2);
        let token = keys.sign("a@x.com", issued).unwrap();

        let err = verify(&headers_with(&format!("Bearer {token}")), &keys, Utc::now()).unwrap_err();
        assert_eq!(err, AuthError::InvalidCredential(TokenError::Expired));
    }

    #[test]
    fn non_ascii_header_is_malformed() {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_bytes(b"Bearer \xfftoken").unwrap());
        assert_eq!(extract_bearer(&headers).unwrap_err(), AuthError::MalformedCredential);
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Property: arbitrary header text is either rejected or verified, never a panic.
            #[test]
            fn arbitrary_headers_never_panic(value in "[ -~]{0,64}") {
                let keys = TokenKeys::new(b"secret");
                let Ok(header) = HeaderValue::from_str(&value) else {
                    return Ok(());
                };
                let mut headers = HeaderMap::new();
                headers.insert(AUTHORIZATION, header);

                let result = verify(&headers, &keys, Utc::now());
                prop_assert!(result.is_err());
            }
        }
    }
}
