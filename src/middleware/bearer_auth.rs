/*
 * Responsibility
 * - The auth gate: Authorization header -> bearer token -> verified identity
 * - Every failure is Unauthorized; only the message differs
 * - No caching: each call asks the identity service again
 */
use axum::http::{HeaderMap, header};

use crate::error::AppError;
use crate::services::identity::{AuthenticatedUser, TokenVerifier};

pub const BEARER_PREFIX: &str = "Bearer ";

pub const MSG_MISSING_HEADER: &str = "Missing Authorization header";
pub const MSG_INVALID_HEADER: &str = "Invalid Authorization header";
pub const MSG_INVALID_TOKEN: &str = "Invalid or expired token";

/// Extracts the token from `Authorization: Bearer <token>`.
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, AppError> {
    let rest = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix(BEARER_PREFIX))
        .ok_or_else(|| AppError::unauthorized(MSG_MISSING_HEADER))?;

    let token = rest.trim();
    if token.is_empty() {
        return Err(AppError::unauthorized(MSG_INVALID_HEADER));
    }

    Ok(token)
}

pub async fn authenticate(
    headers: &HeaderMap,
    verifier: &dyn TokenVerifier,
) -> Result<AuthenticatedUser, AppError> {
    let token = bearer_token(headers)?;

    verifier.verify(token).await.map_err(|err| {
        tracing::warn!(error = %err, "access token verification failed");
        AppError::unauthorized(MSG_INVALID_TOKEN)
    })
}

#[cfg(test)]
mod tests {
    use axum::http::HeaderValue;

    use super::*;
    use crate::testing::{FakeIdentity, VALID_TOKEN};

    fn headers(auth: Option<&str>) -> HeaderMap {
        let mut headers = HeaderMap::new();
        if let Some(value) = auth {
            headers.insert(header::AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        }
        headers
    }

    fn message(err: AppError) -> String {
        match err {
            AppError::Unauthorized(message) => message,
            other => panic!("expected Unauthorized, got {other:?}"),
        }
    }

    #[test]
    fn absent_header_is_missing() {
        let err = bearer_token(&headers(None)).unwrap_err();
        assert_eq!(message(err), MSG_MISSING_HEADER);
    }

    #[test]
    fn other_schemes_are_missing() {
        for value in ["Basic dXNlcjpwYXNz", "bearer abc", "Bearerabc", "Token abc"] {
            let err = bearer_token(&headers(Some(value))).unwrap_err();
            assert_eq!(message(err), MSG_MISSING_HEADER, "{value}");
        }
    }

    #[test]
    fn blank_token_is_invalid() {
        let err = bearer_token(&headers(Some("Bearer    "))).unwrap_err();
        assert_eq!(message(err), MSG_INVALID_HEADER);
    }

    #[test]
    fn token_is_trimmed() {
        let h = headers(Some("Bearer  abc.def  "));
        assert_eq!(bearer_token(&h).unwrap(), "abc.def");
    }

    #[tokio::test]
    async fn verified_token_resolves_identity_unchanged() {
        let identity = FakeIdentity::new();
        let h = headers(Some(&format!("Bearer {VALID_TOKEN}")));

        let user = authenticate(&h, &identity).await.unwrap();
        assert_eq!(user, identity.user());
    }

    #[tokio::test]
    async fn rejected_token_is_unauthorized() {
        let identity = FakeIdentity::new();
        let h = headers(Some("Bearer expired-token"));

        let err = authenticate(&h, &identity).await.unwrap_err();
        assert_eq!(message(err), MSG_INVALID_TOKEN);
    }

    #[tokio::test]
    async fn every_call_reaches_the_identity_service() {
        let identity = FakeIdentity::new();
        let h = headers(Some(&format!("Bearer {VALID_TOKEN}")));

        authenticate(&h, &identity).await.unwrap();
        authenticate(&h, &identity).await.unwrap();
        assert_eq!(identity.verify_calls(), 2);

        // Malformed headers fail before any outbound call.
        authenticate(&headers(None), &identity).await.unwrap_err();
        assert_eq!(identity.verify_calls(), 2);
    }
}
