//! Seams to the hosted identity service.
//!
//! Handlers and the auth gate only see these traits; `GoTrueClient` is the
//! production implementation and tests plug in an in-memory one.
use async_trait::async_trait;

use super::types::{AuthenticatedUser, IdentityError};

/// Resolves a bearer token to the user it was issued for.
///
/// No caching: every call is a round trip to the identity service.
#[async_trait]
pub trait TokenVerifier: Send + Sync {
    async fn verify(&self, token: &str) -> Result<AuthenticatedUser, IdentityError>;
}

/// Privileged user management (demo seeding only).
#[async_trait]
pub trait UserAdmin: Send + Sync {
    async fn find_user_by_email(
        &self,
        email: &str,
    ) -> Result<Option<AuthenticatedUser>, IdentityError>;

    // Creates a user with a confirmed email.
    async fn create_user(
        &self,
        email: &str,
        password: &str,
    ) -> Result<AuthenticatedUser, IdentityError>;
}
