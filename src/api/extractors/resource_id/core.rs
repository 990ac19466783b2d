/**
 * Responsibility
 *  - Take the `{id}` path segment and parse it as the row's UUID
 *  - A malformed id is a 400 in the envelope, not axum's plain-text rejection
 *
 * Keeps out
 *  - Concrete resource names (those live in types.rs)
 */
use std::marker::PhantomData;

use axum::{
    extract::{FromRequestParts, Path},
    http::request::Parts,
};
use uuid::Uuid;

use crate::error::AppError;

/// Marker for a resource addressed by `/{id}`.
pub trait ResourceTag {
    /// Singular name used in error messages and envelopes.
    const NAME: &'static str;
}

pub struct ResourceId<T> {
    pub id: Uuid,
    _marker: PhantomData<T>,
}

impl<T> ResourceId<T> {
    fn new(id: Uuid) -> Self {
        Self {
            id,
            _marker: PhantomData,
        }
    }
}

impl<T: ResourceTag> ResourceId<T> {
    /// 404 for this resource; used when a scoped lookup matches nothing.
    pub fn not_found(&self) -> AppError {
        AppError::not_found(T::NAME)
    }
}

impl<T> Clone for ResourceId<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for ResourceId<T> {}

impl<S, T> FromRequestParts<S> for ResourceId<T>
where
    S: Send + Sync,
    T: ResourceTag + Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let invalid = || AppError::bad_request(format!("invalid {} id", T::NAME));

        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|_| invalid())?;
        let id = Uuid::parse_str(raw.trim()).map_err(|_| invalid())?;

        Ok(Self::new(id))
    }
}

impl<T: ResourceTag> std::fmt::Debug for ResourceId<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResourceId")
            .field("resource", &T::NAME)
            .field("id", &self.id)
            .finish()
    }
}
