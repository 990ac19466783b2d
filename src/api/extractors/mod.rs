/*
 * Responsibility
 * - Request extractors whose rejections speak the `{ ok: false, message }` envelope
 */
pub mod auth_user;
pub mod body;
pub mod resource_id;

pub use auth_user::AuthUser;
pub use body::{JsonBody, QueryParams};
pub use resource_id::*;
