/*
 * Responsibility
 * - The identity a verified bearer token resolves to
 * - Identity-service error kinds (kept apart from AppError so the gate decides the status)
 */
use serde::Deserialize;
use serde_json::{Map, Value};
use thiserror::Error;
use uuid::Uuid;

/// A caller resolved by the identity service. Lives for one request; never persisted here.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct AuthenticatedUser {
    pub id: Uuid,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(rename = "user_metadata", default)]
    pub metadata: Map<String, Value>,
}

impl AuthenticatedUser {
    /// String-valued metadata entry; non-string values count as absent.
    pub fn metadata_str(&self, key: &str) -> Option<&str> {
        self.metadata.get(key).and_then(Value::as_str)
    }

    /// The part of the email before `@`.
    pub fn email_local_part(&self) -> Option<&str> {
        self.email
            .as_deref()
            .and_then(|email| email.split('@').next())
    }
}

#[derive(Debug, Error)]
pub enum IdentityError {
    #[error("identity service rejected the credential (HTTP {status})")]
    Rejected { status: u16 },

    #[error("identity service returned HTTP {status}: {body}")]
    Upstream { status: u16, body: String },

    #[error("identity service unreachable: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("unexpected identity service response: {0}")]
    Decode(#[source] reqwest::Error),

    #[error("invalid identity service configuration: {0}")]
    Config(&'static str),
}
