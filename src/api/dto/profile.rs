/*
 * Responsibility
 * - Profile request/response DTOs
 * - Defaults for a profile created on first read, taken from identity metadata
 */
use serde::{Deserialize, Serialize};

use crate::api::dto::fields;
use crate::error::AppError;
use crate::repos::profile_repo::{NewProfile, ProfilePatch, ProfileRow};
use crate::services::identity::AuthenticatedUser;

/// Only these keys are writable; anything else in the body is ignored.
/// A key sent as `null` clears the column.
#[derive(Debug, Deserialize)]
pub struct UpdateProfileRequest {
    #[serde(default, deserialize_with = "fields::tri_state")]
    pub full_name: Option<Option<String>>,
    #[serde(default, deserialize_with = "fields::tri_state")]
    pub username: Option<Option<String>>,
    #[serde(default, deserialize_with = "fields::tri_state")]
    pub avatar_url: Option<Option<String>>,
    #[serde(default, deserialize_with = "fields::tri_state")]
    pub role: Option<Option<String>>,
}

fn as_patch_field(value: &Option<Option<String>>) -> Option<Option<&str>> {
    value.as_ref().map(|inner| inner.as_deref())
}

impl UpdateProfileRequest {
    pub fn validate(&self) -> Result<ProfilePatch<'_>, AppError> {
        let patch = ProfilePatch {
            full_name: as_patch_field(&self.full_name),
            username: as_patch_field(&self.username),
            avatar_url: as_patch_field(&self.avatar_url),
            role: as_patch_field(&self.role),
        };

        if patch.is_empty() {
            return Err(AppError::bad_request("No updatable fields provided"));
        }
        Ok(patch)
    }
}

/// `full_name` falls back to the email, `username` to the email's local part.
pub fn default_profile(user: &AuthenticatedUser) -> NewProfile<'_> {
    NewProfile {
        full_name: user
            .metadata_str("full_name")
            .or(user.email.as_deref()),
        username: user
            .metadata_str("username")
            .or_else(|| user.email_local_part()),
        avatar_url: user.metadata_str("avatar_url"),
        role: None,
    }
}

#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub ok: bool,
    pub profile: ProfileRow,
}

impl ProfileResponse {
    pub fn new(profile: ProfileRow) -> Self {
        Self { ok: true, profile }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use uuid::Uuid;

    use super::*;

    fn user(value: serde_json::Value) -> AuthenticatedUser {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn defaults_fall_back_to_email() {
        let u = user(json!({ "id": Uuid::new_v4(), "email": "siti@sekolah.id" }));
        let new = default_profile(&u);
        assert_eq!(new.full_name, Some("siti@sekolah.id"));
        assert_eq!(new.username, Some("siti"));
        assert_eq!(new.avatar_url, None);
    }

    #[test]
    fn metadata_overrides_email_defaults() {
        let u = user(json!({
            "id": Uuid::new_v4(),
            "email": "siti@sekolah.id",
            "user_metadata": { "full_name": "Siti Aminah", "username": "aminah", "avatar_url": "https://cdn/a.png" }
        }));
        let new = default_profile(&u);
        assert_eq!(new.full_name, Some("Siti Aminah"));
        assert_eq!(new.username, Some("aminah"));
        assert_eq!(new.avatar_url, Some("https://cdn/a.png"));
    }

    #[test]
    fn update_without_known_fields_is_rejected() {
        let req: UpdateProfileRequest =
            serde_json::from_value(json!({ "email": "x@y.z" })).unwrap();
        assert_eq!(
            req.validate().unwrap_err().to_string(),
            "No updatable fields provided"
        );
    }

    #[test]
    fn null_is_a_write() {
        let req: UpdateProfileRequest =
            serde_json::from_value(json!({ "avatar_url": null })).unwrap();
        let patch = req.validate().unwrap();
        assert_eq!(patch.avatar_url, Some(None));
        assert_eq!(patch.full_name, None);
    }
}
