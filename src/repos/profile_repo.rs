/*
 * Responsibility
 * - profiles: one row per identity, keyed by the identity's id
 */
use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::repos::error::RepoResult;

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ProfileRow {
    pub id: Uuid,
    pub full_name: Option<String>,
    pub username: Option<String>,
    pub avatar_url: Option<String>,
    pub role: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug)]
pub struct NewProfile<'a> {
    pub full_name: Option<&'a str>,
    pub username: Option<&'a str>,
    pub avatar_url: Option<&'a str>,
    pub role: Option<&'a str>,
}

// Every field is tri-state:
// - None: do not update
// - Some(None): set NULL
// - Some(Some(v)): set v
#[derive(Debug, Default)]
pub struct ProfilePatch<'a> {
    pub full_name: Option<Option<&'a str>>,
    pub username: Option<Option<&'a str>>,
    pub avatar_url: Option<Option<&'a str>>,
    pub role: Option<Option<&'a str>>,
}

impl ProfilePatch<'_> {
    pub fn is_empty(&self) -> bool {
        self.full_name.is_none()
            && self.username.is_none()
            && self.avatar_url.is_none()
            && self.role.is_none()
    }
}

pub async fn get(db: &PgPool, id: Uuid) -> RepoResult<Option<ProfileRow>> {
    let row = sqlx::query_as::<_, ProfileRow>(
        r#"
        SELECT id, full_name, username, avatar_url, role, created_at, updated_at
        FROM profiles
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(db)
    .await?;

    Ok(row)
}

/// Inserts the profile unless one already exists, then returns the stored row.
/// A concurrent first request for the same identity ends up reading the winner's row.
pub async fn create_if_absent(
    db: &PgPool,
    id: Uuid,
    new: &NewProfile<'_>,
) -> RepoResult<ProfileRow> {
    sqlx::query(
        r#"
        INSERT INTO profiles (id, full_name, username, avatar_url, role)
        VALUES ($1, $2, $3, $4, $5)
        ON CONFLICT (id) DO NOTHING
        "#,
    )
    .bind(id)
    .bind(new.full_name)
    .bind(new.username)
    .bind(new.avatar_url)
    .bind(new.role)
    .execute(db)
    .await?;

    let row = sqlx::query_as::<_, ProfileRow>(
        r#"
        SELECT id, full_name, username, avatar_url, role, created_at, updated_at
        FROM profiles
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_one(db)
    .await?;

    Ok(row)
}

/// Writes `new` over an existing profile, creating it if needed.
pub async fn upsert(db: &PgPool, id: Uuid, new: &NewProfile<'_>) -> RepoResult<ProfileRow> {
    let row = sqlx::query_as::<_, ProfileRow>(
        r#"
        INSERT INTO profiles (id, full_name, username, avatar_url, role)
        VALUES ($1, $2, $3, $4, $5)
        ON CONFLICT (id) DO UPDATE
        SET
            full_name = EXCLUDED.full_name,
            username = EXCLUDED.username,
            avatar_url = EXCLUDED.avatar_url,
            role = EXCLUDED.role,
            updated_at = now()
        RETURNING id, full_name, username, avatar_url, role, created_at, updated_at
        "#,
    )
    .bind(id)
    .bind(new.full_name)
    .bind(new.username)
    .bind(new.avatar_url)
    .bind(new.role)
    .fetch_one(db)
    .await?;

    Ok(row)
}

pub async fn update(
    db: &PgPool,
    id: Uuid,
    patch: &ProfilePatch<'_>,
) -> RepoResult<Option<ProfileRow>> {
    let row = sqlx::query_as::<_, ProfileRow>(
        r#"
        UPDATE profiles
        SET
            full_name = CASE WHEN $2 THEN $3 ELSE full_name END,
            username = CASE WHEN $4 THEN $5 ELSE username END,
            avatar_url = CASE WHEN $6 THEN $7 ELSE avatar_url END,
            role = CASE WHEN $8 THEN $9 ELSE role END,
            updated_at = now()
        WHERE id = $1
        RETURNING id, full_name, username, avatar_url, role, created_at, updated_at
        "#,
    )
    .bind(id)
    .bind(patch.full_name.is_some())
    .bind(patch.full_name.flatten())
    .bind(patch.username.is_some())
    .bind(patch.username.flatten())
    .bind(patch.avatar_url.is_some())
    .bind(patch.avatar_url.flatten())
    .bind(patch.role.is_some())
    .bind(patch.role.flatten())
    .fetch_optional(db)
    .await?;

    Ok(row)
}
