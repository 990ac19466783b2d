/*
 * Responsibility
 * - activities CRUD, always scoped by profile_id
 */
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::Serialize;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::repos::error::RepoResult;

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ActivityRow {
    pub id: Uuid,
    pub profile_id: Uuid,
    pub tanggal: NaiveDate,
    pub jam_mulai: NaiveTime,
    pub jam_selesai: NaiveTime,
    pub kegiatan: String,
    pub catatan: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug)]
pub struct NewActivity<'a> {
    pub tanggal: NaiveDate,
    pub jam_mulai: NaiveTime,
    pub jam_selesai: NaiveTime,
    pub kegiatan: &'a str,
    pub catatan: Option<&'a str>,
}

/// Fields left as `None` keep their stored value.
/// `catatan` is tri-state: `Some(None)` clears it.
#[derive(Debug, Default)]
pub struct ActivityPatch<'a> {
    pub tanggal: Option<NaiveDate>,
    pub jam_mulai: Option<NaiveTime>,
    pub jam_selesai: Option<NaiveTime>,
    pub kegiatan: Option<&'a str>,
    pub catatan: Option<Option<&'a str>>,
}

pub async fn list(
    db: &PgPool,
    profile_id: Uuid,
    tanggal: Option<NaiveDate>,
) -> RepoResult<Vec<ActivityRow>> {
    let rows = sqlx::query_as::<_, ActivityRow>(
        r#"
        SELECT id, profile_id, tanggal, jam_mulai, jam_selesai, kegiatan, catatan, created_at
        FROM activities
        WHERE profile_id = $1
          AND ($2::date IS NULL OR tanggal = $2)
        ORDER BY tanggal DESC, jam_mulai ASC
        "#,
    )
    .bind(profile_id)
    .bind(tanggal)
    .fetch_all(db)
    .await?;

    Ok(rows)
}

pub async fn create(
    db: &PgPool,
    profile_id: Uuid,
    new: &NewActivity<'_>,
) -> RepoResult<ActivityRow> {
    let row = sqlx::query_as::<_, ActivityRow>(
        r#"
        INSERT INTO activities (profile_id, tanggal, jam_mulai, jam_selesai, kegiatan, catatan)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING id, profile_id, tanggal, jam_mulai, jam_selesai, kegiatan, catatan, created_at
        "#,
    )
    .bind(profile_id)
    .bind(new.tanggal)
    .bind(new.jam_mulai)
    .bind(new.jam_selesai)
    .bind(new.kegiatan)
    .bind(new.catatan)
    .fetch_one(db)
    .await?;

    Ok(row)
}

pub async fn get(db: &PgPool, profile_id: Uuid, id: Uuid) -> RepoResult<Option<ActivityRow>> {
    let row = sqlx::query_as::<_, ActivityRow>(
        r#"
        SELECT id, profile_id, tanggal, jam_mulai, jam_selesai, kegiatan, catatan, created_at
        FROM activities
        WHERE id = $1 AND profile_id = $2
        "#,
    )
    .bind(id)
    .bind(profile_id)
    .fetch_optional(db)
    .await?;

    Ok(row)
}

pub async fn update(
    db: &PgPool,
    profile_id: Uuid,
    id: Uuid,
    patch: &ActivityPatch<'_>,
) -> RepoResult<Option<ActivityRow>> {
    let row = sqlx::query_as::<_, ActivityRow>(
        r#"
        UPDATE activities
        SET
            tanggal = COALESCE($3, tanggal),
            jam_mulai = COALESCE($4, jam_mulai),
            jam_selesai = COALESCE($5, jam_selesai),
            kegiatan = COALESCE($6, kegiatan),
            catatan = CASE WHEN $7 THEN $8 ELSE catatan END
        WHERE id = $1 AND profile_id = $2
        RETURNING id, profile_id, tanggal, jam_mulai, jam_selesai, kegiatan, catatan, created_at
        "#,
    )
    .bind(id)
    .bind(profile_id)
    .bind(patch.tanggal)
    .bind(patch.jam_mulai)
    .bind(patch.jam_selesai)
    .bind(patch.kegiatan)
    .bind(patch.catatan.is_some()) // $7: whether catatan is written
    .bind(patch.catatan.flatten()) // $8: new catatan (may be NULL)
    .fetch_optional(db)
    .await?;

    Ok(row)
}

/// Returns whether a row was removed. Deleting a missing row is not an error.
pub async fn delete(db: &PgPool, profile_id: Uuid, id: Uuid) -> RepoResult<bool> {
    let result = sqlx::query(
        r#"
        DELETE FROM activities
        WHERE id = $1 AND profile_id = $2
        "#,
    )
    .bind(id)
    .bind(profile_id)
    .execute(db)
    .await?;

    Ok(result.rows_affected() > 0)
}
