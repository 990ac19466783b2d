/*
 * Responsibility
 * - schedule_items CRUD, scoped by profile_id
 */
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::Serialize;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::repos::error::RepoResult;

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ScheduleRow {
    pub id: Uuid,
    pub profile_id: Uuid,
    pub tanggal: NaiveDate,
    pub jam: Option<NaiveTime>,
    pub judul: String,
    pub deskripsi: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug)]
pub struct NewScheduleItem<'a> {
    pub tanggal: NaiveDate,
    pub jam: Option<NaiveTime>,
    pub judul: &'a str,
    pub deskripsi: Option<&'a str>,
}

// jam / deskripsi are nullable, so they are tri-state here.
#[derive(Debug, Default)]
pub struct SchedulePatch<'a> {
    pub tanggal: Option<NaiveDate>,
    pub jam: Option<Option<NaiveTime>>,
    pub judul: Option<&'a str>,
    pub deskripsi: Option<Option<&'a str>>,
}

pub async fn list(
    db: &PgPool,
    profile_id: Uuid,
    tanggal: Option<NaiveDate>,
) -> RepoResult<Vec<ScheduleRow>> {
    let rows = sqlx::query_as::<_, ScheduleRow>(
        r#"
        SELECT id, profile_id, tanggal, jam, judul, deskripsi, created_at
        FROM schedule_items
        WHERE profile_id = $1
          AND ($2::date IS NULL OR tanggal = $2)
        ORDER BY tanggal ASC, jam ASC
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
    new: &NewScheduleItem<'_>,
) -> RepoResult<ScheduleRow> {
    let row = sqlx::query_as::<_, ScheduleRow>(
        r#"
        INSERT INTO schedule_items (profile_id, tanggal, jam, judul, deskripsi)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING id, profile_id, tanggal, jam, judul, deskripsi, created_at
        "#,
    )
    .bind(profile_id)
    .bind(new.tanggal)
    .bind(new.jam)
    .bind(new.judul)
    .bind(new.deskripsi)
    .fetch_one(db)
    .await?;

    Ok(row)
}

pub async fn get(db: &PgPool, profile_id: Uuid, id: Uuid) -> RepoResult<Option<ScheduleRow>> {
    let row = sqlx::query_as::<_, ScheduleRow>(
        r#"
        SELECT id, profile_id, tanggal, jam, judul, deskripsi, created_at
        FROM schedule_items
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
    patch: &SchedulePatch<'_>,
) -> RepoResult<Option<ScheduleRow>> {
    let row = sqlx::query_as::<_, ScheduleRow>(
        r#"
        UPDATE schedule_items
        SET
            tanggal = COALESCE($3, tanggal),
            jam = CASE WHEN $4 THEN $5 ELSE jam END,
            judul = COALESCE($6, judul),
            deskripsi = CASE WHEN $7 THEN $8 ELSE deskripsi END
        WHERE id = $1 AND profile_id = $2
        RETURNING id, profile_id, tanggal, jam, judul, deskripsi, created_at
        "#,
    )
    .bind(id)
    .bind(profile_id)
    .bind(patch.tanggal)
    .bind(patch.jam.is_some())
    .bind(patch.jam.flatten())
    .bind(patch.judul)
    .bind(patch.deskripsi.is_some())
    .bind(patch.deskripsi.flatten())
    .fetch_optional(db)
    .await?;

    Ok(row)
}

pub async fn delete(db: &PgPool, profile_id: Uuid, id: Uuid) -> RepoResult<bool> {
    let result = sqlx::query(
        r#"
        DELETE FROM schedule_items
        WHERE id = $1 AND profile_id = $2
        "#,
    )
    .bind(id)
    .bind(profile_id)
    .execute(db)
    .await?;

    Ok(result.rows_affected() > 0)
}
