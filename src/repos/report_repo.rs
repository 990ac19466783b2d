/*
 * Responsibility
 * - reports CRUD, scoped by profile_id
 * - every create/update appends a report_history snapshot in the same transaction
 */
use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use sqlx::{FromRow, PgPool, Postgres, Transaction};
use uuid::Uuid;

use crate::repos::error::RepoResult;

pub const DEFAULT_STATUS: &str = "draft";

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ReportRow {
    pub id: Uuid,
    pub profile_id: Uuid,
    pub judul: String,
    pub tanggal: NaiveDate,
    pub isi: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ReportHistoryRow {
    pub id: Uuid,
    pub report_id: Uuid,
    pub editor_id: Uuid,
    pub isi: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReportWithHistory {
    #[serde(flatten)]
    pub report: ReportRow,
    pub report_history: Vec<ReportHistoryRow>,
}

#[derive(Debug)]
pub struct NewReport<'a> {
    pub judul: &'a str,
    pub tanggal: NaiveDate,
    pub isi: &'a str,
    pub status: &'a str,
}

#[derive(Debug, Default)]
pub struct ReportPatch<'a> {
    pub judul: Option<&'a str>,
    pub tanggal: Option<NaiveDate>,
    pub isi: Option<&'a str>,
    pub status: Option<&'a str>,
}

pub async fn list(
    db: &PgPool,
    profile_id: Uuid,
    status: Option<&str>,
) -> RepoResult<Vec<ReportRow>> {
    let rows = sqlx::query_as::<_, ReportRow>(
        r#"
        SELECT id, profile_id, judul, tanggal, isi, status, created_at, updated_at
        FROM reports
        WHERE profile_id = $1
          AND ($2::text IS NULL OR status = $2)
        ORDER BY tanggal DESC
        "#,
    )
    .bind(profile_id)
    .bind(status)
    .fetch_all(db)
    .await?;

    Ok(rows)
}

pub async fn create(db: &PgPool, profile_id: Uuid, new: &NewReport<'_>) -> RepoResult<ReportRow> {
    let mut tx = db.begin().await?;

    let row = sqlx::query_as::<_, ReportRow>(
        r#"
        INSERT INTO reports (profile_id, judul, tanggal, isi, status)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING id, profile_id, judul, tanggal, isi, status, created_at, updated_at
        "#,
    )
    .bind(profile_id)
    .bind(new.judul)
    .bind(new.tanggal)
    .bind(new.isi)
    .bind(new.status)
    .fetch_one(&mut *tx)
    .await?;

    append_history(&mut tx, &row, profile_id).await?;
    tx.commit().await?;

    Ok(row)
}

pub async fn get(
    db: &PgPool,
    profile_id: Uuid,
    id: Uuid,
) -> RepoResult<Option<ReportWithHistory>> {
    let Some(report) = sqlx::query_as::<_, ReportRow>(
        r#"
        SELECT id, profile_id, judul, tanggal, isi, status, created_at, updated_at
        FROM reports
        WHERE id = $1 AND profile_id = $2
        "#,
    )
    .bind(id)
    .bind(profile_id)
    .fetch_optional(db)
    .await?
    else {
        return Ok(None);
    };

    let report_history = sqlx::query_as::<_, ReportHistoryRow>(
        r#"
        SELECT id, report_id, editor_id, isi, status, created_at
        FROM report_history
        WHERE report_id = $1
        ORDER BY created_at ASC
        "#,
    )
    .bind(report.id)
    .fetch_all(db)
    .await?;

    Ok(Some(ReportWithHistory {
        report,
        report_history,
    }))
}

/// Returns `None` (and records no history) when the report is absent or not owned.
pub async fn update(
    db: &PgPool,
    profile_id: Uuid,
    id: Uuid,
    patch: &ReportPatch<'_>,
) -> RepoResult<Option<ReportRow>> {
    let mut tx = db.begin().await?;

    let row = sqlx::query_as::<_, ReportRow>(
        r#"
        UPDATE reports
        SET
            judul = COALESCE($3, judul),
            tanggal = COALESCE($4, tanggal),
            isi = COALESCE($5, isi),
            status = COALESCE($6, status),
            updated_at = now()
        WHERE id = $1 AND profile_id = $2
        RETURNING id, profile_id, judul, tanggal, isi, status, created_at, updated_at
        "#,
    )
    .bind(id)
    .bind(profile_id)
    .bind(patch.judul)
    .bind(patch.tanggal)
    .bind(patch.isi)
    .bind(patch.status)
    .fetch_optional(&mut *tx)
    .await?;

    let Some(row) = row else {
        tx.rollback().await?;
        return Ok(None);
    };

    append_history(&mut tx, &row, profile_id).await?;
    tx.commit().await?;

    Ok(Some(row))
}

pub async fn delete(db: &PgPool, profile_id: Uuid, id: Uuid) -> RepoResult<bool> {
    let result = sqlx::query(
        r#"
        DELETE FROM reports
        WHERE id = $1 AND profile_id = $2
        "#,
    )
    .bind(id)
    .bind(profile_id)
    .execute(db)
    .await?;

    Ok(result.rows_affected() > 0)
}

async fn append_history(
    tx: &mut Transaction<'_, Postgres>,
    report: &ReportRow,
    editor_id: Uuid,
) -> RepoResult<()> {
    sqlx::query(
        r#"
        INSERT INTO report_history (report_id, editor_id, isi, status)
        VALUES ($1, $2, $3, $4)
        "#,
    )
    .bind(report.id)
    .bind(editor_id)
    .bind(&report.isi)
    .bind(&report.status)
    .execute(&mut **tx)
    .await?;

    Ok(())
}
