/*
 * Responsibility
 * - Bulk inserts for the demo seed
 * - Rows that hit any unique constraint (id or attendance day key) are skipped
 */
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::repos::error::RepoResult;

#[derive(Debug, Clone)]
pub struct SeedAttendance {
    pub id: Uuid,
    pub profile_id: Uuid,
    pub tanggal: NaiveDate,
    pub status: &'static str,
    pub masuk_at: Option<DateTime<Utc>>,
    pub pulang_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone)]
pub struct SeedActivity {
    pub id: Uuid,
    pub profile_id: Uuid,
    pub tanggal: NaiveDate,
    pub jam_mulai: NaiveTime,
    pub jam_selesai: NaiveTime,
    pub kegiatan: &'static str,
    pub catatan: &'static str,
}

#[derive(Debug, Clone)]
pub struct SeedReport {
    pub id: Uuid,
    pub profile_id: Uuid,
    pub judul: &'static str,
    pub tanggal: NaiveDate,
    pub isi: &'static str,
    pub status: &'static str,
}

pub async fn insert_attendance(db: &PgPool, rows: &[SeedAttendance]) -> RepoResult<u64> {
    let mut inserted = 0;
    for row in rows {
        let result = sqlx::query(
            r#"
            INSERT INTO attendance (id, profile_id, tanggal, status, masuk_at, pulang_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT DO NOTHING
            "#,
        )
        .bind(row.id)
        .bind(row.profile_id)
        .bind(row.tanggal)
        .bind(row.status)
        .bind(row.masuk_at)
        .bind(row.pulang_at)
        .execute(db)
        .await?;
        inserted += result.rows_affected();
    }

    Ok(inserted)
}

pub async fn insert_activities(db: &PgPool, rows: &[SeedActivity]) -> RepoResult<u64> {
    let mut inserted = 0;
    for row in rows {
        let result = sqlx::query(
            r#"
            INSERT INTO activities (id, profile_id, tanggal, jam_mulai, jam_selesai, kegiatan, catatan)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ON CONFLICT DO NOTHING
            "#,
        )
        .bind(row.id)
        .bind(row.profile_id)
        .bind(row.tanggal)
        .bind(row.jam_mulai)
        .bind(row.jam_selesai)
        .bind(row.kegiatan)
        .bind(row.catatan)
        .execute(db)
        .await?;
        inserted += result.rows_affected();
    }

    Ok(inserted)
}

pub async fn insert_reports(db: &PgPool, rows: &[SeedReport]) -> RepoResult<u64> {
    let mut inserted = 0;
    for row in rows {
        let result = sqlx::query(
            r#"
            INSERT INTO reports (id, profile_id, judul, tanggal, isi, status)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT DO NOTHING
            "#,
        )
        .bind(row.id)
        .bind(row.profile_id)
        .bind(row.judul)
        .bind(row.tanggal)
        .bind(row.isi)
        .bind(row.status)
        .execute(db)
        .await?;
        inserted += result.rows_affected();
    }

    Ok(inserted)
}
