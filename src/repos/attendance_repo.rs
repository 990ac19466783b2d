/*
 * Responsibility
 * - attendance (one row per profile/day/status) + attendance_events (clock-in/out log)
 * - record(): upsert the day row and append its event in one transaction
 */
use std::collections::HashMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::repos::error::RepoResult;

pub const STATUS_MASUK: &str = "masuk";
pub const STATUS_PULANG: &str = "pulang";

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AttendanceRow {
    pub id: Uuid,
    pub profile_id: Uuid,
    pub tanggal: NaiveDate,
    pub status: String,
    pub masuk_at: Option<DateTime<Utc>>,
    pub pulang_at: Option<DateTime<Utc>>,
    pub lokasi: Option<String>,
    pub catatan: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AttendanceEventRow {
    pub id: Uuid,
    pub attendance_id: Uuid,
    pub event_type: String,
    pub recorded_at: DateTime<Utc>,
    pub device_info: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AttendanceWithEvents {
    #[serde(flatten)]
    pub attendance: AttendanceRow,
    pub attendance_events: Vec<AttendanceEventRow>,
}

#[derive(Debug)]
pub struct AttendanceMark<'a> {
    pub tanggal: NaiveDate,
    pub status: &'a str,
    pub recorded_at: DateTime<Utc>,
    // Tri-state: None keeps the stored value on a repeat mark, Some(None) clears it.
    pub lokasi: Option<Option<&'a str>>,
    pub catatan: Option<Option<&'a str>>,
}

impl AttendanceMark<'_> {
    /// Which timestamp column the mark stamps, if any.
    fn stamps(&self) -> (Option<DateTime<Utc>>, Option<DateTime<Utc>>) {
        match self.status {
            STATUS_MASUK => (Some(self.recorded_at), None),
            STATUS_PULANG => (None, Some(self.recorded_at)),
            _ => (None, None),
        }
    }
}

pub async fn list(
    db: &PgPool,
    profile_id: Uuid,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
) -> RepoResult<Vec<AttendanceWithEvents>> {
    let rows = sqlx::query_as::<_, AttendanceRow>(
        r#"
        SELECT id, profile_id, tanggal, status, masuk_at, pulang_at, lokasi, catatan, created_at
        FROM attendance
        WHERE profile_id = $1
          AND ($2::date IS NULL OR tanggal >= $2)
          AND ($3::date IS NULL OR tanggal <= $3)
        ORDER BY tanggal DESC, created_at DESC
        "#,
    )
    .bind(profile_id)
    .bind(start)
    .bind(end)
    .fetch_all(db)
    .await?;

    if rows.is_empty() {
        return Ok(Vec::new());
    }

    let ids: Vec<Uuid> = rows.iter().map(|r| r.id).collect();
    let events = sqlx::query_as::<_, AttendanceEventRow>(
        r#"
        SELECT id, attendance_id, event_type, recorded_at, device_info, created_at
        FROM attendance_events
        WHERE attendance_id = ANY($1)
        ORDER BY recorded_at ASC
        "#,
    )
    .bind(&ids[..])
    .fetch_all(db)
    .await?;

    let mut by_attendance: HashMap<Uuid, Vec<AttendanceEventRow>> = HashMap::new();
    for event in events {
        by_attendance
            .entry(event.attendance_id)
            .or_default()
            .push(event);
    }

    Ok(rows
        .into_iter()
        .map(|attendance| AttendanceWithEvents {
            attendance_events: by_attendance.remove(&attendance.id).unwrap_or_default(),
            attendance,
        })
        .collect())
}

pub async fn record(
    db: &PgPool,
    profile_id: Uuid,
    mark: &AttendanceMark<'_>,
) -> RepoResult<AttendanceRow> {
    let (masuk_at, pulang_at) = mark.stamps();

    let mut tx = db.begin().await?;

    // Conflict key allows one row per (profile, day, status).
    // Stamps not supplied by this mark keep their stored values; lokasi/catatan
    // are written whenever the key was sent, even as null.
    let row = sqlx::query_as::<_, AttendanceRow>(
        r#"
        INSERT INTO attendance (profile_id, tanggal, status, masuk_at, pulang_at, lokasi, catatan)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        ON CONFLICT (profile_id, tanggal, status) DO UPDATE
        SET
            masuk_at = COALESCE(EXCLUDED.masuk_at, attendance.masuk_at),
            pulang_at = COALESCE(EXCLUDED.pulang_at, attendance.pulang_at),
            lokasi = CASE WHEN $8 THEN EXCLUDED.lokasi ELSE attendance.lokasi END,
            catatan = CASE WHEN $9 THEN EXCLUDED.catatan ELSE attendance.catatan END
        RETURNING id, profile_id, tanggal, status, masuk_at, pulang_at, lokasi, catatan, created_at
        "#,
    )
    .bind(profile_id)
    .bind(mark.tanggal)
    .bind(mark.status)
    .bind(masuk_at)
    .bind(pulang_at)
    .bind(mark.lokasi.flatten())
    .bind(mark.catatan.flatten())
    .bind(mark.lokasi.is_some())
    .bind(mark.catatan.is_some())
    .fetch_one(&mut *tx)
    .await?;

    sqlx::query(
        r#"
        INSERT INTO attendance_events (attendance_id, event_type, recorded_at, device_info)
        VALUES ($1, $2, $3, NULL)
        "#,
    )
    .bind(row.id)
    .bind(mark.status)
    .bind(mark.recorded_at)
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;

    Ok(row)
}
