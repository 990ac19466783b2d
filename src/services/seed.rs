/*
 * Responsibility
 * - Demo data for local development: a known login plus a day of records
 * - Plan construction is pure (testable); run() does the I/O
 */
use chrono::{DateTime, Days, NaiveDate, NaiveTime, Utc};
use serde::Serialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::AppError;
use crate::repos::{
    profile_repo::{self, NewProfile},
    seed_repo::{self, SeedActivity, SeedAttendance, SeedReport},
};
use crate::services::identity::UserAdmin;

pub const DEMO_EMAIL: &str = "demo@student.app";
pub const DEMO_PASSWORD: &str = "Demo1234!";

#[derive(Debug, Serialize)]
pub struct SeededUser {
    pub id: Uuid,
    pub email: &'static str,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct SeedCounts {
    pub attendance: usize,
    pub activities: usize,
    pub reports: usize,
}

#[derive(Debug, Serialize)]
pub struct SeedOutcome {
    pub user: SeededUser,
    pub inserts: SeedCounts,
}

#[derive(Debug)]
pub struct SeedPlan {
    pub attendance: Vec<SeedAttendance>,
    pub activities: Vec<SeedActivity>,
    pub reports: Vec<SeedReport>,
}

fn at(hour: u32, minute: u32) -> NaiveTime {
    // Only called with literal in-range values.
    NaiveTime::from_hms_opt(hour, minute, 0).unwrap_or(NaiveTime::MIN)
}

fn stamp(day: NaiveDate, hour: u32) -> DateTime<Utc> {
    day.and_time(at(hour, 0)).and_utc()
}

impl SeedPlan {
    /// Yesterday gets a full attendance day and two activities; today gets a draft report.
    pub fn for_day(today: NaiveDate, profile_id: Uuid) -> Self {
        let yesterday = today.checked_sub_days(Days::new(1)).unwrap_or(today);

        let attendance = vec![
            SeedAttendance {
                id: Uuid::new_v4(),
                profile_id,
                tanggal: yesterday,
                status: "masuk",
                masuk_at: Some(stamp(yesterday, 8)),
                pulang_at: None,
            },
            SeedAttendance {
                id: Uuid::new_v4(),
                profile_id,
                tanggal: yesterday,
                status: "pulang",
                masuk_at: None,
                pulang_at: Some(stamp(yesterday, 16)),
            },
        ];

        let activities = vec![
            SeedActivity {
                id: Uuid::new_v4(),
                profile_id,
                tanggal: yesterday,
                jam_mulai: at(8, 0),
                jam_selesai: at(12, 0),
                kegiatan: "UI/UX Design",
                catatan: "Mengerjakan wireframe halaman presensi.",
            },
            SeedActivity {
                id: Uuid::new_v4(),
                profile_id,
                tanggal: yesterday,
                jam_mulai: at(13, 0),
                jam_selesai: at(16, 0),
                kegiatan: "Frontend Development",
                catatan: "Implementasi komponen laporan.",
            },
        ];

        let reports = vec![
            SeedReport {
                id: Uuid::new_v4(),
                profile_id,
                judul: "Laporan Harian UI/UX",
                tanggal: yesterday,
                isi: "Membuat desain onboarding dan form presensi.",
                status: "submitted",
            },
            SeedReport {
                id: Uuid::new_v4(),
                profile_id,
                judul: "Laporan Frontend",
                tanggal: today,
                isi: "Integrasi Supabase untuk presensi dan laporan.",
                status: "draft",
            },
        ];

        Self {
            attendance,
            activities,
            reports,
        }
    }

    pub fn counts(&self) -> SeedCounts {
        SeedCounts {
            attendance: self.attendance.len(),
            activities: self.activities.len(),
            reports: self.reports.len(),
        }
    }
}

pub async fn run(db: &PgPool, users: &dyn UserAdmin) -> Result<SeedOutcome, AppError> {
    let user = match users
        .find_user_by_email(DEMO_EMAIL)
        .await
        .map_err(AppError::internal)?
    {
        Some(user) => user,
        None => users
            .create_user(DEMO_EMAIL, DEMO_PASSWORD)
            .await
            .map_err(AppError::internal)?,
    };

    profile_repo::upsert(
        db,
        user.id,
        &NewProfile {
            full_name: Some("Bengbeng Demo"),
            username: Some("bengbeng"),
            avatar_url: None,
            role: Some("siswa"),
        },
    )
    .await?;

    let plan = SeedPlan::for_day(Utc::now().date_naive(), user.id);

    // Independent tables; no ordering between them.
    let (attendance, activities, reports) = tokio::try_join!(
        seed_repo::insert_attendance(db, &plan.attendance),
        seed_repo::insert_activities(db, &plan.activities),
        seed_repo::insert_reports(db, &plan.reports),
    )?;

    tracing::info!(
        user_id = %user.id,
        attendance,
        activities,
        reports,
        "demo data seeded"
    );

    Ok(SeedOutcome {
        user: SeededUser {
            id: user.id,
            email: DEMO_EMAIL,
        },
        inserts: plan.counts(),
    })
}
