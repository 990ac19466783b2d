/*
 * Responsibility
 * - GET /health: process liveness, no I/O
 * - GET /api/health/supabase: database round trip against `profiles`
 */
use axum::{Json, extract::State};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::{error::AppError, repos::health_repo, state::AppState};

pub const CHECKED_TABLE: &str = "profiles";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DatabaseHealthResponse {
    pub ok: bool,
    pub checked_table: &'static str,
    pub row_count: i64,
    pub timestamp: DateTime<Utc>,
}

pub async fn liveness() -> &'static str {
    "ok"
}

pub async fn database_health(
    State(state): State<AppState>,
) -> Result<Json<DatabaseHealthResponse>, AppError> {
    let row_count = health_repo::count_profiles(&state.db).await?;

    Ok(Json(DatabaseHealthResponse {
        ok: true,
        checked_table: CHECKED_TABLE,
        row_count,
        timestamp: Utc::now(),
    }))
}
