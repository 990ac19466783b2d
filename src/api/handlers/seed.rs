/*
 * Responsibility
 * - POST /api/dev/seed: demo login plus sample rows (development only)
 * - Production answers 404 as if the route did not exist
 */
use axum::{Json, extract::State};
use serde::Serialize;

use crate::{
    error::AppError,
    services::seed::{self, DEMO_EMAIL, DEMO_PASSWORD, SeedCounts, SeededUser},
    state::AppState,
};

#[derive(Debug, Serialize)]
pub struct SeedResponse {
    pub ok: bool,
    pub user: SeededUser,
    pub inserts: SeedCounts,
    pub note: String,
}

pub async fn seed_demo_data(State(state): State<AppState>) -> Result<Json<SeedResponse>, AppError> {
    if state.app_env.is_production() {
        return Err(AppError::not_found("route"));
    }

    let outcome = seed::run(&state.db, state.users.as_ref()).await?;

    Ok(Json(SeedResponse {
        ok: true,
        user: outcome.user,
        inserts: outcome.inserts,
        note: format!("Login with {DEMO_EMAIL} / {DEMO_PASSWORD} to test."),
    }))
}
