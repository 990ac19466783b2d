/*
 * Responsibility
 * - GET /profile (creates the row on first read)
 * - PUT /profile
 */
use axum::{Json, extract::State};

use crate::{
    api::{
        dto::profile::{ProfileResponse, UpdateProfileRequest, default_profile},
        extractors::{AuthUser, JsonBody},
    },
    error::AppError,
    repos::profile_repo,
    state::AppState,
};

pub async fn get_profile(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
) -> Result<Json<ProfileResponse>, AppError> {
    if let Some(row) = profile_repo::get(&state.db, user.id).await? {
        return Ok(Json(ProfileResponse::new(row)));
    }

    let row = profile_repo::create_if_absent(&state.db, user.id, &default_profile(&user)).await?;
    tracing::info!(user_id = %user.id, "profile created from identity metadata");

    Ok(Json(ProfileResponse::new(row)))
}

pub async fn update_profile(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    JsonBody(req): JsonBody<UpdateProfileRequest>,
) -> Result<Json<ProfileResponse>, AppError> {
    let patch = req.validate()?;
    let row = profile_repo::update(&state.db, user.id, &patch)
        .await?
        .ok_or_else(|| AppError::not_found("profile"))?;
    Ok(Json(ProfileResponse::new(row)))
}
