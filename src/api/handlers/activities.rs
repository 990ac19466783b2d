/*
 * Responsibility
 * - /activities CRUD handlers
 * - Every query is scoped to the authenticated caller's profile
 */
use axum::{Json, extract::State};

use crate::{
    api::{
        dto::{
            OkResponse,
            activities::{
                ActivityFilter, ActivityListResponse, ActivityResponse, CreateActivityRequest,
                UpdateActivityRequest,
            },
        },
        extractors::{ActivityId, AuthUser, JsonBody, QueryParams},
    },
    error::AppError,
    repos::activity_repo,
    state::AppState,
};

pub async fn list_activities(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    QueryParams(filter): QueryParams<ActivityFilter>,
) -> Result<Json<ActivityListResponse>, AppError> {
    let rows = activity_repo::list(&state.db, user.id, filter.tanggal).await?;
    Ok(Json(ActivityListResponse::new(rows)))
}

pub async fn create_activity(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    JsonBody(req): JsonBody<CreateActivityRequest>,
) -> Result<Json<ActivityResponse>, AppError> {
    let new = req.validate()?;
    let row = activity_repo::create(&state.db, user.id, &new).await?;
    Ok(Json(ActivityResponse::new(row)))
}

pub async fn get_activity(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    activity_id: ActivityId,
) -> Result<Json<ActivityResponse>, AppError> {
    let row = activity_repo::get(&state.db, user.id, activity_id.id)
        .await?
        .ok_or_else(|| activity_id.not_found())?;
    Ok(Json(ActivityResponse::new(row)))
}

pub async fn update_activity(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    activity_id: ActivityId,
    JsonBody(req): JsonBody<UpdateActivityRequest>,
) -> Result<Json<ActivityResponse>, AppError> {
    let patch = req.validate()?;
    let row = activity_repo::update(&state.db, user.id, activity_id.id, &patch)
        .await?
        .ok_or_else(|| activity_id.not_found())?;
    Ok(Json(ActivityResponse::new(row)))
}

/// Deleting a row that is absent (or someone else's) still answers `{ ok: true }`.
pub async fn delete_activity(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    activity_id: ActivityId,
) -> Result<Json<OkResponse>, AppError> {
    let deleted = activity_repo::delete(&state.db, user.id, activity_id.id).await?;
    tracing::debug!(id = %activity_id.id, deleted, "activity delete");
    Ok(Json(OkResponse::new()))
}
