/*
 * Responsibility
 * - /schedule CRUD handlers
 */
use axum::{Json, extract::State};

use crate::{
    api::{
        dto::{
            OkResponse,
            schedule::{
                CreateScheduleRequest, ScheduleFilter, ScheduleListResponse, ScheduleResponse,
                UpdateScheduleRequest,
            },
        },
        extractors::{AuthUser, JsonBody, QueryParams, ScheduleId},
    },
    error::AppError,
    repos::schedule_repo,
    state::AppState,
};

pub async fn list_schedule(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    QueryParams(filter): QueryParams<ScheduleFilter>,
) -> Result<Json<ScheduleListResponse>, AppError> {
    let rows = schedule_repo::list(&state.db, user.id, filter.tanggal).await?;
    Ok(Json(ScheduleListResponse::new(rows)))
}

pub async fn create_schedule_item(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    JsonBody(req): JsonBody<CreateScheduleRequest>,
) -> Result<Json<ScheduleResponse>, AppError> {
    let new = req.validate()?;
    let row = schedule_repo::create(&state.db, user.id, &new).await?;
    Ok(Json(ScheduleResponse::new(row)))
}

pub async fn get_schedule_item(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    schedule_id: ScheduleId,
) -> Result<Json<ScheduleResponse>, AppError> {
    let row = schedule_repo::get(&state.db, user.id, schedule_id.id)
        .await?
        .ok_or_else(|| schedule_id.not_found())?;
    Ok(Json(ScheduleResponse::new(row)))
}

pub async fn update_schedule_item(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    schedule_id: ScheduleId,
    JsonBody(req): JsonBody<UpdateScheduleRequest>,
) -> Result<Json<ScheduleResponse>, AppError> {
    let patch = req.validate()?;
    let row = schedule_repo::update(&state.db, user.id, schedule_id.id, &patch)
        .await?
        .ok_or_else(|| schedule_id.not_found())?;
    Ok(Json(ScheduleResponse::new(row)))
}

pub async fn delete_schedule_item(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    schedule_id: ScheduleId,
) -> Result<Json<OkResponse>, AppError> {
    schedule_repo::delete(&state.db, user.id, schedule_id.id).await?;
    Ok(Json(OkResponse::new()))
}
