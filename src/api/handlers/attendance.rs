/*
 * Responsibility
 * - GET/POST /attendance
 * - POST records the day row and its clock event together (see attendance_repo::record)
 */
use axum::{Json, extract::State};
use chrono::Utc;

use crate::{
    api::{
        dto::attendance::{
            AttendanceListResponse, AttendanceRange, AttendanceResponse, MarkAttendanceRequest,
        },
        extractors::{AuthUser, JsonBody, QueryParams},
    },
    error::AppError,
    repos::attendance_repo,
    state::AppState,
};

pub async fn list_attendance(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    QueryParams(range): QueryParams<AttendanceRange>,
) -> Result<Json<AttendanceListResponse>, AppError> {
    let rows = attendance_repo::list(&state.db, user.id, range.start, range.end).await?;
    Ok(Json(AttendanceListResponse::new(rows)))
}

pub async fn mark_attendance(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    JsonBody(req): JsonBody<MarkAttendanceRequest>,
) -> Result<Json<AttendanceResponse>, AppError> {
    let mark = req.validate(Utc::now())?;
    let row = attendance_repo::record(&state.db, user.id, &mark).await?;

    tracing::info!(
        user_id = %user.id,
        tanggal = %row.tanggal,
        status = %row.status,
        "attendance recorded"
    );

    Ok(Json(AttendanceResponse::new(row)))
}
