/*
 * Responsibility
 * - /reports CRUD handlers
 * - History rows are written by report_repo; handlers only read them back
 */
use axum::{Json, extract::State};

use crate::{
    api::{
        dto::{
            OkResponse,
            reports::{
                CreateReportRequest, ReportDetailResponse, ReportFilter, ReportListResponse,
                ReportResponse, UpdateReportRequest,
            },
        },
        extractors::{AuthUser, JsonBody, QueryParams, ReportId},
    },
    error::AppError,
    repos::report_repo,
    state::AppState,
};

pub async fn list_reports(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    QueryParams(filter): QueryParams<ReportFilter>,
) -> Result<Json<ReportListResponse>, AppError> {
    let rows = report_repo::list(&state.db, user.id, filter.status()).await?;
    Ok(Json(ReportListResponse::new(rows)))
}

pub async fn create_report(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    JsonBody(req): JsonBody<CreateReportRequest>,
) -> Result<Json<ReportResponse>, AppError> {
    let new = req.validate()?;
    let row = report_repo::create(&state.db, user.id, &new).await?;
    Ok(Json(ReportResponse::new(row)))
}

pub async fn get_report(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    report_id: ReportId,
) -> Result<Json<ReportDetailResponse>, AppError> {
    let report = report_repo::get(&state.db, user.id, report_id.id)
        .await?
        .ok_or_else(|| report_id.not_found())?;
    Ok(Json(ReportDetailResponse::new(report)))
}

pub async fn update_report(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    report_id: ReportId,
    JsonBody(req): JsonBody<UpdateReportRequest>,
) -> Result<Json<ReportResponse>, AppError> {
    let patch = req.validate()?;
    let row = report_repo::update(&state.db, user.id, report_id.id, &patch)
        .await?
        .ok_or_else(|| report_id.not_found())?;
    Ok(Json(ReportResponse::new(row)))
}

pub async fn delete_report(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    report_id: ReportId,
) -> Result<Json<OkResponse>, AppError> {
    report_repo::delete(&state.db, user.id, report_id.id).await?;
    Ok(Json(OkResponse::new()))
}
