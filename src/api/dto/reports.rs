/*
 * Responsibility
 * - Reports request/response DTOs
 */
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::api::dto::fields::{self, is_present, missing_fields, non_blank};
use crate::error::AppError;
use crate::repos::report_repo::{
    DEFAULT_STATUS, NewReport, ReportPatch, ReportRow, ReportWithHistory,
};

#[derive(Debug, Default, Deserialize)]
pub struct ReportFilter {
    pub status: Option<String>,
}

impl ReportFilter {
    pub fn status(&self) -> Option<&str> {
        non_blank(&self.status)
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateReportRequest {
    pub judul: Option<String>,
    #[serde(default, deserialize_with = "fields::parsed")]
    pub tanggal: Option<NaiveDate>,
    pub isi: Option<String>,
    pub status: Option<String>,
}

impl CreateReportRequest {
    pub fn validate(&self) -> Result<NewReport<'_>, AppError> {
        match (non_blank(&self.judul), self.tanggal, non_blank(&self.isi)) {
            (Some(judul), Some(tanggal), Some(isi)) => Ok(NewReport {
                judul,
                tanggal,
                isi,
                status: non_blank(&self.status).unwrap_or(DEFAULT_STATUS),
            }),
            _ => Err(missing_fields(&[
                ("judul", !is_present(&self.judul)),
                ("tanggal", self.tanggal.is_none()),
                ("isi", !is_present(&self.isi)),
            ])),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct UpdateReportRequest {
    pub judul: Option<String>,
    #[serde(default, deserialize_with = "fields::parsed")]
    pub tanggal: Option<NaiveDate>,
    pub isi: Option<String>,
    pub status: Option<String>,
}

impl UpdateReportRequest {
    pub fn validate(&self) -> Result<ReportPatch<'_>, AppError> {
        for (name, value) in [
            ("judul", &self.judul),
            ("isi", &self.isi),
            ("status", &self.status),
        ] {
            if value.as_deref().is_some_and(|v| v.trim().is_empty()) {
                return Err(AppError::bad_request(format!("{name} cannot be empty")));
            }
        }

        Ok(ReportPatch {
            judul: self.judul.as_deref(),
            tanggal: self.tanggal,
            isi: self.isi.as_deref(),
            status: self.status.as_deref(),
        })
    }
}

#[derive(Debug, Serialize)]
pub struct ReportListResponse {
    pub ok: bool,
    pub reports: Vec<ReportRow>,
}

impl ReportListResponse {
    pub fn new(reports: Vec<ReportRow>) -> Self {
        Self { ok: true, reports }
    }
}

#[derive(Debug, Serialize)]
pub struct ReportResponse {
    pub ok: bool,
    pub report: ReportRow,
}

impl ReportResponse {
    pub fn new(report: ReportRow) -> Self {
        Self { ok: true, report }
    }
}

/// Single report with its edit history nested under `report_history`.
#[derive(Debug, Serialize)]
pub struct ReportDetailResponse {
    pub ok: bool,
    pub report: ReportWithHistory,
}

impl ReportDetailResponse {
    pub fn new(report: ReportWithHistory) -> Self {
        Self { ok: true, report }
    }
}
