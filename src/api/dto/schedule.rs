/*
 * Responsibility
 * - Schedule request/response DTOs
 */
use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::api::dto::fields::{self, is_present, missing_fields, non_blank};
use crate::error::AppError;
use crate::repos::schedule_repo::{NewScheduleItem, SchedulePatch, ScheduleRow};

#[derive(Debug, Default, Deserialize)]
pub struct ScheduleFilter {
    #[serde(default, deserialize_with = "fields::parsed")]
    pub tanggal: Option<NaiveDate>,
}

#[derive(Debug, Deserialize)]
pub struct CreateScheduleRequest {
    #[serde(default, deserialize_with = "fields::parsed")]
    pub tanggal: Option<NaiveDate>,
    pub judul: Option<String>,
    #[serde(default, deserialize_with = "fields::parsed")]
    pub jam: Option<NaiveTime>,
    pub deskripsi: Option<String>,
}

impl CreateScheduleRequest {
    pub fn validate(&self) -> Result<NewScheduleItem<'_>, AppError> {
        match (self.tanggal, non_blank(&self.judul)) {
            (Some(tanggal), Some(judul)) => Ok(NewScheduleItem {
                tanggal,
                jam: self.jam,
                judul,
                deskripsi: self.deskripsi.as_deref(),
            }),
            _ => Err(missing_fields(&[
                ("tanggal", self.tanggal.is_none()),
                ("judul", !is_present(&self.judul)),
            ])),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct UpdateScheduleRequest {
    #[serde(default, deserialize_with = "fields::parsed")]
    pub tanggal: Option<NaiveDate>,
    #[serde(default, deserialize_with = "fields::tri_state_parsed")]
    pub jam: Option<Option<NaiveTime>>,
    pub judul: Option<String>,
    #[serde(default, deserialize_with = "fields::tri_state")]
    pub deskripsi: Option<Option<String>>,
}

impl UpdateScheduleRequest {
    pub fn validate(&self) -> Result<SchedulePatch<'_>, AppError> {
        if let Some(judul) = &self.judul
            && judul.trim().is_empty()
        {
            return Err(AppError::bad_request("judul cannot be empty"));
        }

        Ok(SchedulePatch {
            tanggal: self.tanggal,
            jam: self.jam,
            judul: self.judul.as_deref(),
            deskripsi: self.deskripsi.as_ref().map(|inner| inner.as_deref()),
        })
    }
}

#[derive(Debug, Serialize)]
pub struct ScheduleListResponse {
    pub ok: bool,
    pub schedule: Vec<ScheduleRow>,
}

impl ScheduleListResponse {
    pub fn new(schedule: Vec<ScheduleRow>) -> Self {
        Self { ok: true, schedule }
    }
}

#[derive(Debug, Serialize)]
pub struct ScheduleResponse {
    pub ok: bool,
    pub schedule: ScheduleRow,
}

impl ScheduleResponse {
    pub fn new(schedule: ScheduleRow) -> Self {
        Self { ok: true, schedule }
    }
}
