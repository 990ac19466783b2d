/*
 * Responsibility
 * - Attendance request/response DTOs
 * - `timestamp` defaults to the time the request is handled
 */
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::api::dto::fields::{self, is_present, missing_fields, non_blank};
use crate::error::AppError;
use crate::repos::attendance_repo::{AttendanceMark, AttendanceRow, AttendanceWithEvents};

#[derive(Debug, Default, Deserialize)]
pub struct AttendanceRange {
    #[serde(default, deserialize_with = "fields::parsed")]
    pub start: Option<NaiveDate>,
    #[serde(default, deserialize_with = "fields::parsed")]
    pub end: Option<NaiveDate>,
}

#[derive(Debug, Deserialize)]
pub struct MarkAttendanceRequest {
    #[serde(default, deserialize_with = "fields::parsed")]
    pub tanggal: Option<NaiveDate>,
    pub status: Option<String>,
    #[serde(default, deserialize_with = "fields::parsed")]
    pub timestamp: Option<DateTime<Utc>>,
    // Tri-state, so a repeat mark can clear them with null.
    #[serde(default, deserialize_with = "fields::tri_state")]
    pub lokasi: Option<Option<String>>,
    #[serde(default, deserialize_with = "fields::tri_state")]
    pub catatan: Option<Option<String>>,
}

impl MarkAttendanceRequest {
    pub fn validate(&self, now: DateTime<Utc>) -> Result<AttendanceMark<'_>, AppError> {
        match (self.tanggal, non_blank(&self.status)) {
            (Some(tanggal), Some(status)) => Ok(AttendanceMark {
                tanggal,
                status,
                recorded_at: self.timestamp.unwrap_or(now),
                lokasi: self.lokasi.as_ref().map(|inner| inner.as_deref()),
                catatan: self.catatan.as_ref().map(|inner| inner.as_deref()),
            }),
            _ => Err(missing_fields(&[
                ("tanggal", self.tanggal.is_none()),
                ("status", !is_present(&self.status)),
            ])),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct AttendanceListResponse {
    pub ok: bool,
    pub attendance: Vec<AttendanceWithEvents>,
}

impl AttendanceListResponse {
    pub fn new(attendance: Vec<AttendanceWithEvents>) -> Self {
        Self {
            ok: true,
            attendance,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct AttendanceResponse {
    pub ok: bool,
    pub attendance: AttendanceRow,
}

impl AttendanceResponse {
    pub fn new(attendance: AttendanceRow) -> Self {
        Self {
            ok: true,
            attendance,
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use serde_json::json;

    use super::*;

    fn request(body: serde_json::Value) -> MarkAttendanceRequest {
        serde_json::from_value(body).unwrap()
    }

    #[test]
    fn timestamp_defaults_to_now() {
        let now = Utc.with_ymd_and_hms(2024, 1, 1, 7, 55, 0).unwrap();
        let req = request(json!({ "tanggal": "2024-01-01", "status": "masuk" }));

        let mark = req.validate(now).unwrap();
        assert_eq!(mark.recorded_at, now);
        assert_eq!(mark.status, "masuk");
    }

    #[test]
    fn explicit_timestamp_wins() {
        let now = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
        let req = request(json!({
            "tanggal": "2024-01-01",
            "status": "pulang",
            "timestamp": "2024-01-01T16:05:00Z",
            "lokasi": "Lab 2"
        }));

        let mark = req.validate(now).unwrap();
        assert_eq!(
            mark.recorded_at,
            Utc.with_ymd_and_hms(2024, 1, 1, 16, 5, 0).unwrap()
        );
        assert_eq!(mark.lokasi, Some(Some("Lab 2")));
        assert_eq!(mark.catatan, None);
    }

    #[test]
    fn null_notes_clear_and_absent_notes_keep() {
        let req = request(json!({
            "tanggal": "2024-01-01",
            "status": "masuk",
            "lokasi": null
        }));

        let mark = req.validate(Utc::now()).unwrap();
        assert_eq!(mark.lokasi, Some(None));
        assert_eq!(mark.catatan, None);
    }

    #[test]
    fn missing_status_and_date_are_both_reported() {
        let err = request(json!({ "status": null })).validate(Utc::now()).unwrap_err();
        assert_eq!(err.to_string(), "Missing fields: tanggal, status");
    }
}
