/*
 * Responsibility
 * - Activities request/response DTOs
 * - validate() returns the repo input so handlers never see half-checked data
 */
use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::api::dto::fields::{self, is_present, missing_fields, non_blank};
use crate::error::AppError;
use crate::repos::activity_repo::{ActivityPatch, ActivityRow, NewActivity};

#[derive(Debug, Default, Deserialize)]
pub struct ActivityFilter {
    #[serde(default, deserialize_with = "fields::parsed")]
    pub tanggal: Option<NaiveDate>,
}

#[derive(Debug, Deserialize)]
pub struct CreateActivityRequest {
    #[serde(default, deserialize_with = "fields::parsed")]
    pub tanggal: Option<NaiveDate>,
    #[serde(default, deserialize_with = "fields::parsed")]
    pub jam_mulai: Option<NaiveTime>,
    #[serde(default, deserialize_with = "fields::parsed")]
    pub jam_selesai: Option<NaiveTime>,
    pub kegiatan: Option<String>,
    pub catatan: Option<String>,
}

impl CreateActivityRequest {
    pub fn validate(&self) -> Result<NewActivity<'_>, AppError> {
        match (
            self.tanggal,
            self.jam_mulai,
            self.jam_selesai,
            non_blank(&self.kegiatan),
        ) {
            (Some(tanggal), Some(jam_mulai), Some(jam_selesai), Some(kegiatan)) => {
                Ok(NewActivity {
                    tanggal,
                    jam_mulai,
                    jam_selesai,
                    kegiatan,
                    catatan: self.catatan.as_deref(),
                })
            }
            _ => Err(missing_fields(&[
                ("tanggal", self.tanggal.is_none()),
                ("jam_mulai", self.jam_mulai.is_none()),
                ("jam_selesai", self.jam_selesai.is_none()),
                ("kegiatan", !is_present(&self.kegiatan)),
            ])),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct UpdateActivityRequest {
    #[serde(default, deserialize_with = "fields::parsed")]
    pub tanggal: Option<NaiveDate>,
    #[serde(default, deserialize_with = "fields::parsed")]
    pub jam_mulai: Option<NaiveTime>,
    #[serde(default, deserialize_with = "fields::parsed")]
    pub jam_selesai: Option<NaiveTime>,
    pub kegiatan: Option<String>,
    // Tri-state:
    // - None: field missing (do not update)
    // - Some(None): null (set NULL)
    // - Some(Some(v)): set value
    #[serde(default, deserialize_with = "fields::tri_state")]
    pub catatan: Option<Option<String>>,
}

impl UpdateActivityRequest {
    pub fn validate(&self) -> Result<ActivityPatch<'_>, AppError> {
        if let Some(kegiatan) = &self.kegiatan
            && kegiatan.trim().is_empty()
        {
            return Err(AppError::bad_request("kegiatan cannot be empty"));
        }

        Ok(ActivityPatch {
            tanggal: self.tanggal,
            jam_mulai: self.jam_mulai,
            jam_selesai: self.jam_selesai,
            kegiatan: self.kegiatan.as_deref(),
            catatan: self.catatan.as_ref().map(|inner| inner.as_deref()),
        })
    }
}

#[derive(Debug, Serialize)]
pub struct ActivityListResponse {
    pub ok: bool,
    pub activities: Vec<ActivityRow>,
}

impl ActivityListResponse {
    pub fn new(activities: Vec<ActivityRow>) -> Self {
        Self {
            ok: true,
            activities,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ActivityResponse {
    pub ok: bool,
    pub activity: ActivityRow,
}

impl ActivityResponse {
    pub fn new(activity: ActivityRow) -> Self {
        Self { ok: true, activity }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn create(body: serde_json::Value) -> CreateActivityRequest {
        serde_json::from_value(body).unwrap()
    }

    #[test]
    fn create_reports_every_missing_field() {
        let err = create(json!({ "tanggal": "2024-01-01", "kegiatan": "" }))
            .validate()
            .unwrap_err();
        assert_eq!(err.to_string(), "Missing fields: jam_mulai, jam_selesai, kegiatan");
    }

    #[test]
    fn create_accepts_a_complete_body() {
        let req = create(json!({
            "tanggal": "2024-01-01",
            "jam_mulai": "08:00",
            "jam_selesai": "12:00",
            "kegiatan": "UI/UX Design"
        }));
        let new = req.validate().unwrap();
        assert_eq!(new.kegiatan, "UI/UX Design");
        assert_eq!(new.catatan, None);
    }

    #[test]
    fn update_distinguishes_absent_and_null_notes() {
        let absent: UpdateActivityRequest = serde_json::from_value(json!({})).unwrap();
        assert_eq!(absent.validate().unwrap().catatan, None);

        let cleared: UpdateActivityRequest =
            serde_json::from_value(json!({ "catatan": null })).unwrap();
        assert_eq!(cleared.validate().unwrap().catatan, Some(None));
    }

    #[test]
    fn update_rejects_blank_activity_name() {
        let req: UpdateActivityRequest =
            serde_json::from_value(json!({ "kegiatan": " " })).unwrap();
        assert_eq!(req.validate().unwrap_err().to_string(), "kegiatan cannot be empty");
    }
}
