//! Serde helpers for request bodies.
//!
//! Bodies arrive from a JS client, so "present" follows its truthiness:
//! a blank string counts as absent. Dates/times arrive as strings and are
//! parsed here so a bad value is a 400, not a database error.
use std::fmt::Display;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, de::Error};

use crate::error::AppError;

pub fn is_present(value: &Option<String>) -> bool {
    non_blank(value).is_some()
}

pub fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.trim().is_empty())
}

/// `Missing fields: a, b` for every `(name, missing)` pair flagged missing.
pub fn missing_fields(fields: &[(&'static str, bool)]) -> AppError {
    let names: Vec<&str> = fields
        .iter()
        .filter(|(_, missing)| *missing)
        .map(|(name, _)| *name)
        .collect();
    AppError::bad_request(format!("Missing fields: {}", names.join(", ")))
}

fn parse_blank_as_none<T, E>(raw: Option<String>) -> Result<Option<T>, E>
where
    T: FromStr,
    T::Err: Display,
    E: Error,
{
    match raw {
        Some(s) if !s.trim().is_empty() => s.trim().parse().map(Some).map_err(E::custom),
        _ => Ok(None),
    }
}

/// Optional parsed value: absent, null and "" are all `None`.
pub fn parsed<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: Display,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    parse_blank_as_none(raw)
}

// Tri-state: used with `#[serde(default)]`, so a missing key never reaches here.
// - null / "" -> Some(None)
// - value     -> Some(Some(v))
pub fn tri_state_parsed<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: Display,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    parse_blank_as_none(raw).map(Some)
}

/// Tri-state for plain values: null -> Some(None).
pub fn tri_state<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, NaiveTime};
    use serde::Deserialize;
    use serde_json::json;

    use super::*;

    #[derive(Debug, Deserialize)]
    struct Sample {
        #[serde(default, deserialize_with = "parsed")]
        tanggal: Option<NaiveDate>,
        #[serde(default, deserialize_with = "tri_state_parsed")]
        jam: Option<Option<NaiveTime>>,
        #[serde(default, deserialize_with = "tri_state")]
        catatan: Option<Option<String>>,
    }

    fn sample(value: serde_json::Value) -> Sample {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn absent_keys_stay_none() {
        let p = sample(json!({}));
        assert!(p.tanggal.is_none());
        assert!(p.jam.is_none());
        assert!(p.catatan.is_none());
    }

    #[test]
    fn nulls_are_explicit_clears() {
        let p = sample(json!({ "tanggal": null, "jam": null, "catatan": null }));
        assert!(p.tanggal.is_none());
        assert_eq!(p.jam, Some(None));
        assert_eq!(p.catatan, Some(None));
    }

    #[test]
    fn values_are_parsed() {
        let p = sample(json!({ "tanggal": "2024-01-01", "jam": "09:30", "catatan": "ok" }));
        assert_eq!(p.tanggal, NaiveDate::from_ymd_opt(2024, 1, 1));
        assert_eq!(p.jam, Some(NaiveTime::from_hms_opt(9, 30, 0)));
        assert_eq!(p.catatan, Some(Some("ok".to_string())));
    }

    #[test]
    fn blank_strings_count_as_absent() {
        let p = sample(json!({ "tanggal": "  ", "jam": "" }));
        assert!(p.tanggal.is_none());
        assert_eq!(p.jam, Some(None));
        assert!(!is_present(&Some("   ".into())));
        assert!(is_present(&Some("x".into())));
    }

    #[test]
    fn malformed_dates_are_rejected() {
        assert!(serde_json::from_value::<Sample>(json!({ "tanggal": "2024-13-40" })).is_err());
        assert!(serde_json::from_value::<Sample>(json!({ "jam": "late" })).is_err());
    }

    #[test]
    fn missing_fields_lists_names_in_order() {
        let err = missing_fields(&[("judul", true), ("tanggal", false), ("isi", true)]);
        assert_eq!(err.to_string(), "Missing fields: judul, isi");
    }
}
