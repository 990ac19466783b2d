/*
 * Responsibility
 * - Request bodies / query strings per resource, plus their validation
 * - Success envelopes (`{ ok: true, <key>: ... }`)
 */
pub mod activities;
pub mod attendance;
pub mod fields;
pub mod profile;
pub mod reports;
pub mod schedule;

use serde::Serialize;

/// `{ "ok": true }` for operations with no payload (deletes).
#[derive(Debug, Serialize)]
pub struct OkResponse {
    pub ok: bool,
}

impl OkResponse {
    pub fn new() -> Self {
        Self { ok: true }
    }
}

impl Default for OkResponse {
    fn default() -> Self {
        Self::new()
    }
}
