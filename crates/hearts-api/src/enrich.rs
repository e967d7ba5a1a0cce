use axum::http::HeaderMap;
use chrono::{DateTime, SecondsFormat, Utc};
use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::config::SubmitConfig;

pub const SUBMISSION_ID_PREFIX: &str = "evt";
pub const UNKNOWN: &str = "unknown";

/// Geolocation supplied by the hosting platform, never by the client body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GeoContext {
    pub country: Option<String>,
    pub city: Option<String>,
}

impl GeoContext {
    pub fn from_headers(headers: &HeaderMap, config: &SubmitConfig) -> Self {
        Self {
            country: header_str(headers, &config.country_header),
            city: header_str(headers, &config.city_header),
        }
    }

    pub fn country(&self) -> String {
        self.country.clone().unwrap_or_else(|| UNKNOWN.to_string())
    }

    pub fn city(&self) -> String {
        self.city.clone().unwrap_or_else(|| UNKNOWN.to_string())
    }
}

fn header_str(headers: &HeaderMap, name: &axum::http::HeaderName) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Caller address as forwarded by the platform.
pub fn client_ip(headers: &HeaderMap, config: &SubmitConfig) -> Option<String> {
    header_str(headers, &config.ip_header)
}

/// Lowercase hex SHA-256 of the address, or `unknown` when there is none.
pub fn hash_ip(ip: Option<&str>) -> String {
    match ip.filter(|s| !s.is_empty()) {
        Some(ip) => hex::encode(Sha256::digest(ip.as_bytes())),
        None => UNKNOWN.to_string(),
    }
}

/// `evt_<millis>_<8 hex>`: time-ordered, with a random tail so two
/// submissions in the same millisecond still get distinct ids.
pub fn submission_id(now: DateTime<Utc>) -> String {
    let tail = Uuid::new_v4().simple().to_string();
    format!("{}_{}_{}", SUBMISSION_ID_PREFIX, now.timestamp_millis(), &tail[..8])
}

/// ISO-8601 UTC with millisecond precision, e.g. `2026-02-14T09:30:00.123Z`.
pub fn iso_timestamp(now: DateTime<Utc>) -> String {
    now.to_rfc3339_opts(SecondsFormat::Millis, true)
}
