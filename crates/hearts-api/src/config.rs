use std::{env, fmt::Display, str::FromStr};

use anyhow::{Context, Result, anyhow};
use axum::http::HeaderName;
use tracing::info;

use hearts_flames::Flames;

pub const DEFAULT_ALLOWED_ORIGIN: &str = "https://prerithm.github.io";
pub const DEFAULT_MAX_NAME_LENGTH: usize = 200;

/// Settings for the submission endpoint. `Default` holds the production values.
#[derive(Debug, Clone)]
pub struct SubmitConfig {
    /// The one browser origin allowed to post and read responses.
    pub allowed_origin: String,
    /// Upper bound on `name` and `crush`, in characters.
    pub max_name_length: usize,
    pub allowed_results: Vec<Flames>,
    /// Platform-injected header carrying the caller's address.
    pub ip_header: HeaderName,
    pub country_header: HeaderName,
    pub city_header: HeaderName,
    /// Recompute FLAMES server-side and reject a mismatching `result`.
    pub verify_result: bool,
}

impl Default for SubmitConfig {
    fn default() -> Self {
        Self {
            allowed_origin: DEFAULT_ALLOWED_ORIGIN.to_string(),
            max_name_length: DEFAULT_MAX_NAME_LENGTH,
            allowed_results: Flames::ALL.to_vec(),
            ip_header: HeaderName::from_static("cf-connecting-ip"),
            country_header: HeaderName::from_static("cf-ipcountry"),
            city_header: HeaderName::from_static("cf-ipcity"),
            verify_result: false,
        }
    }
}

impl SubmitConfig {
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();
        Ok(Self {
            allowed_origin: try_load("HEARTS_ALLOWED_ORIGIN", defaults.allowed_origin)?,
            max_name_length: try_load("HEARTS_MAX_NAME_LENGTH", defaults.max_name_length)?,
            allowed_results: match env::var("HEARTS_ALLOWED_RESULTS") {
                Ok(raw) => parse_results(&raw)?,
                Err(_) => defaults.allowed_results,
            },
            ip_header: try_load("HEARTS_IP_HEADER", defaults.ip_header)?,
            country_header: try_load("HEARTS_COUNTRY_HEADER", defaults.country_header)?,
            city_header: try_load("HEARTS_CITY_HEADER", defaults.city_header)?,
            verify_result: try_load("HEARTS_VERIFY_RESULT", defaults.verify_result)?,
        })
    }
}

fn try_load<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr + Display,
    T::Err: Display,
{
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|e| anyhow!("Invalid {key} value '{raw}': {e}")),
        Err(_) => {
            info!("{key} not set, using default: {default}");
            Ok(default)
        }
    }
}

/// Comma-separated label list, e.g. `Friends,Love`.
pub fn parse_results(raw: &str) -> Result<Vec<Flames>> {
    let results = raw
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| s.parse::<Flames>().with_context(|| "Invalid HEARTS_ALLOWED_RESULTS"))
        .collect::<Result<Vec<_>>>()?;

    if results.is_empty() {
        return Err(anyhow!("HEARTS_ALLOWED_RESULTS must name at least one label"));
    }
    Ok(results)
}
