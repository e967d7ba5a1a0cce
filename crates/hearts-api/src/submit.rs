use anyhow::{Context, anyhow};
use axum::{
    Json,
    body::Bytes,
    extract::{State, rejection::BytesRejection},
    http::{HeaderMap, header},
};
use chrono::Utc;
use tracing::{debug, info, warn};

use hearts_types::api::{ClientInfo, SessionInfo, SubmitRequest, SubmitResponse};
use hearts_types::models::{Submission, TOTAL_SUBMISSIONS};

use crate::AppState;
use crate::enrich::{self, GeoContext};
use crate::error::ApiError;
use crate::validation::{ValidSubmission, validate_submission};

/// POST /submit: pulls the origin, address and geolocation out of the request
/// and hands them to [`handle_submission`].
pub async fn submit(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<SubmitResponse>, ApiError> {
    let origin = headers.get(header::ORIGIN).and_then(|v| v.to_str().ok());
    let ip = enrich::client_ip(&headers, &state.config);
    let geo = GeoContext::from_headers(&headers, &state.config);

    // Oversized or unreadable bodies surface after the origin check, as JSON
    let body = body.map_err(|e| anyhow!("Failed to read submission body: {}", e));

    handle_submission(&state, origin, ip.as_deref(), &geo, body)
        .await
        .map(Json)
}

/// Origin check, validation, enrichment, insert, then counter bump. The
/// counter is only touched once the insert has succeeded.
pub async fn handle_submission(
    state: &AppState,
    origin: Option<&str>,
    ip: Option<&str>,
    geo: &GeoContext,
    body: anyhow::Result<Bytes>,
) -> Result<SubmitResponse, ApiError> {
    if !state.cors.allows(origin) {
        warn!("Rejected submission from origin {:?}", origin);
        return Err(ApiError::OriginNotAllowed);
    }

    let body = body?;
    let req: SubmitRequest =
        serde_json::from_slice(&body).context("Malformed submission body")?;

    let valid = validate_submission(&req, &state.config).inspect_err(|e| {
        debug!("Submission rejected: {}", e);
    })?;

    let now = Utc::now();
    let submission = build_submission(
        &req,
        valid,
        enrich::submission_id(now),
        enrich::iso_timestamp(now),
        enrich::hash_ip(ip),
        geo,
    );

    // Run blocking DB writes off the async runtime
    let db = state.clone();
    let record = submission.clone();
    let total = tokio::task::spawn_blocking(move || {
        db.db.insert_submission(&record)?;
        db.db.increment_stat(TOTAL_SUBMISSIONS)
    })
    .await
    .context("spawn_blocking join error")??;

    info!(
        "Submission {} stored: {} ({} total)",
        submission.id, submission.result, total
    );

    Ok(SubmitResponse::accepted(submission.id, submission.timestamp))
}

fn present(field: &Option<String>) -> Option<String> {
    field.as_deref().filter(|s| !s.is_empty()).map(str::to_string)
}

fn build_submission(
    req: &SubmitRequest,
    valid: ValidSubmission<'_>,
    id: String,
    timestamp: String,
    ip_hash: String,
    geo: &GeoContext,
) -> Submission {
    let client = req.client.clone().unwrap_or_default();
    let session = req.session.clone().unwrap_or_default();
    let ClientInfo {
        device,
        screen,
        language,
        browser,
        os,
    } = client;
    let SessionInfo {
        session_id,
        referrer,
        page,
    } = session;

    Submission {
        id,
        timestamp,
        user_name: valid.name.to_string(),
        crush_name: valid.crush.to_string(),
        result: valid.result,
        device: present(&device),
        screen: present(&screen),
        language: present(&language),
        browser: present(&browser),
        os: present(&os),
        country: geo.country(),
        city: geo.city(),
        ip_hash,
        session_id: present(&session_id),
        referrer: present(&referrer),
        page: present(&page).or_else(|| Some("/".to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hearts_flames::Flames;

    #[test]
    fn optional_fields_default_to_null_and_page_to_root() {
        let req = SubmitRequest {
            name: Some(" Steve ".into()),
            crush: Some("Alice".into()),
            result: Some("Love".into()),
            client: Some(ClientInfo {
                device: Some("mobile".into()),
                screen: Some(String::new()),
                ..Default::default()
            }),
            session: None,
        };
        let valid = ValidSubmission {
            name: "Steve",
            crush: "Alice",
            result: Flames::Love,
        };
        let geo = GeoContext {
            country: Some("IN".into()),
            city: None,
        };

        let s = build_submission(&req, valid, "evt_1".into(), "t".into(), "h".into(), &geo);
        assert_eq!(s.user_name, "Steve");
        assert_eq!(s.device.as_deref(), Some("mobile"));
        assert_eq!(s.screen, None);
        assert_eq!(s.session_id, None);
        assert_eq!(s.page.as_deref(), Some("/"));
        assert_eq!(s.country, "IN");
        assert_eq!(s.city, "unknown");
    }
}
