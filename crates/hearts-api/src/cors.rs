use axum::{
    extract::{Request, State},
    http::{HeaderMap, HeaderValue, Method, StatusCode, header},
    middleware::Next,
    response::{IntoResponse, Response},
};
use tracing::warn;

use crate::AppState;
use crate::error::ApiError;

pub const ALLOW_METHODS: &str = "POST, OPTIONS";
pub const ALLOW_HEADERS: &str = "Content-Type";
pub const MAX_AGE_SECS: &str = "86400";

/// Single-origin CORS policy. The origin comparison ignores ASCII case.
#[derive(Debug, Clone)]
pub struct CorsPolicy {
    allowed_origin: String,
}

impl CorsPolicy {
    pub fn new(allowed_origin: impl Into<String>) -> Self {
        Self {
            allowed_origin: allowed_origin.into(),
        }
    }

    pub fn allowed_origin(&self) -> &str {
        &self.allowed_origin
    }

    pub fn allows(&self, origin: Option<&str>) -> bool {
        origin.is_some_and(|o| o.eq_ignore_ascii_case(&self.allowed_origin))
    }

    /// The request's `Origin` value, if it is the allowed one.
    pub fn check<'a>(&self, headers: &'a HeaderMap) -> Option<&'a HeaderValue> {
        let origin = headers.get(header::ORIGIN)?;
        self.allows(origin.to_str().ok()).then_some(origin)
    }

    /// Echo the caller's origin back along with the fixed method/header grants.
    pub fn apply(&self, origin: &HeaderValue, headers: &mut HeaderMap) {
        headers.insert(header::ACCESS_CONTROL_ALLOW_ORIGIN, origin.clone());
        headers.insert(
            header::ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static(ALLOW_METHODS),
        );
        headers.insert(
            header::ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static(ALLOW_HEADERS),
        );
        headers.insert(
            header::ACCESS_CONTROL_MAX_AGE,
            HeaderValue::from_static(MAX_AGE_SECS),
        );
    }
}

/// Answers preflights itself and decorates every other response with CORS
/// headers when, and only when, the origin is allowed.
pub async fn cors_guard(State(state): State<AppState>, req: Request, next: Next) -> Response {
    let origin = state.cors.check(req.headers()).cloned();

    if req.method() == Method::OPTIONS {
        return match origin {
            Some(origin) => {
                let mut res = StatusCode::NO_CONTENT.into_response();
                state.cors.apply(&origin, res.headers_mut());
                res
            }
            None => {
                warn!("Rejected preflight for {} from disallowed origin", req.uri().path());
                ApiError::OriginNotAllowed.into_response()
            }
        };
    }

    let mut res = next.run(req).await;
    if let Some(origin) = origin {
        state.cors.apply(&origin, res.headers_mut());
    }
    res
}
