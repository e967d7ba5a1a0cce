pub mod config;
pub mod cors;
pub mod enrich;
pub mod error;
pub mod submit;
pub mod validation;

use std::sync::Arc;

use axum::{Router, middleware, routing::post};

use hearts_db::Database;

use crate::config::SubmitConfig;
use crate::cors::CorsPolicy;
use crate::error::ApiError;

pub type AppState = Arc<AppStateInner>;

pub struct AppStateInner {
    pub db: Database,
    pub config: SubmitConfig,
    pub cors: CorsPolicy,
}

impl AppStateInner {
    pub fn new(db: Database, config: SubmitConfig) -> AppState {
        let cors = CorsPolicy::new(config.allowed_origin.clone());
        Arc::new(Self { db, config, cors })
    }
}

/// The whole public surface: `POST /submit`, CORS preflight on any path, and
/// a JSON 404 for everything else.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/submit", post(submit::submit).fallback(not_found))
        .fallback(not_found)
        .layer(middleware::from_fn_with_state(state.clone(), cors::cors_guard))
        .with_state(state)
}

async fn not_found() -> ApiError {
    ApiError::NotFound
}
