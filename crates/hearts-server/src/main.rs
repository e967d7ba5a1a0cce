use std::net::SocketAddr;
use std::path::PathBuf;

use tower_http::trace::TraceLayer;
use tracing::info;

use hearts_api::AppStateInner;
use hearts_api::config::SubmitConfig;
use hearts_types::models::TOTAL_SUBMISSIONS;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present
    let _ = dotenvy::dotenv();

    // Init logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "hearts_server=debug,hearts_api=debug,tower_http=debug".into()),
        )
        .init();

    // Config
    let host = std::env::var("HEARTS_HOST").unwrap_or_else(|_| "0.0.0.0".into());
    let port: u16 = std::env::var("HEARTS_PORT")
        .unwrap_or_else(|_| "8787".into())
        .parse()?;
    let db_path: PathBuf = std::env::var("HEARTS_DB_PATH")
        .unwrap_or_else(|_| "hearts.db".into())
        .into();
    let config = SubmitConfig::from_env()?;

    // Init database
    let db = hearts_db::Database::open(&db_path)?;
    let total = db.get_stat(TOTAL_SUBMISSIONS)?.unwrap_or(0);
    info!("{} submissions on record", total);

    info!("Allowed origin: {}", config.allowed_origin);
    if config.verify_result {
        info!("Server-side FLAMES verification enabled");
    }

    let state = AppStateInner::new(db, config);
    let app = hearts_api::router(state).layer(TraceLayer::new_for_http());

    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;
    info!("Hearts Vault API listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = tokio::signal::ctrl_c();
    #[cfg(unix)]
    {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                tokio::select! {
                    _ = ctrl_c => info!("Received Ctrl+C, shutting down..."),
                    _ = sigterm.recv() => info!("Received SIGTERM, shutting down..."),
                }
            }
            Err(e) => {
                tracing::warn!("Failed to install SIGTERM handler: {}", e);
                ctrl_c.await.ok();
                info!("Received Ctrl+C, shutting down...");
            }
        }
    }
    #[cfg(not(unix))]
    {
        ctrl_c.await.ok();
        info!("Received Ctrl+C, shutting down...");
    }
}
