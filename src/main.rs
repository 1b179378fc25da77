//! Ameotech site backend
//!
//! Serves the deterministic chat assistant, lab follow-up advice and the
//! case-study / job-post content API.

mod api;
mod auth;
mod config;
mod content;
mod notify;
mod reasoning;

use api::{create_router, AppState};
use auth::AuthService;
use axum::http::{header, HeaderName, HeaderValue, Method};
use config::Config;
use content::ContentStore;
use notify::SalesNotifier;
use reasoning::{spawn_sweeper, InMemorySessionStore, SessionStore};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{
    compression::CompressionLayer, cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ameotech_backend=info,tower_http=info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(false)
                .with_span_list(false),
        )
        .init();

    let config = Config::from_env();

    let sessions = Arc::new(InMemorySessionStore::new(config.session_ttl));
    let sessions: Arc<dyn SessionStore> = sessions;
    let sweeper = spawn_sweeper(Arc::clone(&sessions), config.sweep_interval());
    tracing::info!(
        ttl_secs = config.session_ttl.as_secs(),
        "Chat session store initialized"
    );

    if config.sales_webhook_url.is_none() {
        tracing::warn!("SALES_WEBHOOK_URL not set, sales notifications will only be logged");
    }

    let state = AppState::new(
        sessions,
        Arc::new(ContentStore::new()),
        Arc::new(AuthService::new(
            &config.auth_secret,
            config.admin_email.clone(),
            config.admin_password.clone(),
        )),
        SalesNotifier::new(config.sales_webhook_url.clone())?,
    );

    let origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|o| match o.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %o, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::OPTIONS])
        .allow_headers([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            HeaderName::from_static("x-role"),
        ])
        .allow_credentials(true);

    let compression = CompressionLayer::new().gzip(true).br(true);

    let app = create_router(state)
        .layer(TimeoutLayer::new(REQUEST_TIMEOUT))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(compression);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Ameotech backend listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    sweeper.abort();
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}
