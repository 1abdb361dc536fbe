//! HTTP application assembly
//!
//! Builds the router, binds the listener and runs the server until a shutdown
//! signal arrives.

pub mod response;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::json;
use std::{net::SocketAddr, time::Duration};
use tokio::signal;
use tower_http::{compression::CompressionLayer, services::ServeDir};

use crate::config::Config;
use crate::features::{self, contacts, FeatureState};
use crate::middleware;
use crate::store::SharedStore;

pub use response::{ApiResponse, ErrorResponse};

/// Build the application router
///
/// - `GET /health` - backend connectivity
/// - `POST /submit` - contact submission (form page path)
/// - `/api/v1/...` - feature routes
/// - anything else - files from `static_dir` when configured
pub fn create_router(store: SharedStore, config: &Config) -> Router {
    let feature_routes = features::router(FeatureState {
        store: store.clone(),
    });

    let mut router = Router::new()
        .route("/health", get(health_check))
        .route("/submit", post(contacts::submit_contact))
        .with_state(store)
        .nest("/api/v1", feature_routes);

    if let Some(ref dir) = config.server.static_dir {
        tracing::info!(dir = %dir.display(), "Serving static files");
        router = router.fallback_service(ServeDir::new(dir));
    }

    router
        .layer(CompressionLayer::new())
        .layer(middleware::tracing_layer())
        .layer(middleware::cors_layer(&config.cors))
}

/// Health check handler
async fn health_check(State(store): State<SharedStore>) -> Response {
    match store.health_check().await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({ "status": "healthy", "database": "connected" })),
        )
            .into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Database health check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({ "status": "unhealthy", "database": "unreachable" })),
            )
                .into_response()
        },
    }
}

/// Bind and serve until SIGINT/SIGTERM
///
/// # Errors
///
/// Fails when the address cannot be parsed or bound (for example when the
/// port is already in use) or the server stops with an I/O error.
pub async fn serve(config: &Config, store: SharedStore) -> anyhow::Result<()> {
    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;

    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(e) if e.kind() == std::io::ErrorKind::AddrInUse => {
            anyhow::bail!(
                "Port {} is already in use. Choose a different INTAKE_PORT or stop the process using it.",
                config.server.port
            );
        },
        Err(e) => return Err(e.into()),
    };

    tracing::info!("Server running at http://{}", addr);

    let app = create_router(store, config);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(config.server.shutdown_timeout_secs))
        .await?;

    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal(timeout_secs: u64) {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            },
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            },
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, shutting down");
        },
        _ = terminate => {
            tracing::info!("Received terminate signal, shutting down");
        },
    }

    // Give in-flight submissions a moment to finish
    tokio::time::sleep(Duration::from_secs(timeout_secs.min(5))).await;
}
