use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use crate::config::Config;
use crate::shared::{AppError, AppState};
use crate::signaling;

/// Builds the relay's router: /poll, /send, /status, CORS, and 404 for the rest
pub fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route(
            "/poll",
            get(signaling::poll_messages).fallback(signaling::not_found),
        )
        .route(
            "/send",
            post(signaling::send_message).fallback(signaling::not_found),
        )
        .route(
            "/status",
            get(signaling::server_status).fallback(signaling::not_found),
        )
        .fallback(signaling::not_found)
        .layer(middleware::from_fn(signaling::cors))
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}

/// Binds the listener and serves until Ctrl-C / SIGTERM
pub async fn serve(config: Config, app_state: AppState) -> Result<(), AppError> {
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr).await.map_err(|source| {
        error!(port = config.port, error = %source, "Failed to bind listener");
        AppError::Bind {
            port: config.port,
            source,
        }
    })?;

    info!(port = config.port, "Signaling server running on port {}", config.port);
    info!("Access at: http://localhost:{}/status", config.port);

    axum::serve(listener, build_router(app_state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Signaling server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Failed to install Ctrl-C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutting down signaling server...");
}
