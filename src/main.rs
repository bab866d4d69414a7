use clap::Parser;
use signal_relay::{config::DEFAULT_LOG_FILTER, serve, AppState, Config, InMemoryMessageRepository};
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::parse();
    info!(port = config.port, "Starting WebRTC signaling relay");

    // One store for the whole process, handed to every handler through AppState
    let message_repository = Arc::new(InMemoryMessageRepository::new());
    let app_state = AppState::new(message_repository);

    if let Err(e) = serve(config, app_state).await {
        error!(error = %e, "Signaling server exited with an error");
        eprintln!("{e}");
        std::process::exit(1);
    }
}
