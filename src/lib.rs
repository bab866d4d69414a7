// Library crate for the WebRTC signaling relay
// This file exposes the public API for the binary and integration tests

pub mod app;
pub mod config;
pub mod shared;
pub mod signaling;

// Re-export commonly used types for easier access in tests
pub use app::{build_router, serve};
pub use config::Config;
pub use shared::{AppError, AppState};
pub use signaling::{
    models::MessageEnvelope,
    repository::{InMemoryMessageRepository, MessageRepository, MAX_MESSAGES_PER_ROOM},
    SignalingService,
};
