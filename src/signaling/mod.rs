// Public API - what other modules can use
pub use cors::cors;
pub use handlers::{not_found, poll_messages, send_message, server_status};
pub use service::SignalingService;

// Internal modules
mod cors;
mod handlers;
pub mod models;
pub mod repository;
mod service;
pub mod types;
