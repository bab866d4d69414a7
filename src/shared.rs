use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::sync::Arc;
use thiserror::Error;

use crate::signaling::repository::MessageRepository;

/// Shared application state containing all dependencies
#[derive(Clone)]
pub struct AppState {
    pub message_repository: Arc<dyn MessageRepository + Send + Sync>,
}

impl AppState {
    pub fn new(message_repository: Arc<dyn MessageRepository + Send + Sync>) -> Self {
        Self { message_repository }
    }
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Invalid JSON")]
    InvalidJson,

    #[error("{0}")]
    InvalidQuery(String),

    #[error("Failed to bind port {port}: {source}")]
    Bind {
        port: u16,
        #[source]
        source: std::io::Error,
    },

    #[error("Server error: {0}")]
    Serve(#[from] std::io::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match self {
            AppError::InvalidJson | AppError::InvalidQuery(_) => StatusCode::BAD_REQUEST,
            AppError::Bind { .. } | AppError::Serve(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(json!({
            "error": self.to_string()
        }));

        (status, body).into_response()
    }
}
