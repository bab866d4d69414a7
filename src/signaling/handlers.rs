use axum::{
    body::Bytes,
    extract::{rejection::QueryRejection, Query, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

use super::{
    service::SignalingService,
    types::{PollQuery, PollResponse, SendRequest, SendResponse, StatusResponse},
};
use crate::shared::{AppError, AppState};

/// HTTP handler for polling a room
///
/// GET /poll?room=<id>&since=<float-seconds>
/// Returns every message in the room newer than `since`
#[instrument(name = "poll_messages", skip(state, query))]
pub async fn poll_messages(
    State(state): State<AppState>,
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Result<Json<PollResponse>, AppError> {
    let Query(pairs) = query.map_err(|rejection| {
        warn!(error = %rejection, "Malformed poll query string");
        AppError::InvalidQuery("Invalid query string".to_string())
    })?;
    let query = PollQuery::from_pairs(pairs);

    let service = SignalingService::new(Arc::clone(&state.message_repository));
    let response = service.poll(query).await?;

    debug!(count = response.messages.len(), "Poll completed");
    Ok(Json(response))
}

/// HTTP handler for depositing a signaling message
///
/// POST /send with body {"room": <id>, "message": <payload>}
/// Content-Type is not required; the body is always parsed as JSON
#[instrument(name = "send_message", skip(state, body), fields(body_len = body.len()))]
pub async fn send_message(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<SendResponse>, AppError> {
    let request: SendRequest = serde_json::from_slice(&body).map_err(|e| {
        warn!(error = %e, "Rejecting send with invalid JSON body");
        AppError::InvalidJson
    })?;

    let service = SignalingService::new(Arc::clone(&state.message_repository));
    Ok(Json(service.send(request).await))
}

/// HTTP handler for server status
///
/// GET /status
#[instrument(name = "server_status", skip(state))]
pub async fn server_status(State(state): State<AppState>) -> Json<StatusResponse> {
    let service = SignalingService::new(Arc::clone(&state.message_repository));
    let status = service.status().await;

    info!(rooms = status.rooms, "Status requested");
    Json(status)
}

/// Fallback for unknown paths and unsupported methods: 404 with an empty body
pub async fn not_found() -> StatusCode {
    StatusCode::NOT_FOUND
}
