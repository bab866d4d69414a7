use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

use super::{
    models::unix_timestamp,
    repository::MessageRepository,
    types::{PollQuery, PollResponse, SendRequest, SendResponse, StatusResponse, DEFAULT_ROOM},
};
use crate::shared::AppError;

/// Service for the relay's request-level logic: defaults, parsing and response shaping
pub struct SignalingService {
    repository: Arc<dyn MessageRepository + Send + Sync>,
}

impl SignalingService {
    pub fn new(repository: Arc<dyn MessageRepository + Send + Sync>) -> Self {
        Self { repository }
    }

    /// Returns the messages a peer has not seen yet
    #[instrument(skip(self))]
    pub async fn poll(&self, query: PollQuery) -> Result<PollResponse, AppError> {
        let room_id = query.room.unwrap_or_else(|| DEFAULT_ROOM.to_string());
        let since = match query.since.as_deref() {
            Some(raw) => parse_since(raw)?,
            None => 0.0,
        };

        // The cursor comes from the store so the next poll cannot skip a late send
        let snapshot = self.repository.snapshot(&room_id, since).await;
        debug!(
            room_id = %room_id,
            since = since,
            count = snapshot.messages.len(),
            "Poll served"
        );

        Ok(PollResponse {
            messages: snapshot.messages,
            timestamp: snapshot.cursor,
        })
    }

    /// Deposits a payload in its room
    #[instrument(skip(self, request), fields(room_id = %request.room))]
    pub async fn send(&self, request: SendRequest) -> SendResponse {
        let envelope = self.repository.store(&request.room, request.message).await;
        info!(
            room_id = %request.room,
            message_timestamp = envelope.timestamp,
            "Signaling message relayed"
        );

        SendResponse {
            status: "success".to_string(),
            timestamp: unix_timestamp(),
        }
    }

    /// Reports liveness and the number of tracked rooms
    #[instrument(skip(self))]
    pub async fn status(&self) -> StatusResponse {
        StatusResponse {
            status: "running".to_string(),
            timestamp: unix_timestamp(),
            rooms: self.repository.room_count().await,
        }
    }
}

fn parse_since(raw: &str) -> Result<f64, AppError> {
    raw.trim().parse::<f64>().map_err(|_| {
        warn!(since = %raw, "Rejecting unparseable since parameter");
        AppError::InvalidQuery("Invalid since parameter".to_string())
    })
}
