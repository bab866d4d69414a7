use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A signaling payload as it sits in a room log
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageEnvelope {
    #[serde(rename = "message")]
    pub payload: Value, // Opaque, never inspected
    pub timestamp: f64, // Seconds since the Unix epoch
}

impl MessageEnvelope {
    pub fn new(payload: Value, timestamp: f64) -> Self {
        Self { payload, timestamp }
    }

    /// Whether this envelope arrived strictly after `since`
    pub fn is_newer_than(&self, since: f64) -> bool {
        self.timestamp > since
    }
}

/// A room's messages newer than some cursor, plus the cursor to poll from next
///
/// `cursor` is taken under the same lock as `messages`: every envelope stored
/// afterwards carries a strictly greater timestamp.
#[derive(Debug, Clone, PartialEq)]
pub struct RoomSnapshot {
    pub messages: Vec<MessageEnvelope>,
    pub cursor: f64,
}

/// Current wall-clock time as fractional seconds since the Unix epoch (µs resolution)
pub fn unix_timestamp() -> f64 {
    Utc::now().timestamp_micros() as f64 / 1_000_000.0
}
