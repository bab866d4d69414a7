use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use super::models::MessageEnvelope;

/// Room used when a request does not name one
pub const DEFAULT_ROOM: &str = "default";

fn default_room() -> String {
    DEFAULT_ROOM.to_string()
}

fn default_payload() -> Value {
    json!({})
}

/// Query string for GET /poll
#[derive(Debug, Default)]
pub struct PollQuery {
    pub room: Option<String>,
    pub since: Option<String>, // Parsed as a float by the service
}

impl PollQuery {
    /// Builds the query from raw key/value pairs.
    ///
    /// Repeated keys keep their first value; empty values count as absent.
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let mut query = Self::default();
        for (key, value) in pairs {
            if value.is_empty() {
                continue;
            }
            let slot = match key.as_str() {
                "room" => &mut query.room,
                "since" => &mut query.since,
                _ => continue,
            };
            slot.get_or_insert(value);
        }
        query
    }
}

/// Request payload for POST /send
#[derive(Debug, Deserialize)]
pub struct SendRequest {
    #[serde(default = "default_room")]
    pub room: String,
    #[serde(default = "default_payload")]
    pub message: Value,
}

/// Response for GET /poll
#[derive(Debug, Serialize, Deserialize)]
pub struct PollResponse {
    pub messages: Vec<MessageEnvelope>,
    pub timestamp: f64,
}

/// Response for POST /send
#[derive(Debug, Serialize, Deserialize)]
pub struct SendResponse {
    pub status: String, // Always "success"
    pub timestamp: f64,
}

/// Response for GET /status
#[derive(Debug, Serialize, Deserialize)]
pub struct StatusResponse {
    pub status: String, // Always "running"
    pub timestamp: f64,
    pub rooms: usize,
}
