use async_trait::async_trait;
use serde_json::Value;
use std::collections::{HashMap, VecDeque};
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::{debug, info, instrument};

use super::models::{unix_timestamp, MessageEnvelope, RoomSnapshot};

/// Number of messages retained per room before the oldest are evicted
pub const MAX_MESSAGES_PER_ROOM: usize = 10;

/// Smallest step used to keep handed-out timestamps strictly increasing
const TIMESTAMP_STEP: f64 = 0.000_001;

/// Trait for room-scoped signaling message storage
///
/// Every operation is total: unknown rooms read as empty and are created on first write.
#[async_trait]
pub trait MessageRepository {
    /// Appends a payload to the room's log, evicting the oldest entries past the cap
    async fn store(&self, room_id: &str, payload: Value) -> MessageEnvelope;

    /// Returns the room's envelopes with `timestamp > since`, oldest first
    async fn query(&self, room_id: &str, since: f64) -> Vec<MessageEnvelope>;

    /// Like `query`, and also hands out a cursor no later store can fall behind
    async fn snapshot(&self, room_id: &str, since: f64) -> RoomSnapshot;

    /// Drops the room's log entirely; no-op for unknown rooms
    async fn clear(&self, room_id: &str);

    /// Number of rooms currently holding a log
    async fn room_count(&self) -> usize;
}

struct RoomLogs {
    rooms: HashMap<String, VecDeque<MessageEnvelope>>,
    last_timestamp: f64,
}

impl RoomLogs {
    fn next_timestamp(&mut self) -> f64 {
        let now = unix_timestamp();
        let timestamp = if now > self.last_timestamp {
            now
        } else {
            self.last_timestamp + TIMESTAMP_STEP
        };
        self.last_timestamp = timestamp;
        timestamp
    }

    // Later stores only take timestamps above `last_timestamp`, so pinning it
    // here keeps them above the cursor even within the same microsecond.
    fn cursor(&mut self) -> f64 {
        self.last_timestamp = unix_timestamp().max(self.last_timestamp);
        self.last_timestamp
    }

    fn newer_than(&self, room_id: &str, since: f64) -> Vec<MessageEnvelope> {
        match self.rooms.get(room_id) {
            Some(log) => log
                .iter()
                .filter(|envelope| envelope.is_newer_than(since))
                .cloned()
                .collect(),
            None => Vec::new(),
        }
    }
}

/// In-memory implementation of MessageRepository guarded by a single lock
pub struct InMemoryMessageRepository {
    logs: Mutex<RoomLogs>,
    capacity: usize,
}

impl Default for InMemoryMessageRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryMessageRepository {
    /// Creates an empty repository keeping the last `MAX_MESSAGES_PER_ROOM` messages per room
    pub fn new() -> Self {
        Self::with_capacity(MAX_MESSAGES_PER_ROOM)
    }

    /// Creates an empty repository with a custom per-room cap (at least 1)
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            logs: Mutex::new(RoomLogs {
                rooms: HashMap::new(),
                last_timestamp: 0.0,
            }),
            capacity: capacity.max(1),
        }
    }

    // Poisoning is recovered; no mutation below can panic halfway through.
    fn lock(&self) -> MutexGuard<'_, RoomLogs> {
        self.logs.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl MessageRepository for InMemoryMessageRepository {
    #[instrument(skip(self, payload))]
    async fn store(&self, room_id: &str, payload: Value) -> MessageEnvelope {
        let mut logs = self.lock();
        let timestamp = logs.next_timestamp();
        let envelope = MessageEnvelope::new(payload, timestamp);

        let log = logs.rooms.entry(room_id.to_string()).or_default();
        log.push_back(envelope.clone());
        while log.len() > self.capacity {
            log.pop_front();
        }

        debug!(
            room_id = %room_id,
            timestamp = timestamp,
            log_len = log.len(),
            "Message stored"
        );
        envelope
    }

    #[instrument(skip(self))]
    async fn query(&self, room_id: &str, since: f64) -> Vec<MessageEnvelope> {
        let messages = self.lock().newer_than(room_id, since);

        debug!(room_id = %room_id, count = messages.len(), "Messages queried");
        messages
    }

    #[instrument(skip(self))]
    async fn snapshot(&self, room_id: &str, since: f64) -> RoomSnapshot {
        let mut logs = self.lock();
        let messages = logs.newer_than(room_id, since);
        let cursor = logs.cursor();

        debug!(room_id = %room_id, count = messages.len(), cursor = cursor, "Room snapshot taken");
        RoomSnapshot { messages, cursor }
    }

    #[instrument(skip(self))]
    async fn clear(&self, room_id: &str) {
        let mut logs = self.lock();
        match logs.rooms.remove(room_id) {
            Some(log) => info!(room_id = %room_id, dropped = log.len(), "Room cleared"),
            None => debug!(room_id = %room_id, "Clear requested for unknown room"),
        }
    }

    #[instrument(skip(self))]
    async fn room_count(&self) -> usize {
        self.lock().rooms.len()
    }
}
