//! # Dedup Window
//!
//! Remembers which chat message ids were already processed so that repeated
//! deliveries of the same scan are ignored.
//!
//! Entries are pruned eagerly on every processed event rather than by a
//! background job: an entry survives only while its timestamp is strictly
//! newer than `now - retention`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use shared_types::{lenient, Timestamp, SECONDS_PER_DAY};

/// Default retention for processed message ids (7 days).
pub const DEFAULT_RETENTION_SECS: u64 = 7 * SECONDS_PER_DAY;

/// First-seen record of a processed message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DedupEntry {
    /// When the message was first processed (UTC epoch seconds).
    #[serde(deserialize_with = "lenient::epoch_seconds")]
    pub timestamp: Timestamp,
    /// Sender of the message.
    #[serde(default)]
    pub user: String,
}

/// Outcome of [`DedupWindow::admit`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    /// First delivery; the message was recorded and must be processed.
    Accepted,
    /// Already processed; the caller does nothing and sends no reply.
    Duplicate,
}

/// Processed message ids keyed by message id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DedupWindow {
    entries: BTreeMap<String, DedupEntry>,
}

impl DedupWindow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drops entries older than the default retention. Returns how many were removed.
    pub fn prune(&mut self, now: Timestamp) -> usize {
        self.prune_older_than(now, DEFAULT_RETENTION_SECS)
    }

    /// Drops every entry whose timestamp is not strictly newer than
    /// `now - retention_secs`.
    pub fn prune_older_than(&mut self, now: Timestamp, retention_secs: u64) -> usize {
        let threshold = now.saturating_sub(retention_secs);
        let before = self.entries.len();
        self.entries.retain(|_, entry| entry.timestamp > threshold);
        before - self.entries.len()
    }

    /// Records `message_id` unless it is already present.
    pub fn admit(&mut self, message_id: &str, now: Timestamp, user: &str) -> Admission {
        if self.entries.contains_key(message_id) {
            return Admission::Duplicate;
        }
        self.entries.insert(
            message_id.to_string(),
            DedupEntry {
                timestamp: now,
                user: user.to_string(),
            },
        );
        Admission::Accepted
    }

    pub fn get(&self, message_id: &str) -> Option<&DedupEntry> {
        self.entries.get(message_id)
    }

    pub fn contains(&self, message_id: &str) -> bool {
        self.entries.contains_key(message_id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
