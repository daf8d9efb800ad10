use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Which side of the conversation authored a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sender {
    User,
    Bot,
}

/// One transcript entry. The session log is append-only and insertion
/// order is display order — entries are never reordered or deleted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Message {
    pub sender: Sender,
    pub text: String,
    /// When the message was appended (informational; ordering comes from
    /// the log itself, not from this field).
    pub sent_at: DateTime<Utc>,
}

impl Message {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            sender: Sender::User,
            text: text.into(),
            sent_at: Utc::now(),
        }
    }

    pub fn bot(text: impl Into<String>) -> Self {
        Self {
            sender: Sender::Bot,
            text: text.into(),
            sent_at: Utc::now(),
        }
    }
}
