//! Chat message wire format.

use serde::{Deserialize, Deserializer, Serialize};

use crate::timecode::epoch_millis;

/// One chat message as exchanged over the socket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Unix send time, as a string
    #[serde(deserialize_with = "string_or_number")]
    pub when: String,
    /// Author
    #[serde(default)]
    pub name: String,
    /// Body
    #[serde(default)]
    pub message: String,
    /// Film moment in seconds this message points at
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub moment: Option<f64>,
}

impl ChatMessage {
    pub fn new(
        when: impl Into<String>,
        name: impl Into<String>,
        message: impl Into<String>,
        moment: Option<f64>,
    ) -> Self {
        Self {
            when: when.into(),
            name: name.into(),
            message: message.into(),
            moment,
        }
    }

    /// Identity used for deduplication. `moment` is not part of it.
    pub fn key(&self) -> (&str, &str, &str) {
        (&self.when, &self.name, &self.message)
    }

    /// Whether two messages are the same message.
    pub fn same_as(&self, other: &ChatMessage) -> bool {
        self.key() == other.key()
    }

    /// Send time in milliseconds, for ordering. Unparseable times sort first.
    pub fn sent_at(&self) -> i64 {
        epoch_millis(&self.when).unwrap_or(0)
    }
}

/// An incoming payload: a single message or a batch.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ChatPayload {
    Batch(Vec<ChatMessage>),
    Single(ChatMessage),
}

impl ChatPayload {
    /// Parse a text frame.
    pub fn parse(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Int(i64),
        Float(f64),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Text(text) => text,
        Raw::Int(n) => n.to_string(),
        Raw::Float(f) => format!("{}", f.trunc() as i64),
    })
}
