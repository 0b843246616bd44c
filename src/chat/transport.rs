//! Chat transport abstraction.

use super::message::{ChatMessage, ChatPayload};

/// Errors that can occur on the chat channel.
#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    #[error("Invalid chat endpoint: {0}")]
    InvalidEndpoint(String),

    #[error("Failed to connect to {url}: {source}")]
    Connect {
        url: String,
        #[source]
        source: Box<tungstenite::Error>,
    },

    #[error("Failed to encode chat message: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("Chat connection is closed")]
    Closed,
}

/// A duplex message channel.
///
/// Implementations deliver payloads without blocking the caller: `try_recv`
/// returns whatever has arrived since the last call.
pub trait ChatTransport {
    /// Queue a message for sending.
    fn send(&mut self, message: &ChatMessage) -> Result<(), ChatError>;

    /// Next received payload, if any.
    fn try_recv(&mut self) -> Option<ChatPayload>;

    /// Close the connection. Further sends fail with [`ChatError::Closed`].
    fn close(&mut self);
}

impl<T: ChatTransport + ?Sized> ChatTransport for Box<T> {
    fn send(&mut self, message: &ChatMessage) -> Result<(), ChatError> {
        (**self).send(message)
    }

    fn try_recv(&mut self) -> Option<ChatPayload> {
        (**self).try_recv()
    }

    fn close(&mut self) {
        (**self).close()
    }
}
