//! Live chat: message format, ordered feed, composer and transport.

mod compose;
mod feed;
mod message;
mod transport;
mod ws;

pub use compose::{Composer, DEFAULT_AUTHOR};
pub use feed::ChatFeed;
pub use message::{ChatMessage, ChatPayload};
pub use transport::{ChatError, ChatTransport};
pub use ws::WsTransport;

use tracing::warn;

use crate::timecode::now_epoch_secs;

/// Feed, composer and an optional transport kept together.
///
/// Without a transport the room still works locally: sent messages are
/// appended to the feed.
pub struct ChatRoom<T: ChatTransport> {
    pub feed: ChatFeed,
    pub composer: Composer,
    transport: Option<T>,
}

impl<T: ChatTransport> ChatRoom<T> {
    pub fn new(author: impl Into<String>, transport: Option<T>) -> Self {
        Self {
            feed: ChatFeed::new(),
            composer: Composer::new(author),
            transport,
        }
    }

    pub fn is_connected(&self) -> bool {
        self.transport.is_some()
    }

    /// Drain everything the transport has received. Returns the number of
    /// new messages.
    pub fn poll(&mut self) -> usize {
        let Some(transport) = self.transport.as_mut() else {
            return 0;
        };
        let mut added = 0;
        while let Some(payload) = transport.try_recv() {
            added += self.feed.apply(payload);
        }
        added
    }

    /// Send the composed message stamped with the current time.
    pub fn send_composed(&mut self) -> Option<ChatMessage> {
        self.send_composed_at(now_epoch_secs())
    }

    /// Send the composed message stamped with `now`.
    ///
    /// The local copy is appended whether or not sending succeeds.
    pub fn send_composed_at(&mut self, now: impl Into<String>) -> Option<ChatMessage> {
        let message = self.composer.build(now)?;
        if let Some(transport) = self.transport.as_mut() {
            if let Err(e) = transport.send(&message) {
                warn!("Chat message not sent: {}", e);
            }
        }
        self.feed.append_local(message.clone());
        Some(message)
    }

    /// Close the transport, if any.
    pub fn close(&mut self) {
        if let Some(mut transport) = self.transport.take() {
            transport.close();
        }
    }
}

impl<T: ChatTransport> Drop for ChatRoom<T> {
    fn drop(&mut self) {
        self.close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;

    #[derive(Default)]
    struct LoopbackTransport {
        sent: Vec<ChatMessage>,
        queued: VecDeque<ChatPayload>,
        fail_sends: bool,
    }

    impl ChatTransport for LoopbackTransport {
        fn send(&mut self, message: &ChatMessage) -> Result<(), ChatError> {
            if self.fail_sends {
                return Err(ChatError::Closed);
            }
            self.sent.push(message.clone());
            Ok(())
        }

        fn try_recv(&mut self) -> Option<ChatPayload> {
            self.queued.pop_front()
        }

        fn close(&mut self) {}
    }

    #[test]
    fn poll_drains_all_payloads() {
        let mut transport = LoopbackTransport::default();
        transport.queued.push_back(ChatPayload::Batch(vec![
            ChatMessage::new("2", "b", "y", None),
            ChatMessage::new("1", "a", "x", None),
        ]));
        transport
            .queued
            .push_back(ChatPayload::Single(ChatMessage::new("1", "a", "x", None)));
        let mut room = ChatRoom::new("Ana", Some(transport));

        assert_eq!(room.poll(), 2);
        assert_eq!(room.feed.messages()[0].when, "1");
    }

    #[test]
    fn sent_message_is_appended_even_on_failure() {
        let transport = LoopbackTransport {
            fail_sends: true,
            ..LoopbackTransport::default()
        };
        let mut room = ChatRoom::new("Ana", Some(transport));
        room.composer.body = "hello".to_string();

        assert!(room.send_composed_at("100").is_some());
        assert_eq!(room.feed.len(), 1);
    }

    #[test]
    fn offline_room_keeps_local_messages() {
        let mut room: ChatRoom<LoopbackTransport> = ChatRoom::new("", None);
        room.composer.body = "hi".to_string();
        let message = room.send_composed_at("5").unwrap();
        assert_eq!(message.name, DEFAULT_AUTHOR);
        assert_eq!(room.poll(), 0);
    }
}
