//! Ordered, deduplicated chat history.

use tracing::debug;

use super::message::{ChatMessage, ChatPayload};

/// Chat messages ordered by send time.
///
/// Two messages with the same `(when, name, message)` are the same message
/// and appear once.
#[derive(Debug, Clone, Default)]
pub struct ChatFeed {
    messages: Vec<ChatMessage>,
}

impl ChatFeed {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn contains(&self, message: &ChatMessage) -> bool {
        self.messages.iter().any(|m| m.same_as(message))
    }

    /// Apply an incoming payload. Returns how many messages were added.
    pub fn apply(&mut self, payload: ChatPayload) -> usize {
        match payload {
            ChatPayload::Batch(batch) => self.merge_batch(batch),
            ChatPayload::Single(message) => usize::from(self.push(message)),
        }
    }

    /// Merge a batch, dropping duplicates, then re-sort the whole feed.
    ///
    /// Network order is not trusted. The sort is stable so messages sent in
    /// the same second keep their arrival order.
    pub fn merge_batch(&mut self, batch: Vec<ChatMessage>) -> usize {
        let before = self.messages.len();
        for message in batch {
            if !self.contains(&message) {
                self.messages.push(message);
            }
        }
        self.messages.sort_by_key(ChatMessage::sent_at);
        let added = self.messages.len() - before;
        debug!(added, total = self.messages.len(), "Merged chat batch");
        added
    }

    /// Insert one message at its ordered position unless already present.
    pub fn push(&mut self, message: ChatMessage) -> bool {
        if self.contains(&message) {
            return false;
        }
        self.insert_ordered(message);
        true
    }

    /// Add a message we just sent, before any acknowledgement.
    ///
    /// Every send shows up, even one identical to an earlier send. Only
    /// messages coming back from the server are deduplicated.
    pub fn append_local(&mut self, message: ChatMessage) {
        self.insert_ordered(message);
    }

    fn insert_ordered(&mut self, message: ChatMessage) {
        let at = message.sent_at();
        let index = self.messages.partition_point(|m| m.sent_at() <= at);
        self.messages.insert(index, message);
    }

    /// Indexes of messages that carry a moment.
    pub fn with_moments(&self) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.messages
            .iter()
            .enumerate()
            .filter_map(|(i, m)| m.moment.map(|moment| (i, moment)))
    }
}
