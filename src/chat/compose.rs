//! Outgoing message composer.

use super::message::ChatMessage;
use crate::timecode::{hms_to_seconds, split_hms};

/// Author name used until the user picks one.
pub const DEFAULT_AUTHOR: &str = "Moi";

/// Editable state of the outgoing message.
///
/// The moment is edited as three separate fields. Fields that are not
/// numbers count as zero.
#[derive(Debug, Clone, PartialEq)]
pub struct Composer {
    pub author: String,
    pub body: String,
    pub hours: String,
    pub minutes: String,
    pub seconds: String,
    attach_moment: bool,
}

impl Default for Composer {
    fn default() -> Self {
        Self::new(DEFAULT_AUTHOR)
    }
}

impl Composer {
    pub fn new(author: impl Into<String>) -> Self {
        let author = author.into();
        Self {
            author: if author.trim().is_empty() {
                DEFAULT_AUTHOR.to_string()
            } else {
                author
            },
            body: String::new(),
            hours: "00".to_string(),
            minutes: "00".to_string(),
            seconds: "00".to_string(),
            attach_moment: false,
        }
    }

    pub fn attach_moment(&self) -> bool {
        self.attach_moment
    }

    /// Toggle the moment attachment. Turning it on copies `current_time`
    /// into the H/M/S fields.
    pub fn toggle_moment(&mut self, current_time: f64) {
        if !self.attach_moment {
            self.sync_moment(current_time);
        }
        self.attach_moment = !self.attach_moment;
    }

    /// Fill the H/M/S fields from a playback time.
    pub fn sync_moment(&mut self, current_time: f64) {
        let secs = if current_time.is_finite() && current_time > 0.0 {
            current_time.floor() as u64
        } else {
            0
        };
        let (h, m, s) = split_hms(secs);
        self.hours = format!("{:02}", h);
        self.minutes = format!("{:02}", m);
        self.seconds = format!("{:02}", s);
    }

    /// Moment in seconds from the H/M/S fields, if attached.
    ///
    /// A total too large to represent counts as zero, like a non-numeric field.
    pub fn moment(&self) -> Option<f64> {
        if !self.attach_moment {
            return None;
        }
        let field = |text: &str| text.trim().parse::<u64>().unwrap_or(0);
        let total = hms_to_seconds(field(&self.hours), field(&self.minutes), field(&self.seconds))
            .unwrap_or(0);
        Some(total as f64)
    }

    /// Build the message to send, stamped with `now`.
    ///
    /// Returns `None` for a blank body. On success the body is cleared and
    /// the moment detached, ready for the next message.
    pub fn build(&mut self, now: impl Into<String>) -> Option<ChatMessage> {
        if self.body.trim().is_empty() {
            return None;
        }
        let message = ChatMessage::new(
            now,
            self.author.clone(),
            std::mem::take(&mut self.body),
            self.moment(),
        );
        self.attach_moment = false;
        Some(message)
    }
}
