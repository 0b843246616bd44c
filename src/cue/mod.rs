//! Cue matching shared by chapters, audio description, places and chat.

mod matcher;
mod timestamp;

pub use matcher::{
    find_active_index, find_proximity_index, find_range_index, next_index, previous_index,
    sort_by_time, MatchPolicy, DEFAULT_TOLERANCE,
};
pub use timestamp::Timestamp;

/// Anything positioned on the film timeline.
pub trait TimedEntry {
    /// Position in seconds.
    fn seconds(&self) -> f64;
}

impl TimedEntry for f64 {
    fn seconds(&self) -> f64 {
        *self
    }
}

impl TimedEntry for Timestamp {
    fn seconds(&self) -> f64 {
        Timestamp::seconds(self)
    }
}
