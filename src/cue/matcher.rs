//! Active-entry matching against the playback time.
//!
//! Two policies exist side by side:
//! - `Range`: an entry is active from its own time until the next entry's
//!   time (chapters). Requires entries sorted ascending.
//! - `Proximity`: an entry is active while the playback time is within a
//!   tolerance window around it (audio-description cues).
//!
//! The matcher is stateless. Every call evaluates from scratch so seeks are
//! handled without special cases.

use super::TimedEntry;

/// Default audio-description tolerance window in seconds.
pub const DEFAULT_TOLERANCE: f64 = 0.5;

/// How an entry is matched against the current time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MatchPolicy {
    /// Active on `[time(i), time(i + 1))`, the last entry is open-ended
    Range,
    /// Active while `|time(i) - t| < tolerance`, first in list order wins
    Proximity { tolerance: f64 },
}

impl MatchPolicy {
    /// Proximity policy with the default tolerance.
    pub fn proximity() -> Self {
        Self::Proximity {
            tolerance: DEFAULT_TOLERANCE,
        }
    }
}

/// Find the entry active at `current_time` under `policy`.
///
/// # Arguments
/// * `entries` - Timed entries (sorted ascending for `Range`)
/// * `current_time` - Playback position in seconds
/// * `policy` - Matching policy
///
/// # Returns
/// Index of the active entry, or `None` if nothing matches
pub fn find_active_index<T: TimedEntry>(
    entries: &[T],
    current_time: f64,
    policy: MatchPolicy,
) -> Option<usize> {
    match policy {
        MatchPolicy::Range => find_range_index(entries, current_time),
        MatchPolicy::Proximity { tolerance } => {
            find_proximity_index(entries, current_time, tolerance)
        }
    }
}

/// Range match: the entry whose half-open interval contains `current_time`.
pub fn find_range_index<T: TimedEntry>(entries: &[T], current_time: f64) -> Option<usize> {
    entries.iter().enumerate().position(|(i, entry)| {
        let start = entry.seconds();
        let end = entries
            .get(i + 1)
            .map(TimedEntry::seconds)
            .unwrap_or(f64::INFINITY);
        current_time >= start && current_time < end
    })
}

/// Proximity match: the first entry within `tolerance` of `current_time`.
pub fn find_proximity_index<T: TimedEntry>(
    entries: &[T],
    current_time: f64,
    tolerance: f64,
) -> Option<usize> {
    entries
        .iter()
        .position(|entry| (entry.seconds() - current_time).abs() < tolerance)
}

/// Sort entries ascending by time. Stable, so equal times keep file order.
pub fn sort_by_time<T: TimedEntry>(entries: &mut [T]) {
    entries.sort_by(|a, b| a.seconds().total_cmp(&b.seconds()));
}

/// Index of the first entry strictly after `current_time`, if any.
pub fn next_index<T: TimedEntry>(entries: &[T], current_time: f64) -> Option<usize> {
    entries
        .iter()
        .position(|entry| entry.seconds() > current_time)
}

/// Index to go back to from `current_time`.
///
/// Returns the start of the active entry, unless playback is within
/// `grace` seconds of that start, in which case the previous entry is used.
pub fn previous_index<T: TimedEntry>(
    entries: &[T],
    current_time: f64,
    grace: f64,
) -> Option<usize> {
    let active = find_range_index(entries, current_time)?;
    if current_time - entries[active].seconds() < grace && active > 0 {
        Some(active - 1)
    } else {
        Some(active)
    }
}
