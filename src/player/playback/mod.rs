//! Playback helpers for the player.
//!
//! Builds the chapter markers and place rows the UI navigates.

mod markers;

pub use markers::{collect_markers, collect_place_rows, PlaceRow};
