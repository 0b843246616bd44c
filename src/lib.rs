//! reelsync - accessible film player
//!
//! Keeps chapters, spoken audio description, filming locations and a live
//! chat in sync with the playback time of a film.

pub mod chat;
pub mod cli;
pub mod config;
pub mod cue;
pub mod film;
pub mod logging;
pub mod narration;
pub mod player;
pub mod theme;
pub mod timecode;

pub use config::{Config, ConfigError};
pub use cue::{find_active_index, MatchPolicy, TimedEntry, Timestamp};
pub use film::{load_film, Film, FilmLoadError};
pub use timecode::{format_seconds, parse_timestamp};
