//! Subcommand handlers

pub mod chapters;
pub mod chat;
pub mod completions;
pub mod config;
pub mod cues;
pub mod play;
pub mod poi;
pub mod timecode;

use anyhow::{Context, Result};

use reelsync::film::{load_film, Film};
use reelsync::Config;

/// Display language: the flag, else the configured one.
pub fn language(flag: Option<&str>, config: &Config) -> String {
    flag.map(str::trim)
        .filter(|lang| !lang.is_empty())
        .unwrap_or(&config.player.language)
        .to_string()
}

/// Load a film document for a listing command.
pub fn load(film: &str) -> Result<Film> {
    load_film(film).with_context(|| format!("Failed to load film from {}", film))
}

/// Marker printed in front of the active row.
pub fn active_marker(active: bool) -> &'static str {
    if active {
        "▶"
    } else {
        " "
    }
}
