//! Chapter listing

use anyhow::Result;

use reelsync::cli::DisplayArgs;
use reelsync::cue::find_range_index;
use reelsync::theme::current_theme;
use reelsync::timecode::{format_seconds, parse_position};
use reelsync::{Config, TimedEntry};

#[cfg(not(tarpaulin_include))]
pub fn handle(film: &str, at: Option<&str>, display: &DisplayArgs, config: &Config) -> Result<()> {
    let film = super::load(film)?;
    let lang = super::language(display.lang.as_deref(), config);
    let active = at
        .map(parse_position)
        .and_then(|t| find_range_index(&film.chapters, t));

    if display.json {
        let rows: Vec<_> = film
            .chapters
            .iter()
            .enumerate()
            .map(|(i, chapter)| {
                serde_json::json!({
                    "time": chapter.seconds(),
                    "timestamp": format_seconds(chapter.seconds()),
                    "title": chapter.title_in(&lang),
                    "active": active == Some(i),
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    let theme = current_theme();
    println!("{}", theme.accent_text(&film.info.title));
    if film.chapters.is_empty() {
        println!("{}", theme.secondary_text("No chapters."));
        return Ok(());
    }
    for (i, chapter) in film.chapters.iter().enumerate() {
        let line = format!(
            "{} {}  {}",
            super::active_marker(active == Some(i)),
            format_seconds(chapter.seconds()),
            chapter.title_in(&lang)
        );
        if active == Some(i) {
            println!("{}", theme.accent_text(&line));
        } else {
            println!("{}", theme.primary_text(&line));
        }
    }
    Ok(())
}
