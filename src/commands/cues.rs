//! Audio-description cue listing

use std::thread;
use std::time::{Duration, Instant};

use anyhow::{bail, Result};
use tracing::debug;

use reelsync::cli::DisplayArgs;
use reelsync::cue::find_proximity_index;
use reelsync::film::Film;
use reelsync::narration::{tools::tools_preferring, NarrationController, NarrationEvent, SystemNarrator};
use reelsync::theme::current_theme;
use reelsync::timecode::{format_seconds, parse_position};
use reelsync::{Config, TimedEntry};

/// Longest wait for a spoken cue to finish.
const SPEAK_TIMEOUT: Duration = Duration::from_secs(120);

#[cfg(not(tarpaulin_include))]
pub fn handle(
    film: &str,
    at: Option<&str>,
    tolerance: Option<f64>,
    speak: bool,
    display: &DisplayArgs,
    config: &Config,
) -> Result<()> {
    let film = super::load(film)?;
    let lang = super::language(display.lang.as_deref(), config);
    let tolerance = tolerance
        .unwrap_or(config.narration.tolerance_secs)
        .max(0.0);
    let time = at.map(parse_position);
    let active = time.and_then(|t| find_proximity_index(&film.cues, t, tolerance));

    if display.json {
        let rows: Vec<_> = film
            .cues
            .iter()
            .enumerate()
            .map(|(i, cue)| {
                serde_json::json!({
                    "scene": cue.scene,
                    "time": cue.seconds(),
                    "timestamp": format_seconds(cue.seconds()),
                    "text": cue.text_for(&lang),
                    "active": active == Some(i),
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&rows)?);
    } else {
        print_cues(&film, &lang, active);
    }

    if speak {
        if let Some(t) = time {
            speak_at(&film, t, tolerance, &lang, config)?;
        }
    }
    Ok(())
}

fn print_cues(film: &Film, lang: &str, active: Option<usize>) {
    let theme = current_theme();
    println!("{}", theme.accent_text(&film.info.title));
    if film.cues.is_empty() {
        println!("{}", theme.secondary_text("No audio description."));
        return;
    }
    for (i, cue) in film.cues.iter().enumerate() {
        let text = cue.text_for(lang).unwrap_or("(no text)");
        let line = format!(
            "{} {}  #{:<3} {}",
            super::active_marker(active == Some(i)),
            format_seconds(cue.seconds()),
            cue.scene,
            text
        );
        if active == Some(i) {
            println!("{}", theme.accent_text(&line));
        } else {
            println!("{}", theme.primary_text(&line));
        }
    }
}

/// Speak the cue active at `time` and wait until the voice is done.
fn speak_at(film: &Film, time: f64, tolerance: f64, lang: &str, config: &Config) -> Result<()> {
    let theme = current_theme();
    let mut settings = config.narration.settings(lang);
    settings.tolerance = tolerance;
    let mut controller = NarrationController::new(settings);
    let mut narrator = SystemNarrator::with_tools(tools_preferring(
        config.narration.preferred_method(),
    ));

    match controller.on_time_update(&film.cues, time, true, &mut narrator) {
        NarrationEvent::Spoke { cue, text } => {
            debug!(cue, "Speaking cue");
            println!("{}", theme.secondary_text(&format!("Speaking: {}", text)));
        }
        NarrationEvent::Unavailable => bail!("No speech tool found (tried espeak-ng, spd-say, say)"),
        NarrationEvent::Failed { cue } => bail!("Speech failed for cue {}", cue),
        NarrationEvent::Skipped { .. } => {
            println!("{}", theme.secondary_text("Active cue has no text to speak."));
            return Ok(());
        }
        _ => {
            println!("{}", theme.secondary_text("No cue active at this time."));
            return Ok(());
        }
    }

    let started = Instant::now();
    while controller.poll(&mut narrator) != NarrationEvent::Finished {
        if started.elapsed() > SPEAK_TIMEOUT {
            controller.disable(&mut narrator);
            break;
        }
        thread::sleep(Duration::from_millis(100));
    }
    Ok(())
}
