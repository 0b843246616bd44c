//! Interactive player

use std::time::Duration;

use anyhow::{bail, Result};
use tracing::info;

use reelsync::cli::PlayArgs;
use reelsync::player::{run_player, PlaybackResult, PlayerOptions, SessionOptions};
use reelsync::theme::current_theme;
use reelsync::timecode::parse_position;
use reelsync::Config;

/// Merge flags over the config into player options.
pub fn player_options(args: PlayArgs, config: &Config) -> Result<PlayerOptions> {
    let film = match args.film.or_else(|| {
        let source = config.film.source.trim();
        (!source.is_empty()).then(|| source.to_string())
    }) {
        Some(film) => film,
        None => bail!("No film given and `film.source` is not set in the config"),
    };

    let language = super::language(args.lang.as_deref(), config);
    let mut narration = config.narration.settings(&language);
    if let Some(tolerance) = args.tolerance {
        narration.tolerance = tolerance.max(0.0);
    }

    let chat_endpoint = args.chat.or_else(|| {
        config
            .chat
            .autoconnect
            .then(|| config.chat.endpoint.clone())
    });

    let subtitle = Some(config.player.subtitle.trim())
        .filter(|lang| !lang.is_empty())
        .map(str::to_string);

    let session = SessionOptions {
        language,
        subtitle,
        seek_step: config.player.seek_step_secs.max(0.5),
        narration_enabled: args.narration || config.narration.enabled,
        narration,
        author: args.name.unwrap_or_else(|| config.chat.username.clone()),
        start: args.start.as_deref().map(parse_position).unwrap_or(0.0),
        autoplay: !args.paused,
    };

    Ok(PlayerOptions {
        film,
        session,
        chat_endpoint,
        preferred_tool: config.narration.preferred_method(),
        tick: Duration::from_millis(config.player.tick_ms.clamp(16, 1000)),
    })
}

#[cfg(not(tarpaulin_include))]
pub fn handle(args: PlayArgs, config: &Config) -> Result<()> {
    let options = player_options(args, config)?;
    info!(film = %options.film, "Starting player");
    let film = options.film.clone();

    if run_player(options)? == PlaybackResult::LoadAbandoned {
        let theme = current_theme();
        eprintln!("{}", theme.error_text(&format!("Could not load {}", film)));
    }
    Ok(())
}
