//! reelsync command-line entry point

mod commands;

use anyhow::Result;
use clap::Parser;
use tracing::warn;

use reelsync::cli::{Cli, Commands, ConfigCommands};
use reelsync::logging::{init_logging, LogTarget};
use reelsync::theme::{set_theme, Theme};
use reelsync::Config;

/// Load the config, falling back to defaults so a broken file never
/// blocks the player. Returns the load error for logging once tracing is up.
fn load_config() -> (Config, Option<String>) {
    match Config::load() {
        Ok(config) => (config, None),
        Err(e) => (Config::default(), Some(e.to_string())),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let (config, load_error) = load_config();

    let target = match cli.command {
        Commands::Play(_) => LogTarget::File,
        _ => LogTarget::Stderr,
    };
    init_logging(&config.log, target, cli.verbose);
    if let Some(error) = load_error {
        warn!("Using default config: {}", error);
    }

    match Theme::from_name(&config.player.theme) {
        Some(theme) => set_theme(theme),
        None => warn!(theme = %config.player.theme, "Unknown theme, using default"),
    }

    match cli.command {
        Commands::Play(args) => commands::play::handle(args, &config),
        Commands::Chapters { film, at, display } => {
            commands::chapters::handle(&film, at.as_deref(), &display, &config)
        }
        Commands::Cues {
            film,
            at,
            tolerance,
            speak,
            display,
        } => commands::cues::handle(
            &film,
            at.as_deref(),
            tolerance,
            speak,
            &display,
            &config,
        ),
        Commands::Poi { film, display } => commands::poi::handle(&film, &display, &config),
        Commands::Chat {
            url,
            name,
            send,
            moment,
            once,
        } => commands::chat::handle(
            commands::chat::ChatArgs {
                url,
                name,
                send,
                moment,
                once,
            },
            &config,
        ),
        Commands::Timecode(cmd) => commands::timecode::handle(cmd),
        Commands::Config(cmd) => match cmd {
            ConfigCommands::Show => commands::config::handle_show(&config),
            ConfigCommands::Edit => commands::config::handle_edit(),
            ConfigCommands::Migrate { yes } => commands::config::handle_migrate(yes),
            ConfigCommands::Path => commands::config::handle_path(),
        },
        Commands::Completions { shell } => commands::completions::handle(shell),
    }
}
