//! Command-line definition.
//!
//! Lives in the library so `xtask` can render man pages and completions
//! from the same clap tree.

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

/// Version string shown by `--version`.
#[cfg(feature = "release")]
pub const VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("REELSYNC_BUILD_DATE"),
    ")"
);

/// Version string shown by `--version`.
#[cfg(not(feature = "release"))]
pub const VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    "-dev+",
    env!("VERGEN_GIT_SHA"),
    " (",
    env!("REELSYNC_BUILD_DATE"),
    ")"
);

#[derive(Debug, Parser)]
#[command(
    name = "reelsync",
    version = VERSION,
    about = "Accessible film player with chapters, spoken audio description, places and live chat",
    propagate_version = true
)]
pub struct Cli {
    /// More log output on stderr (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Open the interactive terminal player
    Play(PlayArgs),

    /// List chapters and mark the active one
    Chapters {
        /// Film document path or URL
        film: String,
        /// Playback time (HH:MM:SS, MM:SS or seconds)
        #[arg(long)]
        at: Option<String>,
        #[command(flatten)]
        display: DisplayArgs,
    },

    /// List audio-description cues and the active one
    Cues {
        /// Film document path or URL
        film: String,
        /// Playback time (HH:MM:SS, MM:SS or seconds)
        #[arg(long)]
        at: Option<String>,
        /// Match window around each cue, in seconds
        #[arg(long, value_name = "SECS")]
        tolerance: Option<f64>,
        /// Speak the active cue aloud
        #[arg(long, requires = "at")]
        speak: bool,
        #[command(flatten)]
        display: DisplayArgs,
    },

    /// List points of interest with their scenes
    Poi {
        /// Film document path or URL
        film: String,
        #[command(flatten)]
        display: DisplayArgs,
    },

    /// Join the live chat and print messages until Ctrl+C
    Chat {
        /// WebSocket endpoint; defaults to the configured one
        url: Option<String>,
        /// Author name
        #[arg(long)]
        name: Option<String>,
        /// Send one message after connecting
        #[arg(long, value_name = "TEXT")]
        send: Option<String>,
        /// Attach a film moment to the sent message
        #[arg(long, value_name = "HH:MM:SS", requires = "send")]
        moment: Option<String>,
        /// Exit after sending instead of following the feed
        #[arg(long, requires = "send")]
        once: bool,
    },

    /// Convert between timecodes and seconds
    #[command(subcommand)]
    Timecode(TimecodeCommands),

    /// Show or change configuration
    #[command(subcommand)]
    Config(ConfigCommands),

    /// Print a shell completion script
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Debug, Args)]
pub struct PlayArgs {
    /// Film document path or URL; defaults to `film.source` from the config
    pub film: Option<String>,

    /// Start with audio description on
    #[arg(long)]
    pub narration: bool,

    /// Audio-description match window in seconds
    #[arg(long, value_name = "SECS")]
    pub tolerance: Option<f64>,

    /// Connect to this chat endpoint
    #[arg(long, value_name = "URL")]
    pub chat: Option<String>,

    /// Chat author name
    #[arg(long)]
    pub name: Option<String>,

    /// Display language (fr, en, es)
    #[arg(long, value_name = "LANG")]
    pub lang: Option<String>,

    /// Start position (HH:MM:SS, MM:SS or seconds)
    #[arg(long, value_name = "TIME")]
    pub start: Option<String>,

    /// Start paused
    #[arg(long)]
    pub paused: bool,
}

#[derive(Debug, Args)]
pub struct DisplayArgs {
    /// Display language (fr, en, es)
    #[arg(long, value_name = "LANG")]
    pub lang: Option<String>,

    /// Print JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Subcommand)]
pub enum TimecodeCommands {
    /// Timecodes to seconds
    Parse {
        #[arg(required = true)]
        text: Vec<String>,
    },
    /// Seconds to HH:MM:SS
    Format {
        #[arg(required = true)]
        seconds: Vec<f64>,
    },
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the effective configuration
    Show,
    /// Open the config file in $EDITOR
    Edit,
    /// Add missing fields to the config file
    Migrate {
        /// Apply without asking
        #[arg(short, long)]
        yes: bool,
    },
    /// Print the config file location
    Path,
}
