//! Timecode conversion

use anyhow::Result;

use reelsync::cli::TimecodeCommands;
use reelsync::timecode::{format_seconds, parse_timestamp};

pub fn handle(cmd: TimecodeCommands) -> Result<()> {
    match cmd {
        TimecodeCommands::Parse { text } => {
            for item in text {
                println!("{}", parse_timestamp(&item));
            }
        }
        TimecodeCommands::Format { seconds } => {
            for secs in seconds {
                println!("{}", format_seconds(secs));
            }
        }
    }
    Ok(())
}
