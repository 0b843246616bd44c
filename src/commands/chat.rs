//! Live chat from the command line

use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use tracing::info;

use reelsync::chat::{ChatMessage, ChatRoom, WsTransport};
use reelsync::theme::current_theme;
use reelsync::timecode::{format_epoch_label, format_seconds, parse_position};
use reelsync::Config;

/// How often the feed is polled.
const POLL_INTERVAL: Duration = Duration::from_millis(100);

pub struct ChatArgs {
    pub url: Option<String>,
    pub name: Option<String>,
    pub send: Option<String>,
    pub moment: Option<String>,
    pub once: bool,
}

/// One printed feed line.
pub fn format_message(message: &ChatMessage) -> String {
    let moment = message
        .moment
        .map(|m| format!(" @{}", format_seconds(m)))
        .unwrap_or_default();
    format!(
        "[{}] {}{}: {}",
        format_epoch_label(&message.when),
        message.name,
        moment,
        message.message
    )
}

#[cfg(not(tarpaulin_include))]
pub fn handle(args: ChatArgs, config: &Config) -> Result<()> {
    let theme = current_theme();
    let url = args.url.unwrap_or_else(|| config.chat.endpoint.clone());
    let author = args.name.unwrap_or_else(|| config.chat.username.clone());

    let transport =
        WsTransport::connect(&url).with_context(|| format!("Failed to join chat at {}", url))?;
    info!(url = %url, "Joined chat");
    let mut room = ChatRoom::new(author, Some(transport));

    if let Some(text) = args.send {
        room.composer.body = text;
        if let Some(moment) = args.moment.as_deref() {
            room.composer.toggle_moment(parse_position(moment));
        }
        if let Some(sent) = room.send_composed() {
            println!("{}", theme.success_text(&format!("Sent: {}", format_message(&sent))));
        }
        if args.once {
            room.close();
            return Ok(());
        }
    }

    let running = Arc::new(AtomicBool::new(true));
    let flag = Arc::clone(&running);
    ctrlc::set_handler(move || flag.store(false, Ordering::SeqCst))
        .context("Failed to install Ctrl+C handler")?;

    println!(
        "{}",
        theme.secondary_text(&format!("Connected to {}. Ctrl+C to leave.", url))
    );

    let mut printed: HashSet<(String, String, String)> = room
        .feed
        .messages()
        .iter()
        .map(owned_key)
        .collect();

    while running.load(Ordering::SeqCst) {
        if room.poll() > 0 {
            for message in room.feed.messages() {
                if printed.insert(owned_key(message)) {
                    println!("{}", theme.primary_text(&format_message(message)));
                }
            }
        }
        thread::sleep(POLL_INTERVAL);
    }

    room.close();
    println!("{}", theme.secondary_text("Left chat."));
    Ok(())
}

fn owned_key(message: &ChatMessage) -> (String, String, String) {
    let (when, name, text) = message.key();
    (when.to_string(), name.to_string(), text.to_string())
}
