//! Terminal player loop.
//!
//! Owns the terminal for the lifetime of the player: raw mode, alternate
//! screen, and restoring both on every exit path.

use std::io::{self, Stdout};
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::{info, warn};

use super::input::handle_event;
use super::render;
use super::session::{PlayerSession, SessionOptions};
use super::state::InputResult;
use crate::chat::WsTransport;
use crate::film::{load_film, Film};
use crate::narration::{tools::tools_preferring, SpeechMethod, SystemNarrator};
use crate::theme::current_theme;

type Term = Terminal<CrosstermBackend<Stdout>>;

/// Everything needed to start the player.
#[derive(Debug, Clone)]
pub struct PlayerOptions {
    /// Film document path or URL
    pub film: String,
    pub session: SessionOptions,
    /// Chat WebSocket endpoint, if chat is wanted
    pub chat_endpoint: Option<String>,
    pub preferred_tool: Option<SpeechMethod>,
    /// Loop tick
    pub tick: Duration,
}

/// How the player ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackResult {
    /// User quit during playback
    Finished,
    /// User gave up after a load failure
    LoadAbandoned,
}

/// Restores the terminal when dropped.
struct TerminalGuard {
    terminal: Term,
}

impl TerminalGuard {
    fn enter() -> Result<Self> {
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stdout = io::stdout();
        if let Err(e) = execute!(stdout, EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(e).context("Failed to enter alternate screen");
        }
        let terminal = Terminal::new(CrosstermBackend::new(stdout))?;
        Ok(Self { terminal })
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(self.terminal.backend_mut(), LeaveAlternateScreen);
        let _ = self.terminal.show_cursor();
    }
}

/// Run the interactive player until the user quits.
pub fn run_player(options: PlayerOptions) -> Result<PlaybackResult> {
    let mut guard = TerminalGuard::enter()?;

    let Some(film) = load_with_retry(&mut guard.terminal, &options.film)? else {
        return Ok(PlaybackResult::LoadAbandoned);
    };

    let narrator = SystemNarrator::with_tools(tools_preferring(options.preferred_tool));
    if options.session.narration_enabled {
        match narrator.active_tool() {
            Some(tool) => info!(tool, "Audio description voice ready"),
            None => warn!("No speech tool found, audio description will be silent"),
        }
    }

    let (transport, chat_status) = match options.chat_endpoint.as_deref() {
        Some(endpoint) => match WsTransport::connect(endpoint) {
            Ok(transport) => (Some(transport), None),
            Err(e) => {
                warn!("Chat unavailable: {}", e);
                (None, Some(format!("Chat offline: {}", e)))
            }
        },
        None => (None, None),
    };

    let mut session = PlayerSession::new(film, narrator, transport, options.session.clone());
    if let Some(status) = chat_status {
        session.ui.set_status(status);
    }

    let result = play_loop(&mut guard.terminal, &mut session, options.tick);
    session.shutdown();
    result.map(|_| PlaybackResult::Finished)
}

fn play_loop(
    terminal: &mut Term,
    session: &mut PlayerSession<SystemNarrator, WsTransport>,
    tick: Duration,
) -> Result<()> {
    loop {
        session.tick();
        if session.ui.needs_render {
            terminal.draw(|frame| render::draw(frame, session))?;
            session.ui.needs_render = false;
        }

        if event::poll(tick)? {
            if handle_event(event::read()?, session) == InputResult::Quit {
                return Ok(());
            }
        }
    }
}

/// Load the film, showing a retry prompt on failure.
///
/// Returns `None` when the user quits from the error screen.
fn load_with_retry(terminal: &mut Term, source: &str) -> Result<Option<Film>> {
    let theme = current_theme();
    loop {
        terminal.draw(|frame| render::render_loading(frame, source, &theme))?;
        let error = match load_film(source) {
            Ok(film) => return Ok(Some(film)),
            Err(e) => e,
        };
        warn!(source, retryable = error.is_retryable(), "Film load failed: {}", error);

        let message = error.to_string();
        terminal.draw(|frame| render::render_load_error(frame, source, &message, &theme))?;
        loop {
            let Event::Key(key) = event::read()? else {
                continue;
            };
            if key.kind == KeyEventKind::Release {
                continue;
            }
            match key.code {
                KeyCode::Char('r') => break,
                KeyCode::Char('q') | KeyCode::Esc => return Ok(None),
                KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                    return Ok(None)
                }
                _ => {}
            }
        }
        info!(source, "Retrying film load");
    }
}
