//! Input handling for the player.
//!
//! Dispatches terminal events to the keyboard handler and returns control
//! flow signals.

mod keyboard;

pub use keyboard::handle_key_event;

use crossterm::event::{Event, KeyEventKind};

use crate::chat::ChatTransport;
use crate::narration::Narrator;
use crate::player::session::PlayerSession;
use crate::player::state::InputResult;

/// Handle any input event, dispatching to the appropriate handler.
///
/// # Returns
/// `InputResult` indicating whether to continue or quit
pub fn handle_event<N: Narrator, T: ChatTransport>(
    event: Event,
    session: &mut PlayerSession<N, T>,
) -> InputResult {
    match event {
        Event::Key(key) if key.kind != KeyEventKind::Release => handle_key_event(key, session),
        Event::Resize(_, _) => {
            session.ui.needs_render = true;
            InputResult::Continue
        }
        _ => InputResult::Continue, // Ignore focus events, etc.
    }
}
