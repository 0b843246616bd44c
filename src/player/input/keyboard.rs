//! Keyboard input handling for the player.
//!
//! Handles playback controls, pane navigation, jumps, narration and
//! subtitle toggles, and the chat composer.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::chat::ChatTransport;
use crate::narration::Narrator;
use crate::player::session::PlayerSession;
use crate::player::state::{ComposeField, InputResult, Mode};
use crate::player::surface::VideoSurface;

/// Handle a keyboard event.
///
/// This is the main keyboard input handler that processes all key events
/// and updates state or returns control flow signals.
pub fn handle_key_event<N: Narrator, T: ChatTransport>(
    key: KeyEvent,
    session: &mut PlayerSession<N, T>,
) -> InputResult {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return InputResult::Quit;
    }

    match session.ui.mode {
        // If help is showing, any key closes it
        Mode::Help => {
            session.ui.toggle_help();
            InputResult::Continue
        }
        Mode::Compose(field) => {
            handle_compose_key(key, field, session);
            InputResult::Continue
        }
        Mode::Normal => handle_normal_key(key, session),
    }
}

fn handle_normal_key<N: Narrator, T: ChatTransport>(
    key: KeyEvent,
    session: &mut PlayerSession<N, T>,
) -> InputResult {
    match key.code {
        // === Quit ===
        KeyCode::Char('q') | KeyCode::Esc => return InputResult::Quit,

        // === Mode toggles ===
        KeyCode::Char('?') => session.ui.toggle_help(),
        KeyCode::Char('i') => {
            session.ui.mode = Mode::Compose(ComposeField::Body);
            session.ui.needs_render = true;
        }

        // === Playback controls ===
        KeyCode::Char(' ') => {
            if session.surface.is_paused() {
                session.surface.play();
            } else {
                session.surface.pause();
            }
            session.ui.needs_render = true;
        }
        KeyCode::Char('+') | KeyCode::Char('=') => {
            session.surface.speed_up();
            session.ui.needs_render = true;
        }
        KeyCode::Char('-') | KeyCode::Char('_') => {
            session.surface.speed_down();
            session.ui.needs_render = true;
        }
        KeyCode::Char('a') => session.toggle_narration(),
        KeyCode::Char('s') => session.cycle_subtitle(),

        // === Seeking ===
        KeyCode::Left => session.seek_by(-session.seek_step),
        KeyCode::Right => session.seek_by(session.seek_step),
        KeyCode::Home => session.seek_to_start(),
        KeyCode::End => session.seek_to_end(),

        // === Chapter navigation ===
        KeyCode::Char('n') => {
            session.host.jump_to_next_chapter();
        }
        KeyCode::Char('p') => {
            session.host.jump_to_previous_chapter();
        }

        // === Panes ===
        KeyCode::Tab => session.ui.focus_next_pane(),
        KeyCode::Up | KeyCode::Char('k') => {
            let len = session.pane_len();
            session.ui.move_selection(-1, len);
        }
        KeyCode::Down | KeyCode::Char('j') => {
            let len = session.pane_len();
            session.ui.move_selection(1, len);
        }
        KeyCode::PageUp => {
            let len = session.pane_len();
            session.ui.move_selection(-10, len);
        }
        KeyCode::PageDown => {
            let len = session.pane_len();
            session.ui.move_selection(10, len);
        }
        KeyCode::Enter => {
            if !session.jump_to_selection() {
                session.ui.set_status("Nothing to jump to");
            }
        }

        _ => {}
    }
    InputResult::Continue
}

/// Keys while writing a chat message.
fn handle_compose_key<N: Narrator, T: ChatTransport>(
    key: KeyEvent,
    field: ComposeField,
    session: &mut PlayerSession<N, T>,
) {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Esc => session.ui.mode = Mode::Normal,
        KeyCode::Enter => {
            if session.send_chat() {
                session.ui.mode = Mode::Normal;
                session.ui.set_status("Message sent");
            }
        }
        KeyCode::Tab => session.ui.mode = Mode::Compose(field.next()),
        KeyCode::Char('t') if ctrl => {
            let now = session.host.current_time();
            session.chat.composer.toggle_moment(now);
        }
        KeyCode::Backspace => {
            compose_field(session, field).pop();
        }
        KeyCode::Char(c) if !ctrl => {
            if !field.is_numeric() || c.is_ascii_digit() {
                let text = compose_field(session, field);
                if !field.is_numeric() || text.len() < 3 {
                    text.push(c);
                }
            }
        }
        _ => {}
    }
    session.ui.needs_render = true;
}

fn compose_field<N: Narrator, T: ChatTransport>(
    session: &mut PlayerSession<N, T>,
    field: ComposeField,
) -> &mut String {
    let composer = &mut session.chat.composer;
    match field {
        ComposeField::Body => &mut composer.body,
        ComposeField::Author => &mut composer.author,
        ComposeField::Hours => &mut composer.hours,
        ComposeField::Minutes => &mut composer.minutes,
        ComposeField::Seconds => &mut composer.seconds,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::{ChatError, ChatMessage, ChatPayload};
    use crate::cue::Timestamp;
    use crate::film::{ChapterEntry, Film};
    use crate::narration::{SpeechError, Utterance};
    use crate::player::session::SessionOptions;
    use crate::player::state::Pane;

    #[derive(Default)]
    struct FakeNarrator {
        cancels: usize,
    }

    impl Narrator for FakeNarrator {
        fn is_available(&self) -> bool {
            true
        }
        fn speak(&mut self, _utterance: &Utterance) -> Result<(), SpeechError> {
            Ok(())
        }
        fn cancel(&mut self) {
            self.cancels += 1;
        }
        fn poll_finished(&mut self) -> bool {
            false
        }
    }

    #[derive(Default)]
    struct SentLog(Vec<ChatMessage>);

    impl ChatTransport for SentLog {
        fn send(&mut self, message: &ChatMessage) -> Result<(), ChatError> {
            self.0.push(message.clone());
            Ok(())
        }
        fn try_recv(&mut self) -> Option<ChatPayload> {
            None
        }
        fn close(&mut self) {}
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    fn session() -> PlayerSession<FakeNarrator, SentLog> {
        let chapter = |secs: f64| ChapterEntry {
            timestamp: Timestamp::from(secs),
            ..ChapterEntry::default()
        };
        let film = Film {
            chapters: vec![chapter(0.0), chapter(60.0), chapter(120.0)],
            ..Film::default()
        };
        PlayerSession::new(
            film,
            FakeNarrator::default(),
            Some(SentLog::default()),
            SessionOptions {
                autoplay: false,
                ..SessionOptions::default()
            },
        )
    }

    fn type_text(session: &mut PlayerSession<FakeNarrator, SentLog>, text: &str) {
        for c in text.chars() {
            handle_key_event(key(KeyCode::Char(c)), session);
        }
    }

    #[test]
    fn q_and_ctrl_c_quit() {
        let mut s = session();
        assert_eq!(handle_key_event(key(KeyCode::Char('q')), &mut s), InputResult::Quit);
        assert_eq!(handle_key_event(ctrl('c'), &mut s), InputResult::Quit);
    }

    #[test]
    fn space_toggles_pause() {
        let mut s = session();
        handle_key_event(key(KeyCode::Char(' ')), &mut s);
        assert!(!s.surface.is_paused());
        handle_key_event(key(KeyCode::Char(' ')), &mut s);
        assert!(s.surface.is_paused());
    }

    #[test]
    fn help_closes_on_any_key() {
        let mut s = session();
        handle_key_event(key(KeyCode::Char('?')), &mut s);
        assert_eq!(s.ui.mode, Mode::Help);
        assert_eq!(handle_key_event(key(KeyCode::Char('q')), &mut s), InputResult::Continue);
        assert_eq!(s.ui.mode, Mode::Normal);
    }

    #[test]
    fn arrows_seek_by_step() {
        let mut s = session();
        handle_key_event(key(KeyCode::Right), &mut s);
        handle_key_event(key(KeyCode::Right), &mut s);
        s.tick();
        // Both requests were relative to the same current time
        assert_eq!(s.host.current_time(), 5.0);
        handle_key_event(key(KeyCode::Left), &mut s);
        s.tick();
        assert_eq!(s.host.current_time(), 0.0);
    }

    #[test]
    fn n_jumps_to_next_chapter() {
        let mut s = session();
        handle_key_event(key(KeyCode::Char('n')), &mut s);
        s.tick();
        assert_eq!(s.host.current_time(), 60.0);
        assert_eq!(s.host.active_chapter(), Some(1));
    }

    #[test]
    fn enter_jumps_to_selected_chapter() {
        let mut s = session();
        handle_key_event(key(KeyCode::Down), &mut s);
        handle_key_event(key(KeyCode::Down), &mut s);
        handle_key_event(key(KeyCode::Enter), &mut s);
        s.tick();
        assert_eq!(s.host.current_time(), 120.0);
    }

    #[test]
    fn a_toggles_narration() {
        let mut s = session();
        handle_key_event(key(KeyCode::Char('a')), &mut s);
        assert!(s.host.narration_enabled());
        handle_key_event(key(KeyCode::Char('a')), &mut s);
        assert!(!s.host.narration_enabled());
    }

    #[test]
    fn compose_and_send_with_moment() {
        let mut s = session();
        s.host.request_jump(75.0, crate::player::host::JumpOrigin::Keyboard);
        s.tick();

        handle_key_event(key(KeyCode::Char('i')), &mut s);
        type_text(&mut s, "look here");
        handle_key_event(ctrl('t'), &mut s);
        handle_key_event(key(KeyCode::Enter), &mut s);

        assert_eq!(s.ui.mode, Mode::Normal);
        let message = &s.chat.feed.messages()[0];
        assert_eq!(message.message, "look here");
        assert_eq!(message.moment, Some(75.0));
    }

    #[test]
    fn numeric_fields_accept_only_digits() {
        let mut s = session();
        handle_key_event(key(KeyCode::Char('i')), &mut s);
        handle_key_event(key(KeyCode::Tab), &mut s);
        handle_key_event(key(KeyCode::Tab), &mut s);
        assert_eq!(s.ui.mode, Mode::Compose(ComposeField::Hours));
        handle_key_event(key(KeyCode::Backspace), &mut s);
        handle_key_event(key(KeyCode::Backspace), &mut s);
        type_text(&mut s, "x1");
        assert_eq!(s.chat.composer.hours, "1");
    }

    #[test]
    fn esc_leaves_compose_without_sending() {
        let mut s = session();
        handle_key_event(key(KeyCode::Char('i')), &mut s);
        type_text(&mut s, "draft");
        handle_key_event(key(KeyCode::Esc), &mut s);
        assert_eq!(s.ui.mode, Mode::Normal);
        assert!(s.chat.feed.is_empty());
        assert_eq!(s.chat.composer.body, "draft");
    }

    #[test]
    fn tab_switches_panes() {
        let mut s = session();
        handle_key_event(key(KeyCode::Tab), &mut s);
        assert_eq!(s.ui.pane, Pane::Places);
    }
}
