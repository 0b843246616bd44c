//! Rendering components for the player.
//!
//! Layout, top to bottom: title bar, caption, progress bar, panes, status
//! line and key hints. Help is an overlay.

mod help;
mod panes;
mod progress;
mod status;

pub use help::{build_help_text, render_help_modal, HELP_SECTIONS};
pub use panes::{chapter_line, chat_line, place_line};
pub use progress::{build_progress_bar_chars, render_progress_bar};
pub use status::{render_load_error, render_loading, title_status, TitleInfo};

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    Frame,
};

use crate::chat::ChatTransport;
use crate::narration::Narrator;
use crate::player::session::PlayerSession;
use crate::player::state::{Mode, Pane};
use crate::player::surface::VideoSurface;
use crate::theme::current_theme;

/// Create a centered layout with the given constraints.
///
/// Returns the center area that can be used for content.
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical_layout[1])[1]
}

/// Split the frame into the player's rows.
///
/// Returns `[title, caption, progress, panes, status, keys]`.
pub fn player_layout(area: Rect) -> [Rect; 6] {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(2),
            Constraint::Length(1),
            Constraint::Min(5),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(area);
    [chunks[0], chunks[1], chunks[2], chunks[3], chunks[4], chunks[5]]
}

/// Draw one full frame of the player.
pub fn draw<N: Narrator, T: ChatTransport>(frame: &mut Frame, session: &PlayerSession<N, T>) {
    let theme = current_theme();
    let area = frame.area();
    let [title, caption, progress, panes_area, status, keys] = player_layout(area);
    let snapshot = session.host.snapshot();

    status::render_title_bar(
        frame,
        title,
        &TitleInfo {
            title: &session.host.film().info.title,
            paused: session.surface.is_paused(),
            speed: session.surface.speed(),
            narration: snapshot.narration_enabled,
            subtitle: session.current_subtitle(),
        },
        &theme,
    );
    status::render_caption(frame, caption, snapshot.caption.as_deref(), &theme);
    render_progress_bar(
        frame,
        progress,
        snapshot.current_time,
        session.timeline_length(),
        &session.markers,
        &theme,
    );

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(30),
            Constraint::Percentage(35),
            Constraint::Percentage(35),
        ])
        .split(panes_area);

    let ui = &session.ui;
    panes::render_chapters(
        frame,
        columns[0],
        &session.host.film().chapters,
        snapshot.active_chapter,
        ui.chapter_row,
        ui.pane == Pane::Chapters,
        &session.language,
        &theme,
    );
    panes::render_places(
        frame,
        columns[1],
        &session.places,
        ui.place_row,
        ui.pane == Pane::Places,
        &theme,
    );
    panes::render_chat(
        frame,
        columns[2],
        session.chat.feed.messages(),
        &session.chat.composer,
        ui.mode,
        ui.chat_row,
        ui.pane == Pane::Chat,
        session.chat.is_connected(),
        &theme,
    );

    status::render_footer(frame, status, keys, ui.status.as_deref(), ui.mode, &theme);

    if ui.mode == Mode::Help {
        render_help_modal(frame, area, &theme);
    }
}
