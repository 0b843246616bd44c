//! Help overlay for the player.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::theme::Theme;

/// Help sections: heading, then (key, description) rows.
pub const HELP_SECTIONS: &[(&str, &[(&str, &str)])] = &[
    (
        "Playback",
        &[
            ("Space", "Play / pause"),
            ("←/→", "Seek back / forward"),
            ("Home/End", "Go to start / end"),
            ("+/-", "Speed up / down"),
        ],
    ),
    (
        "Navigation",
        &[
            ("n/p", "Next / previous chapter"),
            ("Tab", "Switch pane"),
            ("↑/↓", "Move selection"),
            ("Enter", "Jump to selection"),
        ],
    ),
    (
        "Accessibility",
        &[
            ("a", "Audio description on / off"),
            ("s", "Cycle subtitles"),
        ],
    ),
    (
        "Chat",
        &[
            ("i", "Write a message"),
            ("Ctrl+T", "Attach the current moment"),
            ("Enter / Esc", "Send / cancel"),
        ],
    ),
    ("General", &[("?", "Show this help"), ("q", "Quit")]),
];

/// Build the help text lines.
pub fn build_help_text(theme: &Theme) -> Vec<Line<'static>> {
    let mut lines = vec![
        Line::from(Span::styled(
            "Player Keyboard Shortcuts",
            theme.accent_style().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];
    for (heading, keys) in HELP_SECTIONS {
        lines.push(Line::from(Span::styled(
            heading.to_string(),
            Style::default().add_modifier(Modifier::BOLD),
        )));
        for (key, desc) in keys.iter() {
            lines.push(Line::from(vec![
                Span::styled(format!("  {:<13}", key), theme.accent_style()),
                Span::raw(desc.to_string()),
            ]));
        }
        lines.push(Line::from(""));
    }
    lines.push(Line::from(Span::styled(
        "Press any key to close",
        theme.text_secondary_style(),
    )));
    lines
}

/// Render the help modal centered over `area`.
pub fn render_help_modal(frame: &mut Frame, area: Rect, theme: &Theme) {
    let lines = build_help_text(theme);
    let modal_width = 50.min(area.width.saturating_sub(4));
    let modal_height = (lines.len() as u16 + 2).min(area.height.saturating_sub(2));
    let x = area.x + (area.width.saturating_sub(modal_width)) / 2;
    let y = area.y + (area.height.saturating_sub(modal_height)) / 2;
    let modal_area = Rect::new(x, y, modal_width, modal_height);

    frame.render_widget(Clear, modal_area);

    let help = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.accent_style())
                .title(" Help "),
        )
        .wrap(Wrap { trim: false });

    frame.render_widget(help, modal_area);
}
