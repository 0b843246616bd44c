//! Title bar, caption line, footer and the load-error screen.

use ratatui::{
    layout::{Alignment, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::film::SubtitleTrack;
use crate::player::state::Mode;
use crate::theme::Theme;

use super::centered_rect;

/// Values shown in the title bar.
#[derive(Debug, Clone, PartialEq)]
pub struct TitleInfo<'a> {
    pub title: &'a str,
    pub paused: bool,
    pub speed: f64,
    pub narration: bool,
    pub subtitle: Option<&'a SubtitleTrack>,
}

/// Longest prefix of `text` that fits in `max` terminal columns.
pub fn truncate_to_width(text: &str, max: usize) -> &str {
    let mut used = 0;
    for (idx, ch) in text.char_indices() {
        used += ch.width().unwrap_or(0);
        if used > max {
            return &text[..idx];
        }
    }
    text
}

/// Build the right-hand status text of the title bar.
pub fn title_status(info: &TitleInfo<'_>) -> String {
    let state = if info.paused { "⏸ paused" } else { "▶ playing" };
    let subtitle = info
        .subtitle
        .map(|track| track.label.as_str())
        .unwrap_or("off");
    format!(
        "{}  {:.2}x  AD {}  CC {}",
        state,
        info.speed,
        if info.narration { "on" } else { "off" },
        subtitle
    )
}

pub fn render_title_bar(frame: &mut Frame, area: Rect, info: &TitleInfo<'_>, theme: &Theme) {
    let status = title_status(info);
    let title_width = (area.width as usize).saturating_sub(status.width() + 2);
    let title = truncate_to_width(info.title, title_width);
    let padding = title_width.saturating_sub(title.width());

    let line = Line::from(vec![
        Span::styled(format!(" {}", title), theme.accent_bold_style()),
        Span::raw(" ".repeat(padding)),
        Span::styled(status, theme.text_style()),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

/// Narration caption, or a dim placeholder.
pub fn render_caption(frame: &mut Frame, area: Rect, caption: Option<&str>, theme: &Theme) {
    let line = match caption {
        Some(text) => Line::from(vec![
            Span::styled(" AD ", theme.accent_bold_style().add_modifier(Modifier::REVERSED)),
            Span::raw(" "),
            Span::styled(text.to_string(), theme.caption_style()),
        ]),
        None => Line::from(""),
    };
    frame.render_widget(Paragraph::new(line).wrap(Wrap { trim: true }), area);
}

/// Key hints for the footer in each mode.
pub fn footer_keys(mode: Mode) -> &'static [(&'static str, &'static str)] {
    match mode {
        Mode::Normal => &[
            ("space", "play/pause"),
            ("←/→", "seek"),
            ("n/p", "chapter"),
            ("tab", "pane"),
            ("enter", "jump"),
            ("a", "narration"),
            ("s", "subtitles"),
            ("i", "chat"),
            ("?", "help"),
            ("q", "quit"),
        ],
        Mode::Compose(_) => &[
            ("enter", "send"),
            ("tab", "next field"),
            ("ctrl+t", "attach moment"),
            ("esc", "cancel"),
        ],
        Mode::Help => &[("any key", "close")],
    }
}

/// Build styled spans for footer keybinding hints.
///
/// Each key is highlighted with the theme accent color, descriptions use
/// the secondary text color, and entries are separated by " | ".
fn build_footer_spans(keys: &[(&str, &str)], theme: &Theme) -> Vec<Span<'static>> {
    let mut spans = Vec::with_capacity(keys.len() * 3);
    for (i, (key, desc)) in keys.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" | ", theme.text_secondary_style()));
        }
        spans.push(Span::styled(key.to_string(), theme.accent_style()));
        spans.push(Span::styled(
            format!(": {}", desc),
            theme.text_secondary_style(),
        ));
    }
    spans
}

/// Render the status line and the centered key hints.
pub fn render_footer(
    frame: &mut Frame,
    status_area: Rect,
    keys_area: Rect,
    status: Option<&str>,
    mode: Mode,
    theme: &Theme,
) {
    if let Some(status) = status {
        frame.render_widget(
            Paragraph::new(format!(" {}", status)).style(theme.text_secondary_style()),
            status_area,
        );
    }
    let footer = Paragraph::new(Line::from(build_footer_spans(footer_keys(mode), theme)))
        .alignment(Alignment::Center);
    frame.render_widget(footer, keys_area);
}

/// Full-screen error shown when the film could not be loaded.
pub fn render_load_error(frame: &mut Frame, source: &str, message: &str, theme: &Theme) {
    let area = centered_rect(70, 40, frame.area());
    frame.render_widget(Clear, area);

    let lines = vec![
        Line::from(Span::styled(
            "Could not load the film",
            theme.error_style().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(source.to_string(), theme.text_secondary_style())),
        Line::from(""),
        Line::from(Span::styled(message.to_string(), theme.text_style())),
        Line::from(""),
        Line::from(build_footer_spans(&[("r", "retry"), ("q", "quit")], theme)),
    ];
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.error_style())
        .title(" Error ");
    frame.render_widget(
        Paragraph::new(lines)
            .block(block)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: false }),
        area,
    );
}

/// Centered "loading" notice.
pub fn render_loading(frame: &mut Frame, source: &str, theme: &Theme) {
    let area = centered_rect(60, 20, frame.area());
    let text = Paragraph::new(vec![
        Line::from(Span::styled("Loading film…", theme.accent_bold_style())),
        Line::from(Span::styled(source.to_string(), theme.text_secondary_style())),
    ])
    .alignment(Alignment::Center);
    frame.render_widget(text, area);
}
