//! Chapters, Places and Chat panes.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

use crate::chat::{ChatMessage, Composer};
use crate::film::ChapterEntry;
use crate::player::playback::PlaceRow;
use crate::player::state::{ComposeField, Mode, Pane};
use crate::theme::Theme;
use crate::timecode::{format_epoch_label, format_seconds};

/// Text of one chapter row.
pub fn chapter_line(index: usize, chapter: &ChapterEntry, lang: &str) -> String {
    format!(
        "{:>2}. {}  {}",
        index + 1,
        format_seconds(chapter.timestamp.seconds()),
        chapter.title_in(lang)
    )
}

/// Text of one place scene row.
pub fn place_line(row: &PlaceRow) -> String {
    let (lat, lng) = row.coordinates;
    let mut line = format!("{}  {}", format_seconds(row.time), row.place_title);
    if !row.scene_label.is_empty() {
        line.push_str(" · ");
        line.push_str(&row.scene_label);
    }
    line.push_str(&format!("  ({:.4}, {:.4})", lat, lng));
    line
}

/// Text of one chat row.
pub fn chat_line(message: &ChatMessage) -> String {
    let mut line = format!(
        "[{}] {}: {}",
        format_epoch_label(&message.when),
        message.name,
        message.message
    );
    if let Some(moment) = message.moment {
        line.push_str(&format!("  ⏵ {}", format_seconds(moment)));
    }
    line
}

fn pane_block(pane: Pane, focused: bool, theme: &Theme) -> Block<'static> {
    let border = if focused {
        theme.accent_style()
    } else {
        theme.text_secondary_style()
    };
    Block::default()
        .borders(Borders::ALL)
        .border_style(border)
        .title(format!(" {} ", pane.title()))
}

fn render_list(
    frame: &mut Frame,
    area: Rect,
    items: Vec<ListItem<'static>>,
    block: Block<'static>,
    selected: Option<usize>,
    theme: &Theme,
) {
    let list = List::new(items)
        .block(block)
        .style(theme.text_style())
        .highlight_style(theme.selected_style());
    let mut state = ListState::default().with_selected(selected);
    frame.render_stateful_widget(list, area, &mut state);
}

/// Render the chapter list, marking the active chapter.
#[allow(clippy::too_many_arguments)]
pub fn render_chapters(
    frame: &mut Frame,
    area: Rect,
    chapters: &[ChapterEntry],
    active: Option<usize>,
    selected: usize,
    focused: bool,
    lang: &str,
    theme: &Theme,
) {
    let items = chapters
        .iter()
        .enumerate()
        .map(|(i, chapter)| {
            let text = chapter_line(i, chapter, lang);
            if Some(i) == active {
                ListItem::new(Line::from(vec![
                    Span::styled("▶ ", theme.accent_bold_style()),
                    Span::styled(text, theme.text_style().add_modifier(Modifier::BOLD)),
                ]))
            } else {
                ListItem::new(format!("  {}", text))
            }
        })
        .collect();
    let selected = focused.then_some(selected).filter(|_| !chapters.is_empty());
    render_list(
        frame,
        area,
        items,
        pane_block(Pane::Chapters, focused, theme),
        selected,
        theme,
    );
}

/// Render place scenes.
pub fn render_places(
    frame: &mut Frame,
    area: Rect,
    rows: &[PlaceRow],
    selected: usize,
    focused: bool,
    theme: &Theme,
) {
    let items = rows.iter().map(|row| ListItem::new(place_line(row))).collect();
    let selected = focused.then_some(selected).filter(|_| !rows.is_empty());
    render_list(
        frame,
        area,
        items,
        pane_block(Pane::Places, focused, theme),
        selected,
        theme,
    );
}

/// Render the chat feed, with the composer when writing.
#[allow(clippy::too_many_arguments)]
pub fn render_chat(
    frame: &mut Frame,
    area: Rect,
    messages: &[ChatMessage],
    composer: &Composer,
    mode: Mode,
    selected: usize,
    focused: bool,
    connected: bool,
    theme: &Theme,
) {
    let composing = matches!(mode, Mode::Compose(_));
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(if composing {
            [Constraint::Min(3), Constraint::Length(4)]
        } else {
            [Constraint::Min(3), Constraint::Length(0)]
        })
        .split(area);

    let mut block = pane_block(Pane::Chat, focused || composing, theme);
    if !connected {
        block = block.title_bottom(Line::from(" offline ").style(theme.text_secondary_style()));
    }

    let items = messages
        .iter()
        .map(|message| {
            let style = if message.moment.is_some() {
                theme.text_style()
            } else {
                theme.text_secondary_style()
            };
            ListItem::new(Line::styled(chat_line(message), style))
        })
        .collect();
    let selected = focused.then_some(selected).filter(|_| !messages.is_empty());
    render_list(frame, chunks[0], items, block, selected, theme);

    if let Mode::Compose(field) = mode {
        render_composer(frame, chunks[1], composer, field, theme);
    }
}

fn field_span(text: &str, active: bool, theme: &Theme) -> Span<'static> {
    let style = if active {
        theme.accent_style().add_modifier(Modifier::UNDERLINED)
    } else {
        theme.text_style()
    };
    Span::styled(text.to_string(), style)
}

fn render_composer(
    frame: &mut Frame,
    area: Rect,
    composer: &Composer,
    field: ComposeField,
    theme: &Theme,
) {
    let moment_style = if composer.attach_moment() {
        theme.accent_style()
    } else {
        theme.text_secondary_style()
    };
    let lines = vec![
        Line::from(vec![
            field_span(&composer.author, field == ComposeField::Author, theme),
            Span::raw(": "),
            field_span(&composer.body, field == ComposeField::Body, theme),
            Span::styled("▏", theme.accent_style()),
        ]),
        Line::from(vec![
            Span::styled(
                if composer.attach_moment() { "[x] at " } else { "[ ] at " },
                moment_style,
            ),
            field_span(&composer.hours, field == ComposeField::Hours, theme),
            Span::styled(":", moment_style),
            field_span(&composer.minutes, field == ComposeField::Minutes, theme),
            Span::styled(":", moment_style),
            field_span(&composer.seconds, field == ComposeField::Seconds, theme),
        ]),
    ];
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.accent))
        .title(" Message ");
    frame.render_widget(
        Paragraph::new(lines).block(block).wrap(Wrap { trim: false }),
        area,
    );
}
