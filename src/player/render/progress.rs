//! Progress bar with chapter markers.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::player::state::MarkerPosition;
use crate::theme::Theme;
use crate::timecode::format_seconds;

const PLAYHEAD: char = '⏺';
const MARKER: char = '◆';
const TRACK: char = '─';
const FILLED: char = '━';

/// Build the progress bar character array.
///
/// Creates a visual representation of the progress bar including
/// the playhead position and chapter marker indicators.
///
/// # Arguments
/// * `bar_width` - Width of the bar in characters
/// * `current_time` - Current playback time
/// * `total_duration` - Total duration of the film
/// * `markers` - Slice of marker positions
///
/// # Returns
/// A tuple of (bar_chars, filled_count) where bar_chars contains the visual
/// representation and filled_count is the number of filled positions.
pub fn build_progress_bar_chars(
    bar_width: usize,
    current_time: f64,
    total_duration: f64,
    markers: &[MarkerPosition],
) -> (Vec<char>, usize) {
    let progress = if total_duration > 0.0 {
        (current_time / total_duration).clamp(0.0, 1.0)
    } else {
        1.0
    };

    let filled = (bar_width as f64 * progress) as usize;

    let mut bar: Vec<char> = vec![TRACK; bar_width];

    if filled < bar_width {
        bar[filled] = PLAYHEAD;
    }

    for marker in markers {
        let marker_pos = if total_duration > 0.0 {
            ((marker.time / total_duration) * bar_width as f64) as usize
        } else {
            0
        };
        if marker_pos < bar_width && bar[marker_pos] != PLAYHEAD {
            bar[marker_pos] = MARKER;
        }
    }

    (bar, filled)
}

/// Style the bar characters into spans.
fn bar_spans(bar: &[char], filled: usize, theme: &Theme) -> Vec<Span<'static>> {
    bar.iter()
        .enumerate()
        .map(|(i, &c)| {
            if c == MARKER {
                Span::styled(c.to_string(), Style::default().fg(theme.marker))
            } else if i < filled {
                Span::styled(FILLED.to_string(), theme.accent_style())
            } else if i == filled {
                Span::styled(
                    c.to_string(),
                    theme.text_style().add_modifier(Modifier::BOLD),
                )
            } else {
                Span::styled(c.to_string(), theme.text_secondary_style())
            }
        })
        .collect()
}

/// Render the progress bar with chapter markers and a time readout.
pub fn render_progress_bar(
    frame: &mut Frame,
    area: Rect,
    current_time: f64,
    total_duration: f64,
    markers: &[MarkerPosition],
    theme: &Theme,
) {
    let time_display = format!(
        " {} / {}",
        format_seconds(current_time),
        format_seconds(total_duration)
    );
    let bar_width = (area.width as usize).saturating_sub(time_display.chars().count() + 1);
    let (bar, filled) = build_progress_bar_chars(bar_width, current_time, total_duration, markers);

    let mut spans = vec![Span::raw(" ")];
    spans.extend(bar_spans(&bar, filled, theme));
    spans.push(Span::styled(time_display, theme.text_style()));

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
