//! Player UI state
//!
//! Holds everything the renderer and input handlers share that is not
//! playback time: focused pane, selections, modes and status text.

/// Result of processing an input event.
///
/// This enum is returned by input handlers to signal control flow
/// decisions to the main loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputResult {
    /// Continue normal playback/rendering
    Continue,
    /// Exit the player normally
    Quit,
}

/// Marker information for the progress bar.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerPosition {
    /// Chapter start in seconds
    pub time: f64,
    /// Chapter title
    pub label: String,
}

/// The list pane with keyboard focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Pane {
    #[default]
    Chapters,
    Places,
    Chat,
}

impl Pane {
    pub fn next(self) -> Self {
        match self {
            Self::Chapters => Self::Places,
            Self::Places => Self::Chat,
            Self::Chat => Self::Chapters,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Self::Chapters => "Chapters",
            Self::Places => "Places",
            Self::Chat => "Chat",
        }
    }
}

/// Composer field being edited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ComposeField {
    #[default]
    Body,
    Author,
    Hours,
    Minutes,
    Seconds,
}

impl ComposeField {
    pub fn next(self) -> Self {
        match self {
            Self::Body => Self::Author,
            Self::Author => Self::Hours,
            Self::Hours => Self::Minutes,
            Self::Minutes => Self::Seconds,
            Self::Seconds => Self::Body,
        }
    }

    /// Whether the field only takes digits.
    pub fn is_numeric(self) -> bool {
        matches!(self, Self::Hours | Self::Minutes | Self::Seconds)
    }
}

/// Input mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Normal,
    /// Help overlay
    Help,
    /// Writing a chat message
    Compose(ComposeField),
}

/// UI state for the player.
#[derive(Debug, Clone, Default)]
pub struct UiState {
    pub mode: Mode,
    pub pane: Pane,
    /// Selected row per pane
    pub chapter_row: usize,
    pub place_row: usize,
    pub chat_row: usize,
    /// Index into the subtitle tracks, `None` when subtitles are off
    pub subtitle: Option<usize>,
    /// Transient status message for the footer
    pub status: Option<String>,
    /// True when screen needs to be redrawn
    pub needs_render: bool,
}

impl UiState {
    pub fn new() -> Self {
        Self {
            needs_render: true,
            ..Self::default()
        }
    }

    /// Toggle help overlay visibility.
    pub fn toggle_help(&mut self) {
        self.mode = if self.mode == Mode::Help {
            Mode::Normal
        } else {
            Mode::Help
        };
        self.needs_render = true;
    }

    pub fn focus_next_pane(&mut self) {
        self.pane = self.pane.next();
        self.needs_render = true;
    }

    /// Selected row of the focused pane.
    pub fn selected_row(&self) -> usize {
        match self.pane {
            Pane::Chapters => self.chapter_row,
            Pane::Places => self.place_row,
            Pane::Chat => self.chat_row,
        }
    }

    /// Move the selection of the focused pane by `delta`, within `len` rows.
    pub fn move_selection(&mut self, delta: isize, len: usize) {
        let row = match self.pane {
            Pane::Chapters => &mut self.chapter_row,
            Pane::Places => &mut self.place_row,
            Pane::Chat => &mut self.chat_row,
        };
        *row = if len == 0 {
            0
        } else {
            row.saturating_add_signed(delta).min(len - 1)
        };
        self.needs_render = true;
    }

    /// Cycle subtitles: off, track 0, track 1, ..., off.
    pub fn cycle_subtitle(&mut self, tracks: usize) {
        self.subtitle = match self.subtitle {
            _ if tracks == 0 => None,
            None => Some(0),
            Some(i) if i + 1 < tracks => Some(i + 1),
            Some(_) => None,
        };
        self.needs_render = true;
    }

    pub fn set_status(&mut self, text: impl Into<String>) {
        self.status = Some(text.into());
        self.needs_render = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_state_has_correct_defaults() {
        let state = UiState::new();
        assert_eq!(state.mode, Mode::Normal);
        assert_eq!(state.pane, Pane::Chapters);
        assert_eq!(state.subtitle, None);
        assert!(state.needs_render);
    }

    #[test]
    fn pane_cycle_wraps() {
        let mut state = UiState::new();
        state.focus_next_pane();
        state.focus_next_pane();
        assert_eq!(state.pane, Pane::Chat);
        state.focus_next_pane();
        assert_eq!(state.pane, Pane::Chapters);
    }

    #[test]
    fn selection_is_clamped() {
        let mut state = UiState::new();
        state.move_selection(-1, 3);
        assert_eq!(state.chapter_row, 0);
        state.move_selection(10, 3);
        assert_eq!(state.chapter_row, 2);
        state.move_selection(1, 0);
        assert_eq!(state.chapter_row, 0);
    }

    #[test]
    fn selection_is_per_pane() {
        let mut state = UiState::new();
        state.move_selection(1, 5);
        state.focus_next_pane();
        assert_eq!(state.selected_row(), 0);
        assert_eq!(state.chapter_row, 1);
    }

    #[test]
    fn subtitle_cycle_goes_through_off() {
        let mut state = UiState::new();
        state.cycle_subtitle(2);
        assert_eq!(state.subtitle, Some(0));
        state.cycle_subtitle(2);
        assert_eq!(state.subtitle, Some(1));
        state.cycle_subtitle(2);
        assert_eq!(state.subtitle, None);
        state.cycle_subtitle(0);
        assert_eq!(state.subtitle, None);
    }

    #[test]
    fn help_toggles() {
        let mut state = UiState::new();
        state.toggle_help();
        assert_eq!(state.mode, Mode::Help);
        state.toggle_help();
        assert_eq!(state.mode, Mode::Normal);
    }

    #[test]
    fn compose_fields_cycle() {
        let mut field = ComposeField::Body;
        for _ in 0..5 {
            field = field.next();
        }
        assert_eq!(field, ComposeField::Body);
        assert!(ComposeField::Minutes.is_numeric());
        assert!(!ComposeField::Author.is_numeric());
    }
}
