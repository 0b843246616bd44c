//! A loaded film being played.
//!
//! Ties the host, the surface, chat and UI state together. Everything here
//! is terminal-free so the whole player can be driven from tests.

use tracing::{debug, info};

use super::host::{JumpOrigin, PlaybackHost, TimeUpdate};
use super::playback::{collect_markers, collect_place_rows, PlaceRow};
use super::state::{MarkerPosition, Pane, UiState};
use super::surface::{ClockSurface, VideoSurface};
use crate::chat::{ChatRoom, ChatTransport};
use crate::film::{subtitle_tracks, Film, SubtitleTrack};
use crate::narration::{NarrationEvent, NarrationSettings, Narrator};
use crate::timecode::format_seconds;

/// Player options resolved from config and flags.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionOptions {
    pub language: String,
    pub subtitle: Option<String>,
    pub seek_step: f64,
    pub narration_enabled: bool,
    pub narration: NarrationSettings,
    pub author: String,
    pub start: f64,
    pub autoplay: bool,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            language: "fr".to_string(),
            subtitle: None,
            seek_step: 5.0,
            narration_enabled: false,
            narration: NarrationSettings::default(),
            author: crate::chat::DEFAULT_AUTHOR.to_string(),
            start: 0.0,
            autoplay: true,
        }
    }
}

/// Everything the player loop needs for one film.
pub struct PlayerSession<N: Narrator, T: ChatTransport> {
    pub host: PlaybackHost<N>,
    pub surface: ClockSurface,
    pub ui: UiState,
    pub chat: ChatRoom<T>,
    pub markers: Vec<MarkerPosition>,
    pub places: Vec<PlaceRow>,
    pub subtitles: Vec<SubtitleTrack>,
    pub language: String,
    pub seek_step: f64,
    /// Latest known timestamp in the film data. Only scales the progress
    /// bar; film documents carry no real duration.
    pub timeline_end: f64,
}

impl<N: Narrator, T: ChatTransport> PlayerSession<N, T> {
    pub fn new(film: Film, narrator: N, transport: Option<T>, options: SessionOptions) -> Self {
        let timeline_end = film.last_timestamp();
        let markers = collect_markers(&film, &options.language);
        let places = collect_place_rows(&film, &options.language);
        let preferred = options.subtitle.as_deref().unwrap_or(&options.language);
        let subtitles = subtitle_tracks(&film.subtitles, preferred);

        let mut ui = UiState::new();
        if options.subtitle.is_some() && !subtitles.is_empty() {
            ui.subtitle = Some(0);
        }

        let mut host = PlaybackHost::new(
            film,
            narrator,
            options.narration.clone(),
            options.narration_enabled,
        );
        if options.start > 0.0 {
            host.request_jump(options.start, JumpOrigin::Start);
        }

        // Length unknown: the surface runs unbounded
        let mut surface = ClockSurface::new(0.0);
        if options.autoplay {
            surface.play();
        }

        info!(
            title = %host.film().info.title,
            last_cue = %format_seconds(timeline_end),
            chapters = markers.len(),
            places = places.len(),
            "Player session started"
        );

        Self {
            host,
            surface,
            ui,
            chat: ChatRoom::new(options.author, transport),
            markers,
            places,
            subtitles,
            language: options.language,
            seek_step: options.seek_step,
            timeline_end,
        }
    }

    /// One loop iteration: apply seeks, publish the time, poll I/O.
    pub fn tick(&mut self) -> TimeUpdate {
        if let Some(request) = self.host.apply_pending_seek(&mut self.surface) {
            debug!(sequence = request.sequence, time = request.time, "Seek applied");
        }
        let update = self.host.on_time_update(self.surface.position());
        if let NarrationEvent::Spoke { .. } | NarrationEvent::Cancelled = update.narration {
            self.ui.needs_render = true;
        }
        if update.chapter_changed {
            if let Some(chapter) = update.active_chapter {
                self.ui.chapter_row = chapter;
            }
        }
        if self.host.poll_narrator() == NarrationEvent::Finished {
            self.ui.needs_render = true;
        }
        if self.chat.poll() > 0 {
            self.ui.chat_row = self.chat.feed.len().saturating_sub(1);
        }
        // Time moves every tick while playing
        self.ui.needs_render = true;
        update
    }

    /// Rows in the focused pane.
    pub fn pane_len(&self) -> usize {
        match self.ui.pane {
            Pane::Chapters => self.host.film().chapters.len(),
            Pane::Places => self.places.len(),
            Pane::Chat => self.chat.feed.len(),
        }
    }

    /// Jump to whatever is selected in the focused pane.
    pub fn jump_to_selection(&mut self) -> bool {
        let row = self.ui.selected_row();
        let request = match self.ui.pane {
            Pane::Chapters => self.host.jump_to_chapter(row),
            Pane::Places => self
                .places
                .get(row)
                .map(|r| (r.place, r.scene))
                .and_then(|(place, scene)| self.host.jump_to_place_scene(place, scene)),
            Pane::Chat => {
                let moment = self.chat.feed.messages().get(row).and_then(|m| m.moment);
                moment.map(|time| self.host.request_jump(time, JumpOrigin::ChatMoment(row)))
            }
        };
        match request {
            Some(request) => {
                self.ui
                    .set_status(format!("Jump to {}", format_seconds(request.time)));
                true
            }
            None => false,
        }
    }

    /// Seek relative to the current time.
    pub fn seek_by(&mut self, delta: f64) {
        let target = (self.host.current_time() + delta).max(0.0);
        self.host.request_jump(target, JumpOrigin::Keyboard);
    }

    pub fn seek_to_start(&mut self) {
        self.host.request_jump(0.0, JumpOrigin::Keyboard);
    }

    /// Progress bar scale: the film data's last timestamp, stretched once
    /// playback goes beyond it.
    pub fn timeline_length(&self) -> f64 {
        self.timeline_end.max(self.host.current_time())
    }

    /// Jump to the last timestamp the film data knows about.
    pub fn seek_to_end(&mut self) {
        let end = self.timeline_end;
        self.host.request_jump(end, JumpOrigin::Keyboard);
    }

    pub fn toggle_narration(&mut self) {
        self.host.toggle_narration();
        let text = if self.host.narration_enabled() {
            "Audio description on"
        } else {
            "Audio description off"
        };
        self.ui.set_status(text);
    }

    pub fn cycle_subtitle(&mut self) {
        self.ui.cycle_subtitle(self.subtitles.len());
        let text = match self.current_subtitle() {
            Some(track) => format!("Subtitles: {}", track.label),
            None => "Subtitles off".to_string(),
        };
        self.ui.set_status(text);
    }

    pub fn current_subtitle(&self) -> Option<&SubtitleTrack> {
        self.ui.subtitle.and_then(|i| self.subtitles.get(i))
    }

    /// Send the composed chat message.
    pub fn send_chat(&mut self) -> bool {
        let sent = self.chat.send_composed().is_some();
        if sent {
            self.ui.chat_row = self.chat.feed.len().saturating_sub(1);
            self.ui.needs_render = true;
        }
        sent
    }

    /// Stop speech and close chat.
    pub fn shutdown(&mut self) {
        self.host.shutdown();
        self.chat.close();
        info!("Player session ended");
    }
}
