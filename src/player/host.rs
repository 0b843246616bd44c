//! Playback host: the single owner of playback time.
//!
//! Chapters, place scenes and chat moments ask for jumps through
//! [`PlaybackHost::request_jump`]. The surface applies the pending request
//! and the host acknowledges it by sequence number, so a request made while
//! an older one is being applied is never lost.

use std::fmt;

use tracing::debug;

use super::surface::VideoSurface;
use crate::cue::{find_range_index, next_index, previous_index};
use crate::film::Film;
use crate::narration::{NarrationController, NarrationEvent, NarrationSettings, Narrator};

/// Seconds into a chapter during which "previous" goes to the chapter before.
const PREVIOUS_CHAPTER_GRACE: f64 = 3.0;

/// A version-stamped jump request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeekRequest {
    pub sequence: u64,
    pub time: f64,
}

/// Single-slot, last-write-wins seek mailbox.
#[derive(Debug, Default)]
pub struct SeekMailbox {
    next_sequence: u64,
    pending: Option<SeekRequest>,
}

impl SeekMailbox {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace any pending request with a new one.
    pub fn request(&mut self, time: f64) -> SeekRequest {
        self.next_sequence += 1;
        let request = SeekRequest {
            sequence: self.next_sequence,
            time,
        };
        self.pending = Some(request);
        request
    }

    /// The pending request, if any.
    pub fn peek(&self) -> Option<SeekRequest> {
        self.pending
    }

    /// Clear the slot if it still holds `sequence`.
    ///
    /// Returns false when a newer request replaced it; that one stays.
    pub fn acknowledge(&mut self, sequence: u64) -> bool {
        match self.pending {
            Some(request) if request.sequence == sequence => {
                self.pending = None;
                true
            }
            _ => false,
        }
    }

    /// Take the pending request, clearing the slot.
    pub fn take(&mut self) -> Option<SeekRequest> {
        self.pending.take()
    }
}

/// Where a jump came from, for logs and status text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JumpOrigin {
    Chapter(usize),
    PlaceScene { place: usize, scene: usize },
    ChatMoment(usize),
    Keyboard,
    Start,
}

impl fmt::Display for JumpOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Chapter(i) => write!(f, "chapter {}", i + 1),
            Self::PlaceScene { place, scene } => write!(f, "place {} scene {}", place + 1, scene + 1),
            Self::ChatMoment(i) => write!(f, "chat message {}", i + 1),
            Self::Keyboard => write!(f, "keyboard"),
            Self::Start => write!(f, "start position"),
        }
    }
}

/// Read-only view handed to renderers.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaybackSnapshot {
    pub current_time: f64,
    pub active_chapter: Option<usize>,
    pub narration_enabled: bool,
    pub caption: Option<String>,
    pub pending_seek: Option<SeekRequest>,
}

/// Result of one time update.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeUpdate {
    pub active_chapter: Option<usize>,
    pub chapter_changed: bool,
    pub narration: NarrationEvent,
}

/// Owns the current time, the seek slot and narration.
pub struct PlaybackHost<N: Narrator> {
    film: Film,
    narrator: N,
    narration: NarrationController,
    narration_enabled: bool,
    seek: SeekMailbox,
    current_time: f64,
    active_chapter: Option<usize>,
}

impl<N: Narrator> PlaybackHost<N> {
    pub fn new(film: Film, narrator: N, settings: NarrationSettings, narration_enabled: bool) -> Self {
        Self {
            film,
            narrator,
            narration: NarrationController::new(settings),
            narration_enabled,
            seek: SeekMailbox::new(),
            current_time: 0.0,
            active_chapter: None,
        }
    }

    pub fn film(&self) -> &Film {
        &self.film
    }

    pub fn current_time(&self) -> f64 {
        self.current_time
    }

    pub fn active_chapter(&self) -> Option<usize> {
        self.active_chapter
    }

    pub fn narration_enabled(&self) -> bool {
        self.narration_enabled
    }

    pub fn narration(&self) -> &NarrationController {
        &self.narration
    }

    pub fn narrator(&self) -> &N {
        &self.narrator
    }

    pub fn caption(&self) -> Option<&str> {
        self.narration.caption()
    }

    pub fn pending_seek(&self) -> Option<SeekRequest> {
        self.seek.peek()
    }

    pub fn snapshot(&self) -> PlaybackSnapshot {
        PlaybackSnapshot {
            current_time: self.current_time,
            active_chapter: self.active_chapter,
            narration_enabled: self.narration_enabled,
            caption: self.narration.caption().map(str::to_string),
            pending_seek: self.seek.peek(),
        }
    }

    /// Ask the surface to move to `seconds`. The newest request wins.
    pub fn request_jump(&mut self, seconds: f64, origin: JumpOrigin) -> SeekRequest {
        let time = if seconds.is_finite() { seconds.max(0.0) } else { 0.0 };
        let request = self.seek.request(time);
        debug!(sequence = request.sequence, time, %origin, "Jump requested");
        request
    }

    /// Hand the pending request to `surface` and acknowledge it.
    ///
    /// Returns the request that was applied.
    pub fn apply_pending_seek<S: VideoSurface + ?Sized>(
        &mut self,
        surface: &mut S,
    ) -> Option<SeekRequest> {
        let request = self.seek.peek()?;
        surface.seek(request.time);
        self.seek.acknowledge(request.sequence);
        Some(request)
    }

    /// Acknowledge a request applied outside [`Self::apply_pending_seek`].
    pub fn acknowledge_seek(&mut self, sequence: u64) -> bool {
        self.seek.acknowledge(sequence)
    }

    /// Evaluate chapter and narration state for one reported time.
    pub fn on_time_update(&mut self, current_time: f64) -> TimeUpdate {
        self.current_time = current_time;
        let active_chapter = find_range_index(&self.film.chapters, current_time);
        let chapter_changed = active_chapter != self.active_chapter;
        if chapter_changed {
            debug!(?active_chapter, current_time, "Active chapter changed");
        }
        self.active_chapter = active_chapter;

        let narration = self.narration.on_time_update(
            &self.film.cues,
            current_time,
            self.narration_enabled,
            &mut self.narrator,
        );

        TimeUpdate {
            active_chapter,
            chapter_changed,
            narration,
        }
    }

    /// Switch narration on or off. Turning it off silences speech now.
    pub fn set_narration_enabled(&mut self, enabled: bool) -> NarrationEvent {
        self.narration_enabled = enabled;
        if enabled {
            NarrationEvent::Unchanged
        } else {
            self.narration.disable(&mut self.narrator)
        }
    }

    pub fn toggle_narration(&mut self) -> NarrationEvent {
        self.set_narration_enabled(!self.narration_enabled)
    }

    /// Change the audio-description proximity window.
    pub fn set_tolerance(&mut self, tolerance: f64) {
        self.narration.set_tolerance(tolerance);
    }

    /// Check whether the current utterance completed.
    pub fn poll_narrator(&mut self) -> NarrationEvent {
        self.narration.poll(&mut self.narrator)
    }

    /// Request a jump to chapter `index`.
    pub fn jump_to_chapter(&mut self, index: usize) -> Option<SeekRequest> {
        let time = self.film.chapters.get(index)?.timestamp.seconds();
        Some(self.request_jump(time, JumpOrigin::Chapter(index)))
    }

    /// Request a jump to the chapter after the current time.
    pub fn jump_to_next_chapter(&mut self) -> Option<SeekRequest> {
        let index = next_index(&self.film.chapters, self.current_time)?;
        self.jump_to_chapter(index)
    }

    /// Request a jump to the start of this chapter, or the previous one
    /// when already near its start.
    pub fn jump_to_previous_chapter(&mut self) -> Option<SeekRequest> {
        let index = previous_index(
            &self.film.chapters,
            self.current_time,
            PREVIOUS_CHAPTER_GRACE,
        )?;
        self.jump_to_chapter(index)
    }

    /// Request a jump to a scene of a place.
    pub fn jump_to_place_scene(&mut self, place: usize, scene: usize) -> Option<SeekRequest> {
        let time = self
            .film
            .places
            .get(place)?
            .scenes()
            .get(scene)?
            .time
            .seconds();
        Some(self.request_jump(time, JumpOrigin::PlaceScene { place, scene }))
    }

    /// Silence everything; used on shutdown.
    pub fn shutdown(&mut self) {
        self.narration.disable(&mut self.narrator);
        self.narrator.cancel();
    }
}
