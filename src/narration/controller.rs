//! Audio-description narration state machine.
//!
//! On every time update the controller matches cues by proximity and
//! decides whether to start speaking. It remembers the last cue it spoke so
//! that a cue is announced once while playback sits inside its window.

use tracing::{debug, info, warn};

use super::tool::Utterance;
use super::Narrator;
use crate::cue::{find_proximity_index, DEFAULT_TOLERANCE};
use crate::film::AudioDescEntry;

/// Narration settings taken from config and CLI flags.
#[derive(Debug, Clone, PartialEq)]
pub struct NarrationSettings {
    /// Proximity window in seconds
    pub tolerance: f64,
    /// Preferred description language (`fr`, `en`, `es`)
    pub language: String,
    /// Voice language tag passed to the speech tool
    pub voice: String,
    /// Speaking rate multiplier
    pub rate: f32,
}

impl Default for NarrationSettings {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            language: "fr".to_string(),
            voice: "fr-FR".to_string(),
            rate: 1.1,
        }
    }
}

/// Whether the narrator is currently talking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NarrationState {
    #[default]
    Idle,
    Speaking {
        cue: usize,
    },
}

/// What a call into the controller did.
#[derive(Debug, Clone, PartialEq)]
pub enum NarrationEvent {
    /// Nothing changed
    Unchanged,
    /// Started speaking a cue
    Spoke { cue: usize, text: String },
    /// A new cue matched but had no text in any language
    Skipped { cue: usize },
    /// Speech was cancelled because narration was disabled
    Cancelled,
    /// The running utterance completed
    Finished,
    /// No speech capability on this system
    Unavailable,
    /// The speech tool failed to start
    Failed { cue: usize },
}

/// Drives the narrator from playback time.
#[derive(Debug)]
pub struct NarrationController {
    settings: NarrationSettings,
    state: NarrationState,
    last_spoken: Option<usize>,
    caption: Option<String>,
    reported_unavailable: bool,
}

impl NarrationController {
    pub fn new(settings: NarrationSettings) -> Self {
        Self {
            settings,
            state: NarrationState::Idle,
            last_spoken: None,
            caption: None,
            reported_unavailable: false,
        }
    }

    pub fn settings(&self) -> &NarrationSettings {
        &self.settings
    }

    pub fn state(&self) -> NarrationState {
        self.state
    }

    /// Index of the last cue handed to the narrator.
    pub fn last_spoken(&self) -> Option<usize> {
        self.last_spoken
    }

    /// Text currently being spoken, for on-screen display.
    pub fn caption(&self) -> Option<&str> {
        self.caption.as_deref()
    }

    /// Evaluate one time update.
    ///
    /// # Arguments
    /// * `cues` - Audio-description cues
    /// * `current_time` - Playback position in seconds
    /// * `enabled` - Whether narration is switched on
    /// * `narrator` - Speech backend
    pub fn on_time_update<N: Narrator + ?Sized>(
        &mut self,
        cues: &[AudioDescEntry],
        current_time: f64,
        enabled: bool,
        narrator: &mut N,
    ) -> NarrationEvent {
        if !enabled {
            return self.disable(narrator);
        }
        if !narrator.is_available() {
            if !self.reported_unavailable {
                debug!("No speech capability, audio description stays silent");
                self.reported_unavailable = true;
            }
            return NarrationEvent::Unavailable;
        }
        let matched = find_proximity_index(cues, current_time, self.settings.tolerance);
        self.on_cue_matched(matched, cues, narrator)
    }

    /// Act on an already computed match.
    ///
    /// Speaks only when `matched` differs from the last spoken cue. A gap
    /// with no match in between does not reset that memory.
    pub fn on_cue_matched<N: Narrator + ?Sized>(
        &mut self,
        matched: Option<usize>,
        cues: &[AudioDescEntry],
        narrator: &mut N,
    ) -> NarrationEvent {
        let Some(cue) = matched else {
            return NarrationEvent::Unchanged;
        };
        if self.last_spoken == Some(cue) {
            return NarrationEvent::Unchanged;
        }
        self.last_spoken = Some(cue);

        let Some(text) = cues
            .get(cue)
            .and_then(|entry| entry.text_for(&self.settings.language))
            .map(str::to_string)
        else {
            warn!(cue, "Audio-description cue has no text, skipping");
            return NarrationEvent::Skipped { cue };
        };

        if matches!(self.state, NarrationState::Speaking { .. }) {
            narrator.cancel();
        }

        let utterance = Utterance::new(text.clone(), &self.settings.voice, self.settings.rate);
        match narrator.speak(&utterance) {
            Ok(()) => {
                info!(cue, "Narrating audio-description cue");
                self.state = NarrationState::Speaking { cue };
                self.caption = Some(text.clone());
                NarrationEvent::Spoke { cue, text }
            }
            Err(e) => {
                warn!(cue, "Failed to narrate cue: {}", e);
                self.state = NarrationState::Idle;
                self.caption = None;
                NarrationEvent::Failed { cue }
            }
        }
    }

    /// Stop speaking right away and clear the caption.
    pub fn disable<N: Narrator + ?Sized>(&mut self, narrator: &mut N) -> NarrationEvent {
        let was_speaking = matches!(self.state, NarrationState::Speaking { .. });
        if was_speaking {
            narrator.cancel();
        }
        self.state = NarrationState::Idle;
        self.caption = None;
        if was_speaking {
            debug!("Narration disabled, speech cancelled");
            NarrationEvent::Cancelled
        } else {
            NarrationEvent::Unchanged
        }
    }

    /// The utterance ended on its own.
    pub fn on_utterance_end(&mut self) {
        self.state = NarrationState::Idle;
        self.caption = None;
    }

    /// Check the narrator for a completed utterance.
    pub fn poll<N: Narrator + ?Sized>(&mut self, narrator: &mut N) -> NarrationEvent {
        if matches!(self.state, NarrationState::Speaking { .. }) && narrator.poll_finished() {
            self.on_utterance_end();
            NarrationEvent::Finished
        } else {
            NarrationEvent::Unchanged
        }
    }

    /// Change the proximity tolerance.
    pub fn set_tolerance(&mut self, tolerance: f64) {
        self.settings.tolerance = tolerance.max(0.0);
    }
}

impl Default for NarrationController {
    fn default() -> Self {
        Self::new(NarrationSettings::default())
    }
}
