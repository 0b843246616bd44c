//! Video surfaces.
//!
//! The host only needs a readable, seekable position. [`ClockSurface`] is a
//! wall-clock implementation that stands in for decoded video.

use std::time::Instant;

/// Something that plays a film and reports where it is.
pub trait VideoSurface {
    /// Current position in seconds.
    fn position(&self) -> f64;

    /// Move to `seconds`, clamped to the film.
    fn seek(&mut self, seconds: f64);

    fn play(&mut self);

    fn pause(&mut self);

    fn is_paused(&self) -> bool;

    /// Length in seconds, 0 when unknown.
    fn duration(&self) -> f64;
}

/// Minimum playback speed multiplier.
pub const MIN_SPEED: f64 = 0.1;
/// Maximum playback speed multiplier.
pub const MAX_SPEED: f64 = 16.0;

/// A video surface driven by the wall clock.
///
/// Position is `time_offset + elapsed * speed` while playing. Every change
/// of state rebases `time_offset` so the position never jumps.
#[derive(Debug, Clone)]
pub struct ClockSurface {
    duration: f64,
    paused: bool,
    speed: f64,
    /// Wall clock time when playback started/resumed
    start_time: Instant,
    /// Position at `start_time`
    time_offset: f64,
}

impl ClockSurface {
    /// Create a paused surface at 0.
    pub fn new(duration: f64) -> Self {
        Self {
            duration: duration.max(0.0),
            paused: true,
            speed: 1.0,
            start_time: Instant::now(),
            time_offset: 0.0,
        }
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    /// Position as seen at `now`.
    pub fn position_at(&self, now: Instant) -> f64 {
        let position = if self.paused {
            self.time_offset
        } else {
            let elapsed = now.saturating_duration_since(self.start_time).as_secs_f64();
            self.time_offset + elapsed * self.speed
        };
        self.clamp(position)
    }

    /// Whether playback reached the end.
    pub fn is_finished(&self) -> bool {
        self.duration > 0.0 && self.position() >= self.duration
    }

    /// Set the speed multiplier, clamped to `MIN_SPEED..=MAX_SPEED`.
    pub fn set_speed(&mut self, speed: f64) {
        self.rebase(Instant::now());
        self.speed = speed.clamp(MIN_SPEED, MAX_SPEED);
    }

    /// Increase playback speed (max 16x).
    pub fn speed_up(&mut self) {
        self.set_speed(self.speed * 1.5);
    }

    /// Decrease playback speed (min 0.1x).
    pub fn speed_down(&mut self) {
        self.set_speed(self.speed / 1.5);
    }

    /// Toggle pause.
    pub fn toggle_pause(&mut self) {
        if self.paused {
            self.play();
        } else {
            self.pause();
        }
    }

    fn rebase(&mut self, now: Instant) {
        self.time_offset = self.position_at(now);
        self.start_time = now;
    }

    fn clamp(&self, position: f64) -> f64 {
        let position = position.max(0.0);
        if self.duration > 0.0 {
            position.min(self.duration)
        } else {
            position
        }
    }
}

impl VideoSurface for ClockSurface {
    fn position(&self) -> f64 {
        self.position_at(Instant::now())
    }

    fn seek(&mut self, seconds: f64) {
        let seconds = if seconds.is_finite() { seconds } else { 0.0 };
        self.time_offset = self.clamp(seconds);
        self.start_time = Instant::now();
    }

    fn play(&mut self) {
        if self.paused {
            // Restart from the end is a fresh play
            if self.is_finished() {
                self.time_offset = 0.0;
            }
            self.start_time = Instant::now();
            self.paused = false;
        }
    }

    fn pause(&mut self) {
        if !self.paused {
            self.rebase(Instant::now());
            self.paused = true;
        }
    }

    fn is_paused(&self) -> bool {
        self.paused
    }

    fn duration(&self) -> f64 {
        self.duration
    }
}
