//! Spoken audio description.
//!
//! - `controller`: decides when a cue is spoken, cancelled or finished
//! - `tool` / `tools`: wrappers around system speech programs
//! - `system`: [`Narrator`] implementation over those tools
//!
//! The speech backend is injected through the [`Narrator`] trait so the
//! controller can be driven by fakes in tests.

mod controller;
mod error;
mod system;
mod tool;
pub mod tools;

pub use controller::{NarrationController, NarrationEvent, NarrationSettings, NarrationState};
pub use error::SpeechError;
pub use system::SystemNarrator;
pub use tool::{SpeechMethod, SpeechTool, Utterance};

/// A speech capability.
///
/// Speaking is fire-and-forget: `speak` starts an utterance and returns,
/// `poll_finished` reports completion later.
pub trait Narrator {
    /// Whether speech can be produced at all on this system.
    fn is_available(&self) -> bool;

    /// Start speaking, replacing anything already in progress.
    fn speak(&mut self, utterance: &Utterance) -> Result<(), SpeechError>;

    /// Stop all speech immediately.
    fn cancel(&mut self);

    /// Returns true once after an utterance has completed on its own.
    fn poll_finished(&mut self) -> bool;
}
