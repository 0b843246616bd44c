//! speech-dispatcher speech tool.

use std::process::Command;

use super::command_exists;
use crate::narration::tool::{SpeechMethod, SpeechTool, Utterance};

/// speech-dispatcher client.
///
/// Runs with `--wait` so the process lives exactly as long as the speech,
/// which is how completion is detected.
pub struct SpdSay;

impl SpdSay {
    /// Create a new SpdSay tool.
    pub fn new() -> Self {
        Self
    }

    /// Map a rate multiplier onto speech-dispatcher's -100..=100 scale.
    fn rate_arg(rate: f32) -> i32 {
        let rate = if rate.is_finite() { rate } else { 1.0 };
        (((rate - 1.0) * 100.0).round() as i32).clamp(-100, 100)
    }
}

impl SpeechTool for SpdSay {
    fn method(&self) -> SpeechMethod {
        SpeechMethod::SpdSay
    }

    fn is_available(&self) -> bool {
        command_exists("spd-say")
    }

    fn command(&self, utterance: &Utterance) -> Command {
        let mut cmd = Command::new("spd-say");
        cmd.arg("--wait")
            .arg("-l")
            .arg(utterance.primary_lang())
            .arg("-r")
            .arg(Self::rate_arg(utterance.rate).to_string())
            .arg("--")
            .arg(&utterance.text);
        cmd
    }
}

impl Default for SpdSay {
    fn default() -> Self {
        Self::new()
    }
}
