//! eSpeak NG speech tool.

use std::process::Command;

use super::command_exists;
use crate::narration::tool::{SpeechMethod, SpeechTool, Utterance};

/// eSpeak NG synthesizer, the default on Linux.
///
/// Voice is picked from the primary language subtag, rate is in words
/// per minute.
pub struct EspeakNg;

impl EspeakNg {
    /// Create a new EspeakNg tool.
    pub fn new() -> Self {
        Self
    }
}

impl SpeechTool for EspeakNg {
    fn method(&self) -> SpeechMethod {
        SpeechMethod::EspeakNg
    }

    fn is_available(&self) -> bool {
        command_exists("espeak-ng")
    }

    fn command(&self, utterance: &Utterance) -> Command {
        let mut cmd = Command::new("espeak-ng");
        cmd.arg("-v")
            .arg(utterance.primary_lang())
            .arg("-s")
            .arg(utterance.words_per_minute().to_string())
            .arg("--")
            .arg(&utterance.text);
        cmd
    }
}

impl Default for EspeakNg {
    fn default() -> Self {
        Self::new()
    }
}
