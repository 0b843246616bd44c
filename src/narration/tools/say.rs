//! macOS say speech tool.

use std::process::Command;

use crate::narration::tool::{SpeechMethod, SpeechTool, Utterance};

/// macOS `say`. Uses the system voice; only the rate is passed.
pub struct Say;

impl Say {
    /// Create a new Say tool.
    pub fn new() -> Self {
        Self
    }
}

impl SpeechTool for Say {
    fn method(&self) -> SpeechMethod {
        SpeechMethod::Say
    }

    fn is_available(&self) -> bool {
        cfg!(target_os = "macos")
    }

    fn command(&self, utterance: &Utterance) -> Command {
        let mut cmd = Command::new("say");
        cmd.arg("-r")
            .arg(utterance.words_per_minute().to_string())
            .arg("--")
            .arg(&utterance.text);
        cmd
    }
}

impl Default for Say {
    fn default() -> Self {
        Self::new()
    }
}
