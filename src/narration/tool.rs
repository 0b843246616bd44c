//! SpeechTool trait and related types.

use std::process::Command;

/// Text to be spoken, with its language and rate.
#[derive(Debug, Clone, PartialEq)]
pub struct Utterance {
    /// Text to speak
    pub text: String,
    /// BCP 47 language tag, e.g. `fr-FR`
    pub lang: String,
    /// Speaking rate multiplier (1.0 = normal)
    pub rate: f32,
}

impl Utterance {
    pub fn new(text: impl Into<String>, lang: impl Into<String>, rate: f32) -> Self {
        Self {
            text: text.into(),
            lang: lang.into(),
            rate,
        }
    }

    /// Primary language subtag (`fr` for `fr-FR`).
    pub fn primary_lang(&self) -> &str {
        self.lang
            .split(['-', '_'])
            .next()
            .filter(|lang| !lang.is_empty())
            .unwrap_or("en")
    }

    /// Rate as words per minute, relative to a 175 wpm baseline.
    pub fn words_per_minute(&self) -> u32 {
        let rate = if self.rate.is_finite() { self.rate } else { 1.0 };
        (175.0 * rate.clamp(0.25, 4.0)).round() as u32
    }
}

/// A system program that can speak text aloud.
///
/// Each implementation wraps one speech binary (espeak-ng, spd-say, say)
/// and knows how to build its command line.
pub trait SpeechTool: Send + Sync {
    /// The method identifier for this tool.
    fn method(&self) -> SpeechMethod;

    /// Human-readable name for logs and errors.
    fn name(&self) -> &'static str {
        self.method().name()
    }

    /// Check if this tool is available on the system.
    ///
    /// Should be fast - typically checks if the binary exists.
    fn is_available(&self) -> bool;

    /// Build the command that speaks `utterance` and exits when done.
    fn command(&self, utterance: &Utterance) -> Command;
}

/// Which program produces speech.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpeechMethod {
    /// eSpeak NG synthesizer
    EspeakNg,
    /// speech-dispatcher client
    SpdSay,
    /// macOS speech
    Say,
}

impl SpeechMethod {
    /// Tool name for display/logging.
    pub fn name(&self) -> &'static str {
        match self {
            Self::EspeakNg => "espeak-ng",
            Self::SpdSay => "spd-say",
            Self::Say => "say",
        }
    }

    /// Look a method up by its tool name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim() {
            "espeak-ng" | "espeak" => Some(Self::EspeakNg),
            "spd-say" => Some(Self::SpdSay),
            "say" => Some(Self::Say),
            _ => None,
        }
    }
}
