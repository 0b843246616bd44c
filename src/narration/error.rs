//! Speech errors.

/// Errors that can occur while speaking.
#[derive(Debug, thiserror::Error)]
pub enum SpeechError {
    #[error("No speech tool available. On Linux, install espeak-ng or speech-dispatcher.")]
    Unavailable,

    #[error("Speech tool '{tool}' failed to start: {source}")]
    Spawn {
        tool: &'static str,
        #[source]
        source: std::io::Error,
    },

    #[error("Nothing to speak")]
    EmptyText,
}
