//! Narrator backed by system speech tools.

use std::process::{Child, Stdio};

use tracing::{debug, warn};

use super::error::SpeechError;
use super::tool::{SpeechTool, Utterance};
use super::tools::platform_tools;
use super::Narrator;

/// Speaks through the first available [`SpeechTool`].
///
/// Each utterance is one child process. Completion is detected by polling
/// the process, cancellation kills it. Tool availability is looked up once,
/// when the narrator is created.
pub struct SystemNarrator {
    tools: Vec<Box<dyn SpeechTool>>,
    /// Index of the first available tool.
    selected: Option<usize>,
    current: Option<Child>,
}

impl SystemNarrator {
    /// Create with platform-appropriate tools.
    pub fn new() -> Self {
        Self::with_tools(platform_tools())
    }

    /// Create with specific tools (for testing or a configured preference).
    pub fn with_tools(tools: Vec<Box<dyn SpeechTool>>) -> Self {
        let selected = tools.iter().position(|tool| tool.is_available());
        match selected {
            Some(i) => debug!(tool = tools[i].name(), "Speech tool selected"),
            None => debug!(checked = tools.len(), "No speech tool available"),
        }
        Self {
            tools,
            selected,
            current: None,
        }
    }

    /// Get a reference to the tools list.
    pub fn tools(&self) -> &[Box<dyn SpeechTool>] {
        &self.tools
    }

    /// Name of the tool that would be used, if any.
    pub fn active_tool(&self) -> Option<&'static str> {
        self.first_available().map(|tool| tool.name())
    }

    /// Whether an utterance is currently running.
    pub fn is_speaking(&self) -> bool {
        self.current.is_some()
    }

    fn first_available(&self) -> Option<&dyn SpeechTool> {
        self.selected
            .and_then(|i| self.tools.get(i))
            .map(|tool| tool.as_ref())
    }
}

impl Narrator for SystemNarrator {
    fn is_available(&self) -> bool {
        self.first_available().is_some()
    }

    fn speak(&mut self, utterance: &Utterance) -> Result<(), SpeechError> {
        if utterance.text.trim().is_empty() {
            return Err(SpeechError::EmptyText);
        }
        self.cancel();

        let tool = self.first_available().ok_or(SpeechError::Unavailable)?;
        let name = tool.name();
        let child = tool
            .command(utterance)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|source| SpeechError::Spawn { tool: name, source })?;

        debug!(tool = name, pid = child.id(), lang = %utterance.lang, "Speaking");
        self.current = Some(child);
        Ok(())
    }

    fn cancel(&mut self) {
        if let Some(mut child) = self.current.take() {
            if let Err(e) = child.kill() {
                // Already exited between polls
                debug!("Speech process not killed: {}", e);
            }
            let _ = child.wait();
            debug!("Speech cancelled");
        }
    }

    fn poll_finished(&mut self) -> bool {
        let Some(child) = self.current.as_mut() else {
            return false;
        };
        match child.try_wait() {
            Ok(Some(status)) => {
                if !status.success() {
                    warn!(%status, "Speech tool exited with failure");
                }
                self.current = None;
                true
            }
            Ok(None) => false,
            Err(e) => {
                warn!("Failed to poll speech process: {}", e);
                self.current = None;
                true
            }
        }
    }
}

impl Default for SystemNarrator {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for SystemNarrator {
    fn drop(&mut self) {
        self.cancel();
    }
}
