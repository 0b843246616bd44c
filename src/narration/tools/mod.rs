//! Platform speech tools.

mod espeak;
mod say;
mod spd_say;

pub use espeak::EspeakNg;
pub use say::Say;
pub use spd_say::SpdSay;

use tracing::debug;

use super::tool::{SpeechMethod, SpeechTool};

/// Get the platform-appropriate tools in priority order.
pub fn platform_tools() -> Vec<Box<dyn SpeechTool>> {
    #[cfg(target_os = "macos")]
    {
        vec![Box::new(Say::new()), Box::new(EspeakNg::new())]
    }

    #[cfg(not(target_os = "macos"))]
    {
        vec![Box::new(EspeakNg::new()), Box::new(SpdSay::new())]
    }
}

/// The tool for one method.
pub fn tool_for(method: SpeechMethod) -> Box<dyn SpeechTool> {
    match method {
        SpeechMethod::EspeakNg => Box::new(EspeakNg::new()),
        SpeechMethod::SpdSay => Box::new(SpdSay::new()),
        SpeechMethod::Say => Box::new(Say::new()),
    }
}

/// Platform tools with `preferred` moved to the front.
///
/// A preferred tool outside the platform list is added in front of it, so
/// an explicit choice is always tried first.
pub fn tools_preferring(preferred: Option<SpeechMethod>) -> Vec<Box<dyn SpeechTool>> {
    let mut tools = platform_tools();
    if let Some(preferred) = preferred {
        if tools.iter().any(|tool| tool.method() == preferred) {
            tools.sort_by_key(|tool| tool.method() != preferred);
        } else {
            debug!(tool = preferred.name(), "Preferred speech tool added to platform list");
            tools.insert(0, tool_for(preferred));
        }
    }
    tools
}

/// Whether `cmd` resolves to a file somewhere on `PATH`.
pub(crate) fn command_exists(cmd: &str) -> bool {
    std::env::var_os("PATH")
        .map(|paths| std::env::split_paths(&paths).any(|dir| dir.join(cmd).is_file()))
        .unwrap_or(false)
}
