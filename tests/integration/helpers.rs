//! Shared fixtures and fakes.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::rc::Rc;

use reelsync::chat::{ChatError, ChatMessage, ChatPayload, ChatTransport};
use reelsync::narration::{Narrator, SpeechError, Utterance};

/// Film document with chapters in a sibling file, cues inline and places
/// in a subdirectory. Chapters are stored out of order.
pub const FILM_JSON: &str = r#"{
  "film": {"title": "Le Voyage", "file_url": "voyage.mp4", "synopsis_url": "synopsis.html"},
  "subtitles": {"en": "en.vtt", "fr": "fr.vtt", "es": ""},
  "chapters": "chapters.json",
  "audio-description": [
    {"scene": 2, "time": 20, "text": "Rain falls on the deck"},
    {"scene": 1, "timestamp": "00:00:10", "description": "A door opens", "description_fr": "Une porte s'ouvre"}
  ],
  "poi": "data/poi.json"
}"#;

pub const CHAPTERS_JSON: &str = r#"[
  {"chapter": 2, "timestamp": "00:01:00", "title": "Storm", "title_fr": "Tempête"},
  {"chapter": 1, "timestamp": "00:00:00", "title": "Opening", "title_fr": "Ouverture"},
  {"chapter": 3, "time": 120, "title": "Harbor"}
]"#;

pub const POI_JSON: &str = r#"[
  {
    "title": "Lighthouse",
    "title_fr": "Phare",
    "pos": "48.38, -4.49",
    "timestamps": [
      {"time": "00:00:30", "scene": "Arrival", "scene_fr": "Arrivée"},
      {"time": "00:01:40", "scene": "Departure"}
    ]
  }
]"#;

/// Write the fixture film into `dir` and return the document path.
pub fn write_film(dir: &Path) -> PathBuf {
    fs::create_dir_all(dir.join("data")).unwrap();
    fs::write(dir.join("chapters.json"), CHAPTERS_JSON).unwrap();
    fs::write(dir.join("data").join("poi.json"), POI_JSON).unwrap();
    let path = dir.join("film.json");
    fs::write(&path, FILM_JSON).unwrap();
    path
}

/// Run the binary with colors off and a private config location.
pub fn run_reelsync(config_dir: &Path, args: &[&str]) -> (String, String, i32) {
    let output = Command::new(env!("CARGO_BIN_EXE_reelsync"))
        .args(args)
        .env("NO_COLOR", "1")
        .env("REELSYNC_CONFIG", config_dir.join("config.toml"))
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute reelsync");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let exit_code = output.status.code().unwrap_or(-1);

    (stdout, stderr, exit_code)
}

/// Records every narrator call.
#[derive(Debug)]
pub struct FakeNarrator {
    pub available: bool,
    pub spoken: Vec<Utterance>,
    pub cancels: usize,
    pub finish_next_poll: bool,
}

impl Default for FakeNarrator {
    fn default() -> Self {
        Self {
            available: true,
            spoken: Vec::new(),
            cancels: 0,
            finish_next_poll: false,
        }
    }
}

impl FakeNarrator {
    pub fn unavailable() -> Self {
        Self {
            available: false,
            ..Self::default()
        }
    }

    pub fn texts(&self) -> Vec<&str> {
        self.spoken.iter().map(|u| u.text.as_str()).collect()
    }
}

impl Narrator for FakeNarrator {
    fn is_available(&self) -> bool {
        self.available
    }

    fn speak(&mut self, utterance: &Utterance) -> Result<(), SpeechError> {
        if !self.available {
            return Err(SpeechError::Unavailable);
        }
        self.spoken.push(utterance.clone());
        Ok(())
    }

    fn cancel(&mut self) {
        self.cancels += 1;
    }

    fn poll_finished(&mut self) -> bool {
        std::mem::take(&mut self.finish_next_poll)
    }
}

/// What a [`ScriptedTransport`] saw, shared with the test.
#[derive(Debug, Default)]
pub struct TransportLog {
    pub sent: Vec<ChatMessage>,
    pub incoming: VecDeque<ChatPayload>,
    pub fail_sends: bool,
    pub closed: bool,
}

/// In-memory transport. The test keeps a handle on the log to queue
/// incoming payloads and inspect sent messages.
#[derive(Debug, Clone, Default)]
pub struct ScriptedTransport {
    pub log: Rc<RefCell<TransportLog>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn deliver(&self, payload: ChatPayload) {
        self.log.borrow_mut().incoming.push_back(payload);
    }
}

impl ChatTransport for ScriptedTransport {
    fn send(&mut self, message: &ChatMessage) -> Result<(), ChatError> {
        let mut log = self.log.borrow_mut();
        if log.fail_sends {
            return Err(ChatError::Closed);
        }
        log.sent.push(message.clone());
        Ok(())
    }

    fn try_recv(&mut self) -> Option<ChatPayload> {
        self.log.borrow_mut().incoming.pop_front()
    }

    fn close(&mut self) {
        self.log.borrow_mut().closed = true;
    }
}
