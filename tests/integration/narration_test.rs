//! Narration controller and system narrator with fake speech tools

use std::process::Command;
use std::thread;
use std::time::{Duration, Instant};

use reelsync::film::AudioDescEntry;
use reelsync::narration::{
    NarrationController, NarrationEvent, NarrationSettings, NarrationState, Narrator, SpeechError,
    SpeechMethod, SpeechTool, SystemNarrator, Utterance,
};

use crate::helpers::FakeNarrator;

fn cue(time: f64, text: &str) -> AudioDescEntry {
    AudioDescEntry {
        timestamp: time.into(),
        description: text.to_string(),
        ..AudioDescEntry::default()
    }
}

/// Runs a shell command instead of a synthesizer.
struct ShellTool {
    available: bool,
    script: &'static str,
}

impl SpeechTool for ShellTool {
    fn method(&self) -> SpeechMethod {
        SpeechMethod::EspeakNg
    }

    fn is_available(&self) -> bool {
        self.available
    }

    fn command(&self, _utterance: &Utterance) -> Command {
        let mut cmd = Command::new("sh");
        cmd.args(["-c", self.script]);
        cmd
    }
}

fn wait_finished(narrator: &mut SystemNarrator) -> bool {
    let started = Instant::now();
    while started.elapsed() < Duration::from_secs(5) {
        if narrator.poll_finished() {
            return true;
        }
        thread::sleep(Duration::from_millis(20));
    }
    false
}

#[test]
fn blank_cue_is_skipped_and_remembered() {
    let cues = vec![cue(10.0, "  "), cue(20.0, "Rain")];
    let mut controller = NarrationController::new(NarrationSettings::default());
    let mut narrator = FakeNarrator::default();

    assert_eq!(
        controller.on_time_update(&cues, 10.0, true, &mut narrator),
        NarrationEvent::Skipped { cue: 0 }
    );
    assert_eq!(
        controller.on_time_update(&cues, 10.2, true, &mut narrator),
        NarrationEvent::Unchanged
    );
    assert!(narrator.spoken.is_empty());
    assert_eq!(controller.last_spoken(), Some(0));
}

#[test]
fn finished_utterance_clears_caption() {
    let cues = vec![cue(10.0, "A door opens")];
    let mut controller = NarrationController::new(NarrationSettings::default());
    let mut narrator = FakeNarrator::default();

    controller.on_time_update(&cues, 10.0, true, &mut narrator);
    assert_eq!(controller.state(), NarrationState::Speaking { cue: 0 });

    narrator.finish_next_poll = true;
    assert_eq!(controller.poll(&mut narrator), NarrationEvent::Finished);
    assert_eq!(controller.state(), NarrationState::Idle);
    assert_eq!(controller.caption(), None);
}

#[test]
fn wider_tolerance_matches_earlier() {
    let cues = vec![cue(10.0, "A door opens")];
    let mut controller = NarrationController::new(NarrationSettings::default());
    let mut narrator = FakeNarrator::default();

    controller.on_time_update(&cues, 9.2, true, &mut narrator);
    assert!(narrator.spoken.is_empty());

    controller.set_tolerance(1.0);
    controller.on_time_update(&cues, 9.2, true, &mut narrator);
    assert_eq!(narrator.texts(), vec!["A door opens"]);
}

#[test]
fn system_narrator_runs_first_available_tool() {
    let mut narrator = SystemNarrator::with_tools(vec![
        Box::new(ShellTool {
            available: false,
            script: "exit 1",
        }),
        Box::new(ShellTool {
            available: true,
            script: "exit 0",
        }),
    ]);
    assert!(narrator.is_available());

    narrator.speak(&Utterance::new("Bonjour", "fr-FR", 1.0)).unwrap();
    assert!(wait_finished(&mut narrator));
    assert!(!narrator.is_speaking());
}

#[test]
fn system_narrator_cancel_stops_long_speech() {
    let mut narrator = SystemNarrator::with_tools(vec![Box::new(ShellTool {
        available: true,
        script: "sleep 30",
    })]);

    narrator.speak(&Utterance::new("Long", "fr-FR", 1.0)).unwrap();
    assert!(narrator.is_speaking());
    narrator.cancel();
    assert!(!narrator.is_speaking());
    assert!(!narrator.poll_finished());
}

#[test]
fn system_narrator_without_tools_is_unavailable() {
    let mut narrator = SystemNarrator::with_tools(Vec::new());
    assert!(!narrator.is_available());
    assert!(matches!(
        narrator.speak(&Utterance::new("x", "fr", 1.0)),
        Err(SpeechError::Unavailable)
    ));
}

#[test]
fn empty_text_never_reaches_the_tool() {
    let mut narrator = SystemNarrator::with_tools(vec![Box::new(ShellTool {
        available: true,
        script: "exit 0",
    })]);
    assert!(matches!(
        narrator.speak(&Utterance::new("   ", "fr", 1.0)),
        Err(SpeechError::EmptyText)
    ));
    assert!(!narrator.is_speaking());
}
