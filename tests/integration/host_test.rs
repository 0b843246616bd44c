//! Playback host driving chapters, narration and seeks together

use tempfile::TempDir;

use reelsync::film::{load_film, Film};
use reelsync::narration::{NarrationEvent, NarrationSettings};
use reelsync::player::{ClockSurface, JumpOrigin, PlaybackHost, VideoSurface};

use crate::helpers::{write_film, FakeNarrator};

fn fixture_film() -> Film {
    let dir = TempDir::new().unwrap();
    load_film(write_film(dir.path()).to_str().unwrap()).unwrap()
}

fn host(enabled: bool) -> PlaybackHost<FakeNarrator> {
    PlaybackHost::new(
        fixture_film(),
        FakeNarrator::default(),
        NarrationSettings::default(),
        enabled,
    )
}

#[test]
fn chapter_follows_time_updates() {
    let mut host = host(false);

    assert_eq!(host.on_time_update(45.0).active_chapter, Some(0));
    let update = host.on_time_update(60.0);
    assert_eq!(update.active_chapter, Some(1));
    assert!(update.chapter_changed);
    assert!(!host.on_time_update(61.0).chapter_changed);
    assert_eq!(host.on_time_update(1e9).active_chapter, Some(2));
}

#[test]
fn cues_speak_within_tolerance_only() {
    let mut host = host(true);

    assert_eq!(host.on_time_update(10.6).narration, NarrationEvent::Unchanged);
    assert!(host.narrator().spoken.is_empty());

    let event = host.on_time_update(10.3);
    assert!(matches!(event.narration, NarrationEvent::Spoke { cue: 0, .. }));
    assert_eq!(host.narrator().texts(), vec!["Une porte s'ouvre"]);
    assert_eq!(host.narrator().spoken[0].lang, "fr-FR");
    assert_eq!(host.caption(), Some("Une porte s'ouvre"));

    // Same cue again does not repeat
    host.on_time_update(10.1);
    assert_eq!(host.narrator().spoken.len(), 1);
}

#[test]
fn seeking_back_replays_a_cue() {
    let mut host = host(true);
    host.on_time_update(10.0);
    host.on_time_update(19.9);
    host.on_time_update(10.0);
    assert_eq!(host.narrator().spoken.len(), 3);
}

#[test]
fn disabling_cancels_and_clears_caption() {
    let mut host = host(true);
    host.on_time_update(20.0);
    assert!(host.caption().is_some());

    assert_eq!(host.set_narration_enabled(false), NarrationEvent::Cancelled);
    assert_eq!(host.caption(), None);
    assert_eq!(host.narrator().cancels, 1);

    host.on_time_update(10.0);
    assert_eq!(host.narrator().spoken.len(), 1);
}

#[test]
fn unavailable_speech_is_silent() {
    let mut host = PlaybackHost::new(
        fixture_film(),
        FakeNarrator::unavailable(),
        NarrationSettings::default(),
        true,
    );
    assert_eq!(host.on_time_update(10.0).narration, NarrationEvent::Unavailable);
    assert_eq!(host.caption(), None);
}

#[test]
fn latest_jump_wins() {
    let mut host = host(false);
    let mut surface = ClockSurface::new(0.0);

    host.request_jump(42.0, JumpOrigin::Keyboard);
    host.request_jump(400.0, JumpOrigin::ChatMoment(0));

    let applied = host.apply_pending_seek(&mut surface).unwrap();
    assert_eq!(applied.time, 400.0);
    assert_eq!(surface.position(), 400.0);
    assert!(host.pending_seek().is_none());
    assert!(host.apply_pending_seek(&mut surface).is_none());
}

#[test]
fn stale_acknowledgement_keeps_newer_request() {
    let mut host = host(false);
    let first = host.request_jump(42.0, JumpOrigin::Keyboard);
    let second = host.request_jump(99.0, JumpOrigin::Keyboard);

    assert!(!host.acknowledge_seek(first.sequence));
    assert_eq!(host.pending_seek(), Some(second));
    assert!(host.acknowledge_seek(second.sequence));
    assert!(host.pending_seek().is_none());
}

#[test]
fn place_scene_jump_uses_scene_time() {
    let mut host = host(false);
    let request = host.jump_to_place_scene(0, 1).unwrap();
    assert_eq!(request.time, 100.0);
    assert!(host.jump_to_place_scene(0, 5).is_none());
}

#[test]
fn chapter_navigation() {
    let mut host = host(false);
    host.on_time_update(30.0);
    assert_eq!(host.jump_to_next_chapter().unwrap().time, 60.0);

    host.on_time_update(61.0);
    // Near the start of chapter 2: go to chapter 1
    assert_eq!(host.jump_to_previous_chapter().unwrap().time, 0.0);

    host.on_time_update(90.0);
    assert_eq!(host.jump_to_previous_chapter().unwrap().time, 60.0);
}
