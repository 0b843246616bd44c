//! Film document loading from disk

use std::fs;

use tempfile::TempDir;

use reelsync::film::{load_film, subtitle_tracks, FilmLoadError};
use reelsync::TimedEntry;

use crate::helpers::write_film;

#[test]
fn section_references_resolve_relative_to_the_document() {
    let dir = TempDir::new().unwrap();
    let path = write_film(dir.path());

    let film = load_film(path.to_str().unwrap()).unwrap();

    assert_eq!(film.info.title, "Le Voyage");
    assert_eq!(film.chapters.len(), 3);
    assert_eq!(film.places.len(), 1);
    assert_eq!(film.cues.len(), 2);
}

#[test]
fn chapters_and_cues_are_sorted_by_time() {
    let dir = TempDir::new().unwrap();
    let film = load_film(write_film(dir.path()).to_str().unwrap()).unwrap();

    let chapter_times: Vec<f64> = film.chapters.iter().map(|c| c.seconds()).collect();
    assert_eq!(chapter_times, vec![0.0, 60.0, 120.0]);

    let cue_times: Vec<f64> = film.cues.iter().map(|c| c.seconds()).collect();
    assert_eq!(cue_times, vec![10.0, 20.0]);
}

#[test]
fn localized_text_falls_back_to_default() {
    let dir = TempDir::new().unwrap();
    let film = load_film(write_film(dir.path()).to_str().unwrap()).unwrap();

    assert_eq!(film.chapters[1].title_in("fr"), "Tempête");
    assert_eq!(film.chapters[2].title_in("fr"), "Harbor");
    assert_eq!(film.cues[0].text_for("fr"), Some("Une porte s'ouvre"));
    assert_eq!(film.cues[1].text_for("fr"), Some("Rain falls on the deck"));
}

#[test]
fn places_parse_pos_strings_and_scenes() {
    let dir = TempDir::new().unwrap();
    let film = load_film(write_film(dir.path()).to_str().unwrap()).unwrap();

    let place = &film.places[0];
    assert_eq!(place.coordinates(), (48.38, -4.49));
    assert_eq!(place.title_in("fr"), "Phare");
    let scenes = place.scenes();
    assert_eq!(scenes.len(), 2);
    assert_eq!(scenes[0].label_in("fr"), "Arrivée");
    assert_eq!(scenes[1].time.seconds(), 100.0);
}

#[test]
fn duration_is_latest_timestamp() {
    let dir = TempDir::new().unwrap();
    let film = load_film(write_film(dir.path()).to_str().unwrap()).unwrap();
    assert_eq!(film.last_timestamp(), 120.0);
}

#[test]
fn blank_subtitle_urls_are_skipped() {
    let dir = TempDir::new().unwrap();
    let film = load_film(write_film(dir.path()).to_str().unwrap()).unwrap();

    let tracks = subtitle_tracks(&film.subtitles, "fr");
    let langs: Vec<&str> = tracks.iter().map(|t| t.lang.as_str()).collect();
    assert_eq!(langs, vec!["fr", "en"]);
    assert_eq!(tracks[0].label, "Français");
}

#[test]
fn missing_section_file_is_not_found() {
    let dir = TempDir::new().unwrap();
    let path = write_film(dir.path());
    fs::remove_file(dir.path().join("chapters.json")).unwrap();

    let err = load_film(path.to_str().unwrap()).unwrap_err();
    assert!(matches!(err, FilmLoadError::NotFound { .. }));
}

#[test]
fn malformed_document_is_a_parse_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("film.json");
    fs::write(&path, "{ not json").unwrap();

    let err = load_film(path.to_str().unwrap()).unwrap_err();
    assert!(matches!(err, FilmLoadError::Parse { .. }));
}

#[test]
fn malformed_timestamps_count_as_zero() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("film.json");
    fs::write(
        &path,
        r#"{"chapters": [{"timestamp": "soon", "title": "A"}, {"timestamp": "00:00:05", "title": "B"}]}"#,
    )
    .unwrap();

    let film = load_film(path.to_str().unwrap()).unwrap();
    assert_eq!(film.chapters[0].title, "A");
    assert_eq!(film.chapters[0].seconds(), 0.0);
}
