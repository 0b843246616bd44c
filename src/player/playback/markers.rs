//! Chapter markers and place rows for the player.

use crate::cue::TimedEntry;
use crate::film::Film;
use crate::player::state::MarkerPosition;

/// Collect chapter markers for the progress bar.
///
/// # Arguments
/// * `film` - The loaded film (chapters already sorted)
/// * `lang` - Language for chapter titles
///
/// # Returns
/// A vector of `MarkerPosition` structs sorted by time
pub fn collect_markers(film: &Film, lang: &str) -> Vec<MarkerPosition> {
    film.chapters
        .iter()
        .map(|chapter| MarkerPosition {
            time: chapter.seconds(),
            label: chapter.title_in(lang).to_string(),
        })
        .collect()
}

/// One selectable scene in the Places pane.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaceRow {
    pub place: usize,
    pub scene: usize,
    pub time: f64,
    pub place_title: String,
    pub scene_label: String,
    pub coordinates: (f64, f64),
}

/// Flatten places into one row per scene, in document order.
///
/// Places without scenes are skipped since they cannot be jumped to.
pub fn collect_place_rows(film: &Film, lang: &str) -> Vec<PlaceRow> {
    film.places
        .iter()
        .enumerate()
        .flat_map(|(place, entry)| {
            entry
                .scenes()
                .into_iter()
                .enumerate()
                .map(move |(scene, s)| PlaceRow {
                    place,
                    scene,
                    time: s.seconds(),
                    place_title: entry.title_in(lang).to_string(),
                    scene_label: s.label_in(lang).to_string(),
                    coordinates: entry.coordinates(),
                })
        })
        .collect()
}
