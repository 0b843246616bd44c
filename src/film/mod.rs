//! Film documents: chapters, audio-description cues, places and subtitles.

mod error;
mod loader;
mod model;

pub use error::FilmLoadError;
pub use loader::{load_film, FilmLoader, FilmSource};
pub use model::{
    language_label, parse_lat_lng, subtitle_tracks, AudioDescEntry, ChapterEntry, Film, FilmData,
    FilmInfo, PoiEntry, PoiScene, Section, SubtitleTrack, Subtitles,
};
