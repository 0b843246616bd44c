//! Film document types.
//!
//! Field names follow the JSON published for the film, including the
//! per-language suffixes (`title_fr`, `description_es`, ...).

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::cue::{TimedEntry, Timestamp};

/// Film metadata.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilmInfo {
    #[serde(default)]
    pub file_url: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub synopsis_url: String,
}

/// Subtitle track URLs keyed by language code (`en`, `fr`, `es`, ...).
pub type Subtitles = BTreeMap<String, String>;

/// A subtitle track the player can offer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubtitleTrack {
    /// Language code
    pub lang: String,
    /// Human-readable label for the language
    pub label: String,
    /// Track location
    pub url: String,
}

/// Display label for a subtitle language code.
pub fn language_label(lang: &str) -> String {
    match lang {
        "fr" => "Français".to_string(),
        "en" => "English".to_string(),
        "es" => "Español".to_string(),
        "de" => "Deutsch".to_string(),
        "it" => "Italiano".to_string(),
        other => other.to_string(),
    }
}

/// List subtitle tracks, with `preferred` first when present.
pub fn subtitle_tracks(subtitles: &Subtitles, preferred: &str) -> Vec<SubtitleTrack> {
    let mut tracks: Vec<SubtitleTrack> = subtitles
        .iter()
        .filter(|(_, url)| !url.trim().is_empty())
        .map(|(lang, url)| SubtitleTrack {
            lang: lang.clone(),
            label: language_label(lang),
            url: url.clone(),
        })
        .collect();
    tracks.sort_by_key(|track| track.lang != preferred);
    tracks
}

/// Pick the localized text, falling back when it's missing or blank.
fn localized<'a>(localized: Option<&'a str>, fallback: &'a str) -> Option<&'a str> {
    localized
        .filter(|text| !text.trim().is_empty())
        .or(Some(fallback))
        .filter(|text| !text.trim().is_empty())
}

/// One chapter of the film.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChapterEntry {
    /// Ordinal as published (1-based in the source data)
    #[serde(default, alias = "pos")]
    pub chapter: u32,
    #[serde(alias = "time")]
    pub timestamp: Timestamp,
    #[serde(default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title_fr: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title_es: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description_fr: Option<String>,
}

impl ChapterEntry {
    /// Title in `lang`, falling back to the default title.
    pub fn title_in(&self, lang: &str) -> &str {
        let wanted = match lang {
            "fr" => self.title_fr.as_deref(),
            "es" => self.title_es.as_deref(),
            _ => None,
        };
        localized(wanted, &self.title).unwrap_or("")
    }
}

impl TimedEntry for ChapterEntry {
    fn seconds(&self) -> f64 {
        self.timestamp.seconds()
    }
}

/// One audio-description cue.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AudioDescEntry {
    #[serde(default)]
    pub scene: u32,
    #[serde(alias = "time")]
    pub timestamp: Timestamp,
    /// Default-language description
    #[serde(default, alias = "text")]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description_fr: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description_es: Option<String>,
}

impl AudioDescEntry {
    /// Text to speak in `lang`, falling back to the default description.
    ///
    /// Returns `None` when both are missing or blank.
    pub fn text_for(&self, lang: &str) -> Option<&str> {
        let wanted = match lang {
            "fr" => self.description_fr.as_deref(),
            "es" => self.description_es.as_deref(),
            _ => None,
        };
        localized(wanted, &self.description)
    }
}

impl TimedEntry for AudioDescEntry {
    fn seconds(&self) -> f64 {
        self.timestamp.seconds()
    }
}

/// A scene filmed at a point of interest.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PoiScene {
    pub time: Timestamp,
    #[serde(default)]
    pub scene: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scene_fr: Option<String>,
}

impl PoiScene {
    /// Scene label in `lang`, falling back to the default label.
    pub fn label_in(&self, lang: &str) -> &str {
        let wanted = if lang == "fr" {
            self.scene_fr.as_deref()
        } else {
            None
        };
        localized(wanted, &self.scene)
            .or(self.scene_fr.as_deref())
            .unwrap_or("")
    }
}

impl TimedEntry for PoiScene {
    fn seconds(&self) -> f64 {
        self.time.seconds()
    }
}

/// A filming location with the scenes shot there.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PoiEntry {
    #[serde(default)]
    pub id: u32,
    #[serde(default, alias = "label")]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title_fr: Option<String>,
    #[serde(default)]
    pub latitude: f64,
    #[serde(default)]
    pub longitude: f64,
    /// Alternative `"lat, lng"` form used by older documents
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pos: Option<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description_fr: Option<String>,
    #[serde(default)]
    pub timestamps: Vec<PoiScene>,
    /// Single jump time used by older documents without scenes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<Timestamp>,
}

impl PoiEntry {
    /// Coordinates as `(latitude, longitude)`.
    ///
    /// Explicit fields win; otherwise `pos` is parsed.
    pub fn coordinates(&self) -> (f64, f64) {
        if self.latitude != 0.0 || self.longitude != 0.0 {
            return (self.latitude, self.longitude);
        }
        self.pos
            .as_deref()
            .and_then(parse_lat_lng)
            .unwrap_or((self.latitude, self.longitude))
    }

    /// Title in `lang`, falling back to the default title.
    pub fn title_in(&self, lang: &str) -> &str {
        let wanted = if lang == "fr" {
            self.title_fr.as_deref()
        } else {
            None
        };
        localized(wanted, &self.title)
            .or(self.title_fr.as_deref())
            .unwrap_or("")
    }

    /// Description in `lang`, falling back to the default description.
    pub fn description_in(&self, lang: &str) -> &str {
        let wanted = if lang == "fr" {
            self.description_fr.as_deref()
        } else {
            None
        };
        localized(wanted, &self.description)
            .or(self.description_fr.as_deref())
            .unwrap_or("")
    }

    /// Scenes tied to this place, ordered by time.
    ///
    /// Older documents carry a single `time` instead of scenes; it is
    /// exposed as one unnamed scene.
    pub fn scenes(&self) -> Vec<PoiScene> {
        let mut scenes = self.timestamps.clone();
        if scenes.is_empty() {
            if let Some(time) = &self.time {
                scenes.push(PoiScene {
                    time: time.clone(),
                    ..PoiScene::default()
                });
            }
        }
        crate::cue::sort_by_time(&mut scenes);
        scenes
    }
}

/// Parse a `"lat, lng"` string.
pub fn parse_lat_lng(text: &str) -> Option<(f64, f64)> {
    let (lat, lng) = text.split_once(',')?;
    Some((lat.trim().parse().ok()?, lng.trim().parse().ok()?))
}

/// A list that is either embedded in the document or published separately.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Section<T> {
    Inline(Vec<T>),
    /// Location of a JSON array, relative to the film document
    Remote(String),
}

impl<T> Default for Section<T> {
    fn default() -> Self {
        Section::Inline(Vec::new())
    }
}

/// The film document as published.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilmData {
    #[serde(default)]
    pub film: FilmInfo,
    #[serde(default)]
    pub subtitles: Subtitles,
    #[serde(default, alias = "audio-description", alias = "audio_description")]
    pub audiodescription: Section<AudioDescEntry>,
    #[serde(default)]
    pub chapters: Section<ChapterEntry>,
    #[serde(default)]
    pub poi: Section<PoiEntry>,
}

/// A fully resolved film, ready for playback.
///
/// Every section is inline and chapters/cues are sorted by time.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Film {
    pub info: FilmInfo,
    pub subtitles: Subtitles,
    pub chapters: Vec<ChapterEntry>,
    pub cues: Vec<AudioDescEntry>,
    pub places: Vec<PoiEntry>,
}

impl Film {
    /// Best-known duration: the latest timestamp anywhere in the film.
    pub fn last_timestamp(&self) -> f64 {
        let chapters = self.chapters.iter().map(TimedEntry::seconds);
        let cues = self.cues.iter().map(TimedEntry::seconds);
        let scenes = self
            .places
            .iter()
            .flat_map(|place| place.scenes())
            .map(|scene| scene.seconds());
        chapters.chain(cues).chain(scenes).fold(0.0, f64::max)
    }
}
