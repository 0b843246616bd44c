//! Film document loading from disk or HTTP.
//!
//! A document may embed its chapters, cues and places or point at separate
//! JSON arrays. References are resolved one level deep, relative to the
//! document that contains them.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use humansize::{format_size, DECIMAL};
use reqwest::Url;
use serde::de::DeserializeOwned;
use tracing::{debug, info};

use super::error::FilmLoadError;
use super::model::{Film, FilmData, Section};
use crate::cue::sort_by_time;

/// HTTP timeout for film documents.
const HTTP_TIMEOUT: Duration = Duration::from_secs(15);

/// Where a film document (or one of its sections) lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilmSource {
    Path(PathBuf),
    Url(Url),
}

impl FilmSource {
    /// Interpret user input as a URL (`http://`, `https://`) or a path.
    pub fn parse(input: &str) -> Result<Self, FilmLoadError> {
        let input = input.trim();
        if input.is_empty() {
            return Err(FilmLoadError::InvalidLocation(input.to_string()));
        }
        if is_http(input) {
            let url =
                Url::parse(input).map_err(|_| FilmLoadError::InvalidLocation(input.to_string()))?;
            Ok(Self::Url(url))
        } else {
            Ok(Self::Path(PathBuf::from(input)))
        }
    }

    /// Resolve a reference found inside this document.
    pub fn resolve(&self, reference: &str) -> Result<Self, FilmLoadError> {
        let reference = reference.trim();
        if reference.is_empty() {
            return Err(FilmLoadError::InvalidLocation(reference.to_string()));
        }
        if is_http(reference) {
            return Self::parse(reference);
        }
        match self {
            Self::Url(base) => base
                .join(reference)
                .map(Self::Url)
                .map_err(|_| FilmLoadError::InvalidLocation(reference.to_string())),
            Self::Path(path) => {
                let base = path.parent().unwrap_or_else(|| Path::new(""));
                Ok(Self::Path(base.join(reference)))
            }
        }
    }
}

impl fmt::Display for FilmSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Path(path) => write!(f, "{}", path.display()),
            Self::Url(url) => write!(f, "{}", url),
        }
    }
}

fn is_http(input: &str) -> bool {
    let lower = input.to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

/// Loads and resolves film documents.
#[derive(Debug, Default)]
pub struct FilmLoader {
    client: Option<reqwest::blocking::Client>,
}

impl FilmLoader {
    /// Create a loader. The HTTP client is built on first remote fetch.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a film and resolve every section.
    ///
    /// Chapters and cues are sorted by time so range matching holds.
    pub fn load(&mut self, source: &FilmSource) -> Result<Film, FilmLoadError> {
        let data: FilmData = self.fetch_json(source)?;
        info!(source = %source, title = %data.film.title, "Loaded film document");

        let mut chapters = self.resolve_section(source, data.chapters)?;
        let mut cues = self.resolve_section(source, data.audiodescription)?;
        let places = self.resolve_section(source, data.poi)?;
        sort_by_time(&mut chapters);
        sort_by_time(&mut cues);

        debug!(
            chapters = chapters.len(),
            cues = cues.len(),
            places = places.len(),
            "Resolved film sections"
        );

        Ok(Film {
            info: data.film,
            subtitles: data.subtitles,
            chapters,
            cues,
            places,
        })
    }

    fn resolve_section<T: DeserializeOwned>(
        &mut self,
        source: &FilmSource,
        section: Section<T>,
    ) -> Result<Vec<T>, FilmLoadError> {
        match section {
            Section::Inline(items) => Ok(items),
            Section::Remote(reference) => {
                let location = source.resolve(&reference)?;
                debug!(location = %location, "Following section reference");
                self.fetch_json(&location)
            }
        }
    }

    fn fetch_json<T: DeserializeOwned>(&mut self, source: &FilmSource) -> Result<T, FilmLoadError> {
        let body = self.fetch_text(source)?;
        debug!(
            location = %source,
            size = %format_size(body.len(), DECIMAL),
            "Fetched film data"
        );
        serde_json::from_str(&body).map_err(|source_err| FilmLoadError::Parse {
            location: source.to_string(),
            source: source_err,
        })
    }

    fn fetch_text(&mut self, source: &FilmSource) -> Result<String, FilmLoadError> {
        match source {
            FilmSource::Path(path) => {
                if !path.exists() {
                    return Err(FilmLoadError::NotFound { path: path.clone() });
                }
                fs::read_to_string(path).map_err(|source| FilmLoadError::Read {
                    path: path.clone(),
                    source,
                })
            }
            FilmSource::Url(url) => {
                let http_err = |source| FilmLoadError::Http {
                    url: url.to_string(),
                    source,
                };
                let client = self.client()?;
                let response = client.get(url.clone()).send().map_err(http_err)?;
                let status = response.status();
                if !status.is_success() {
                    return Err(FilmLoadError::Status {
                        url: url.to_string(),
                        status: status.as_u16(),
                    });
                }
                response.text().map_err(http_err)
            }
        }
    }

    fn client(&mut self) -> Result<&reqwest::blocking::Client, FilmLoadError> {
        let client = match self.client.take() {
            Some(client) => client,
            None => reqwest::blocking::Client::builder()
                .timeout(HTTP_TIMEOUT)
                .user_agent(concat!("reelsync/", env!("CARGO_PKG_VERSION")))
                .build()
                .map_err(|source| FilmLoadError::Http {
                    url: String::new(),
                    source,
                })?,
        };
        Ok(self.client.insert(client))
    }
}

/// Load a film from a path or URL string.
pub fn load_film(input: &str) -> Result<Film, FilmLoadError> {
    let source = FilmSource::parse(input)?;
    FilmLoader::new().load(&source)
}
