//! # Catalog Loading
//!
//! Reads the song catalog from a JSON file and applies the eligibility
//! filter before anything reaches playlist generation.
//!
//! ## File Format
//!
//! ```json
//! [
//!   {
//!     "title": "So What",
//!     "album": "Kind of Blue",
//!     "track_number": 1,
//!     "last_played_at": "2024-02-11T21:14:03Z",
//!     "comments": "#smart"
//!   }
//! ]
//! ```
//!
//! Only `title` and `album` are required. A missing `last_played_at` means the
//! song was never played.
//!
//! ## Eligibility
//!
//! With an include marker configured, only entries whose `comments` contain
//! the marker (case-insensitively) are kept. Without one, every entry is.

use crate::song::Song;
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// One record of the catalog file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub title: String,
    #[serde(default)]
    pub album: String,
    #[serde(default)]
    pub track_number: Option<u32>,
    #[serde(default)]
    pub last_played_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub comments: Option<String>,
}

impl CatalogEntry {
    /// Whether this entry passes the include-marker filter.
    #[must_use]
    pub fn is_eligible(&self, include_marker: Option<&str>) -> bool {
        match include_marker.map(str::trim).filter(|marker| !marker.is_empty()) {
            None => true,
            Some(marker) => self
                .comments
                .as_deref()
                .is_some_and(|comments| comments.to_lowercase().contains(&marker.to_lowercase())),
        }
    }

    fn into_song(self) -> Song {
        Song {
            title: self.title,
            album: self.album,
            track_number: self.track_number.filter(|&number| number > 0),
            last_played_at: self.last_played_at,
        }
    }
}

/// Eligible songs, in file order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    songs: Vec<Song>,
}

impl Catalog {
    #[must_use]
    pub fn from_songs(songs: Vec<Song>) -> Self {
        Self { songs }
    }

    /// Filter `entries` down to eligible, well-formed songs.
    #[must_use]
    pub fn from_entries(entries: Vec<CatalogEntry>, include_marker: Option<&str>) -> Self {
        let total = entries.len();
        let mut ineligible = 0;
        let mut songs = Vec::with_capacity(total);

        for entry in entries {
            if entry.title.trim().is_empty() {
                warn!("Skipping catalog entry without a title (album '{}')", entry.album);
                continue;
            }
            if !entry.is_eligible(include_marker) {
                ineligible += 1;
                continue;
            }
            songs.push(entry.into_song());
        }

        if ineligible > 0 {
            debug!("{ineligible} of {total} catalog entries lack the include marker");
        }
        info!("Loaded {} eligible songs from {total} catalog entries", songs.len());
        Self { songs }
    }

    /// Parse a catalog from JSON text.
    ///
    /// # Errors
    ///
    /// Returns an error if `json` is not an array of catalog entries.
    pub fn from_json(json: &str, include_marker: Option<&str>) -> Result<Self> {
        let entries: Vec<CatalogEntry> =
            serde_json::from_str(json).context("Catalog is not a JSON array of songs")?;
        Ok(Self::from_entries(entries, include_marker))
    }

    /// Read and parse the catalog file at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path, include_marker: Option<&str>) -> Result<Self> {
        info!("Reading catalog from {}", path.display());
        let json = fs::read_to_string(path)
            .with_context(|| format!("Failed to read catalog file {}", path.display()))?;
        Self::from_json(&json, include_marker)
            .with_context(|| format!("Invalid catalog file {}", path.display()))
    }

    #[must_use]
    pub fn songs(&self) -> &[Song] {
        &self.songs
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Song> {
        self.songs.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.songs.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.songs.is_empty()
    }

    #[must_use]
    pub fn into_songs(self) -> Vec<Song> {
        self.songs
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a Song;
    type IntoIter = std::slice::Iter<'a, Song>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    const SAMPLE: &str = r##"[
        {"title": "So What", "album": "Kind of Blue", "track_number": 1,
         "last_played_at": "2024-02-11T21:14:03Z", "comments": "great #Smart pick"},
        {"title": "Freddie Freeloader", "album": "Kind of Blue", "track_number": 2,
         "comments": "#smart"},
        {"title": "Blue in Green", "album": "Kind of Blue", "track_number": 0},
        {"title": "", "album": "Kind of Blue"},
        {"title": "Untitled", "album": ""}
    ]"##;

    #[test]
    fn test_parse_without_marker_keeps_everything_titled() {
        let catalog = Catalog::from_json(SAMPLE, None).unwrap();

        assert_eq!(catalog.len(), 4);
        let first = &catalog.songs()[0];
        assert_eq!(first.title, "So What");
        assert_eq!(first.track_number, Some(1));
        assert_eq!(
            first.last_played_at,
            Some(Utc.with_ymd_and_hms(2024, 2, 11, 21, 14, 3).unwrap())
        );
        assert_eq!(catalog.songs()[1].last_played_at, None);
    }

    #[test]
    fn test_zero_track_number_means_untracked() {
        let catalog = Catalog::from_json(SAMPLE, None).unwrap();
        let blue = catalog.iter().find(|song| song.title == "Blue in Green").unwrap();
        assert_eq!(blue.track_number, None);
    }

    #[test]
    fn test_marker_filter_is_case_insensitive() {
        let catalog = Catalog::from_json(SAMPLE, Some("#SMART")).unwrap();
        let titles: Vec<_> = catalog.iter().map(|song| song.title.as_str()).collect();
        assert_eq!(titles, vec!["So What", "Freddie Freeloader"]);
    }

    #[test]
    fn test_blank_marker_disables_filter() {
        let catalog = Catalog::from_json(SAMPLE, Some("  ")).unwrap();
        assert_eq!(catalog.len(), 4);
    }

    #[test]
    fn test_invalid_json() {
        assert!(Catalog::from_json(r#"{"title": "not an array"}"#, None).is_err());
        assert!(Catalog::from_json(r#"[{"album": "no title"}]"#, None).is_err());
    }

    #[test]
    fn test_load_from_file() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("catalog.json");
        fs::write(&path, SAMPLE)?;

        let catalog = Catalog::load(&path, Some("#smart"))?;
        assert_eq!(catalog.len(), 2);

        let missing = Catalog::load(&dir.path().join("missing.json"), None);
        assert!(missing.is_err());
        Ok(())
    }
}
