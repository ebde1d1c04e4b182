//! The song record every other module works with.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single catalog entry, as far as playlist generation cares.
///
/// Songs are loaded once and never mutated afterwards. Two songs are the
/// "same" for selection purposes when both title and album match; titles
/// alone are not assumed to be unique.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Song {
    pub title: String,
    pub album: String,
    /// Position on the album. Always positive when present.
    pub track_number: Option<u32>,
    /// `None` when the song has never been played.
    pub last_played_at: Option<DateTime<Utc>>,
}

/// Borrowed `(title, album)` pair used to match songs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SongKey<'a> {
    pub title: &'a str,
    pub album: &'a str,
}

impl Song {
    #[must_use]
    pub fn new(title: impl Into<String>, album: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            album: album.into(),
            track_number: None,
            last_played_at: None,
        }
    }

    #[must_use]
    pub fn with_track(mut self, track_number: u32) -> Self {
        self.track_number = (track_number > 0).then_some(track_number);
        self
    }

    #[must_use]
    pub fn played_at(mut self, when: DateTime<Utc>) -> Self {
        self.last_played_at = Some(when);
        self
    }

    #[must_use]
    pub fn key(&self) -> SongKey<'_> {
        SongKey {
            title: &self.title,
            album: &self.album,
        }
    }

    /// Whole seconds between the last play and `now`.
    ///
    /// Returns `None` for songs that were never played. The value may be zero
    /// or negative if the play timestamp is at or after `now`; clamping is left
    /// to the recency curve.
    #[must_use]
    pub fn age_seconds(&self, now: DateTime<Utc>) -> Option<i64> {
        self.last_played_at.map(|played| (now - played).num_seconds())
    }
}

impl std::fmt::Display for Song {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} — {}", self.title, self.album)
    }
}
