//! Song selection strategies and the engine that applies them.
//!
//! Each step of a playlist asks the engine for "the song after this one"
//! under one of three strategies:
//!
//! - `next-in-album`: the following track of the current album
//! - `random-in-album`: any song of the current album, uniformly
//! - `random`: any song of the catalog, weighted by recency
//!
//! A strategy that has nothing to offer (end of album, no current song)
//! yields `Ok(None)`. That is an ordinary outcome, not an error.

use crate::album::AlbumIndex;
use crate::algorithm::{self, RecencyCurve};
use crate::error::{PlaylistError, Result};
use crate::sampler;
use crate::song::Song;
use chrono::{DateTime, Utc};
use log::{debug, trace};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How the next song is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Strategy {
    NextInAlbum,
    RandomInAlbum,
    Random,
}

impl Strategy {
    pub const ALL: [Self; 3] = [Self::NextInAlbum, Self::RandomInAlbum, Self::Random];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NextInAlbum => "next-in-album",
            Self::RandomInAlbum => "random-in-album",
            Self::Random => "random",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Strategy {
    type Err = PlaylistError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|strategy| strategy.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| PlaylistError::UnknownStrategy(s.to_string()))
    }
}

/// Applies strategies against one catalog snapshot.
///
/// The engine itself is stateless between calls; the "current song" is
/// whatever the caller passes in.
#[derive(Debug, Clone)]
pub struct StrategyEngine<'a> {
    songs: &'a [Song],
    index: AlbumIndex<'a>,
    curve: RecencyCurve,
    now: DateTime<Utc>,
}

impl<'a> StrategyEngine<'a> {
    /// Index `songs` by album and fix the reference time for song ages.
    #[must_use]
    pub fn new(songs: &'a [Song], curve: RecencyCurve, now: DateTime<Utc>) -> Self {
        Self {
            songs,
            index: AlbumIndex::build(songs),
            curve,
            now,
        }
    }

    #[must_use]
    pub fn index(&self) -> &AlbumIndex<'a> {
        &self.index
    }

    /// Pick the song that follows `current` under `strategy`.
    ///
    /// # Errors
    ///
    /// Only the `random` strategy can fail, with
    /// [`PlaylistError::NoAgedSongs`] when no song in the catalog was ever
    /// played (including an empty catalog).
    pub fn next<R>(&self, current: Option<&Song>, strategy: Strategy, rng: &mut R) -> Result<Option<&'a Song>>
    where
        R: Rng + ?Sized,
    {
        let picked = match strategy {
            Strategy::NextInAlbum => current.and_then(|song| self.index.next_after(song)),
            Strategy::RandomInAlbum => current.and_then(|song| self.random_in_album(song, rng)),
            Strategy::Random => Some(self.random_by_recency(rng)?),
        };

        match picked {
            Some(song) => trace!("{strategy} picked '{song}'"),
            None => debug!("{strategy} found nothing after {:?}", current.map(|song| &song.title)),
        }
        Ok(picked)
    }

    fn random_in_album<R>(&self, current: &Song, rng: &mut R) -> Option<&'a Song>
    where
        R: Rng + ?Sized,
    {
        self.index.group(&current.album)?.choose(rng).copied()
    }

    fn random_by_recency<R>(&self, rng: &mut R) -> Result<&'a Song>
    where
        R: Rng + ?Sized,
    {
        let weights = algorithm::catalog_weights(self.songs, self.now, &self.curve)?;
        sampler::sample(self.songs, &weights, rng)
    }
}
