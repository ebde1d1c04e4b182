//! # Playlist Generation
//!
//! A playlist starts with one forced `random` pick. Every further slot draws a
//! strategy by weight and asks the [`StrategyEngine`] for the song that follows
//! the last song produced:
//!
//! ```text
//! random ─▶ song₁ ─(draw strategy)─▶ song₂ ─(draw strategy)─▶ …
//! ```
//!
//! A step whose strategy has nothing to offer (typically `next-in-album` at
//! the end of an album) is dropped, not retried. The requested length is
//! therefore an upper bound: a playlist may come back shorter, and callers
//! are told how many steps were dropped.
//!
//! ## Example
//!
//! ```
//! use chrono::{Duration, Utc};
//! use rand::{rngs::StdRng, SeedableRng};
//! use smarter_playlist::{PlaylistGenerator, Song, StrategyWeights};
//!
//! let now = Utc::now();
//! let songs = vec![
//!     Song::new("Opening", "Debut").with_track(1).played_at(now - Duration::days(40)),
//!     Song::new("Closing", "Debut").with_track(2),
//! ];
//!
//! let generator = PlaylistGenerator::new(StrategyWeights::default());
//! let mut rng = StdRng::seed_from_u64(42);
//! let playlist = generator.generate(&songs, 10, now, &mut rng)?;
//!
//! assert!(!playlist.is_empty());
//! assert!(playlist.len() <= 10);
//! # Ok::<(), smarter_playlist::PlaylistError>(())
//! ```

use crate::algorithm::RecencyCurve;
use crate::error::{PlaylistError, Result};
use crate::sampler;
use crate::song::Song;
use crate::strategy::{Strategy, StrategyEngine};
use chrono::{DateTime, Utc};
use log::{debug, info, warn};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Relative likelihood of each strategy being drawn for a playlist step.
///
/// Strategies missing from the map are never drawn. Serialized as a plain
/// `{"next-in-album": 100, ...}` object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "BTreeMap<String, f64>", into = "BTreeMap<String, f64>")]
pub struct StrategyWeights {
    weights: BTreeMap<Strategy, f64>,
}

impl Default for StrategyWeights {
    fn default() -> Self {
        Self::from_pairs([
            (Strategy::NextInAlbum, 100.0),
            (Strategy::RandomInAlbum, 2.0),
            (Strategy::Random, 20.0),
        ])
    }
}

impl StrategyWeights {
    #[must_use]
    pub fn from_pairs(pairs: impl IntoIterator<Item = (Strategy, f64)>) -> Self {
        Self {
            weights: pairs.into_iter().collect(),
        }
    }

    /// Weight of `strategy`; zero when it is not configured.
    #[must_use]
    pub fn get(&self, strategy: Strategy) -> f64 {
        self.weights.get(&strategy).copied().unwrap_or(0.0)
    }

    pub fn set(&mut self, strategy: Strategy, weight: f64) {
        self.weights.insert(strategy, weight);
    }

    pub fn iter(&self) -> impl Iterator<Item = (Strategy, f64)> + '_ {
        self.weights.iter().map(|(strategy, weight)| (*strategy, *weight))
    }

    /// Check the weights form a distribution the sampler accepts.
    ///
    /// # Errors
    ///
    /// [`PlaylistError::InvalidWeights`] for negative or non-finite weights,
    /// or when no strategy has a positive weight.
    pub fn validate(&self) -> Result<()> {
        if let Some((strategy, weight)) = self.iter().find(|(_, w)| !w.is_finite() || *w < 0.0) {
            return Err(PlaylistError::InvalidWeights(format!(
                "{strategy} has weight {weight}"
            )));
        }
        if !self.iter().any(|(_, weight)| weight > 0.0) {
            return Err(PlaylistError::InvalidWeights(
                "at least one strategy needs a positive weight".to_string(),
            ));
        }
        Ok(())
    }

    fn columns(&self) -> (Vec<Strategy>, Vec<f64>) {
        self.weights.iter().map(|(strategy, weight)| (*strategy, *weight)).unzip()
    }
}

impl TryFrom<BTreeMap<String, f64>> for StrategyWeights {
    type Error = PlaylistError;

    fn try_from(raw: BTreeMap<String, f64>) -> Result<Self> {
        let weights = raw
            .into_iter()
            .map(|(name, weight)| -> Result<(Strategy, f64)> { Ok((name.parse()?, weight)) })
            .collect::<Result<BTreeMap<_, _>>>()?;
        let weights = Self { weights };
        weights.validate()?;
        Ok(weights)
    }
}

impl From<StrategyWeights> for BTreeMap<String, f64> {
    fn from(weights: StrategyWeights) -> Self {
        weights
            .iter()
            .map(|(strategy, weight)| (strategy.to_string(), weight))
            .collect()
    }
}

/// Parses `next-in-album=100,random=20` style lists.
impl FromStr for StrategyWeights {
    type Err = PlaylistError;

    fn from_str(s: &str) -> Result<Self> {
        let mut weights = BTreeMap::new();
        for pair in s.split(',').map(str::trim).filter(|pair| !pair.is_empty()) {
            let (name, value) = pair.split_once('=').ok_or_else(|| {
                PlaylistError::InvalidWeights(format!("expected <strategy>=<weight>, got '{pair}'"))
            })?;
            let weight = value.trim().parse::<f64>().map_err(|_| {
                PlaylistError::InvalidWeights(format!("'{}' is not a number", value.trim()))
            })?;
            weights.insert(name.trim().to_string(), weight);
        }
        Self::try_from(weights)
    }
}

impl fmt::Display for StrategyWeights {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let pairs: Vec<String> = self
            .iter()
            .map(|(strategy, weight)| format!("{strategy}={weight}"))
            .collect();
        f.write_str(&pairs.join(","))
    }
}

/// Songs produced by one generation call, with the strategy behind each.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaylistResult {
    songs: Vec<Song>,
    strategies: Vec<Strategy>,
    requested: usize,
    dropped: usize,
}

impl PlaylistResult {
    #[must_use]
    pub fn songs(&self) -> &[Song] {
        &self.songs
    }

    #[must_use]
    pub fn into_songs(self) -> Vec<Song> {
        self.songs
    }

    /// `(song, strategy that picked it)` in playlist order.
    pub fn entries(&self) -> impl Iterator<Item = (&Song, Strategy)> + '_ {
        self.songs.iter().zip(self.strategies.iter().copied())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.songs.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.songs.is_empty()
    }

    /// Length that was asked for.
    #[must_use]
    pub fn requested(&self) -> usize {
        self.requested
    }

    /// Steps whose strategy found nothing.
    #[must_use]
    pub fn dropped(&self) -> usize {
        self.dropped
    }
}

/// Builds playlists from a catalog snapshot.
#[derive(Debug, Clone, Default)]
pub struct PlaylistGenerator {
    weights: StrategyWeights,
    curve: RecencyCurve,
}

impl PlaylistGenerator {
    #[must_use]
    pub fn new(weights: StrategyWeights) -> Self {
        Self {
            weights,
            curve: RecencyCurve::default(),
        }
    }

    #[must_use]
    pub fn with_curve(mut self, curve: RecencyCurve) -> Self {
        self.curve = curve;
        self
    }

    #[must_use]
    pub fn weights(&self) -> &StrategyWeights {
        &self.weights
    }

    /// Produce up to `length` songs from `songs`.
    ///
    /// `now` anchors song ages; `rng` is the only source of randomness, so a
    /// seeded generator gives reproducible playlists.
    ///
    /// # Errors
    ///
    /// - [`PlaylistError::InvalidLength`] if `length` is zero
    /// - [`PlaylistError::EmptyCatalog`] if `songs` is empty
    /// - [`PlaylistError::NoAgedSongs`] if no song was ever played
    /// - [`PlaylistError::InvalidWeights`] if the strategy weights are unusable,
    ///   whatever the length
    ///
    /// No partial playlist is returned on error.
    pub fn generate<R>(&self, songs: &[Song], length: usize, now: DateTime<Utc>, rng: &mut R) -> Result<PlaylistResult>
    where
        R: Rng + ?Sized,
    {
        if length == 0 {
            return Err(PlaylistError::InvalidLength(length));
        }
        if songs.is_empty() {
            return Err(PlaylistError::EmptyCatalog);
        }
        self.weights.validate()?;

        let engine = StrategyEngine::new(songs, self.curve, now);
        let (strategies, weights) = self.weights.columns();

        let first = engine
            .next(None, Strategy::Random, rng)?
            .ok_or(PlaylistError::EmptyCatalog)?;
        let mut picked = vec![(first, Strategy::Random)];
        let mut current = first;
        let mut dropped = 0;

        for step in 1..length {
            let strategy = *sampler::sample(&strategies, &weights, rng)?;
            match engine.next(Some(current), strategy, rng)? {
                Some(song) => {
                    picked.push((song, strategy));
                    current = song;
                }
                None => {
                    dropped += 1;
                    debug!("Step {step}: {strategy} had nothing after '{current}', dropping slot");
                }
            }
        }

        if dropped > 0 {
            warn!(
                "Playlist holds {} of {length} requested songs ({dropped} steps found nothing)",
                picked.len()
            );
        }
        info!(
            "Generated {} songs from {} candidates across {} albums",
            picked.len(),
            songs.len(),
            engine.index().len()
        );

        let (songs, strategies): (Vec<Song>, Vec<Strategy>) = picked
            .into_iter()
            .map(|(song, strategy)| (song.clone(), strategy))
            .unzip();
        Ok(PlaylistResult {
            songs,
            strategies,
            requested: length,
            dropped,
        })
    }
}

/// One-shot form of [`PlaylistGenerator::generate`] with the default recency curve.
///
/// # Errors
///
/// See [`PlaylistGenerator::generate`].
pub fn generate<R>(
    songs: &[Song],
    weights: &StrategyWeights,
    length: usize,
    now: DateTime<Utc>,
    rng: &mut R,
) -> Result<PlaylistResult>
where
    R: Rng + ?Sized,
{
    PlaylistGenerator::new(weights.clone()).generate(songs, length, now, rng)
}
