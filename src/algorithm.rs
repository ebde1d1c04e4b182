//! Recency weighting for the fully random strategy.
//!
//! A song's weight grows with the time since it was last played:
//!
//! ```text
//! weight(age) = ln(max(age, 1 s)) ^ 6
//! ```
//!
//! The sixth power makes "played a year ago" outweigh "played yesterday" more
//! than tenfold, so neglected songs come back often while every song keeps a
//! nonzero chance.

use crate::error::{PlaylistError, Result};
use crate::song::Song;
use chrono::{DateTime, Utc};
use rayon::prelude::*;

/// Smallest weight the curve will return.
///
/// `ln(1) = 0`, so a song played within the last second would otherwise drop
/// out of the distribution entirely.
pub const MIN_WEIGHT: f64 = f64::EPSILON;

/// Largest exponent [`RecencyCurve::new`] accepts.
///
/// Even the oldest representable age (`ln(i64::MAX) < 44`) stays near `1e105`
/// at this power, so summing a whole catalog of weights cannot overflow.
pub const MAX_EXPONENT: i32 = 64;

/// Parameters of the recency curve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RecencyCurve {
    exponent: i32,
    min_age_seconds: i64,
}

impl Default for RecencyCurve {
    fn default() -> Self {
        Self {
            exponent: 6,
            min_age_seconds: 1,
        }
    }
}

impl RecencyCurve {
    /// Curve with a custom power of the log age and age floor.
    ///
    /// A `min_age_seconds` below 1 is treated as 1.
    ///
    /// # Errors
    ///
    /// Returns [`PlaylistError::InvalidCurve`] unless `exponent` lies in
    /// `1..=MAX_EXPONENT`. A zero or negative power would give a song played a
    /// second ago an infinite weight, and a huge one overflows.
    pub fn new(exponent: i32, min_age_seconds: i64) -> Result<Self> {
        if !(1..=MAX_EXPONENT).contains(&exponent) {
            return Err(PlaylistError::InvalidCurve(format!(
                "exponent {exponent} is outside 1..={MAX_EXPONENT}"
            )));
        }
        Ok(Self {
            exponent,
            min_age_seconds: min_age_seconds.max(1),
        })
    }

    /// Power applied to the log of the age.
    #[must_use]
    pub fn exponent(&self) -> i32 {
        self.exponent
    }

    /// Ages below this many seconds are raised to it before taking the log.
    #[must_use]
    pub fn min_age_seconds(&self) -> i64 {
        self.min_age_seconds
    }

    /// Weight for a song last played `age_seconds` ago.
    ///
    /// A never-played song (`None`) is treated as `fallback_seconds` old. With
    /// no fallback either, `default` is handed back untouched so callers can
    /// thread their own "unknown" marker through.
    ///
    /// # Examples
    ///
    /// ```
    /// use smarter_playlist::algorithm::RecencyCurve;
    ///
    /// let curve = RecencyCurve::default();
    /// let day = curve.weight(Some(86_400), None, 0.0);
    /// let year = curve.weight(Some(31_536_000), None, 0.0);
    /// assert!(year > day * 10.0);
    /// assert_eq!(curve.weight(None, Some(86_400), 0.0), day);
    /// ```
    #[must_use]
    pub fn weight(&self, age_seconds: Option<i64>, fallback_seconds: Option<i64>, default: f64) -> f64 {
        match age_seconds.or(fallback_seconds) {
            Some(age) => self.weight_for_age(age),
            None => default,
        }
    }

    fn weight_for_age(&self, age_seconds: i64) -> f64 {
        let age = age_seconds.max(self.min_age_seconds).max(1);
        #[allow(clippy::cast_precision_loss)]
        let weight = (age as f64).ln().powi(self.exponent);
        weight.max(MIN_WEIGHT)
    }
}

/// Recency weight of every song in `songs`, in catalog order.
///
/// Never-played songs are weighted as if they were as old as the oldest
/// played song. The scan is read-only and runs in parallel.
///
/// # Errors
///
/// Returns [`PlaylistError::NoAgedSongs`] if no song has a play date, since
/// there is then no age to fall back on.
pub fn catalog_weights(songs: &[Song], now: DateTime<Utc>, curve: &RecencyCurve) -> Result<Vec<f64>> {
    let ages: Vec<Option<i64>> = songs.par_iter().map(|song| song.age_seconds(now)).collect();

    let oldest = ages
        .par_iter()
        .filter_map(|age| *age)
        .max()
        .ok_or(PlaylistError::NoAgedSongs)?;
    log::trace!("Oldest play is {oldest}s ago across {} songs", songs.len());

    Ok(ages
        .par_iter()
        .map(|&age| curve.weight(age, Some(oldest), MIN_WEIGHT))
        .collect())
}
