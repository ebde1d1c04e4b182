//! Error types for playlist generation.

use thiserror::Error;

/// Result type for the selection core.
pub type Result<T> = std::result::Result<T, PlaylistError>;

/// Conditions that abort a generation call.
///
/// "Nothing found" outcomes of a single strategy step are not errors; those
/// surface as `Ok(None)` from the strategy engine.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PlaylistError {
    /// Sampler called with no positive weight, a negative or non-finite
    /// weight, or mismatched item/weight counts
    #[error("Invalid weights: {0}")]
    InvalidWeights(String),

    /// The `random` strategy needs at least one played song to derive a
    /// fallback age for songs that were never played
    #[error("No song in the catalog has ever been played; cannot weight unplayed songs")]
    NoAgedSongs,

    /// Nothing to choose from
    #[error("The catalog is empty (or every song was filtered out)")]
    EmptyCatalog,

    /// Playlists must hold at least one song
    #[error("Invalid playlist length {0}: must be at least 1")]
    InvalidLength(usize),

    /// Recency curve parameters that could not produce finite, positive weights
    #[error("Invalid recency curve: {0}")]
    InvalidCurve(String),

    /// Strategy identifier outside `next-in-album`, `random-in-album`, `random`
    #[error("Unknown strategy: '{0}'")]
    UnknownStrategy(String),
}
