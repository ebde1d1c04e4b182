//! Playlist generation that follows albums and favours songs unheard for a while.
//!
//! Core modules:
//! - [`sampler`] - Weighted random selection
//! - [`algorithm`] - Recency weighting
//! - [`album`] - Album grouping and canonical track order
//! - [`strategy`] - Selection strategies and the engine applying them
//! - [`playlist`] - Strategy-chaining playlist generator
//!
//! ### Supporting Modules
//!
//! - [`catalog`] - JSON catalog loading and eligibility filtering
//! - [`sink`] - Playlist output
//! - [`config`] - Configuration file and defaults
//! - [`cli`] - Command-line interface definitions with clap integration
//! - [`completion`] - Shell completion generation
//!
//! ## Quick Start Example
//!
//! ```no_run
//! use chrono::Utc;
//! use rand::{rngs::StdRng, SeedableRng};
//! use smarter_playlist::{Catalog, PlaylistGenerator, StrategyWeights};
//! use smarter_playlist::sink::{OutputFormat, PlaybackSink, WriterSink};
//!
//! let catalog = Catalog::load("catalog.json".as_ref(), Some("#smart"))?;
//!
//! let generator = PlaylistGenerator::new(StrategyWeights::default());
//! let mut rng = StdRng::seed_from_u64(7);
//! let playlist = generator.generate(catalog.songs(), 100, Utc::now(), &mut rng)?;
//!
//! let mut sink = WriterSink::new(std::io::stdout(), OutputFormat::Text);
//! sink.replace_playlist("Smarter Playlist", playlist.songs())?;
//! # Ok::<(), anyhow::Error>(())
//! ```
//!
//! ## Algorithm Details
//!
//! A playlist opens with a `random` pick. Each later slot draws one of three
//! strategies by weight (defaults 100 / 2 / 20):
//!
//! - **next-in-album**: the track after the current one in album order
//! - **random-in-album**: any track of the current album, uniformly
//! - **random**: any song in the catalog, weighted by `ln(age)^6` so that
//!   long-unplayed songs dominate; never-played songs count as old as the
//!   oldest played one
//!
//! Steps that find nothing (the end of an album) are dropped without a retry,
//! so playlists can be shorter than requested.
//!
//! ## Error Handling
//!
//! The selection core returns [`Result`] with a [`PlaylistError`]; loading,
//! configuration and output use `anyhow::Result` with context. Errors abort a
//! generation call outright; no partial playlist is returned.
//!
//! ## Logging
//!
//! Uses the `log` facade. The binary installs `env_logger`, so
//! `RUST_LOG=smarter_playlist=debug` shows strategy decisions and dropped
//! steps, and `trace` adds per-draw sampling detail.

pub mod album;
pub mod algorithm;
pub mod catalog;
pub mod cli;
pub mod completion;
pub mod config;
pub mod error;
pub mod playlist;
pub mod sampler;
pub mod sink;
pub mod song;
pub mod strategy;

pub use album::AlbumIndex;
pub use algorithm::RecencyCurve;
pub use catalog::Catalog;
pub use error::{PlaylistError, Result};
pub use playlist::{generate, PlaylistGenerator, PlaylistResult, StrategyWeights};
pub use song::Song;
pub use strategy::{Strategy, StrategyEngine};
