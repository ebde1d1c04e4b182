//! # Command-Line Interface Module
//!
//! Clap derive definitions for the `smarter-playlist` binary.
//!
//! ## Commands
//!
//! - `generate`: Build a playlist and hand it to the output sink
//! - `albums`: Show the catalog grouped by album in playback order
//! - `completion`: Print a shell completion script
//!
//! ## Examples
//!
//! ```bash
//! smarter-playlist generate 50 --name "Sunday" --weights next-in-album=100,random=20
//! smarter-playlist generate --seed 7 --format json
//! smarter-playlist albums --marker "#smart"
//! ```

use crate::playlist::StrategyWeights;
use crate::sink::OutputFormat;
use chrono::{DateTime, Utc};
use clap::{Args as ClapArgs, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Shell types supported for completion generation
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug)]
#[allow(clippy::enum_variant_names)]
pub enum Shell {
    /// Bash shell
    Bash,
    /// Zsh shell
    Zsh,
    /// Fish shell
    Fish,
    /// PowerShell
    PowerShell,
    /// Elvish shell
    Elvish,
}

/// Main application arguments structure.
#[derive(Parser, Debug)]
#[command(name = "smarter-playlist")]
#[command(about = "Builds playlists that follow albums and bring back songs you have not heard in a while")]
#[command(version)]
pub struct Args {
    /// Config file to use instead of the platform default
    #[arg(long, global = true, env = "SMARTER_PLAYLIST_CONFIG", value_hint = clap::ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Catalog selection shared by commands that read songs.
#[derive(ClapArgs, Debug, Clone, Default)]
pub struct CatalogArgs {
    /// JSON catalog file
    #[arg(long, value_hint = clap::ValueHint::FilePath)]
    pub catalog: Option<PathBuf>,

    /// Only include songs whose comments contain this text
    #[arg(long)]
    pub marker: Option<String>,
}

/// Enumeration of all available subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate a playlist
    ///
    /// Starts from a recency-weighted random song, then repeatedly draws a
    /// strategy (next-in-album, random-in-album, random) by weight to pick
    /// the following song. Steps that find nothing are dropped, so the
    /// playlist can end up shorter than requested.
    Generate {
        /// Number of songs to aim for [default: 100]
        #[arg(value_parser = parse_length)]
        length: Option<usize>,

        /// Name of the destination playlist [default: "Smarter Playlist"]
        #[arg(short, long)]
        name: Option<String>,

        /// Strategy weights, e.g. "next-in-album=100,random-in-album=2,random=20"
        ///
        /// Replaces the configured weights entirely; strategies not listed
        /// are never drawn.
        #[arg(short, long)]
        weights: Option<StrategyWeights>,

        #[command(flatten)]
        catalog: CatalogArgs,

        /// Seed for reproducible playlists
        #[arg(long)]
        seed: Option<u64>,

        /// Reference time for song ages, RFC 3339 [default: now]
        #[arg(long)]
        as_of: Option<DateTime<Utc>>,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,

        /// Log which strategy picked each song
        #[arg(short, long)]
        verbose: bool,
    },

    /// List the catalog album by album, in canonical track order
    Albums {
        #[command(flatten)]
        catalog: CatalogArgs,
    },

    /// Generate shell completions
    ///
    /// Usage: smarter-playlist completion bash > ~/.local/share/bash-completion/completions/smarter-playlist
    Completion {
        /// Shell to generate completions for
        shell: Shell,
    },
}

fn parse_length(raw: &str) -> Result<usize, String> {
    match raw.parse::<usize>() {
        Ok(0) => Err("length must be at least 1".to_string()),
        Ok(length) => Ok(length),
        Err(err) => Err(format!("'{raw}' is not a valid length: {err}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategy::Strategy;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_generate_defaults() {
        let args = Args::try_parse_from(["smarter-playlist", "generate"]).unwrap();
        match args.command {
            Command::Generate { length, name, weights, format, verbose, .. } => {
                assert_eq!(length, None);
                assert_eq!(name, None);
                assert!(weights.is_none());
                assert_eq!(format, OutputFormat::Text);
                assert!(!verbose);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_generate_with_everything() {
        let args = Args::try_parse_from([
            "smarter-playlist",
            "--config",
            "/tmp/sp.json",
            "generate",
            "25",
            "--name",
            "Run",
            "--weights",
            "next-in-album=3,random=1",
            "--catalog",
            "songs.json",
            "--marker",
            "#smart",
            "--seed",
            "8",
            "--as-of",
            "2024-05-01T12:00:00Z",
            "--format",
            "json",
        ])
        .unwrap();

        assert_eq!(args.config, Some(PathBuf::from("/tmp/sp.json")));
        match args.command {
            Command::Generate { length, name, weights, catalog, seed, as_of, format, .. } => {
                assert_eq!(length, Some(25));
                assert_eq!(name.as_deref(), Some("Run"));
                let weights = weights.unwrap();
                assert_eq!(weights.get(Strategy::NextInAlbum), 3.0);
                assert_eq!(weights.get(Strategy::RandomInAlbum), 0.0);
                assert_eq!(catalog.catalog, Some(PathBuf::from("songs.json")));
                assert_eq!(catalog.marker.as_deref(), Some("#smart"));
                assert_eq!(seed, Some(8));
                assert_eq!(as_of.map(|t| t.to_rfc3339()).as_deref(), Some("2024-05-01T12:00:00+00:00"));
                assert_eq!(format, OutputFormat::Json);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(Args::try_parse_from(["smarter-playlist", "generate", "0"]).is_err());
        assert!(Args::try_parse_from(["smarter-playlist", "generate", "--weights", "random=0"]).is_err());
        assert!(Args::try_parse_from(["smarter-playlist", "generate", "--weights", "shuffle=1"]).is_err());
    }
}
