//! # Smarter Playlist
//!
//! Builds playlists from a music catalog by mixing three selection
//! strategies: keep playing the current album, jump within it, or jump to a
//! song you have not heard in a long time.
//!
//! ## Usage
//!
//! ```bash
//! # 100 songs with the default strategy mix
//! smarter-playlist generate
//!
//! # Shorter, album-heavy, reproducible
//! smarter-playlist generate 30 --weights next-in-album=200,random=10 --seed 4
//!
//! # Inspect album order
//! smarter-playlist albums
//! ```

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::{CommandFactory, Parser};
use log::{debug, info};
use rand::rngs::StdRng;
use rand::SeedableRng;
use smarter_playlist::cli::{self, CatalogArgs};
use smarter_playlist::config::{Overrides, RuntimeConfig};
use smarter_playlist::sink::{OutputFormat, PlaybackSink, WriterSink};
use smarter_playlist::{completion, AlbumIndex, Catalog, PlaylistGenerator};
use std::path::Path;

/// Main entry point.
///
/// Initializes logging, parses command-line arguments, and routes commands.
///
/// # Logging
///
/// Controlled via `RUST_LOG`:
/// - `RUST_LOG=debug smarter-playlist generate` - strategy decisions
/// - `RUST_LOG=smarter_playlist::sampler=trace smarter-playlist generate` - every draw
fn main() -> Result<()> {
    env_logger::init();

    let args = cli::Args::parse();

    match args.command {
        cli::Command::Generate {
            length,
            name,
            weights,
            catalog,
            seed,
            as_of,
            format,
            verbose,
        } => {
            let config = RuntimeConfig::resolve(args.config.as_deref())?.with_overrides(Overrides {
                catalog_path: catalog.catalog,
                playlist_name: name,
                length,
                strategy_weights: weights,
                include_marker: catalog.marker,
                seed,
            });
            generate(&config, as_of.unwrap_or_else(Utc::now), format, verbose)?;
        }
        cli::Command::Albums { catalog } => {
            let config = RuntimeConfig::resolve(args.config.as_deref())?;
            list_albums(&config, catalog)?;
        }
        cli::Command::Completion { shell } => {
            let mut cmd = cli::Args::command();
            completion::generate_completions(
                completion::shell_to_completion_shell(shell),
                &mut cmd,
                &mut std::io::stdout(),
            );
        }
    }

    Ok(())
}

fn load_catalog(path: &Path, include_marker: Option<&str>) -> Result<Catalog> {
    Catalog::load(path, include_marker).context(
        "Could not load the song catalog. Pass --catalog or set catalog_path in the config file.",
    )
}

fn generate(config: &RuntimeConfig, now: DateTime<Utc>, format: OutputFormat, verbose: bool) -> Result<()> {
    let catalog = load_catalog(&config.catalog_path, config.include_marker.as_deref())?;

    let mut rng = match config.seed {
        Some(seed) => {
            debug!("Seeding RNG with {seed}");
            StdRng::seed_from_u64(seed)
        }
        None => StdRng::from_entropy(),
    };

    info!(
        "Generating '{}' ({} songs, weights {})",
        config.playlist_name, config.length, config.strategy_weights
    );
    let generator = PlaylistGenerator::new(config.strategy_weights.clone());
    let playlist = generator
        .generate(catalog.songs(), config.length, now, &mut rng)
        .context("Playlist generation failed")?;

    if verbose {
        for (position, (song, strategy)) in playlist.entries().enumerate() {
            eprintln!("{:>4}. [{strategy}] {song}", position + 1);
        }
        if playlist.dropped() > 0 {
            eprintln!(
                "{} of {} steps found nothing and were dropped",
                playlist.dropped(),
                playlist.requested()
            );
        }
    }

    let mut sink = WriterSink::new(std::io::stdout().lock(), format);
    sink.replace_playlist(&config.playlist_name, playlist.songs())
}

fn list_albums(config: &RuntimeConfig, args: CatalogArgs) -> Result<()> {
    let path = args.catalog.unwrap_or_else(|| config.catalog_path.clone());
    let marker = args.marker.or_else(|| config.include_marker.clone());
    let catalog = load_catalog(&path, marker.as_deref())?;

    let index = AlbumIndex::build(catalog.songs());
    for (album, songs) in index.albums() {
        println!("{album}");
        for song in songs {
            match song.track_number {
                Some(track) => println!("  {track:>3}  {}", song.title),
                None => println!("     -  {}", song.title),
            }
        }
    }
    info!("{} albums, {} songs", index.len(), catalog.len());
    Ok(())
}
