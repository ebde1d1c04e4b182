//! Delivering a finished playlist somewhere.
//!
//! A sink replaces the contents of a named playlist with the given songs,
//! identifying each song only by title and album. When two songs share both,
//! the sink may resolve either.

use crate::song::Song;
use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::Serialize;
use std::io::Write;

/// Destination for generated playlists.
pub trait PlaybackSink {
    /// Create `name` (or clear it if it exists), then append `songs` in order.
    ///
    /// # Errors
    ///
    /// Returns an error if the destination rejects the playlist.
    fn replace_playlist(&mut self, name: &str, songs: &[Song]) -> Result<()>;
}

/// Rendering used by [`WriterSink`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// `# name` header, then one numbered `title — album` line per song
    #[default]
    Text,
    /// `{"name": ..., "songs": [{"title": ..., "album": ...}]}`
    Json,
}

#[derive(Serialize)]
struct JsonPlaylist<'a> {
    name: &'a str,
    songs: Vec<JsonSong<'a>>,
}

#[derive(Serialize)]
struct JsonSong<'a> {
    title: &'a str,
    album: &'a str,
}

/// Writes each playlist to an [`std::io::Write`], e.g. stdout.
#[derive(Debug)]
pub struct WriterSink<W: Write> {
    out: W,
    format: OutputFormat,
}

impl<W: Write> WriterSink<W> {
    pub fn new(out: W, format: OutputFormat) -> Self {
        Self { out, format }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> PlaybackSink for WriterSink<W> {
    fn replace_playlist(&mut self, name: &str, songs: &[Song]) -> Result<()> {
        match self.format {
            OutputFormat::Text => {
                writeln!(self.out, "# {name}")?;
                for (position, song) in songs.iter().enumerate() {
                    writeln!(self.out, "{}. {song}", position + 1)?;
                }
            }
            OutputFormat::Json => {
                let playlist = JsonPlaylist {
                    name,
                    songs: songs
                        .iter()
                        .map(|song| JsonSong {
                            title: &song.title,
                            album: &song.album,
                        })
                        .collect(),
                };
                serde_json::to_writer_pretty(&mut self.out, &playlist)
                    .context("Failed to serialize playlist")?;
                writeln!(self.out)?;
            }
        }
        self.out.flush().context("Failed to flush playlist output")?;
        log::info!("Wrote playlist '{name}' with {} songs", songs.len());
        Ok(())
    }
}
