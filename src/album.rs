//! Album grouping and canonical within-album order.
//!
//! Within an album, songs with a track number come first, ordered by that
//! number (stable for duplicates). Songs without one follow, ordered by title.
//! "Next in album" walks exactly this order.

use crate::song::{Song, SongKey};
use std::collections::BTreeMap;

/// Songs of a catalog grouped by album name, each group in canonical order.
#[derive(Debug, Clone, Default)]
pub struct AlbumIndex<'a> {
    groups: BTreeMap<&'a str, Vec<&'a Song>>,
}

impl<'a> AlbumIndex<'a> {
    /// Group `songs` by album. Deterministic; consumes no randomness.
    #[must_use]
    pub fn build(songs: &'a [Song]) -> Self {
        let mut groups: BTreeMap<&'a str, Vec<&'a Song>> = BTreeMap::new();
        for song in songs {
            groups.entry(song.album.as_str()).or_default().push(song);
        }

        for group in groups.values_mut() {
            sort_canonically(group);
        }

        log::debug!("Indexed {} songs into {} albums", songs.len(), groups.len());
        Self { groups }
    }

    /// Canonically ordered songs of `album`, if it exists.
    #[must_use]
    pub fn group(&self, album: &str) -> Option<&[&'a Song]> {
        self.groups.get(album).map(Vec::as_slice)
    }

    /// Position of the song matching `key` inside its album group.
    #[must_use]
    pub fn position(&self, key: SongKey<'_>) -> Option<usize> {
        self.group(key.album)?
            .iter()
            .position(|song| song.key() == key)
    }

    /// Song following `song` in its album, or `None` at the album's end or if
    /// `song` is not indexed.
    #[must_use]
    pub fn next_after(&self, song: &Song) -> Option<&'a Song> {
        let group = self.group(&song.album)?;
        let position = self.position(song.key())?;
        group.get(position + 1).copied()
    }

    /// Album names with their groups, alphabetically by album.
    pub fn albums(&self) -> impl Iterator<Item = (&'a str, &[&'a Song])> + '_ {
        self.groups.iter().map(|(album, songs)| (*album, songs.as_slice()))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

fn sort_canonically(group: &mut [&Song]) {
    // `sort_by` is stable, which keeps duplicate track numbers in catalog order.
    group.sort_by(|a, b| match (a.track_number, b.track_number) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => a.title.cmp(&b.title),
    });
}
