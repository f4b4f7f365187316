use std::collections::HashSet;

use rand::{Rng, distr::Alphanumeric};

use crate::types::Album;

/// Random value for the OAuth `state` parameter.
pub fn generate_state() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(32)
        .map(char::from)
        .collect()
}

/// Splits `items` into consecutive chunks of at most `size` elements.
///
/// Concatenating the result gives back `items` in the original order. Only the
/// last chunk may be shorter than `size`.
///
/// # Panics
///
/// Panics if `size` is zero.
pub fn divide_chunks<T: Clone>(items: &[T], size: usize) -> Vec<Vec<T>> {
    assert!(size > 0, "chunk size must be at least 1");
    items.chunks(size).map(<[T]>::to_vec).collect()
}

/// Keeps the first album seen for every album id.
pub fn remove_duplicate_albums(albums: &mut Vec<Album>) {
    let mut seen_ids = HashSet::new();
    albums.retain(|album| seen_ids.insert(album.id.clone()));
}

/// Summary line printed for one album, numbered from 1.
pub fn format_album_line(position: usize, album: &Album) -> String {
    format!(
        "{}:\t{} released \"{}\" on {}",
        position,
        album.primary_artist(),
        album.name,
        album.release_date
    )
}
