use crate::{
    types::{Album, AlbumType, PlaylistItem},
    utils,
};

/// Only albums typed exactly as "album" qualify. Singles (which include EPs)
/// and compilations do not, whatever their track count.
pub fn is_full_album(album: &Album) -> bool {
    album.album_type == AlbumType::Album
}

/// Parent albums of the playlist entries that are full albums, one per album
/// id, in the order they first appear. Local files are skipped.
pub fn qualifying_albums(items: &[PlaylistItem]) -> Vec<Album> {
    let mut albums: Vec<Album> = items
        .iter()
        .filter_map(|item| item.track.as_ref())
        .filter(|track| !track.is_local)
        .map(|track| &track.album)
        .filter(|album| is_full_album(album))
        .cloned()
        .collect();

    utils::remove_duplicate_albums(&mut albums);
    albums
}
