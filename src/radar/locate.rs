use crate::{
    error::{Error, Result},
    spotify::CatalogService,
    types::{Playlist, PlaylistSummary},
    warning,
};

use super::RunContext;

/// Number of playlists scanned. Later pages are never requested.
pub const PLAYLIST_PAGE_LIMIT: u32 = 50;

/// What the locator found on the first page of the user's playlists.
#[derive(Debug, Clone)]
pub struct Located {
    /// The fetched source playlist, if one with the exact name exists.
    pub source: Option<Playlist>,
    /// Every playlist carrying the target name; all of them are stale.
    pub stale_targets: Vec<PlaylistSummary>,
    /// The source holds more entries than its first page returned.
    pub source_truncated: bool,
}

/// First playlist whose name equals `name` exactly (case-sensitive).
pub fn find_playlist<'a>(
    playlists: &'a [PlaylistSummary],
    name: &str,
) -> Option<&'a PlaylistSummary> {
    playlists.iter().find(|playlist| playlist.name == name)
}

/// All playlists whose name equals `name` exactly, in listing order.
pub fn find_playlists<'a>(
    playlists: &'a [PlaylistSummary],
    name: &str,
) -> Vec<&'a PlaylistSummary> {
    playlists
        .iter()
        .filter(|playlist| playlist.name == name)
        .collect()
}

/// Looks up the source and target playlists without changing anything.
///
/// A source that is listed but answers "not found" when fetched (deleted in
/// between, or not readable for this account) counts as absent.
pub async fn locate<S: CatalogService>(ctx: &RunContext<S>) -> Result<Located> {
    let page = ctx
        .service
        .current_user_playlists(PLAYLIST_PAGE_LIMIT, 0)
        .await?;

    if page.is_truncated() {
        warning!(
            "Only the first {} of your {} playlists are searched",
            page.items.len(),
            page.total
        );
    }

    let stale_targets = find_playlists(&page.items, &ctx.target_name)
        .into_iter()
        .cloned()
        .collect();

    let source = match find_playlist(&page.items, &ctx.source_name) {
        Some(summary) => match ctx.service.playlist(&summary.id).await {
            Ok(playlist) => Some(playlist),
            Err(Error::NotFound(_)) => None,
            Err(e) => return Err(e),
        },
        None => None,
    };

    let source_truncated = source
        .as_ref()
        .is_some_and(|playlist| playlist.tracks.is_truncated());
    if let Some(playlist) = source.as_ref().filter(|_| source_truncated) {
        warning!(
            "Only the first {} of {} entries in {} are read",
            playlist.tracks.items.len(),
            playlist.tracks.total,
            playlist.name
        );
    }

    Ok(Located {
        source,
        stale_targets,
        source_truncated,
    })
}
