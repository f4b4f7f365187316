use crate::{
    error::Result,
    info,
    spotify::{ADD_ITEMS_BATCH_LIMIT, CatalogService},
    success,
    types::{CreatePlaylistRequest, PlaylistSummary},
    utils,
};

use super::RunContext;

const PLAYLIST_DESCRIPTION: &str = "Full-length albums from this week's Release Radar";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Published {
    pub playlist_id: String,
    pub albums: usize,
    pub tracks: usize,
    pub batches: usize,
}

/// Unfollows every previous output playlist.
pub async fn remove_stale<S: CatalogService>(
    ctx: &RunContext<S>,
    stale_targets: &[PlaylistSummary],
) -> Result<()> {
    for playlist in stale_targets {
        info!("Deleting previous {} playlist", playlist.name);
        ctx.service.unfollow_playlist(&playlist.id).await?;
    }
    Ok(())
}

/// Creates the target playlist and fills it with `uris` in order.
///
/// Batches are sent one after another. If one fails the error is returned and
/// the playlist keeps whatever was added before.
pub async fn publish<S: CatalogService>(
    ctx: &RunContext<S>,
    albums: usize,
    uris: &[String],
) -> Result<Published> {
    info!("Creating {} playlist...", ctx.target_name);
    let request = CreatePlaylistRequest {
        name: ctx.target_name.clone(),
        description: PLAYLIST_DESCRIPTION.to_string(),
        public: false,
        collaborative: false,
    };
    let playlist = ctx
        .service
        .create_playlist(&ctx.username, &request)
        .await?;

    info!("Adding {} tracks to the playlist...", uris.len());
    let batches = utils::divide_chunks(uris, ADD_ITEMS_BATCH_LIMIT);
    for batch in &batches {
        ctx.service.add_items(&playlist.id, batch).await?;
    }

    success!(
        "{} tracks from {} albums added to {}",
        uris.len(),
        albums,
        ctx.target_name
    );

    Ok(Published {
        playlist_id: playlist.id,
        albums,
        tracks: uris.len(),
        batches: batches.len(),
    })
}
