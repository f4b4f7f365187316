//! # Release Radar pipeline
//!
//! Turns the full-length albums found in the user's "Release Radar" playlist
//! into a fresh "New Album Releases" playlist.
//!
//! ```text
//! locate  → filter  → expand  → publish
//! (source,   (full     (album    (delete stale target,
//!  targets)   albums)   tracks)   create, add in batches)
//! ```
//!
//! Every stage takes the [`RunContext`] plus the previous stage's output. All
//! remote calls go through [`CatalogService`] and are awaited one at a time.

pub mod expand;
pub mod filter;
pub mod locate;
pub mod publish;

use crate::{
    config,
    error::Result,
    info,
    spotify::CatalogService,
    types::Album,
    utils,
};

/// Recommendation playlist the albums are taken from.
pub const SOURCE_PLAYLIST_NAME: &str = "Release Radar";

/// Playlist created (and replaced) by every run.
pub const TARGET_PLAYLIST_NAME: &str = "New Album Releases";

/// Everything a run needs besides the data flowing between the stages.
pub struct RunContext<S> {
    pub service: S,
    pub username: String,
    pub market: String,
    pub source_name: String,
    pub target_name: String,
}

impl<S: CatalogService> RunContext<S> {
    pub fn new(service: S, username: impl Into<String>) -> Self {
        Self {
            service,
            username: username.into(),
            market: config::spotify_market(),
            source_name: SOURCE_PLAYLIST_NAME.to_string(),
            target_name: TARGET_PLAYLIST_NAME.to_string(),
        }
    }

    pub fn with_market(mut self, market: impl Into<String>) -> Self {
        self.market = market.into();
        self
    }
}

/// How a run ended. Only [`Outcome::Published`] changed the user's library
/// beyond removing a stale target playlist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The source playlist is missing or has no tracks.
    SourceMissing,
    /// The source holds no track from a full-length album.
    NoQualifyingAlbums,
    Published(publish::Published),
}

/// Runs the whole pipeline once.
///
/// # Errors
///
/// Any service error aborts the run where it happened. Nothing created up to
/// that point is rolled back.
pub async fn run<S: CatalogService>(ctx: &RunContext<S>) -> Result<Outcome> {
    let located = locate::locate(ctx).await?;

    let Some(source) = located.source.filter(|playlist| playlist.tracks.total > 0) else {
        info!("{} playlist not found or empty", ctx.source_name);
        return Ok(Outcome::SourceMissing);
    };

    publish::remove_stale(ctx, &located.stale_targets).await?;

    let albums = filter::qualifying_albums(&source.tracks.items);
    if albums.is_empty() {
        info!("No new album releases found");
        return Ok(Outcome::NoQualifyingAlbums);
    }

    print_albums(&albums);

    let uris = expand::expand(ctx, &albums).await?;
    let published = publish::publish(ctx, albums.len(), &uris).await?;

    Ok(Outcome::Published(published))
}

/// Read-only variant of [`run`]: the qualifying albums, or `None` when the
/// source playlist is missing or empty.
pub async fn preview<S: CatalogService>(ctx: &RunContext<S>) -> Result<Option<Vec<Album>>> {
    let located = locate::locate(ctx).await?;

    Ok(located
        .source
        .filter(|playlist| playlist.tracks.total > 0)
        .map(|source| filter::qualifying_albums(&source.tracks.items)))
}

fn print_albums(albums: &[Album]) {
    info!("{} new albums released this week:", albums.len());
    for (index, album) in albums.iter().enumerate() {
        info!("{}", utils::format_album_line(index + 1, album));
    }
}
