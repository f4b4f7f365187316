//! # Spotify Integration Module
//!
//! Everything albumradar needs from the Spotify Web API: the authorization
//! flow and the handful of catalog operations the release pipeline calls.
//!
//! ## Architecture
//!
//! ```text
//! Pipeline (crate::radar)
//!          ↓
//! CatalogService trait
//!          ↓
//! SpotifyClient (reqwest, JSON, bearer token from TokenManager)
//!          ↓
//! Spotify Web API
//! ```
//!
//! The pipeline only sees [`CatalogService`], so it runs the same against the
//! real client and against an in-memory fake in the tests.
//!
//! ## API Coverage
//!
//! - `GET /me/playlists` - the user's playlists, first page only
//! - `GET /playlists/{id}` - one playlist with its entries
//! - `DELETE /playlists/{id}/followers` - unfollow (delete) a playlist
//! - `POST /users/{user_id}/playlists` - create a playlist
//! - `GET /albums/{id}/tracks` - tracks of an album for a market
//! - `POST /playlists/{id}/tracks` - add up to 100 track URIs
//! - `POST /api/token` - code exchange and token refresh (see [`auth`])
//!
//! ## Errors
//!
//! Non-success responses are mapped with [`crate::error::Error::from_status`].
//! Nothing is retried: a `429` surfaces as
//! [`crate::error::Error::RateLimited`] carrying the `Retry-After` value.

pub mod auth;
mod client;

use async_trait::async_trait;

pub use client::SpotifyClient;

use crate::{
    error::Result,
    types::{
        AddTrackToPlaylistResponse, AlbumTrack, CreatePlaylistRequest, CreatePlaylistResponse,
        Page, Playlist, PlaylistSummary,
    },
};

/// Largest number of track URIs a single add-items call accepts.
pub const ADD_ITEMS_BATCH_LIMIT: usize = 100;

/// Catalog operations the release pipeline depends on.
#[async_trait]
pub trait CatalogService: Send + Sync {
    /// One page of the current user's playlists.
    async fn current_user_playlists(
        &self,
        limit: u32,
        offset: u32,
    ) -> Result<Page<PlaylistSummary>>;

    /// A playlist including its first page of entries.
    async fn playlist(&self, playlist_id: &str) -> Result<Playlist>;

    /// Unfollows the playlist, which deletes it for its owner.
    async fn unfollow_playlist(&self, playlist_id: &str) -> Result<()>;

    async fn create_playlist(
        &self,
        user_id: &str,
        request: &CreatePlaylistRequest,
    ) -> Result<CreatePlaylistResponse>;

    /// One page of an album's tracks as available in `market`.
    async fn album_tracks(
        &self,
        album_id: &str,
        limit: u32,
        offset: u32,
        market: &str,
    ) -> Result<Page<AlbumTrack>>;

    /// Appends `uris` to the playlist. At most [`ADD_ITEMS_BATCH_LIMIT`] per call.
    async fn add_items(
        &self,
        playlist_id: &str,
        uris: &[String],
    ) -> Result<AddTrackToPlaylistResponse>;
}
