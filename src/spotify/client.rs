use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, header::RETRY_AFTER};
use serde::de::DeserializeOwned;
use tokio::sync::Mutex;

use crate::{
    config,
    error::{Error, Result},
    management::TokenManager,
    types::{
        AddTrackToPlaylistRequest, AddTrackToPlaylistResponse, AlbumTrack, CreatePlaylistRequest,
        CreatePlaylistResponse, Page, Playlist, PlaylistSummary,
    },
};

use super::{ADD_ITEMS_BATCH_LIMIT, CatalogService};

/// [`CatalogService`] backed by the Spotify Web API.
pub struct SpotifyClient {
    http: Client,
    api_url: String,
    tokens: Mutex<TokenManager>,
}

impl SpotifyClient {
    pub fn new(tokens: TokenManager) -> Self {
        Self::with_api_url(tokens, config::spotify_apiurl())
    }

    pub fn with_api_url(tokens: TokenManager, api_url: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            api_url: api_url.into().trim_end_matches('/').to_string(),
            tokens: Mutex::new(tokens),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.api_url, path)
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response> {
        let token = self.tokens.lock().await.get_valid_token().await?;
        let response = request.bearer_auth(token).send().await?;
        check_response(response).await
    }

    async fn send_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        let response = self.send(request).await?;
        Ok(response.json::<T>().await?)
    }
}

/// Turns a non-success response into the matching [`Error`].
async fn check_response(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let retry_after = response
        .headers()
        .get(RETRY_AFTER)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.trim().parse::<u64>().ok());
    let body = response.text().await.unwrap_or_default();

    Err(Error::from_status(status.as_u16(), retry_after, &body))
}

#[async_trait]
impl CatalogService for SpotifyClient {
    async fn current_user_playlists(
        &self,
        limit: u32,
        offset: u32,
    ) -> Result<Page<PlaylistSummary>> {
        let request = self
            .http
            .get(self.url("/me/playlists"))
            .query(&[("limit", limit), ("offset", offset)]);
        self.send_json(request).await
    }

    async fn playlist(&self, playlist_id: &str) -> Result<Playlist> {
        let request = self
            .http
            .get(self.url(&format!("/playlists/{}", playlist_id)))
            .query(&[("additional_types", "track")]);
        self.send_json(request).await
    }

    async fn unfollow_playlist(&self, playlist_id: &str) -> Result<()> {
        let request = self
            .http
            .delete(self.url(&format!("/playlists/{}/followers", playlist_id)));
        self.send(request).await?;
        Ok(())
    }

    async fn create_playlist(
        &self,
        user_id: &str,
        request: &CreatePlaylistRequest,
    ) -> Result<CreatePlaylistResponse> {
        let request = self
            .http
            .post(self.url(&format!("/users/{}/playlists", user_id)))
            .json(request);
        self.send_json(request).await
    }

    async fn album_tracks(
        &self,
        album_id: &str,
        limit: u32,
        offset: u32,
        market: &str,
    ) -> Result<Page<AlbumTrack>> {
        let request = self
            .http
            .get(self.url(&format!("/albums/{}/tracks", album_id)))
            .query(&[
                ("limit", limit.to_string()),
                ("offset", offset.to_string()),
                ("market", market.to_string()),
            ]);
        self.send_json(request).await
    }

    async fn add_items(
        &self,
        playlist_id: &str,
        uris: &[String],
    ) -> Result<AddTrackToPlaylistResponse> {
        if uris.len() > ADD_ITEMS_BATCH_LIMIT {
            return Err(Error::BatchTooLarge {
                size: uris.len(),
                limit: ADD_ITEMS_BATCH_LIMIT,
            });
        }

        let body = AddTrackToPlaylistRequest {
            uris: uris.to_vec(),
        };
        let request = self
            .http
            .post(self.url(&format!("/playlists/{}/tracks", playlist_id)))
            .json(&body);
        self.send_json(request).await
    }
}
