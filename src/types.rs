use serde::{Deserialize, Deserializer, Serialize};
use tabled::Tabled;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Token {
    pub access_token: String,
    pub refresh_token: String,
    pub scope: String,
    pub expires_in: u64,
    pub obtained_at: u64,
}

impl Token {
    /// Returns true when every scope in `required` (space separated) was granted.
    pub fn covers(&self, required: &str) -> bool {
        let granted: Vec<&str> = self.scope.split_whitespace().collect();
        required
            .split_whitespace()
            .all(|scope| granted.contains(&scope))
    }
}

/// Raw body of a successful `/api/token` call.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub scope: Option<String>,
    #[serde(default = "default_expires_in")]
    pub expires_in: u64,
}

fn default_expires_in() -> u64 {
    3600
}

/// State shared between the authorization flow and the callback handler.
#[derive(Debug, Clone)]
pub struct PendingAuthorization {
    pub csrf_state: String,
    pub token: Option<Token>,
    pub error: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorResponse {
    pub error: ApiErrorDetail,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorDetail {
    #[serde(default)]
    pub status: u16,
    #[serde(default)]
    pub message: String,
}

/// Spotify paging object.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    #[serde(default)]
    pub total: u32,
    #[serde(default)]
    pub limit: u32,
    #[serde(default)]
    pub offset: u32,
    #[serde(default)]
    pub next: Option<String>,
}

impl<T> Page<T> {
    /// True when the service holds more items than this page returned.
    pub fn is_truncated(&self) -> bool {
        (self.offset as usize + self.items.len()) < self.total as usize
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TracksRef {
    #[serde(default)]
    pub total: u32,
}

/// A playlist as listed by `/me/playlists`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistSummary {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub tracks: Option<TracksRef>,
}

/// A playlist fetched by id, with its first page of entries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Playlist {
    pub id: String,
    pub name: String,
    pub tracks: Page<PlaylistItem>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistItem {
    /// `None` for entries that are no longer available.
    #[serde(default)]
    pub track: Option<Track>,
}

/// A playlist entry's track.
///
/// Local files are tracks too: `is_local` is set, `id` is null and so are the
/// album's `id` and `album_type`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Track {
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
    pub uri: String,
    #[serde(default)]
    pub is_local: bool,
    pub album: Album,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlbumType {
    Album,
    Single,
    Compilation,
    #[default]
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Album {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub album_type: AlbumType,
    #[serde(default, deserialize_with = "null_as_default")]
    pub artists: Vec<AlbumArtist>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub release_date: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub total_tracks: u32,
}

/// Reads an explicit `null` as the type's default.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl Album {
    pub fn primary_artist(&self) -> &str {
        self.artists
            .first()
            .map(|artist| artist.name.as_str())
            .unwrap_or("Unknown artist")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlbumArtist {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
}

/// Track entry returned by `/albums/{id}/tracks`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlbumTrack {
    pub id: Option<String>,
    pub name: String,
    pub uri: String,
    #[serde(default)]
    pub track_number: u32,
}

#[derive(Tabled)]
pub struct AlbumTableRow {
    pub artist: String,
    pub album: String,
    pub release_date: String,
    pub tracks: u32,
}

impl From<&Album> for AlbumTableRow {
    fn from(album: &Album) -> Self {
        Self {
            artist: album.primary_artist().to_string(),
            album: album.name.clone(),
            release_date: album.release_date.clone(),
            tracks: album.total_tracks,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePlaylistRequest {
    pub name: String,
    pub description: String,
    pub public: bool,
    pub collaborative: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePlaylistResponse {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddTrackToPlaylistRequest {
    pub uris: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddTrackToPlaylistResponse {
    pub snapshot_id: String,
}
