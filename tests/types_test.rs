use albumradar::config::{Credentials, SPOTIFY_SCOPE};
use albumradar::error::Error;
use albumradar::management::TokenManager;
use albumradar::radar::filter::qualifying_albums;
use albumradar::spotify::auth::authorize_url;
use albumradar::types::{AlbumTrack, AlbumType, Page, Playlist, PlaylistSummary, Token};
use chrono::Utc;

// Helper function to create test credentials
fn create_test_credentials() -> Credentials {
    Credentials {
        client_id: "client123".to_string(),
        client_secret: "secret456".to_string(),
        redirect_uri: "http://127.0.0.1:8888/callback".to_string(),
        username: "listener".to_string(),
    }
}

// Helper function to create a test token
fn create_test_token(scope: &str, obtained_at: u64, expires_in: u64) -> Token {
    Token {
        access_token: "access".to_string(),
        refresh_token: "refresh".to_string(),
        scope: scope.to_string(),
        expires_in,
        obtained_at,
    }
}

#[test]
fn test_deserialize_playlist_with_items() {
    let json = r#"{
        "id": "37i9dQZEVXbs",
        "name": "Release Radar",
        "public": false,
        "tracks": {
            "href": "https://api.spotify.com/v1/playlists/37i9dQZEVXbs/tracks",
            "limit": 100,
            "offset": 0,
            "total": 2,
            "next": null,
            "items": [
                {
                    "added_at": "2024-05-17T00:00:00Z",
                    "track": {
                        "id": "t1",
                        "name": "Opening",
                        "uri": "spotify:track:t1",
                        "album": {
                            "id": "alb1",
                            "name": "First Light",
                            "album_type": "album",
                            "total_tracks": 11,
                            "release_date": "2024-05-17",
                            "release_date_precision": "day",
                            "artists": [{"id": "ar1", "name": "The Band"}]
                        }
                    }
                },
                { "added_at": "2024-05-17T00:00:00Z", "track": null }
            ]
        }
    }"#;

    let playlist: Playlist = serde_json::from_str(json).unwrap();

    assert_eq!(playlist.name, "Release Radar");
    assert_eq!(playlist.tracks.total, 2);
    assert_eq!(playlist.tracks.items.len(), 2);

    // Missing tracks deserialize as None
    assert!(playlist.tracks.items[1].track.is_none());

    let album = &playlist.tracks.items[0].track.as_ref().unwrap().album;
    assert_eq!(album.album_type, AlbumType::Album);
    assert_eq!(album.primary_artist(), "The Band");
    assert_eq!(album.total_tracks, 11);
}

#[test]
fn test_deserialize_playlist_with_local_file() {
    let json = r#"{
        "id": "mine",
        "name": "Release Radar",
        "tracks": {
            "limit": 100,
            "offset": 0,
            "total": 2,
            "next": null,
            "items": [
                {
                    "is_local": true,
                    "track": {
                        "id": null,
                        "name": "Bedroom Demo",
                        "uri": "spotify:local:Me:Demos:Bedroom+Demo:180",
                        "is_local": true,
                        "album": {
                            "id": null,
                            "name": "Demos",
                            "album_type": null,
                            "release_date": null,
                            "artists": []
                        }
                    }
                },
                {
                    "is_local": false,
                    "track": {
                        "id": "t2",
                        "name": "Opening",
                        "uri": "spotify:track:t2",
                        "album": {
                            "id": "alb2",
                            "name": "Second Wind",
                            "album_type": "album",
                            "total_tracks": 9,
                            "release_date": "2024-05-17",
                            "artists": [{"id": "ar2", "name": "The Other Band"}]
                        }
                    }
                }
            ]
        }
    }"#;

    let playlist: Playlist = serde_json::from_str(json).unwrap();

    let local = playlist.tracks.items[0].track.as_ref().unwrap();
    assert!(local.is_local);
    assert!(local.id.is_none());
    assert_eq!(local.album.id, "");
    assert_eq!(local.album.album_type, AlbumType::Other);
    assert_eq!(local.album.primary_artist(), "Unknown artist");

    // The local file is skipped, the regular album still qualifies
    let albums = qualifying_albums(&playlist.tracks.items);
    assert_eq!(albums.len(), 1);
    assert_eq!(albums[0].id, "alb2");
}

#[test]
fn test_deserialize_album_types() {
    let parse = |value: &str| -> AlbumType {
        serde_json::from_str(&format!("\"{}\"", value)).unwrap()
    };

    assert_eq!(parse("album"), AlbumType::Album);
    assert_eq!(parse("single"), AlbumType::Single);
    assert_eq!(parse("compilation"), AlbumType::Compilation);

    // Anything else is kept apart and never qualifies
    assert_eq!(parse("appears_on"), AlbumType::Other);
    assert_eq!(parse("ALBUM"), AlbumType::Other);
}

#[test]
fn test_deserialize_playlist_page() {
    let json = r#"{
        "items": [
            {"id": "p1", "name": "New Album Releases", "tracks": {"href": "x", "total": 40}},
            {"id": "p2", "name": "Release Radar", "tracks": {"href": "y", "total": 30}}
        ],
        "limit": 50,
        "offset": 0,
        "total": 72,
        "next": "https://api.spotify.com/v1/me/playlists?offset=50&limit=50"
    }"#;

    let page: Page<PlaylistSummary> = serde_json::from_str(json).unwrap();

    assert_eq!(page.items.len(), 2);
    assert_eq!(page.items[1].tracks.as_ref().unwrap().total, 30);

    // More playlists exist than were returned
    assert!(page.is_truncated());
}

#[test]
fn test_album_track_page_truncation() {
    let json = r#"{
        "items": [
            {"id": "a", "name": "One", "uri": "spotify:track:a", "track_number": 1},
            {"id": "b", "name": "Two", "uri": "spotify:track:b", "track_number": 2}
        ],
        "limit": 50,
        "offset": 0,
        "total": 2,
        "next": null
    }"#;

    let page: Page<AlbumTrack> = serde_json::from_str(json).unwrap();

    assert!(!page.is_truncated());
    assert_eq!(page.items[1].uri, "spotify:track:b");
}

#[test]
fn test_error_from_status_uses_service_message() {
    let body = r#"{"error": {"status": 400, "message": "Invalid base62 id"}}"#;

    match Error::from_status(400, None, body) {
        Error::BadRequest(message) => assert_eq!(message, "Invalid base62 id"),
        other => panic!("unexpected error: {:?}", other),
    }
}

#[test]
fn test_error_from_status_kinds() {
    // Not found
    assert!(matches!(
        Error::from_status(404, None, r#"{"error": {"status": 404, "message": "Not found."}}"#),
        Error::NotFound(_)
    ));

    // Rate limiting keeps the Retry-After value
    assert!(matches!(
        Error::from_status(429, Some(7), ""),
        Error::RateLimited(Some(7))
    ));
    assert!(matches!(
        Error::from_status(429, None, ""),
        Error::RateLimited(None)
    ));

    // Token problems
    assert!(matches!(
        Error::from_status(401, None, "expired"),
        Error::Unauthorized(_)
    ));
    assert!(matches!(
        Error::from_status(403, None, ""),
        Error::Unauthorized(_)
    ));

    // Everything else keeps the status code and raw body
    match Error::from_status(502, None, "Bad Gateway") {
        Error::Api { status, message } => {
            assert_eq!(status, 502);
            assert_eq!(message, "Bad Gateway");
        }
        other => panic!("unexpected error: {:?}", other),
    }

    // Empty bodies fall back to the status code
    match Error::from_status(500, None, "  ") {
        Error::Api { message, .. } => assert_eq!(message, "HTTP 500"),
        other => panic!("unexpected error: {:?}", other),
    }
}

#[test]
fn test_rate_limited_message() {
    assert_eq!(
        Error::RateLimited(Some(7)).to_string(),
        "Rate limited by Spotify, retry after 7 seconds"
    );

    // Without a Retry-After header no wait time is made up
    let message = Error::RateLimited(None).to_string();
    assert_eq!(message, "Rate limited by Spotify");
    assert!(!message.contains('0'));
}

#[test]
fn test_token_covers_scope() {
    let token = create_test_token(SPOTIFY_SCOPE, 0, 3600);
    assert!(token.covers(SPOTIFY_SCOPE));

    // Order of granted scopes does not matter
    let reversed: Vec<&str> = SPOTIFY_SCOPE.split_whitespace().rev().collect();
    let token = create_test_token(&reversed.join(" "), 0, 3600);
    assert!(token.covers(SPOTIFY_SCOPE));

    // A missing scope is detected
    let token = create_test_token("playlist-read-private", 0, 3600);
    assert!(!token.covers(SPOTIFY_SCOPE));
    assert!(token.covers("playlist-read-private"));
}

#[test]
fn test_token_manager_expiry() {
    let now = Utc::now().timestamp() as u64;

    // Freshly obtained token is valid
    let manager = TokenManager::new(
        create_test_token(SPOTIFY_SCOPE, now, 3600),
        create_test_credentials(),
    );
    assert!(!manager.is_expired());

    // Token within the safety margin counts as expired
    let manager = TokenManager::new(
        create_test_token(SPOTIFY_SCOPE, now - 3500, 3600),
        create_test_credentials(),
    );
    assert!(manager.is_expired());

    // Very short lifetimes do not underflow
    let manager = TokenManager::new(
        create_test_token(SPOTIFY_SCOPE, now, 60),
        create_test_credentials(),
    );
    assert!(manager.is_expired());
}

#[test]
fn test_token_path_is_per_user() {
    let path = TokenManager::token_path("listener");
    assert!(path.ends_with("albumradar/cache/token-listener.json"));
    assert_ne!(path, TokenManager::token_path("someone-else"));
}

#[test]
fn test_authorize_url_parameters() {
    let url = authorize_url(&create_test_credentials(), "abc123").unwrap();
    let params: Vec<(String, String)> = url
        .query_pairs()
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();

    let get = |key: &str| {
        params
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    };

    assert_eq!(get("client_id"), Some("client123"));
    assert_eq!(get("response_type"), Some("code"));
    assert_eq!(get("redirect_uri"), Some("http://127.0.0.1:8888/callback"));
    assert_eq!(get("scope"), Some(SPOTIFY_SCOPE));
    assert_eq!(get("state"), Some("abc123"));

    // The client secret never appears in the URL
    assert!(!url.as_str().contains("secret456"));
}
