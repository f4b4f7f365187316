//! Configuration management for albumradar.
//!
//! Values come from the process environment. Before anything is read,
//! [`load_env`] pulls in `.env` files so credentials can live outside the
//! shell profile. Lookup order:
//! 1. Environment variables (highest priority)
//! 2. `.env` in the current working directory
//! 3. `.env` in the local data directory (`albumradar/.env`)
//! 4. Application defaults (only for the optional values)
//!
//! Credentials use the widespread `SPOTIPY_*` variable names, so an existing
//! setup keeps working.

use std::{env, path::PathBuf};

use crate::error::{Error, Result};

pub const ENV_CLIENT_ID: &str = "SPOTIPY_CLIENT_ID";
pub const ENV_CLIENT_SECRET: &str = "SPOTIPY_CLIENT_SECRET";
pub const ENV_REDIRECT_URI: &str = "SPOTIPY_REDIRECT_URI";
pub const ENV_USERNAME: &str = "SPOTIFY_USERNAME";

/// Permissions requested during authorization.
pub const SPOTIFY_SCOPE: &str = "user-library-read user-library-modify playlist-modify-public playlist-modify-private playlist-read-private";

const DEFAULT_API_URL: &str = "https://api.spotify.com/v1";
const DEFAULT_AUTH_URL: &str = "https://accounts.spotify.com/authorize";
const DEFAULT_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
const DEFAULT_MARKET: &str = "US";

/// Loads `.env` files from the working directory and the local data directory.
///
/// Neither file has to exist. Variables already present in the environment are
/// never overwritten.
///
/// # Directory Structure
///
/// - Linux: `~/.local/share/albumradar/.env`
/// - macOS: `~/Library/Application Support/albumradar/.env`
/// - Windows: `%LOCALAPPDATA%/albumradar/.env`
///
/// # Errors
///
/// Returns an error if the data directory cannot be created or an existing
/// `.env` file cannot be parsed.
pub async fn load_env() -> Result<()> {
    let path = data_dir().join(".env");
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent).await?;
    }

    if let Err(e) = dotenv::dotenv() {
        if !e.not_found() {
            return Err(Error::InvalidConfig {
                key: ".env",
                message: e.to_string(),
            });
        }
    }

    if path.is_file() {
        dotenv::from_path(&path).map_err(|e| Error::InvalidConfig {
            key: ".env",
            message: e.to_string(),
        })?;
    }

    Ok(())
}

/// Root of everything albumradar stores locally.
pub fn data_dir() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("albumradar");
    path
}

/// The four values needed to act on behalf of one Spotify account.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uri: String,
    pub username: String,
}

impl Credentials {
    /// Reads all required credentials, failing on the first missing one.
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            client_id: required(ENV_CLIENT_ID)?,
            client_secret: required(ENV_CLIENT_SECRET)?,
            redirect_uri: required(ENV_REDIRECT_URI)?,
            username: required(ENV_USERNAME)?,
        })
    }
}

fn required(key: &'static str) -> Result<String> {
    match env::var(key) {
        Ok(value) if !value.trim().is_empty() => Ok(value.trim().to_string()),
        _ => Err(Error::MissingConfig(key)),
    }
}

fn optional(key: &str, default: &str) -> String {
    env::var(key)
        .ok()
        .filter(|value| !value.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}

/// Country code used for album track lookups (`SPOTIFY_MARKET`, default `US`).
pub fn spotify_market() -> String {
    optional("SPOTIFY_MARKET", DEFAULT_MARKET)
}

/// Spotify Web API base URL (`SPOTIFY_API_URL`).
pub fn spotify_apiurl() -> String {
    optional("SPOTIFY_API_URL", DEFAULT_API_URL)
}

/// Spotify OAuth authorization URL (`SPOTIFY_API_AUTH_URL`).
pub fn spotify_apiauth_url() -> String {
    optional("SPOTIFY_API_AUTH_URL", DEFAULT_AUTH_URL)
}

/// Spotify OAuth token exchange URL (`SPOTIFY_API_TOKEN_URL`).
pub fn spotify_apitoken_url() -> String {
    optional("SPOTIFY_API_TOKEN_URL", DEFAULT_TOKEN_URL)
}
