use std::path::PathBuf;

use chrono::Utc;

use crate::{
    config::{self, Credentials},
    error::Result,
    spotify,
    types::Token,
};

/// Seconds before the real expiry at which a token is treated as expired.
const EXPIRY_MARGIN_SECS: u64 = 240;

/// Owns the access token of one account and keeps it fresh.
pub struct TokenManager {
    token: Token,
    credentials: Credentials,
}

impl TokenManager {
    pub fn new(token: Token, credentials: Credentials) -> Self {
        TokenManager { token, credentials }
    }

    /// Loads the cached token for `credentials.username`.
    pub async fn load(credentials: Credentials) -> Result<Self> {
        let path = Self::token_path(&credentials.username);
        let content = async_fs::read_to_string(&path).await?;
        let token: Token = serde_json::from_str(&content)?;
        Ok(Self { token, credentials })
    }

    pub async fn persist(&self) -> Result<()> {
        let path = Self::token_path(&self.credentials.username);
        if let Some(parent) = path.parent() {
            async_fs::create_dir_all(parent).await?;
        }

        let json = serde_json::to_string_pretty(&self.token)?;
        async_fs::write(&path, json).await?;
        Ok(())
    }

    /// Returns an access token, refreshing and re-caching it first if needed.
    pub async fn get_valid_token(&mut self) -> Result<String> {
        if self.is_expired() {
            let new_token =
                spotify::auth::refresh_token(&self.credentials, &self.token.refresh_token).await?;
            self.token = new_token;
            self.persist().await?;
        }

        Ok(self.token.access_token.clone())
    }

    pub fn is_expired(&self) -> bool {
        let now = Utc::now().timestamp().max(0) as u64;
        let valid_for = self.token.expires_in.saturating_sub(EXPIRY_MARGIN_SECS);
        now >= self.token.obtained_at.saturating_add(valid_for)
    }

    pub fn token_path(username: &str) -> PathBuf {
        let mut path = config::data_dir();
        path.push(format!("cache/token-{}.json", username));
        path
    }

    pub fn current_token(&self) -> &Token {
        &self.token
    }
}
