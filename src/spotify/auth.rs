use std::{
    sync::Arc,
    time::{Duration, Instant},
};

use chrono::Utc;
use reqwest::{Client, Url};
use tokio::{net::TcpListener, sync::Mutex};

use crate::{
    config::{self, Credentials},
    error::{Error, Result},
    info,
    management::TokenManager,
    server::start_api_server,
    success,
    types::{PendingAuthorization, Token, TokenResponse},
    utils, warning,
};

/// How long the authorization flow waits for the browser redirect.
const AUTHORIZATION_TIMEOUT: Duration = Duration::from_secs(120);

/// Returns a session for `credentials`, authorizing interactively if needed.
///
/// A cached token is reused when it was granted every scope in
/// [`config::SPOTIFY_SCOPE`]; expired tokens are refreshed on first use by the
/// [`TokenManager`]. Without a usable cache the authorization code flow runs,
/// see [`authorize`].
pub async fn authenticate(credentials: &Credentials) -> Result<TokenManager> {
    match TokenManager::load(credentials.clone()).await {
        Ok(manager) if manager.current_token().covers(config::SPOTIFY_SCOPE) => {
            return Ok(manager);
        }
        Ok(_) => warning!("Cached token lacks required permissions, authorizing again"),
        Err(Error::Io(_)) => info!("No cached token for {}", credentials.username),
        Err(e) => warning!("Ignoring unreadable token cache: {}", e),
    }

    authorize(credentials).await
}

/// Runs the OAuth 2.0 authorization code flow and caches the resulting token.
///
/// 1. Binds a callback server to the host, port and path of the redirect URI
/// 2. Opens the authorization URL in the default browser (or prints it)
/// 3. Waits up to two minutes for the callback to exchange the code
/// 4. Persists the token for later runs
///
/// # Errors
///
/// Fails with [`Error::InvalidConfig`] for an unusable redirect URI, with
/// [`Error::Io`] if the callback address cannot be bound and with
/// [`Error::Auth`] if the user denies access, the `state` does not match,
/// the code exchange is rejected or the flow times out.
pub async fn authorize(credentials: &Credentials) -> Result<TokenManager> {
    let redirect = parse_redirect_uri(&credentials.redirect_uri)?;
    let host = redirect
        .host_str()
        .ok_or_else(|| invalid_redirect("missing host"))?
        .to_string();
    let port = redirect
        .port_or_known_default()
        .ok_or_else(|| invalid_redirect("missing port"))?;

    let csrf_state = utils::generate_state();
    let shared_state = Arc::new(Mutex::new(Some(PendingAuthorization {
        csrf_state: csrf_state.clone(),
        token: None,
        error: None,
    })));

    let listener = TcpListener::bind((host.as_str(), port)).await?;
    let server = tokio::spawn(start_api_server(
        listener,
        redirect.path().to_string(),
        Arc::clone(&shared_state),
        Arc::new(credentials.clone()),
    ));

    let auth_url = authorize_url(credentials, &csrf_state)?;
    if webbrowser::open(auth_url.as_str()).is_err() {
        warning!(
            "Failed to open browser. Please navigate to the following URL manually:\n{}",
            auth_url
        )
    } else {
        info!("Waiting for authorization in the browser...");
    }

    let token = wait_for_token(shared_state).await;
    server.abort();
    let token = token?;

    let manager = TokenManager::new(token, credentials.clone());
    manager.persist().await?;
    success!("Authentication successful!");

    Ok(manager)
}

/// Builds the URL the user has to visit to grant access.
pub fn authorize_url(credentials: &Credentials, csrf_state: &str) -> Result<Url> {
    Url::parse_with_params(
        &config::spotify_apiauth_url(),
        &[
            ("client_id", credentials.client_id.as_str()),
            ("response_type", "code"),
            ("redirect_uri", credentials.redirect_uri.as_str()),
            ("scope", config::SPOTIFY_SCOPE),
            ("state", csrf_state),
        ],
    )
    .map_err(|e| Error::InvalidConfig {
        key: "SPOTIFY_API_AUTH_URL",
        message: e.to_string(),
    })
}

/// Polls the shared state until the callback stored a token or an error.
async fn wait_for_token(shared_state: Arc<Mutex<Option<PendingAuthorization>>>) -> Result<Token> {
    let start = Instant::now();

    while start.elapsed() < AUTHORIZATION_TIMEOUT {
        {
            let lock = shared_state.lock().await;
            if let Some(pending) = lock.as_ref() {
                if let Some(token) = &pending.token {
                    return Ok(token.clone());
                }
                if let Some(error) = &pending.error {
                    return Err(Error::Auth(error.clone()));
                }
            }
        }
        tokio::time::sleep(Duration::from_millis(500)).await;
    }

    Err(Error::Auth(
        "timed out waiting for the authorization callback".to_string(),
    ))
}

/// Exchanges an authorization code for a token.
pub async fn exchange_code(credentials: &Credentials, code: &str) -> Result<Token> {
    let response = request_token(
        credentials,
        &[
            ("grant_type", "authorization_code"),
            ("code", code),
            ("redirect_uri", credentials.redirect_uri.as_str()),
        ],
    )
    .await?;

    Ok(token_from_response(response, None))
}

/// Exchanges a refresh token for a fresh access token.
///
/// Spotify may or may not rotate the refresh token; the old one is kept when
/// the response does not carry a new one.
pub async fn refresh_token(credentials: &Credentials, refresh_token: &str) -> Result<Token> {
    let response = request_token(
        credentials,
        &[
            ("grant_type", "refresh_token"),
            ("refresh_token", refresh_token),
        ],
    )
    .await?;

    Ok(token_from_response(response, Some(refresh_token)))
}

async fn request_token(credentials: &Credentials, form: &[(&str, &str)]) -> Result<TokenResponse> {
    let client = Client::new();
    let response = client
        .post(config::spotify_apitoken_url())
        .basic_auth(&credentials.client_id, Some(&credentials.client_secret))
        .form(form)
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(Error::Auth(format!("token request rejected ({}): {}", status, body)));
    }

    Ok(response.json::<TokenResponse>().await?)
}

fn token_from_response(response: TokenResponse, previous_refresh: Option<&str>) -> Token {
    Token {
        access_token: response.access_token,
        refresh_token: response
            .refresh_token
            .or_else(|| previous_refresh.map(str::to_string))
            .unwrap_or_default(),
        scope: response.scope.unwrap_or_default(),
        expires_in: response.expires_in,
        obtained_at: Utc::now().timestamp().max(0) as u64,
    }
}

fn parse_redirect_uri(redirect_uri: &str) -> Result<Url> {
    Url::parse(redirect_uri).map_err(|e| invalid_redirect(&e.to_string()))
}

fn invalid_redirect(message: &str) -> Error {
    Error::InvalidConfig {
        key: config::ENV_REDIRECT_URI,
        message: message.to_string(),
    }
}
