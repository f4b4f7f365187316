use std::sync::Arc;

use axum::{Extension, extract::Query, response::Html};
use serde::Deserialize;
use tokio::sync::Mutex;

use crate::{config::Credentials, spotify, types::PendingAuthorization, warning};

#[derive(Debug, Deserialize)]
pub struct CallbackParams {
    pub code: Option<String>,
    pub state: Option<String>,
    pub error: Option<String>,
}

const NO_AUTHORIZATION: &str = "<h4>No authorization in progress.</h4>";

/// Validates the redirect and exchanges the code.
///
/// Every outcome except "no authorization in progress" is stored in the shared
/// state so the waiting flow returns at once. The lock is not held while the
/// token request is in flight.
pub async fn callback(
    Query(params): Query<CallbackParams>,
    Extension(shared_state): Extension<Arc<Mutex<Option<PendingAuthorization>>>>,
    Extension(credentials): Extension<Arc<Credentials>>,
) -> Html<&'static str> {
    let code = {
        let mut state = shared_state.lock().await;
        let Some(pending) = state.as_mut() else {
            return Html(NO_AUTHORIZATION);
        };

        if let Some(error) = params.error {
            pending.error = Some(format!("access was not granted: {}", error));
            return Html("<h4>Authorization denied.</h4>");
        }

        if params.state.as_deref() != Some(pending.csrf_state.as_str()) {
            pending.error = Some("state mismatch in authorization callback".to_string());
            return Html("<h4>Invalid authorization state.</h4>");
        }

        match params.code {
            Some(code) => code,
            None => {
                pending.error = Some("missing authorization code".to_string());
                return Html("<h4>Missing authorization code.</h4>");
            }
        }
    };

    let result = spotify::auth::exchange_code(&credentials, &code).await;

    let mut state = shared_state.lock().await;
    let Some(pending) = state.as_mut() else {
        return Html(NO_AUTHORIZATION);
    };

    match result {
        Ok(token) => {
            pending.token = Some(token);
            Html("<h2>Authentication successful.</h2><p>Close browser window.</p>")
        }
        Err(e) => {
            warning!("Token exchange failed: {}", e);
            pending.error = Some(e.to_string());
            Html("<h4>Login failed.</h4>")
        }
    }
}
