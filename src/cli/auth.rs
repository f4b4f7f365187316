use crate::{config::Credentials, error, spotify};

/// Authorizes again even when a cached token exists.
pub async fn auth() {
    let credentials = match Credentials::from_env() {
        Ok(credentials) => credentials,
        Err(e) => error!("{}", e),
    };

    if let Err(e) = spotify::auth::authorize(&credentials).await {
        error!("{}", e);
    }
}
