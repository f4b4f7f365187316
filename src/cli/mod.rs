//! # CLI Module
//!
//! User-facing commands of albumradar. Each command wires configuration,
//! authentication and the [`crate::radar`] pipeline together and owns the
//! console output and the exit status.
//!
//! ## Commands
//!
//! - [`sync`] - Rebuilds "New Album Releases" from "Release Radar" (default)
//! - [`preview`] - Shows the qualifying albums without touching any playlist
//! - [`auth`] - Runs the Spotify authorization flow and caches the token
//!
//! ## Exit Status
//!
//! Commands exit with status 1 through the `error!` macro on configuration,
//! authentication or service errors. A run that finds nothing to publish is
//! not an error.
//!
//! ## Usage
//!
//! ```bash
//! albumradar auth                  # Authorize once
//! albumradar                       # Same as `albumradar sync`
//! albumradar preview --market DE   # List qualifying albums
//! ```

mod auth;
mod preview;
mod sync;

pub use auth::auth;
pub use preview::preview;
pub use sync::sync;

use crate::{
    config::Credentials,
    error::Result,
    radar::RunContext,
    spotify::{self, SpotifyClient},
};

/// Reads the credentials, opens a session and builds the pipeline context.
async fn connect(market: Option<String>) -> Result<RunContext<SpotifyClient>> {
    let credentials = Credentials::from_env()?;
    let tokens = spotify::auth::authenticate(&credentials).await?;
    let ctx = RunContext::new(SpotifyClient::new(tokens), credentials.username);

    Ok(match market {
        Some(market) => ctx.with_market(market),
        None => ctx,
    })
}
