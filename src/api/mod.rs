//! # API Module
//!
//! HTTP endpoints of the short-lived local server that receives the Spotify
//! OAuth redirect.
//!
//! ## Endpoints
//!
//! - [`callback`] - Checks the `state` parameter, exchanges the authorization
//!   code for a token and hands the result to the waiting authorization flow.
//!
//! The route is mounted on the path of the configured redirect URI by
//! [`crate::server::start_api_server`].

mod callback;

pub use callback::{CallbackParams, callback};
