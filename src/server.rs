use axum::{Extension, Router, routing::get};
use std::sync::Arc;
use tokio::{net::TcpListener, sync::Mutex};

use crate::{api, config::Credentials, error::Result, types::PendingAuthorization};

/// Serves the OAuth redirect on `callback_path` until the task is aborted.
pub async fn start_api_server(
    listener: TcpListener,
    callback_path: String,
    state: Arc<Mutex<Option<PendingAuthorization>>>,
    credentials: Arc<Credentials>,
) -> Result<()> {
    let app = Router::new()
        .route(&callback_path, get(api::callback))
        .layer(Extension(state))
        .layer(Extension(credentials));

    axum::serve(listener, app).await?;
    Ok(())
}
