use crate::{
    error, info,
    radar::{self, Outcome},
};

pub async fn sync(market: Option<String>) {
    let ctx = match super::connect(market).await {
        Ok(ctx) => ctx,
        Err(e) => error!("{}", e),
    };

    match radar::run(&ctx).await {
        Ok(Outcome::Published(published)) => info!(
            "Playlist {} now holds {} tracks ({} batches)",
            published.playlist_id, published.tracks, published.batches
        ),
        Ok(Outcome::SourceMissing | Outcome::NoQualifyingAlbums) => {}
        Err(e) => error!("Error: {}", e),
    }
}
