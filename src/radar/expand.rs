use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

use crate::{error::Result, spotify::CatalogService, types::Album, warning};

use super::RunContext;

/// Tracks requested per album. Longer albums are cut off.
pub const ALBUM_TRACKS_PAGE_LIMIT: u32 = 50;

/// URIs of every track of `albums`, album by album, in track order.
pub async fn expand<S: CatalogService>(
    ctx: &RunContext<S>,
    albums: &[Album],
) -> Result<Vec<String>> {
    let pb = ProgressBar::new(albums.len() as u64);
    pb.enable_steady_tick(Duration::from_millis(100));
    if let Ok(style) = ProgressStyle::with_template("{spinner:.blue} [{pos}/{len}] {msg}") {
        pb.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"));
    }

    let mut uris = Vec::new();
    for album in albums {
        pb.set_message(format!("Fetching tracks of \"{}\"", album.name));

        let page = match ctx
            .service
            .album_tracks(&album.id, ALBUM_TRACKS_PAGE_LIMIT, 0, &ctx.market)
            .await
        {
            Ok(page) => page,
            Err(e) => {
                pb.finish_and_clear();
                return Err(e);
            }
        };

        if page.is_truncated() {
            pb.suspend(|| {
                warning!(
                    "\"{}\" has {} tracks, only the first {} are added",
                    album.name,
                    page.total,
                    page.items.len()
                )
            });
        }

        uris.extend(page.items.into_iter().map(|track| track.uri));
        pb.inc(1);
    }

    pb.finish_and_clear();
    Ok(uris)
}
