use tabled::Table;

use crate::{error, info, radar, types::AlbumTableRow};

pub async fn preview(market: Option<String>) {
    let ctx = match super::connect(market).await {
        Ok(ctx) => ctx,
        Err(e) => error!("{}", e),
    };

    let albums = match radar::preview(&ctx).await {
        Ok(Some(albums)) => albums,
        Ok(None) => {
            info!("{} playlist not found or empty", ctx.source_name);
            return;
        }
        Err(e) => error!("Error: {}", e),
    };

    if albums.is_empty() {
        info!("No new album releases found");
        return;
    }

    info!("{} new albums released this week:", albums.len());
    let table_rows: Vec<AlbumTableRow> = albums.iter().map(AlbumTableRow::from).collect();
    let table = Table::new(table_rows);
    println!("{}", table);
}
