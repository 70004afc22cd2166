use sqlx::SqlitePool;

use super::ShowEntry;
use crate::db;
use crate::time::{format_timestamp, DateStyle};
use crate::Result;

/// Every show with both parties, earliest first
pub async fn show_listing(pool: &SqlitePool) -> Result<Vec<ShowEntry>> {
    let mut shows = db::shows::list_all(pool).await?;
    shows.sort_by_key(|s| (s.start_time, s.show_id));

    Ok(shows
        .into_iter()
        .map(|s| ShowEntry {
            start_time: format_timestamp(&s.start_time, DateStyle::Medium),
            venue_id: s.venue_id,
            venue_name: s.venue_name,
            artist_id: s.artist_id,
            artist_name: s.artist_name,
            artist_image_link: s.artist_image_link,
        })
        .collect())
}
