//! Show persistence
//!
//! Shows are only ever read joined with their artist and venue.

use sqlx::SqlitePool;

use super::models::{ShowRecord, ShowWithParties};
use crate::Result;

const JOINED_SELECT: &str = r#"
    SELECT
        s.id AS show_id,
        s.start_time AS start_time,
        a.id AS artist_id,
        a.name AS artist_name,
        a.image_link AS artist_image_link,
        v.id AS venue_id,
        v.name AS venue_name,
        v.image_link AS venue_image_link
    FROM shows s
    JOIN artists a ON a.id = s.artist_id
    JOIN venues v ON v.id = s.venue_id
"#;

/// Insert a show, returning its id
///
/// Fails with a database error when the artist or venue does not exist.
pub async fn insert(pool: &SqlitePool, record: &ShowRecord) -> Result<i64> {
    let mut tx = pool.begin().await?;

    let result = sqlx::query("INSERT INTO shows (artist_id, venue_id, start_time) VALUES (?, ?, ?)")
        .bind(record.artist_id)
        .bind(record.venue_id)
        .bind(record.start_time)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;

    Ok(result.last_insert_rowid())
}

/// Every show at one venue
pub async fn for_venue(pool: &SqlitePool, venue_id: i64) -> Result<Vec<ShowWithParties>> {
    let shows = sqlx::query_as::<_, ShowWithParties>(&format!(
        "{} WHERE s.venue_id = ? ORDER BY s.id",
        JOINED_SELECT
    ))
    .bind(venue_id)
    .fetch_all(pool)
    .await?;

    Ok(shows)
}

/// Every show by one artist
pub async fn for_artist(pool: &SqlitePool, artist_id: i64) -> Result<Vec<ShowWithParties>> {
    let shows = sqlx::query_as::<_, ShowWithParties>(&format!(
        "{} WHERE s.artist_id = ? ORDER BY s.id",
        JOINED_SELECT
    ))
    .bind(artist_id)
    .fetch_all(pool)
    .await?;

    Ok(shows)
}

/// Every show
pub async fn list_all(pool: &SqlitePool) -> Result<Vec<ShowWithParties>> {
    let shows = sqlx::query_as::<_, ShowWithParties>(&format!("{} ORDER BY s.id", JOINED_SELECT))
        .fetch_all(pool)
        .await?;

    Ok(shows)
}

/// Artist id, venue id and start time of every show, without the joins
pub async fn start_times(pool: &SqlitePool) -> Result<Vec<ShowRecord>> {
    let shows = sqlx::query_as::<_, ShowRecord>(
        "SELECT artist_id, venue_id, start_time FROM shows ORDER BY id",
    )
    .fetch_all(pool)
    .await?;

    Ok(shows)
}
