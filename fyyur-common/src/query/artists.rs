use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use super::aggregate::{partition_by_time, upcoming_counts};
use super::{ArtistDetail, ArtistShow, SearchMatch, SearchResults};
use crate::db::{self, NameEntry, ShowWithParties};
use crate::time::{format_timestamp, DateStyle};
use crate::{Error, Result};

/// Every artist's id and name
pub async fn artist_listing(pool: &SqlitePool) -> Result<Vec<NameEntry>> {
    db::artists::list(pool).await
}

/// Case-insensitive substring search on artist name
pub async fn search_artists(
    pool: &SqlitePool,
    term: &str,
    now: &DateTime<Utc>,
) -> Result<SearchResults> {
    let artists = db::artists::search_by_name(pool, term).await?;
    let shows = db::shows::start_times(pool).await?;
    let counts = upcoming_counts(&shows, |s| s.artist_id, |s| s.start_time, now);

    let data: Vec<SearchMatch> = artists
        .into_iter()
        .map(|a| SearchMatch {
            num_upcoming_shows: counts.get(&a.id).copied().unwrap_or(0),
            id: a.id,
            name: a.name,
        })
        .collect();

    Ok(data.into())
}

/// Artist with their shows split into upcoming and past
pub async fn artist_detail(pool: &SqlitePool, id: i64, now: &DateTime<Utc>) -> Result<ArtistDetail> {
    let artist = db::artists::get(pool, id)
        .await?
        .ok_or_else(|| Error::NotFound(format!("artist {}", id)))?;

    let shows = db::shows::for_artist(pool, id).await?;
    let (upcoming, past) = partition_by_time(shows, |s| s.start_time, now);
    let upcoming: Vec<ArtistShow> = upcoming.into_iter().map(venue_side).collect();
    let past: Vec<ArtistShow> = past.into_iter().map(venue_side).collect();

    Ok(ArtistDetail {
        artist,
        upcoming_shows_count: upcoming.len(),
        upcoming_shows: upcoming,
        past_shows_count: past.len(),
        past_shows: past,
    })
}

fn venue_side(show: ShowWithParties) -> ArtistShow {
    ArtistShow {
        start_time: format_timestamp(&show.start_time, DateStyle::Medium),
        venue_id: show.venue_id,
        venue_name: show.venue_name,
        venue_image_link: show.venue_image_link,
    }
}
