use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use std::collections::HashMap;

use super::aggregate::{group_by_area, partition_by_time, upcoming_counts};
use super::{Area, AreaVenue, SearchMatch, SearchResults, VenueDetail, VenueShow};
use crate::db::{self, ShowWithParties};
use crate::time::{format_timestamp, DateStyle};
use crate::{Error, Result};

/// Upcoming-show count per venue id
async fn venue_upcoming_counts(
    pool: &SqlitePool,
    now: &DateTime<Utc>,
) -> Result<HashMap<i64, usize>> {
    let shows = db::shows::start_times(pool).await?;
    Ok(upcoming_counts(&shows, |s| s.venue_id, |s| s.start_time, now))
}

/// Venues grouped by (city, state), each with its upcoming-show count
///
/// Areas are ordered by state then city; venues within an area by id.
pub async fn venue_directory(pool: &SqlitePool, now: &DateTime<Utc>) -> Result<Vec<Area>> {
    let venues = db::venues::list(pool).await?;
    let counts = venue_upcoming_counts(pool, now).await?;

    Ok(group_by_area(venues.into_iter().map(|v| {
        let venue = AreaVenue {
            id: v.id,
            num_upcoming_shows: counts.get(&v.id).copied().unwrap_or(0),
            name: v.name,
        };
        (v.city, v.state, venue)
    })))
}

/// Case-insensitive substring search on venue name
pub async fn search_venues(
    pool: &SqlitePool,
    term: &str,
    now: &DateTime<Utc>,
) -> Result<SearchResults> {
    let venues = db::venues::search_by_name(pool, term).await?;
    let counts = venue_upcoming_counts(pool, now).await?;

    let data: Vec<SearchMatch> = venues
        .into_iter()
        .map(|v| SearchMatch {
            num_upcoming_shows: counts.get(&v.id).copied().unwrap_or(0),
            id: v.id,
            name: v.name,
        })
        .collect();

    Ok(data.into())
}

/// Venue with its shows split into upcoming and past
pub async fn venue_detail(pool: &SqlitePool, id: i64, now: &DateTime<Utc>) -> Result<VenueDetail> {
    let venue = db::venues::get(pool, id)
        .await?
        .ok_or_else(|| Error::NotFound(format!("venue {}", id)))?;

    let shows = db::shows::for_venue(pool, id).await?;
    let (upcoming, past) = partition_by_time(shows, |s| s.start_time, now);
    let upcoming: Vec<VenueShow> = upcoming.into_iter().map(artist_side).collect();
    let past: Vec<VenueShow> = past.into_iter().map(artist_side).collect();

    Ok(VenueDetail {
        venue,
        upcoming_shows_count: upcoming.len(),
        upcoming_shows: upcoming,
        past_shows_count: past.len(),
        past_shows: past,
    })
}

fn artist_side(show: ShowWithParties) -> VenueShow {
    VenueShow {
        start_time: format_timestamp(&show.start_time, DateStyle::Medium),
        artist_id: show.artist_id,
        artist_name: show.artist_name,
        artist_image_link: show.artist_image_link,
    }
}
