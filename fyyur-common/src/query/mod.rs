//! Query/aggregation layer
//!
//! Builds the view data for the venue directory, name searches, detail pages
//! and the flat show listing. Every operation takes the evaluation time `now`
//! explicitly, so a show's upcoming/past classification is computed per call
//! and never stored.

pub mod aggregate;
mod artists;
mod shows;
mod venues;

use serde::Serialize;

pub use artists::{artist_detail, artist_listing, search_artists};
pub use shows::show_listing;
pub use venues::{search_venues, venue_detail, venue_directory};

use crate::db::{Artist, Venue};

/// One venue inside a directory area
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AreaVenue {
    pub id: i64,
    pub name: String,
    pub num_upcoming_shows: usize,
}

/// All venues sharing one (city, state) pair
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Area {
    pub city: String,
    pub state: String,
    pub venues: Vec<AreaVenue>,
}

/// One name-search hit
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchMatch {
    pub id: i64,
    pub name: String,
    pub num_upcoming_shows: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchResults {
    pub count: usize,
    pub data: Vec<SearchMatch>,
}

impl From<Vec<SearchMatch>> for SearchResults {
    fn from(data: Vec<SearchMatch>) -> Self {
        Self {
            count: data.len(),
            data,
        }
    }
}

/// A show on a venue's detail page (the other party is the artist)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VenueShow {
    pub artist_id: i64,
    pub artist_name: String,
    pub artist_image_link: Option<String>,
    pub start_time: String,
}

/// A show on an artist's detail page (the other party is the venue)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArtistShow {
    pub venue_id: i64,
    pub venue_name: String,
    pub venue_image_link: Option<String>,
    pub start_time: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VenueDetail {
    #[serde(flatten)]
    pub venue: Venue,
    pub upcoming_shows: Vec<VenueShow>,
    pub upcoming_shows_count: usize,
    pub past_shows: Vec<VenueShow>,
    pub past_shows_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArtistDetail {
    #[serde(flatten)]
    pub artist: Artist,
    pub upcoming_shows: Vec<ArtistShow>,
    pub upcoming_shows_count: usize,
    pub past_shows: Vec<ArtistShow>,
    pub past_shows_count: usize,
}

/// One row of the flat show listing
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShowEntry {
    pub venue_id: i64,
    pub venue_name: String,
    pub artist_id: i64,
    pub artist_name: String,
    pub artist_image_link: Option<String>,
    pub start_time: String,
}
