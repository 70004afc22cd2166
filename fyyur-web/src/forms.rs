//! Venue, artist and show forms
//!
//! Each form is decoded from an `application/x-www-form-urlencoded` body into a
//! struct of raw strings, validated with garde, and converted to a database
//! record by an explicit per-entity mapping.

use fyyur_common::choices;
use fyyur_common::db::{Artist, ArtistRecord, ShowRecord, Venue, VenueRecord};
use fyyur_common::time::parse_timestamp;
use garde::Validate;
use serde::Serialize;

/// Form layout for `<input type="datetime-local">`-compatible prefill
const START_TIME_LAYOUT: &str = "%Y-%m-%d %H:%M:%S";

/// Assigns one decoded `key=value` pair to a form field
pub trait FormFields: Default {
    fn assign(&mut self, key: &str, value: String);
}

/// Decode a urlencoded body into a form
///
/// Values are trimmed; repeated keys (multi-selects) accumulate; unknown keys
/// are ignored.
pub fn parse_form<F: FormFields>(body: &[u8]) -> F {
    let mut form = F::default();
    for (key, value) in url::form_urlencoded::parse(body) {
        form.assign(&key, value.trim().to_string());
    }
    form
}

/// One field-level validation failure
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// Flatten a garde report for display
pub fn field_errors(report: &garde::Report) -> Vec<FieldError> {
    report
        .iter()
        .map(|(path, error)| FieldError {
            field: path.to_string(),
            message: error.to_string(),
        })
        .collect()
}

/// HTML checkbox semantics: present and not an explicit "false"
fn is_checked(value: &str) -> bool {
    !matches!(value, "" | "false" | "off" | "n" | "0")
}

fn non_empty(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

fn known_state(value: &str, _: &()) -> garde::Result {
    if choices::is_state(value) {
        Ok(())
    } else {
        Err(garde::Error::new("not a valid choice"))
    }
}

fn known_genre(value: &str, _: &()) -> garde::Result {
    if choices::is_genre(value) {
        Ok(())
    } else {
        Err(garde::Error::new(format!("'{}' is not a valid choice", value)))
    }
}

/// Empty is allowed; anything else must be an absolute http(s) URL
fn optional_url(value: &str, _: &()) -> garde::Result {
    if value.is_empty() {
        return Ok(());
    }
    match url::Url::parse(value) {
        Ok(parsed) if matches!(parsed.scheme(), "http" | "https") => Ok(()),
        _ => Err(garde::Error::new("invalid URL")),
    }
}

fn positive_id(value: &str, _: &()) -> garde::Result {
    match value.parse::<i64>() {
        Ok(id) if id > 0 => Ok(()),
        _ => Err(garde::Error::new("must be a positive whole number")),
    }
}

fn timestamp(value: &str, _: &()) -> garde::Result {
    parse_timestamp(value)
        .map(|_| ())
        .map_err(|_| garde::Error::new("not a valid date and time"))
}

// =============================================================================
// Venue
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Validate)]
pub struct VenueForm {
    #[garde(length(min = 1, max = 120))]
    pub name: String,
    #[garde(length(min = 1, max = 120))]
    pub city: String,
    #[garde(custom(known_state))]
    pub state: String,
    #[garde(length(min = 1, max = 120))]
    pub address: String,
    #[garde(length(max = 120))]
    pub phone: String,
    #[garde(length(min = 1), inner(custom(known_genre)))]
    pub genres: Vec<String>,
    #[garde(length(max = 500), custom(optional_url))]
    pub image_link: String,
    #[garde(length(max = 120), custom(optional_url))]
    pub facebook_link: String,
    #[garde(length(max = 120), custom(optional_url))]
    pub website_link: String,
    #[garde(skip)]
    pub seeking_talent: bool,
    #[garde(length(max = 500))]
    pub seeking_description: String,
}

impl FormFields for VenueForm {
    fn assign(&mut self, key: &str, value: String) {
        match key {
            "name" => self.name = value,
            "city" => self.city = value,
            "state" => self.state = value,
            "address" => self.address = value,
            "phone" => self.phone = value,
            "genres" => self.genres.push(value),
            "image_link" => self.image_link = value,
            "facebook_link" => self.facebook_link = value,
            "website_link" => self.website_link = value,
            "seeking_talent" => self.seeking_talent = is_checked(&value),
            "seeking_description" => self.seeking_description = value,
            _ => {}
        }
    }
}

impl VenueForm {
    /// Prefill from a stored venue (edit page)
    pub fn from_record(venue: &Venue) -> Self {
        Self {
            name: venue.name.clone(),
            city: venue.city.clone(),
            state: venue.state.clone(),
            address: venue.address.clone(),
            phone: venue.phone.clone().unwrap_or_default(),
            genres: venue.genres.clone(),
            image_link: venue.image_link.clone().unwrap_or_default(),
            facebook_link: venue.facebook_link.clone().unwrap_or_default(),
            website_link: venue.website.clone().unwrap_or_default(),
            seeking_talent: venue.seeking_talent,
            seeking_description: venue.seeking_description.clone().unwrap_or_default(),
        }
    }

    /// Map validated input to the stored shape; empty optional fields become NULL
    pub fn to_record(&self) -> VenueRecord {
        VenueRecord {
            name: self.name.clone(),
            genres: self.genres.clone(),
            address: self.address.clone(),
            city: self.city.clone(),
            state: self.state.clone(),
            phone: non_empty(&self.phone),
            website: non_empty(&self.website_link),
            facebook_link: non_empty(&self.facebook_link),
            image_link: non_empty(&self.image_link),
            seeking_talent: self.seeking_talent,
            seeking_description: non_empty(&self.seeking_description),
        }
    }
}

// =============================================================================
// Artist
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Validate)]
pub struct ArtistForm {
    #[garde(length(min = 1, max = 120))]
    pub name: String,
    #[garde(length(min = 1, max = 120))]
    pub city: String,
    #[garde(custom(known_state))]
    pub state: String,
    #[garde(length(max = 120))]
    pub phone: String,
    #[garde(length(min = 1), inner(custom(known_genre)))]
    pub genres: Vec<String>,
    #[garde(length(max = 500), custom(optional_url))]
    pub image_link: String,
    #[garde(length(max = 120), custom(optional_url))]
    pub facebook_link: String,
    #[garde(length(max = 120), custom(optional_url))]
    pub website_link: String,
    #[garde(skip)]
    pub seeking_venue: bool,
    #[garde(length(max = 500))]
    pub seeking_description: String,
}

impl FormFields for ArtistForm {
    fn assign(&mut self, key: &str, value: String) {
        match key {
            "name" => self.name = value,
            "city" => self.city = value,
            "state" => self.state = value,
            "phone" => self.phone = value,
            "genres" => self.genres.push(value),
            "image_link" => self.image_link = value,
            "facebook_link" => self.facebook_link = value,
            "website_link" => self.website_link = value,
            "seeking_venue" => self.seeking_venue = is_checked(&value),
            "seeking_description" => self.seeking_description = value,
            _ => {}
        }
    }
}

impl ArtistForm {
    pub fn from_record(artist: &Artist) -> Self {
        Self {
            name: artist.name.clone(),
            city: artist.city.clone(),
            state: artist.state.clone(),
            phone: artist.phone.clone().unwrap_or_default(),
            genres: artist.genres.clone(),
            image_link: artist.image_link.clone().unwrap_or_default(),
            facebook_link: artist.facebook_link.clone().unwrap_or_default(),
            website_link: artist.website.clone().unwrap_or_default(),
            seeking_venue: artist.seeking_venue,
            seeking_description: artist.seeking_description.clone().unwrap_or_default(),
        }
    }

    pub fn to_record(&self) -> ArtistRecord {
        ArtistRecord {
            name: self.name.clone(),
            genres: self.genres.clone(),
            city: self.city.clone(),
            state: self.state.clone(),
            phone: non_empty(&self.phone),
            website: non_empty(&self.website_link),
            facebook_link: non_empty(&self.facebook_link),
            image_link: non_empty(&self.image_link),
            seeking_venue: self.seeking_venue,
            seeking_description: non_empty(&self.seeking_description),
        }
    }
}

// =============================================================================
// Show
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Validate)]
pub struct ShowForm {
    #[garde(custom(positive_id))]
    pub artist_id: String,
    #[garde(custom(positive_id))]
    pub venue_id: String,
    #[garde(custom(timestamp))]
    pub start_time: String,
}

impl FormFields for ShowForm {
    fn assign(&mut self, key: &str, value: String) {
        match key {
            "artist_id" => self.artist_id = value,
            "venue_id" => self.venue_id = value,
            "start_time" => self.start_time = value,
            _ => {}
        }
    }
}

impl ShowForm {
    /// Blank form with the start time defaulted to `now`
    pub fn starting_at(now: &chrono::DateTime<chrono::Utc>) -> Self {
        Self {
            start_time: now.format(START_TIME_LAYOUT).to_string(),
            ..Default::default()
        }
    }

    /// Map validated input to a show record
    ///
    /// Returns `None` if the form has not passed validation.
    pub fn to_record(&self) -> Option<ShowRecord> {
        Some(ShowRecord {
            artist_id: self.artist_id.parse().ok()?,
            venue_id: self.venue_id.parse().ok()?,
            start_time: parse_timestamp(&self.start_time).ok()?,
        })
    }
}
