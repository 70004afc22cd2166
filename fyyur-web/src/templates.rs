//! Page templates (askama, compiled from `templates/`)

use askama::Template;
use fyyur_common::choices::{GENRES, STATES};
use fyyur_common::db::NameEntry;
use fyyur_common::query::{Area, ArtistDetail, SearchResults, ShowEntry, VenueDetail};

use crate::forms::{ArtistForm, FieldError, ShowForm, VenueForm};

/// One-shot status line shown on the home page after a submission
#[derive(Debug, Clone, PartialEq)]
pub struct Flash {
    pub message: String,
    pub is_error: bool,
}

impl Flash {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            is_error: false,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            is_error: true,
        }
    }
}

/// `<option>` entry for a select box
#[derive(Debug, Clone, PartialEq)]
pub struct Choice {
    pub value: &'static str,
    pub selected: bool,
}

impl Choice {
    fn list(options: &[&'static str], selected: &[String]) -> Vec<Choice> {
        options
            .iter()
            .map(|&value| Choice {
                value,
                selected: selected.iter().any(|s| s == value),
            })
            .collect()
    }
}

#[derive(Template)]
#[template(path = "pages/home.html")]
pub struct HomeTemplate {
    pub flash: Option<Flash>,
}

#[derive(Template)]
#[template(path = "pages/venues.html")]
pub struct VenuesTemplate {
    pub areas: Vec<Area>,
}

#[derive(Template)]
#[template(path = "pages/artists.html")]
pub struct ArtistsTemplate {
    pub artists: Vec<NameEntry>,
}

/// Search results for either venues or artists
#[derive(Template)]
#[template(path = "pages/search.html")]
pub struct SearchTemplate {
    /// URL prefix of the matched entity: "venues" or "artists"
    pub kind: &'static str,
    pub search_term: String,
    pub results: SearchResults,
}

#[derive(Template)]
#[template(path = "pages/show_venue.html")]
pub struct VenueTemplate {
    pub detail: VenueDetail,
}

#[derive(Template)]
#[template(path = "pages/show_artist.html")]
pub struct ArtistTemplate {
    pub detail: ArtistDetail,
}

#[derive(Template)]
#[template(path = "pages/shows.html")]
pub struct ShowsTemplate {
    pub shows: Vec<ShowEntry>,
}

#[derive(Template)]
#[template(path = "forms/venue.html")]
pub struct VenueFormTemplate {
    pub heading: String,
    pub action: String,
    pub form: VenueForm,
    pub genre_choices: Vec<Choice>,
    pub state_choices: Vec<Choice>,
    pub errors: Vec<FieldError>,
}

impl VenueFormTemplate {
    pub fn create(form: VenueForm, errors: Vec<FieldError>) -> Self {
        Self::build("List a new venue".to_string(), "/venues/create".to_string(), form, errors)
    }

    pub fn edit(venue_id: i64, form: VenueForm, errors: Vec<FieldError>) -> Self {
        let heading = format!("Edit venue {}", form.name);
        Self::build(heading, format!("/venues/{}/edit", venue_id), form, errors)
    }

    fn build(heading: String, action: String, form: VenueForm, errors: Vec<FieldError>) -> Self {
        Self {
            genre_choices: Choice::list(GENRES, &form.genres),
            state_choices: Choice::list(STATES, std::slice::from_ref(&form.state)),
            heading,
            action,
            form,
            errors,
        }
    }
}

#[derive(Template)]
#[template(path = "forms/artist.html")]
pub struct ArtistFormTemplate {
    pub heading: String,
    pub action: String,
    pub form: ArtistForm,
    pub genre_choices: Vec<Choice>,
    pub state_choices: Vec<Choice>,
    pub errors: Vec<FieldError>,
}

impl ArtistFormTemplate {
    pub fn create(form: ArtistForm, errors: Vec<FieldError>) -> Self {
        Self::build("List a new artist".to_string(), "/artists/create".to_string(), form, errors)
    }

    pub fn edit(artist_id: i64, form: ArtistForm, errors: Vec<FieldError>) -> Self {
        let heading = format!("Edit artist {}", form.name);
        Self::build(heading, format!("/artists/{}/edit", artist_id), form, errors)
    }

    fn build(heading: String, action: String, form: ArtistForm, errors: Vec<FieldError>) -> Self {
        Self {
            genre_choices: Choice::list(GENRES, &form.genres),
            state_choices: Choice::list(STATES, std::slice::from_ref(&form.state)),
            heading,
            action,
            form,
            errors,
        }
    }
}

#[derive(Template)]
#[template(path = "forms/show.html")]
pub struct ShowFormTemplate {
    pub form: ShowForm,
    pub errors: Vec<FieldError>,
}

#[derive(Template)]
#[template(path = "errors/404.html")]
pub struct NotFoundTemplate;

#[derive(Template)]
#[template(path = "errors/500.html")]
pub struct ServerErrorTemplate;
