//! Artist pages: listing, search, detail, create, edit

use axum::{
    extract::{RawForm, State},
    response::{IntoResponse, Redirect, Response},
    Form,
};
use fyyur_common::{db, query, time};
use garde::Validate;
use tracing::{error, info};

use super::extract::EntityId;
use super::{render, AppError, SearchForm};
use crate::forms::{field_errors, parse_form, ArtistForm};
use crate::templates::{
    ArtistFormTemplate, ArtistTemplate, ArtistsTemplate, Flash, HomeTemplate, SearchTemplate,
};
use crate::AppState;

/// GET /artists
pub async fn list_artists(State(state): State<AppState>) -> Result<Response, AppError> {
    let artists = query::artist_listing(&state.db).await?;
    render(&ArtistsTemplate { artists })
}

/// POST /artists/search
pub async fn search_artists(
    State(state): State<AppState>,
    Form(search): Form<SearchForm>,
) -> Result<Response, AppError> {
    let results = query::search_artists(&state.db, &search.search_term, &time::now()).await?;
    render(&SearchTemplate {
        kind: "artists",
        search_term: search.search_term,
        results,
    })
}

/// GET /artists/:artist_id
pub async fn show_artist(
    State(state): State<AppState>,
    EntityId(artist_id): EntityId,
) -> Result<Response, AppError> {
    let detail = query::artist_detail(&state.db, artist_id, &time::now()).await?;
    render(&ArtistTemplate { detail })
}

/// GET /artists/create
pub async fn create_artist_form() -> Result<Response, AppError> {
    render(&ArtistFormTemplate::create(ArtistForm::default(), Vec::new()))
}

/// POST /artists/create
pub async fn create_artist_submission(
    State(state): State<AppState>,
    RawForm(body): RawForm,
) -> Result<Response, AppError> {
    let form: ArtistForm = parse_form(&body);
    if let Err(report) = form.validate() {
        return render(&ArtistFormTemplate::create(form, field_errors(&report)));
    }

    let flash = match db::artists::insert(&state.db, &form.to_record()).await {
        Ok(artist_id) => {
            info!(artist_id, name = %form.name, "Artist listed");
            Flash::success(format!("Artist {} was successfully listed!", form.name))
        }
        Err(e) => {
            error!("Failed to list artist {}: {}", form.name, e);
            Flash::error(format!(
                "An error occurred. Artist {} could not be listed.",
                form.name
            ))
        }
    };

    render(&HomeTemplate { flash: Some(flash) })
}

/// GET /artists/:artist_id/edit
pub async fn edit_artist_form(
    State(state): State<AppState>,
    EntityId(artist_id): EntityId,
) -> Result<Response, AppError> {
    let artist = db::artists::get(&state.db, artist_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("artist {}", artist_id)))?;

    render(&ArtistFormTemplate::edit(
        artist_id,
        ArtistForm::from_record(&artist),
        Vec::new(),
    ))
}

/// POST /artists/:artist_id/edit
pub async fn edit_artist_submission(
    State(state): State<AppState>,
    EntityId(artist_id): EntityId,
    RawForm(body): RawForm,
) -> Result<Response, AppError> {
    if db::artists::get(&state.db, artist_id).await?.is_none() {
        return Err(AppError::NotFound(format!("artist {}", artist_id)));
    }

    let form: ArtistForm = parse_form(&body);
    if let Err(report) = form.validate() {
        return render(&ArtistFormTemplate::edit(artist_id, form, field_errors(&report)));
    }

    match db::artists::update(&state.db, artist_id, &form.to_record()).await {
        Ok(true) => {
            info!(artist_id, name = %form.name, "Artist updated");
            Ok(Redirect::to(&format!("/artists/{}", artist_id)).into_response())
        }
        Ok(false) => Err(AppError::NotFound(format!("artist {}", artist_id))),
        Err(e) => {
            error!("Failed to update artist {}: {}", artist_id, e);
            render(&HomeTemplate {
                flash: Some(Flash::error(format!(
                    "An error occurred. Artist {} could not be updated.",
                    form.name
                ))),
            })
        }
    }
}
