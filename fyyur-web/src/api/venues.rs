//! Venue pages: directory, search, detail, create, edit, delete

use axum::{
    extract::{RawForm, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    Form, Json,
};
use fyyur_common::{db, query, time};
use garde::Validate;
use serde::Serialize;
use tracing::{error, info, warn};

use super::extract::EntityId;
use super::{render, AppError, SearchForm};
use crate::forms::{field_errors, parse_form, VenueForm};
use crate::templates::{
    Flash, HomeTemplate, SearchTemplate, VenueFormTemplate, VenueTemplate, VenuesTemplate,
};
use crate::AppState;

/// Response body for DELETE /venues/:venue_id
#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub success: bool,
}

/// GET /venues
pub async fn list_venues(State(state): State<AppState>) -> Result<Response, AppError> {
    let areas = query::venue_directory(&state.db, &time::now()).await?;
    render(&VenuesTemplate { areas })
}

/// POST /venues/search
pub async fn search_venues(
    State(state): State<AppState>,
    Form(search): Form<SearchForm>,
) -> Result<Response, AppError> {
    let results = query::search_venues(&state.db, &search.search_term, &time::now()).await?;
    render(&SearchTemplate {
        kind: "venues",
        search_term: search.search_term,
        results,
    })
}

/// GET /venues/:venue_id
pub async fn show_venue(
    State(state): State<AppState>,
    EntityId(venue_id): EntityId,
) -> Result<Response, AppError> {
    let detail = query::venue_detail(&state.db, venue_id, &time::now()).await?;
    render(&VenueTemplate { detail })
}

/// GET /venues/create
pub async fn create_venue_form() -> Result<Response, AppError> {
    render(&VenueFormTemplate::create(VenueForm::default(), Vec::new()))
}

/// POST /venues/create
pub async fn create_venue_submission(
    State(state): State<AppState>,
    RawForm(body): RawForm,
) -> Result<Response, AppError> {
    let form: VenueForm = parse_form(&body);
    if let Err(report) = form.validate() {
        return render(&VenueFormTemplate::create(form, field_errors(&report)));
    }

    let flash = match db::venues::insert(&state.db, &form.to_record()).await {
        Ok(venue_id) => {
            info!(venue_id, name = %form.name, "Venue listed");
            Flash::success(format!("Venue {} was successfully listed!", form.name))
        }
        Err(e) => {
            error!("Failed to list venue {}: {}", form.name, e);
            Flash::error(format!(
                "An error occurred. Venue {} could not be listed.",
                form.name
            ))
        }
    };

    render(&HomeTemplate { flash: Some(flash) })
}

/// GET /venues/:venue_id/edit
pub async fn edit_venue_form(
    State(state): State<AppState>,
    EntityId(venue_id): EntityId,
) -> Result<Response, AppError> {
    let venue = db::venues::get(&state.db, venue_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("venue {}", venue_id)))?;

    render(&VenueFormTemplate::edit(
        venue_id,
        VenueForm::from_record(&venue),
        Vec::new(),
    ))
}

/// POST /venues/:venue_id/edit
pub async fn edit_venue_submission(
    State(state): State<AppState>,
    EntityId(venue_id): EntityId,
    RawForm(body): RawForm,
) -> Result<Response, AppError> {
    if db::venues::get(&state.db, venue_id).await?.is_none() {
        return Err(AppError::NotFound(format!("venue {}", venue_id)));
    }

    let form: VenueForm = parse_form(&body);
    if let Err(report) = form.validate() {
        return render(&VenueFormTemplate::edit(venue_id, form, field_errors(&report)));
    }

    match db::venues::update(&state.db, venue_id, &form.to_record()).await {
        Ok(true) => {
            info!(venue_id, name = %form.name, "Venue updated");
            Ok(Redirect::to(&format!("/venues/{}", venue_id)).into_response())
        }
        // Deleted between the existence check and the update
        Ok(false) => Err(AppError::NotFound(format!("venue {}", venue_id))),
        Err(e) => {
            error!("Failed to update venue {}: {}", venue_id, e);
            render(&HomeTemplate {
                flash: Some(Flash::error(format!(
                    "An error occurred. Venue {} could not be updated.",
                    form.name
                ))),
            })
        }
    }
}

/// DELETE /venues/:venue_id
///
/// Removes the venue together with its shows.
pub async fn delete_venue(
    State(state): State<AppState>,
    EntityId(venue_id): EntityId,
) -> (StatusCode, Json<DeleteResponse>) {
    match db::venues::delete(&state.db, venue_id).await {
        Ok(true) => {
            info!(venue_id, "Venue deleted");
            (StatusCode::OK, Json(DeleteResponse { success: true }))
        }
        Ok(false) => {
            warn!(venue_id, "Delete requested for unknown venue");
            (StatusCode::NOT_FOUND, Json(DeleteResponse { success: false }))
        }
        Err(e) => {
            error!("Failed to delete venue {}: {}", venue_id, e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(DeleteResponse { success: false }),
            )
        }
    }
}
