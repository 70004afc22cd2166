//! Show pages: listing and create

use axum::{
    extract::{RawForm, State},
    response::Response,
};
use fyyur_common::{db, query, time};
use garde::Validate;
use tracing::{error, info};

use super::{render, AppError};
use crate::forms::{field_errors, parse_form, ShowForm};
use crate::templates::{Flash, HomeTemplate, ShowFormTemplate, ShowsTemplate};
use crate::AppState;

const SHOW_FAILED: &str = "An error occurred. Show could not be listed.";

/// GET /shows
pub async fn list_shows(State(state): State<AppState>) -> Result<Response, AppError> {
    let shows = query::show_listing(&state.db).await?;
    render(&ShowsTemplate { shows })
}

/// GET /shows/create
pub async fn create_show_form() -> Result<Response, AppError> {
    render(&ShowFormTemplate {
        form: ShowForm::starting_at(&time::now()),
        errors: Vec::new(),
    })
}

/// POST /shows/create
///
/// Unknown artist or venue ids fail on the foreign key and surface as the
/// generic failure message.
pub async fn create_show_submission(
    State(state): State<AppState>,
    RawForm(body): RawForm,
) -> Result<Response, AppError> {
    let form: ShowForm = parse_form(&body);
    if let Err(report) = form.validate() {
        let errors = field_errors(&report);
        return render(&ShowFormTemplate { form, errors });
    }

    let Some(record) = form.to_record() else {
        return Err(AppError::Internal(format!(
            "validated show form did not map to a record: {:?}",
            form
        )));
    };

    let flash = match db::shows::insert(&state.db, &record).await {
        Ok(show_id) => {
            info!(
                show_id,
                artist_id = record.artist_id,
                venue_id = record.venue_id,
                "Show listed"
            );
            Flash::success("Show was successfully listed!")
        }
        Err(e) => {
            error!("Failed to list show: {}", e);
            Flash::error(SHOW_FAILED)
        }
    };

    render(&HomeTemplate { flash: Some(flash) })
}
