//! HTTP handlers for fyyur-web

pub mod artists;
pub mod assets;
pub mod errors;
pub mod extract;
pub mod health;
pub mod pages;
pub mod shows;
pub mod venues;

use askama::Template;
use axum::response::{Html, IntoResponse, Response};
use serde::Deserialize;

pub use assets::asset_routes;
pub use errors::AppError;
pub use health::health_routes;

/// Body of the venue and artist search forms
#[derive(Debug, Default, Deserialize)]
pub struct SearchForm {
    #[serde(default)]
    pub search_term: String,
}

/// Render a template into an HTML response
pub fn render<T: Template>(template: &T) -> Result<Response, AppError> {
    Ok(Html(template.render()?).into_response())
}
