//! Handler errors and the static error pages

use askama::Template;
use axum::{
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
};
use tracing::{debug, error};

use crate::templates::{NotFoundTemplate, ServerErrorTemplate};

/// Served if the error page template itself fails to render
const FALLBACK_ERROR_HTML: &str = "<!doctype html><title>Error</title><h1>Something went wrong</h1>";

/// Errors a handler can return
#[derive(Debug)]
pub enum AppError {
    /// Unknown route or missing entity
    NotFound(String),
    /// Anything else; details are logged, never shown
    Internal(String),
}

impl From<fyyur_common::Error> for AppError {
    fn from(err: fyyur_common::Error) -> Self {
        match err {
            fyyur_common::Error::NotFound(what) => AppError::NotFound(what),
            other => AppError::Internal(other.to_string()),
        }
    }
}

impl From<askama::Error> for AppError {
    fn from(err: askama::Error) -> Self {
        AppError::Internal(format!("Template error: {}", err))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::NotFound(what) => {
                debug!("Not found: {}", what);
                error_page(StatusCode::NOT_FOUND)
            }
            AppError::Internal(message) => {
                error!("Request failed: {}", message);
                error_page(StatusCode::INTERNAL_SERVER_ERROR)
            }
        }
    }
}

/// Static error page for `status`
///
/// 404 has its own page; every other status shares the generic error page.
pub fn error_page(status: StatusCode) -> Response {
    let page = if status == StatusCode::NOT_FOUND {
        NotFoundTemplate.render()
    } else {
        ServerErrorTemplate.render()
    };
    let html = page.unwrap_or_else(|e| {
        error!("Failed to render error page: {}", e);
        FALLBACK_ERROR_HTML.to_string()
    });
    (status, Html(html)).into_response()
}

/// Router fallback for unknown paths
pub async fn not_found() -> Response {
    error_page(StatusCode::NOT_FOUND)
}

/// Replace axum's empty 405 body with the error page, keeping `Allow`
pub async fn method_not_allowed_page(response: Response) -> Response {
    if response.status() != StatusCode::METHOD_NOT_ALLOWED {
        return response;
    }

    let mut page = error_page(StatusCode::METHOD_NOT_ALLOWED);
    if let Some(allow) = response.headers().get(header::ALLOW) {
        page.headers_mut().insert(header::ALLOW, allow.clone());
    }
    page
}
