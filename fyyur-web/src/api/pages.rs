//! Home page

use axum::response::Response;

use super::{render, AppError};
use crate::templates::HomeTemplate;

/// GET /
pub async fn index() -> Result<Response, AppError> {
    render(&HomeTemplate { flash: None })
}
