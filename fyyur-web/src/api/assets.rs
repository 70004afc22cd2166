//! Static assets, embedded at compile time

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};

use crate::AppState;

const SCRIPT_JS: &str = include_str!("../../static/js/script.js");
const MAIN_CSS: &str = include_str!("../../static/css/main.css");

/// GET /static/js/script.js
pub async fn serve_script_js() -> Response {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/javascript")],
        SCRIPT_JS,
    )
        .into_response()
}

/// GET /static/css/main.css
pub async fn serve_main_css() -> Response {
    (StatusCode::OK, [(header::CONTENT_TYPE, "text/css")], MAIN_CSS).into_response()
}

pub fn asset_routes() -> Router<AppState> {
    Router::new()
        .route("/static/js/script.js", get(serve_script_js))
        .route("/static/css/main.css", get(serve_main_css))
}
