//! Integration tests for fyyur-web HTTP endpoints
//!
//! Each test builds the router over a fresh database in a temporary directory
//! and drives it with `oneshot`.

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use chrono::{Duration, Utc};
use fyyur_common::db::{self, init_database, ArtistRecord, ShowRecord, VenueRecord};
use fyyur_web::{build_router, AppState};
use serde_json::Value;
use sqlx::SqlitePool;
use tempfile::TempDir;
use tower::util::ServiceExt; // for `oneshot` method

/// Test helper: fresh database and router
async fn setup_app() -> (TempDir, SqlitePool, Router) {
    let dir = TempDir::new().expect("Should create temp dir");
    let pool = init_database(&dir.path().join("fyyur.db"))
        .await
        .expect("Should initialize database");
    let app = build_router(AppState::new(pool.clone()));
    (dir, pool, app)
}

fn test_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

fn form_request(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn extract_text(body: Body) -> String {
    let bytes = axum::body::to_bytes(body, usize::MAX)
        .await
        .expect("Should read body");
    String::from_utf8(bytes.to_vec()).expect("Should be UTF-8")
}

async fn extract_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX)
        .await
        .expect("Should read body");
    serde_json::from_slice(&bytes).expect("Should parse JSON")
}

async fn add_venue(pool: &SqlitePool, name: &str, city: &str, state: &str) -> i64 {
    db::venues::insert(
        pool,
        &VenueRecord {
            name: name.to_string(),
            genres: vec!["Jazz".to_string()],
            address: "1015 Folsom Street".to_string(),
            city: city.to_string(),
            state: state.to_string(),
            ..Default::default()
        },
    )
    .await
    .unwrap()
}

async fn add_artist(pool: &SqlitePool, name: &str) -> i64 {
    db::artists::insert(
        pool,
        &ArtistRecord {
            name: name.to_string(),
            genres: vec!["Rock n Roll".to_string()],
            city: "San Francisco".to_string(),
            state: "CA".to_string(),
            ..Default::default()
        },
    )
    .await
    .unwrap()
}

const VALID_VENUE_BODY: &str = "name=The+Musical+Hop&city=San+Francisco&state=CA\
&address=1015+Folsom+Street&phone=123-123-1234&genres=Jazz&genres=Reggae\
&website_link=https%3A%2F%2Fwww.themusicalhop.com&seeking_talent=y";

// =============================================================================
// Health, home, static assets
// =============================================================================

#[tokio::test]
async fn test_health_endpoint() {
    let (_dir, _pool, app) = setup_app().await;

    let response = app.oneshot(test_request("GET", "/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["module"], "fyyur-web");
    assert!(body["version"].is_string());
    assert_eq!(body["database"], "ok");
}

#[tokio::test]
async fn test_health_reports_unavailable_database() {
    let (_dir, pool, app) = setup_app().await;
    pool.close().await;

    let response = app.oneshot(test_request("GET", "/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["status"], "degraded");
    assert_eq!(body["database"], "unavailable");
}

#[tokio::test]
async fn test_home_page() {
    let (_dir, _pool, app) = setup_app().await;

    let response = app.oneshot(test_request("GET", "/")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let html = extract_text(response.into_body()).await;
    assert!(html.contains("/venues/create"));
}

#[tokio::test]
async fn test_delete_script_is_served() {
    let (_dir, _pool, app) = setup_app().await;

    let response = app
        .oneshot(test_request("GET", "/static/js/script.js"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "application/javascript"
    );
    let js = extract_text(response.into_body()).await;
    assert!(js.contains("DELETE"));
}

// =============================================================================
// Error pages
// =============================================================================

#[tokio::test]
async fn test_unknown_route_is_404_page() {
    let (_dir, _pool, app) = setup_app().await;

    let response = app.oneshot(test_request("GET", "/nowhere")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let html = extract_text(response.into_body()).await;
    assert!(html.contains("does not exist"));
}

#[tokio::test]
async fn test_missing_and_malformed_ids_are_404() {
    let (_dir, _pool, app) = setup_app().await;

    for uri in ["/venues/999", "/artists/999", "/venues/abc", "/artists/1x", "/venues/999/edit"] {
        let response = app.clone().oneshot(test_request("GET", uri)).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND, "GET {}", uri);
    }
}

#[tokio::test]
async fn test_disallowed_method_renders_error_page_with_405() {
    let (_dir, _pool, app) = setup_app().await;

    let response = app.oneshot(test_request("PUT", "/venues")).await.unwrap();
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    assert!(response.headers().contains_key(header::ALLOW));
    let html = extract_text(response.into_body()).await;
    assert!(html.contains("Something went wrong"));
}

// =============================================================================
// Venues
// =============================================================================

#[tokio::test]
async fn test_venue_directory_groups_by_area() {
    let (_dir, pool, app) = setup_app().await;
    add_venue(&pool, "The Musical Hop", "San Francisco", "CA").await;
    add_venue(&pool, "Park Square Live Music & Coffee", "San Francisco", "CA").await;
    add_venue(&pool, "The Dueling Pianos Bar", "New York", "NY").await;

    let response = app.oneshot(test_request("GET", "/venues")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let html = extract_text(response.into_body()).await;
    assert!(html.contains("San Francisco, CA"));
    assert!(html.contains("New York, NY"));
    assert!(html.contains("The Musical Hop"));
    assert!(html.contains("Park Square Live Music &amp; Coffee"));
    assert!(html.find("San Francisco, CA").unwrap() < html.find("New York, NY").unwrap());
}

#[tokio::test]
async fn test_venue_search() {
    let (_dir, pool, app) = setup_app().await;
    let hop = add_venue(&pool, "The Musical Hop", "San Francisco", "CA").await;
    add_venue(&pool, "The Dueling Pianos Bar", "New York", "NY").await;

    let response = app
        .oneshot(form_request("/venues/search", "search_term=hop"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let html = extract_text(response.into_body()).await;
    assert!(html.contains(": 1</h3>"));
    assert!(html.contains(&format!("/venues/{}", hop)));
    assert!(!html.contains("Dueling"));
}

#[tokio::test]
async fn test_venue_detail_shows_upcoming_and_past() {
    let (_dir, pool, app) = setup_app().await;
    let venue_id = add_venue(&pool, "The Musical Hop", "San Francisco", "CA").await;
    let early = add_artist(&pool, "Guns N Petals").await;
    let late = add_artist(&pool, "Matt Quevedo").await;
    let now = Utc::now();
    for (artist_id, start_time) in [
        (early, now - Duration::days(30)),
        (late, now + Duration::days(30)),
    ] {
        db::shows::insert(&pool, &ShowRecord { artist_id, venue_id, start_time })
            .await
            .unwrap();
    }

    let response = app
        .oneshot(test_request("GET", &format!("/venues/{}", venue_id)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let html = extract_text(response.into_body()).await;
    assert!(html.contains("The Musical Hop"));
    assert!(html.contains("1 Upcoming Shows"));
    assert!(html.contains("1 Past Shows"));
    assert!(html.contains(&format!(r#"data-id="{}""#, venue_id)));
}

#[tokio::test]
async fn test_create_venue_success() {
    let (_dir, pool, app) = setup_app().await;

    let response = app
        .oneshot(form_request("/venues/create", VALID_VENUE_BODY))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let html = extract_text(response.into_body()).await;
    assert!(html.contains("Venue The Musical Hop was successfully listed!"));

    let venues = db::venues::list(&pool).await.unwrap();
    assert_eq!(venues.len(), 1);
    assert_eq!(venues[0].genres, vec!["Jazz".to_string(), "Reggae".to_string()]);
    assert_eq!(venues[0].website.as_deref(), Some("https://www.themusicalhop.com"));
    assert!(venues[0].seeking_talent);
}

#[tokio::test]
async fn test_create_venue_with_empty_name_rerenders_form() {
    let (_dir, pool, app) = setup_app().await;
    let body = VALID_VENUE_BODY.replace("name=The+Musical+Hop", "name=");

    let response = app
        .oneshot(form_request("/venues/create", &body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let html = extract_text(response.into_body()).await;
    assert!(html.contains(r#"action="/venues/create""#));
    assert!(html.contains("1015 Folsom Street"));
    assert!(!html.contains("successfully listed"));
    assert!(db::venues::list(&pool).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_edit_venue_redirects_to_detail() {
    let (_dir, pool, app) = setup_app().await;
    let venue_id = add_venue(&pool, "Old Name", "Austin", "TX").await;

    let form = app
        .clone()
        .oneshot(test_request("GET", &format!("/venues/{}/edit", venue_id)))
        .await
        .unwrap();
    assert_eq!(form.status(), StatusCode::OK);
    assert!(extract_text(form.into_body()).await.contains("Old Name"));

    let response = app
        .oneshot(form_request(&format!("/venues/{}/edit", venue_id), VALID_VENUE_BODY))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        response.headers()[header::LOCATION],
        format!("/venues/{}", venue_id).as_str()
    );

    let venue = db::venues::get(&pool, venue_id).await.unwrap().unwrap();
    assert_eq!(venue.name, "The Musical Hop");
    assert_eq!(venue.state, "CA");
}

#[tokio::test]
async fn test_edit_missing_venue_is_404() {
    let (_dir, pool, app) = setup_app().await;

    let response = app
        .oneshot(form_request("/venues/42/edit", VALID_VENUE_BODY))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(db::venues::list(&pool).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_delete_venue() {
    let (_dir, pool, app) = setup_app().await;
    let venue_id = add_venue(&pool, "Doomed", "Austin", "TX").await;
    let artist_id = add_artist(&pool, "Still Here").await;
    db::shows::insert(
        &pool,
        &ShowRecord { artist_id, venue_id, start_time: Utc::now() },
    )
    .await
    .unwrap();

    let response = app
        .clone()
        .oneshot(test_request("DELETE", &format!("/venues/{}", venue_id)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(extract_json(response.into_body()).await["success"], true);
    assert!(db::venues::get(&pool, venue_id).await.unwrap().is_none());
    assert!(db::shows::list_all(&pool).await.unwrap().is_empty());

    // Second delete finds nothing
    let response = app
        .oneshot(test_request("DELETE", &format!("/venues/{}", venue_id)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(extract_json(response.into_body()).await["success"], false);
}

// =============================================================================
// Artists
// =============================================================================

#[tokio::test]
async fn test_artist_listing_and_search() {
    let (_dir, pool, app) = setup_app().await;
    add_artist(&pool, "Guns N Petals").await;
    add_artist(&pool, "Matt Quevedo").await;
    add_artist(&pool, "The Wild Sax Band").await;

    let response = app.clone().oneshot(test_request("GET", "/artists")).await.unwrap();
    let html = extract_text(response.into_body()).await;
    assert!(html.contains("Matt Quevedo"));

    let response = app
        .oneshot(form_request("/artists/search", "search_term=A"))
        .await
        .unwrap();
    let html = extract_text(response.into_body()).await;
    assert!(html.contains(": 3</h3>"));
}

#[tokio::test]
async fn test_edit_artist_redirects_to_detail() {
    let (_dir, pool, app) = setup_app().await;
    let artist_id = add_artist(&pool, "Old Band").await;

    let form = app
        .clone()
        .oneshot(test_request("GET", &format!("/artists/{}/edit", artist_id)))
        .await
        .unwrap();
    assert_eq!(form.status(), StatusCode::OK);
    let html = extract_text(form.into_body()).await;
    assert!(html.contains("Old Band"));
    assert!(html.contains(&format!(r#"action="/artists/{}/edit""#, artist_id)));

    let response = app
        .oneshot(form_request(
            &format!("/artists/{}/edit", artist_id),
            "name=Guns+N+Petals&city=San+Francisco&state=CA&genres=Jazz&genres=Soul&seeking_venue=y",
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        response.headers()[header::LOCATION],
        format!("/artists/{}", artist_id).as_str()
    );

    let artist = db::artists::get(&pool, artist_id).await.unwrap().unwrap();
    assert_eq!(artist.name, "Guns N Petals");
    assert_eq!(artist.genres, vec!["Jazz".to_string(), "Soul".to_string()]);
    assert!(artist.seeking_venue);
}

#[tokio::test]
async fn test_edit_artist_with_invalid_input_rerenders_form() {
    let (_dir, pool, app) = setup_app().await;
    let artist_id = add_artist(&pool, "Keep Me").await;

    let response = app
        .oneshot(form_request(
            &format!("/artists/{}/edit", artist_id),
            "name=&city=Austin&state=ZZ&genres=Jazz",
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let html = extract_text(response.into_body()).await;
    assert!(html.contains(&format!(r#"action="/artists/{}/edit""#, artist_id)));
    assert!(html.contains("form-errors"));

    let artist = db::artists::get(&pool, artist_id).await.unwrap().unwrap();
    assert_eq!(artist.name, "Keep Me");
    assert_eq!(artist.city, "San Francisco");
}

#[tokio::test]
async fn test_edit_missing_artist_is_404() {
    let (_dir, pool, app) = setup_app().await;

    let response = app
        .clone()
        .oneshot(test_request("GET", "/artists/42/edit"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app
        .oneshot(form_request(
            "/artists/42/edit",
            "name=Ghost&city=Austin&state=TX&genres=Jazz",
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(db::artists::list(&pool).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_edit_artist_persistence_failure_shows_generic_message() {
    let (_dir, pool, app) = setup_app().await;
    let artist_id = add_artist(&pool, "Locked Out").await;

    // Updates fail while reads still succeed
    sqlx::query(
        "CREATE TRIGGER reject_artist_update BEFORE UPDATE ON artists \
         BEGIN SELECT RAISE(ABORT, 'read only'); END",
    )
    .execute(&pool)
    .await
    .unwrap();

    let response = app
        .oneshot(form_request(
            &format!("/artists/{}/edit", artist_id),
            "name=New+Name&city=Austin&state=TX&genres=Jazz",
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let html = extract_text(response.into_body()).await;
    assert!(html.contains("An error occurred. Artist New Name could not be updated."));

    let artist = db::artists::get(&pool, artist_id).await.unwrap().unwrap();
    assert_eq!(artist.name, "Locked Out");
}

#[tokio::test]
async fn test_create_artist_rejects_unknown_genre() {
    let (_dir, pool, app) = setup_app().await;

    let response = app
        .oneshot(form_request(
            "/artists/create",
            "name=Polka+Kings&city=Austin&state=TX&genres=Polka",
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let html = extract_text(response.into_body()).await;
    assert!(html.contains(r#"action="/artists/create""#));
    assert!(db::artists::list(&pool).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_create_artist_success() {
    let (_dir, pool, app) = setup_app().await;

    let response = app
        .oneshot(form_request(
            "/artists/create",
            "name=Matt+Quevedo&city=New+York&state=NY&genres=Jazz&seeking_venue=y",
        ))
        .await
        .unwrap();
    let html = extract_text(response.into_body()).await;
    assert!(html.contains("Artist Matt Quevedo was successfully listed!"));

    let artists = db::artists::list(&pool).await.unwrap();
    assert_eq!(artists.len(), 1);
    let artist = db::artists::get(&pool, artists[0].id).await.unwrap().unwrap();
    assert!(artist.seeking_venue);
}

// =============================================================================
// Shows
// =============================================================================

#[tokio::test]
async fn test_create_show_form_prefills_start_time() {
    let (_dir, _pool, app) = setup_app().await;

    let response = app.oneshot(test_request("GET", "/shows/create")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let html = extract_text(response.into_body()).await;
    assert!(html.contains(r#"name="start_time""#));
}

#[tokio::test]
async fn test_create_show_and_list() {
    let (_dir, pool, app) = setup_app().await;
    let venue_id = add_venue(&pool, "The Musical Hop", "San Francisco", "CA").await;
    let artist_id = add_artist(&pool, "Guns N Petals").await;

    let body = format!(
        "artist_id={}&venue_id={}&start_time=2035-04-01+20%3A00%3A00",
        artist_id, venue_id
    );
    let response = app
        .clone()
        .oneshot(form_request("/shows/create", &body))
        .await
        .unwrap();
    let html = extract_text(response.into_body()).await;
    assert!(html.contains("Show was successfully listed!"));

    let response = app.oneshot(test_request("GET", "/shows")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let html = extract_text(response.into_body()).await;
    assert!(html.contains("Guns N Petals"));
    assert!(html.contains("The Musical Hop"));
}

#[tokio::test]
async fn test_create_show_for_unknown_artist_reports_failure() {
    let (_dir, pool, app) = setup_app().await;
    let venue_id = add_venue(&pool, "The Musical Hop", "San Francisco", "CA").await;

    let body = format!(
        "artist_id=999&venue_id={}&start_time=2035-04-01+20%3A00%3A00",
        venue_id
    );
    let response = app
        .oneshot(form_request("/shows/create", &body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let html = extract_text(response.into_body()).await;
    assert!(html.contains("An error occurred. Show could not be listed."));
    assert!(db::shows::list_all(&pool).await.unwrap().is_empty());
}
