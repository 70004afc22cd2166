//! Venue persistence

use sqlx::types::Json;
use sqlx::SqlitePool;

use super::models::{Venue, VenueRecord};
use super::name_matches;
use crate::Result;

const VENUE_COLUMNS: &str = "id, name, genres, address, city, state, phone, website, \
                             facebook_link, image_link, seeking_talent, seeking_description";

/// Look up a venue by id
pub async fn get(pool: &SqlitePool, id: i64) -> Result<Option<Venue>> {
    let venue = sqlx::query_as::<_, Venue>(&format!(
        "SELECT {} FROM venues WHERE id = ?",
        VENUE_COLUMNS
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(venue)
}

/// All venues ordered by state, city, then id
pub async fn list(pool: &SqlitePool) -> Result<Vec<Venue>> {
    let venues = sqlx::query_as::<_, Venue>(&format!(
        "SELECT {} FROM venues ORDER BY state, city, id",
        VENUE_COLUMNS
    ))
    .fetch_all(pool)
    .await?;

    Ok(venues)
}

/// Venues in one (city, state) area, ordered by id
pub async fn list_in_area(pool: &SqlitePool, city: &str, state: &str) -> Result<Vec<Venue>> {
    let venues = sqlx::query_as::<_, Venue>(&format!(
        "SELECT {} FROM venues WHERE city = ? AND state = ? ORDER BY id",
        VENUE_COLUMNS
    ))
    .bind(city)
    .bind(state)
    .fetch_all(pool)
    .await?;

    Ok(venues)
}

/// Case-insensitive substring match on name, ordered by id
///
/// SQLite `LIKE` folds ASCII case only, so the match runs in Rust.
pub async fn search_by_name(pool: &SqlitePool, term: &str) -> Result<Vec<Venue>> {
    let venues = sqlx::query_as::<_, Venue>(&format!(
        "SELECT {} FROM venues ORDER BY id",
        VENUE_COLUMNS
    ))
    .fetch_all(pool)
    .await?;

    Ok(venues
        .into_iter()
        .filter(|row| name_matches(&row.name, term))
        .collect())
}

/// Insert a venue, returning its id
pub async fn insert(pool: &SqlitePool, record: &VenueRecord) -> Result<i64> {
    let mut tx = pool.begin().await?;

    let result = sqlx::query(
        r#"
        INSERT INTO venues (
            name, genres, address, city, state, phone, website,
            facebook_link, image_link, seeking_talent, seeking_description
        )
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&record.name)
    .bind(Json(&record.genres))
    .bind(&record.address)
    .bind(&record.city)
    .bind(&record.state)
    .bind(&record.phone)
    .bind(&record.website)
    .bind(&record.facebook_link)
    .bind(&record.image_link)
    .bind(record.seeking_talent)
    .bind(&record.seeking_description)
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;

    Ok(result.last_insert_rowid())
}

/// Overwrite every field of a venue; returns false when the id does not exist
pub async fn update(pool: &SqlitePool, id: i64, record: &VenueRecord) -> Result<bool> {
    let mut tx = pool.begin().await?;

    let result = sqlx::query(
        r#"
        UPDATE venues SET
            name = ?, genres = ?, address = ?, city = ?, state = ?, phone = ?,
            website = ?, facebook_link = ?, image_link = ?,
            seeking_talent = ?, seeking_description = ?
        WHERE id = ?
        "#,
    )
    .bind(&record.name)
    .bind(Json(&record.genres))
    .bind(&record.address)
    .bind(&record.city)
    .bind(&record.state)
    .bind(&record.phone)
    .bind(&record.website)
    .bind(&record.facebook_link)
    .bind(&record.image_link)
    .bind(record.seeking_talent)
    .bind(&record.seeking_description)
    .bind(id)
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;

    Ok(result.rows_affected() > 0)
}

/// Delete a venue and its shows; returns false when the id does not exist
pub async fn delete(pool: &SqlitePool, id: i64) -> Result<bool> {
    let mut tx = pool.begin().await?;

    sqlx::query("DELETE FROM shows WHERE venue_id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?;

    let result = sqlx::query("DELETE FROM venues WHERE id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;

    Ok(result.rows_affected() > 0)
}
