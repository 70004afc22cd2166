//! Artist persistence

use sqlx::types::Json;
use sqlx::SqlitePool;

use super::models::{Artist, ArtistRecord, NameEntry};
use super::name_matches;
use crate::Result;

const ARTIST_COLUMNS: &str = "id, name, genres, city, state, phone, website, \
                              facebook_link, image_link, seeking_venue, seeking_description";

/// Look up an artist by id
pub async fn get(pool: &SqlitePool, id: i64) -> Result<Option<Artist>> {
    let artist = sqlx::query_as::<_, Artist>(&format!(
        "SELECT {} FROM artists WHERE id = ?",
        ARTIST_COLUMNS
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(artist)
}

/// Id and name of every artist, ordered by id
pub async fn list(pool: &SqlitePool) -> Result<Vec<NameEntry>> {
    let artists = sqlx::query_as::<_, NameEntry>("SELECT id, name FROM artists ORDER BY id")
        .fetch_all(pool)
        .await?;

    Ok(artists)
}

/// Case-insensitive substring match on name, ordered by id
///
/// SQLite `LIKE` folds ASCII case only, so the match runs in Rust.
pub async fn search_by_name(pool: &SqlitePool, term: &str) -> Result<Vec<Artist>> {
    let artists = sqlx::query_as::<_, Artist>(&format!(
        "SELECT {} FROM artists ORDER BY id",
        ARTIST_COLUMNS
    ))
    .fetch_all(pool)
    .await?;

    Ok(artists
        .into_iter()
        .filter(|row| name_matches(&row.name, term))
        .collect())
}

/// Insert an artist, returning its id
pub async fn insert(pool: &SqlitePool, record: &ArtistRecord) -> Result<i64> {
    let mut tx = pool.begin().await?;

    let result = sqlx::query(
        r#"
        INSERT INTO artists (
            name, genres, city, state, phone, website,
            facebook_link, image_link, seeking_venue, seeking_description
        )
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&record.name)
    .bind(Json(&record.genres))
    .bind(&record.city)
    .bind(&record.state)
    .bind(&record.phone)
    .bind(&record.website)
    .bind(&record.facebook_link)
    .bind(&record.image_link)
    .bind(record.seeking_venue)
    .bind(&record.seeking_description)
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;

    Ok(result.last_insert_rowid())
}

/// Overwrite every field of an artist; returns false when the id does not exist
pub async fn update(pool: &SqlitePool, id: i64, record: &ArtistRecord) -> Result<bool> {
    let mut tx = pool.begin().await?;

    let result = sqlx::query(
        r#"
        UPDATE artists SET
            name = ?, genres = ?, city = ?, state = ?, phone = ?,
            website = ?, facebook_link = ?, image_link = ?,
            seeking_venue = ?, seeking_description = ?
        WHERE id = ?
        "#,
    )
    .bind(&record.name)
    .bind(Json(&record.genres))
    .bind(&record.city)
    .bind(&record.state)
    .bind(&record.phone)
    .bind(&record.website)
    .bind(&record.facebook_link)
    .bind(&record.image_link)
    .bind(record.seeking_venue)
    .bind(&record.seeking_description)
    .bind(id)
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;

    Ok(result.rows_affected() > 0)
}
