//! Database schema, models and per-entity persistence

pub mod artists;
pub mod init;
pub mod models;
pub mod shows;
pub mod venues;

pub use init::*;
pub use models::*;

/// Case-insensitive substring match with Unicode case folding
///
/// The term is matched literally; an empty term matches every name.
pub(crate) fn name_matches(name: &str, term: &str) -> bool {
    name.to_lowercase().contains(&term.to_lowercase())
}
