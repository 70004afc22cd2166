//! # Fyyur Common Library
//!
//! Shared code for the Fyyur booking directory:
//! - Database schema and per-entity persistence
//! - Query/aggregation layer behind the listing, search and detail views
//! - Timestamp classification and presentation
//! - Configuration loading
//! - Form choice lists (genres, US states)

pub mod choices;
pub mod config;
pub mod db;
pub mod error;
pub mod query;
pub mod time;

pub use error::{Error, Result};
pub use time::DateStyle;
