//! Path extractors

use axum::{
    async_trait,
    extract::{FromRequestParts, Path},
    http::request::Parts,
};

use super::AppError;

/// Numeric entity id from the single path parameter
///
/// A non-numeric id is a missing page (404), not a bad request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntityId(pub i64);

#[async_trait]
impl<S> FromRequestParts<S> for EntityId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| AppError::NotFound(format!("path parameter: {}", e)))?;

        raw.parse::<i64>()
            .map(EntityId)
            .map_err(|_| AppError::NotFound(format!("id {:?}", raw)))
    }
}
