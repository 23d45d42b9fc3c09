use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Serialize;
use thiserror::Error;
use tracing::warn;
use validator::ValidationErrors;

use crate::dao::{pokedex::CatalogError, storage::StorageError};

/// Errors that can occur in service layer operations.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Pokémon data could not be fetched.
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    /// Storage backend is unavailable.
    #[error(transparent)]
    Unavailable(StorageError),
    /// Application is running in degraded mode without storage.
    #[error("storage unavailable (degraded mode)")]
    Degraded,
    /// A random pick was requested over an empty range.
    #[error("invalid range: start {start} is greater than end {end}")]
    InvalidRange {
        /// Lower bound requested.
        start: u32,
        /// Upper bound requested.
        end: u32,
    },
    /// Invalid input provided by the client or configuration.
    #[error("invalid input: {0}")]
    InvalidInput(String),
    /// Operation cannot be performed in the current state.
    #[error("invalid state: {0}")]
    InvalidState(String),
    /// Requested resource was not found.
    #[error("not found: {0}")]
    NotFound(String),
}

impl From<StorageError> for ServiceError {
    fn from(err: StorageError) -> Self {
        ServiceError::Unavailable(err)
    }
}

impl From<ValidationErrors> for ServiceError {
    fn from(err: ValidationErrors) -> Self {
        ServiceError::InvalidInput(format!("validation failed: {}", err))
    }
}

impl From<JsonRejection> for ServiceError {
    fn from(rejection: JsonRejection) -> Self {
        ServiceError::InvalidInput(rejection.body_text())
    }
}

impl From<PathRejection> for ServiceError {
    fn from(rejection: PathRejection) -> Self {
        ServiceError::InvalidInput(rejection.body_text())
    }
}

/// Application-level errors that are converted to HTTP responses.
///
/// Each variant names the operation that failed; all of them are answered with a 500.
#[derive(Debug, Error)]
pub enum AppError {
    /// Starting a new game failed.
    #[error("error starting the game: {0}")]
    StartGame(#[source] ServiceError),
    /// Checking a submitted sequence failed.
    #[error("error comparing the sequence: {0}")]
    CompareSequence(#[source] ServiceError),
    /// Reading a stored game failed.
    #[error("error reading the game: {0}")]
    ReadGame(#[source] ServiceError),
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        warn!(error = %self, "request failed");
        let payload = Json(ErrorBody {
            error: self.to_string(),
        });

        (StatusCode::INTERNAL_SERVER_ERROR, payload).into_response()
    }
}
