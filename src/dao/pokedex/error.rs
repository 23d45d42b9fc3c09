//! Error types shared by the Pokémon API client.

use std::error::Error;

use reqwest::StatusCode;
use thiserror::Error;

use crate::dao::models::PokemonId;

/// Result alias for catalog lookups.
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Failures that can occur while talking to the Pokémon API.
#[derive(Debug, Error)]
pub enum PokeApiError {
    /// Building the HTTP client failed (invalid TLS setup, etc).
    #[error("failed to build Pokémon API client")]
    ClientBuilder {
        #[source]
        source: reqwest::Error,
    },
    /// The request could not be sent or timed out.
    #[error("failed to send Pokémon API request to `{url}`")]
    RequestSend {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    /// The API does not know this Pokédex number.
    #[error("Pokémon `{id}` not found")]
    NotFound { id: PokemonId },
    /// The API answered with an unexpected status code.
    #[error("unexpected Pokémon API response status {status} for `{url}`")]
    RequestStatus { url: String, status: StatusCode },
    /// Response payload could not be parsed into the expected shape.
    #[error("failed to decode Pokémon API response for `{url}`")]
    DecodeResponse {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

/// Error raised by catalog implementations regardless of where data comes from.
#[derive(Debug, Error)]
#[error("pokemon lookup failed: {message}")]
pub struct CatalogError {
    message: String,
    #[source]
    source: Box<dyn Error + Send + Sync>,
}

impl CatalogError {
    /// Wrap any lookup failure.
    pub fn new(message: String, source: impl Error + Send + Sync + 'static) -> Self {
        Self {
            message,
            source: Box::new(source),
        }
    }
}

impl From<PokeApiError> for CatalogError {
    fn from(err: PokeApiError) -> Self {
        CatalogError::new(err.to_string(), err)
    }
}
