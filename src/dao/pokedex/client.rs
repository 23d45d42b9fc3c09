use std::{sync::Arc, time::Duration};

use futures::future::BoxFuture;
use reqwest::{Client, StatusCode};

use super::{
    PokemonCatalog,
    error::{CatalogResult, PokeApiError},
    models::PokemonResponse,
};
use crate::dao::models::{PokemonId, PokemonInfo};

/// Public PokéAPI instance.
pub const DEFAULT_BASE_URL: &str = "https://pokeapi.co";

/// [`PokemonCatalog`] backed by the PokéAPI REST endpoints.
#[derive(Clone)]
pub struct PokeApiClient {
    client: Client,
    base_url: Arc<str>,
}

impl PokeApiClient {
    /// Build a client for `base_url` whose requests give up after `timeout`.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, PokeApiError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|source| PokeApiError::ClientBuilder { source })?;

        Ok(Self {
            client,
            base_url: Arc::from(base_url.trim_end_matches('/')),
        })
    }

    fn pokemon_url(&self, id: PokemonId) -> String {
        format!("{}/api/v2/pokemon/{}", self.base_url, id)
    }

    async fn get_pokemon(&self, id: PokemonId) -> Result<PokemonInfo, PokeApiError> {
        let url = self.pokemon_url(id);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|source| PokeApiError::RequestSend {
                url: url.clone(),
                source,
            })?;

        match response.status() {
            StatusCode::NOT_FOUND => Err(PokeApiError::NotFound { id }),
            status if status.is_success() => response
                .json::<PokemonResponse>()
                .await
                .map(Into::into)
                .map_err(|source| PokeApiError::DecodeResponse { url, source }),
            other => Err(PokeApiError::RequestStatus { url, status: other }),
        }
    }
}

impl PokemonCatalog for PokeApiClient {
    fn fetch_pokemon(&self, id: PokemonId) -> BoxFuture<'static, CatalogResult<PokemonInfo>> {
        let client = self.clone();
        Box::pin(async move { client.get_pokemon(id).await.map_err(Into::into) })
    }
}
