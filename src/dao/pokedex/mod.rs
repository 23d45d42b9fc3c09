//! Access to the public Pokémon data API.

mod client;
mod error;
mod models;

pub use client::{DEFAULT_BASE_URL, PokeApiClient};
pub use error::{CatalogError, CatalogResult, PokeApiError};

use futures::future::{BoxFuture, try_join_all};

use crate::dao::models::{PokemonId, PokemonInfo};

/// Read-only source of Pokémon display data keyed by Pokédex number.
pub trait PokemonCatalog: Send + Sync {
    /// Fetch the display record for `id`.
    fn fetch_pokemon(&self, id: PokemonId) -> BoxFuture<'static, CatalogResult<PokemonInfo>>;
}

/// Fetch every id of `ids`, keeping their order.
///
/// The first failing lookup rejects the whole team; nothing is retried.
pub async fn fetch_team(
    catalog: &dyn PokemonCatalog,
    ids: &[PokemonId],
) -> CatalogResult<Vec<PokemonInfo>> {
    try_join_all(ids.iter().map(|id| catalog.fetch_pokemon(*id))).await
}
