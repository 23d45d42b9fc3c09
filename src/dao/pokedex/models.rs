use serde::Deserialize;

use crate::dao::models::{PokemonId, PokemonInfo};

/// Subset of the `/api/v2/pokemon/{id}` payload the game needs.
#[derive(Debug, Deserialize)]
pub struct PokemonResponse {
    pub id: PokemonId,
    pub name: String,
    #[serde(default)]
    pub sprites: SpritesResponse,
}

#[derive(Debug, Default, Deserialize)]
pub struct SpritesResponse {
    #[serde(default)]
    pub front_default: Option<String>,
}

impl From<PokemonResponse> for PokemonInfo {
    fn from(value: PokemonResponse) -> Self {
        Self {
            id: value.id,
            name: value.name,
            image_url: value.sprites.front_default,
        }
    }
}
