use serde::{Deserialize, Serialize};
use std::time::SystemTime;
use uuid::Uuid;

/// National Pokédex number identifying a Pokémon.
pub type PokemonId = u32;

/// Aggregate game entity persisted by the storage layer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GameEntity {
    /// Primary key of the game.
    pub id: Uuid,
    /// Team drawn when the game started. Never changes afterwards.
    pub initial_team: Vec<PokemonId>,
    /// Sequence the player has reproduced so far; only ever grows.
    pub pokemon_sequence: Vec<PokemonId>,
    /// Creation timestamp for auditing/debugging.
    pub created_at: SystemTime,
    /// Last time the sequence was extended.
    pub updated_at: SystemTime,
}

impl GameEntity {
    /// Build a fresh game around `initial_team` with an empty sequence.
    pub fn new(initial_team: Vec<PokemonId>) -> Self {
        let now = SystemTime::now();
        Self {
            id: Uuid::new_v4(),
            initial_team,
            pokemon_sequence: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }
}

/// Display data for a single Pokémon, reshaped from the public API payload.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PokemonInfo {
    /// Pokédex number.
    pub id: PokemonId,
    /// Lowercase species name (e.g. "bulbasaur").
    pub name: String,
    /// Default front sprite, when the API has one.
    pub image_url: Option<String>,
}
