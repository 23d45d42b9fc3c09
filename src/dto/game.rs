use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::{
    dao::models::{GameEntity, PokemonId, PokemonInfo},
    dto::validation::validate_game_id,
};

/// Display data for one team member.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct PokemonSummary {
    #[schema(value_type = u32)]
    pub id: PokemonId,
    pub name: String,
    pub image_url: Option<String>,
}

impl From<PokemonInfo> for PokemonSummary {
    fn from(value: PokemonInfo) -> Self {
        Self {
            id: value.id,
            name: value.name,
            image_url: value.image_url,
        }
    }
}

/// Returned once a new game has been persisted.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct StartGameResponse {
    pub game_id: Uuid,
    /// Team members in draw order.
    pub initial_team: Vec<PokemonSummary>,
}

/// Sequence attempt sent by the player.
#[derive(Debug, Serialize, Deserialize, ToSchema, Validate)]
pub struct SubmitSequenceRequest {
    #[validate(custom(function = "validate_game_id"))]
    #[serde(default)]
    pub game_id: Uuid,
    /// Pokédex numbers in the order the player reproduced them.
    #[schema(value_type = Vec<u32>)]
    #[serde(default)]
    pub pokemons: Vec<PokemonId>,
}

/// Verdict on a submitted sequence.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SequenceResult {
    /// The attempt matched; keep playing.
    Continue,
    /// The attempt diverged from the stored sequence.
    GameOver,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SequenceResponse {
    pub result: SequenceResult,
    /// Stored sequence after handling the attempt.
    #[schema(value_type = Vec<u32>)]
    pub pokemon_sequence: Vec<PokemonId>,
}

/// Stored state of a game.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct GameDetails {
    pub game_id: Uuid,
    #[schema(value_type = Vec<u32>)]
    pub initial_team: Vec<PokemonId>,
    #[schema(value_type = Vec<u32>)]
    pub pokemon_sequence: Vec<PokemonId>,
}

impl From<GameEntity> for GameDetails {
    fn from(value: GameEntity) -> Self {
        Self {
            game_id: value.id,
            initial_team: value.initial_team,
            pokemon_sequence: value.pokemon_sequence,
        }
    }
}
