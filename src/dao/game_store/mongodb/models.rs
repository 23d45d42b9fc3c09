use mongodb::bson::{self, DateTime, Document, doc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::dao::models::{GameEntity, PokemonId};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MongoGameDocument {
    #[serde(rename = "_id")]
    id: bson::Uuid,
    initial_team: Vec<PokemonId>,
    #[serde(default)]
    pokemon_sequence: Vec<PokemonId>,
    created_at: DateTime,
    updated_at: DateTime,
}

impl From<GameEntity> for MongoGameDocument {
    fn from(value: GameEntity) -> Self {
        Self {
            id: uuid_as_bson(value.id),
            initial_team: value.initial_team,
            pokemon_sequence: value.pokemon_sequence,
            created_at: DateTime::from_system_time(value.created_at),
            updated_at: DateTime::from_system_time(value.updated_at),
        }
    }
}

impl From<MongoGameDocument> for GameEntity {
    fn from(value: MongoGameDocument) -> Self {
        Self {
            id: Uuid::from_bytes(value.id.bytes()),
            initial_team: value.initial_team,
            pokemon_sequence: value.pokemon_sequence,
            created_at: value.created_at.to_system_time(),
            updated_at: value.updated_at.to_system_time(),
        }
    }
}

fn uuid_as_bson(id: Uuid) -> bson::Uuid {
    bson::Uuid::from_bytes(id.into_bytes())
}

/// Filter matching the document whose `_id` is `id`.
pub fn doc_id(id: Uuid) -> Document {
    doc! {"_id": uuid_as_bson(id)}
}

/// Filter matching game `id` only while its sequence holds `len` elements.
pub fn doc_id_at_length(id: Uuid, len: usize) -> Document {
    let len = i64::try_from(len).unwrap_or(i64::MAX);
    doc! {"_id": uuid_as_bson(id), "pokemon_sequence": {"$size": len}}
}

/// Update pushing `pokemon` onto the sequence and refreshing `updated_at`.
pub fn push_to_sequence(pokemon: PokemonId) -> Document {
    doc! {
        "$push": { "pokemon_sequence": i64::from(pokemon) },
        "$set": { "updated_at": DateTime::now() },
    }
}
