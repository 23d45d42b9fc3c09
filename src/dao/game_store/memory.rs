//! In-process game store backed by a concurrent map, used for local runs and tests.

use std::{sync::Arc, time::SystemTime};

use dashmap::{DashMap, mapref::entry::Entry};
use futures::future::BoxFuture;
use uuid::Uuid;

use crate::dao::{
    game_store::GameStore,
    models::{GameEntity, PokemonId},
    storage::{StorageError, StorageResult},
};

#[derive(Clone, Default)]
/// Volatile [`GameStore`] keeping every game in memory; nothing survives a restart.
pub struct MemoryGameStore {
    games: Arc<DashMap<Uuid, GameEntity>>,
}

impl MemoryGameStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of games currently held.
    pub fn len(&self) -> usize {
        self.games.len()
    }

    /// Whether the store holds no game at all.
    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }

    fn insert(&self, game: GameEntity) -> StorageResult<()> {
        match self.games.entry(game.id) {
            Entry::Occupied(_) => Err(StorageError::conflict(format!(
                "game `{}` already exists",
                game.id
            ))),
            Entry::Vacant(slot) => {
                slot.insert(game);
                Ok(())
            }
        }
    }

    fn append(&self, id: Uuid, expected_len: usize, pokemon: PokemonId) -> Option<GameEntity> {
        let mut game = self.games.get_mut(&id)?;
        if game.pokemon_sequence.len() != expected_len {
            return None;
        }
        game.pokemon_sequence.push(pokemon);
        game.updated_at = SystemTime::now();
        Some(game.value().clone())
    }
}

impl GameStore for MemoryGameStore {
    fn create_game(&self, game: GameEntity) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move { store.insert(game) })
    }

    fn find_game(&self, id: Uuid) -> BoxFuture<'static, StorageResult<Option<GameEntity>>> {
        let store = self.clone();
        Box::pin(async move { Ok(store.games.get(&id).map(|game| game.value().clone())) })
    }

    fn append_to_sequence(
        &self,
        id: Uuid,
        expected_len: usize,
        pokemon: PokemonId,
    ) -> BoxFuture<'static, StorageResult<Option<GameEntity>>> {
        let store = self.clone();
        Box::pin(async move { Ok(store.append(id, expected_len, pokemon)) })
    }

    fn health_check(&self) -> BoxFuture<'static, StorageResult<()>> {
        Box::pin(async { Ok(()) })
    }

    fn try_reconnect(&self) -> BoxFuture<'static, StorageResult<()>> {
        Box::pin(async { Ok(()) })
    }
}
