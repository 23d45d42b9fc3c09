pub mod memory;
#[cfg(feature = "mongo-store")]
pub mod mongodb;

use crate::dao::models::{GameEntity, PokemonId};
use crate::dao::storage::StorageResult;
use futures::future::BoxFuture;
use uuid::Uuid;

pub use memory::MemoryGameStore;

/// Abstraction over the persistence layer for games.
pub trait GameStore: Send + Sync {
    /// Insert a brand-new game record.
    fn create_game(&self, game: GameEntity) -> BoxFuture<'static, StorageResult<()>>;
    /// Read a game by id, `None` when it does not exist.
    fn find_game(&self, id: Uuid) -> BoxFuture<'static, StorageResult<Option<GameEntity>>>;
    /// Push `pokemon` at the end of the stored sequence and return the updated record.
    ///
    /// The write only applies while the stored sequence still holds `expected_len`
    /// elements. Resolves to `None` when no game matches `id` at that length.
    fn append_to_sequence(
        &self,
        id: Uuid,
        expected_len: usize,
        pokemon: PokemonId,
    ) -> BoxFuture<'static, StorageResult<Option<GameEntity>>>;
    /// Cheap round trip proving the backend is reachable.
    fn health_check(&self) -> BoxFuture<'static, StorageResult<()>>;
    /// Attempt to revive the connection after a failed health check.
    fn try_reconnect(&self) -> BoxFuture<'static, StorageResult<()>>;
}
