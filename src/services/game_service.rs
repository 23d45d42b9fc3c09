use tracing::{info, warn};
use uuid::Uuid;
use validator::Validate;

use crate::{
    dao::{
        models::{GameEntity, PokemonId},
        pokedex::fetch_team,
    },
    dto::game::{
        GameDetails, SequenceResponse, SequenceResult, StartGameResponse, SubmitSequenceRequest,
    },
    error::ServiceError,
    services::draw::{draw_team, next_in_sequence},
    state::SharedState,
};

/// How a submitted attempt relates to the stored sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequenceJudgement {
    /// Same length and same elements: the sequence can grow.
    Complete,
    /// Correct so far but shorter than the stored sequence.
    Partial,
    /// Wrong element somewhere, or longer than what was stored.
    Mismatch,
}

/// Compare a player attempt with the stored sequence.
pub fn judge_sequence(stored: &[PokemonId], attempt: &[PokemonId]) -> SequenceJudgement {
    if !stored.starts_with(attempt) {
        SequenceJudgement::Mismatch
    } else if attempt.len() == stored.len() {
        SequenceJudgement::Complete
    } else {
        SequenceJudgement::Partial
    }
}

/// Draw a team, fetch its display data and persist a fresh game.
///
/// Nothing is written when a lookup fails.
pub async fn start_game(state: &SharedState) -> Result<StartGameResponse, ServiceError> {
    let config = state.config();
    let team = draw_team(config.pokedex_range.clone(), config.team_size)?;
    let members = fetch_team(state.catalog(), &team).await?;

    let store = state.require_game_store().await?;
    let game = GameEntity::new(team);
    let game_id = game.id;
    store.create_game(game).await?;

    info!(%game_id, team_size = members.len(), "game started");

    Ok(StartGameResponse {
        game_id,
        initial_team: members.into_iter().map(Into::into).collect(),
    })
}

/// Read a stored game from its textual id.
pub async fn get_game(state: &SharedState, id: &str) -> Result<GameDetails, ServiceError> {
    let id = Uuid::try_parse(id.trim())
        .map_err(|err| ServiceError::InvalidInput(format!("invalid game id `{id}`: {err}")))?;
    find_game(state, id).await.map(Into::into)
}

/// Check an attempt and grow the sequence by one Pokémon when it reproduces it fully.
pub async fn submit_sequence(
    state: &SharedState,
    request: SubmitSequenceRequest,
) -> Result<SequenceResponse, ServiceError> {
    request.validate()?;
    let game_id = request.game_id;

    let game = find_game(state, game_id).await?;

    match judge_sequence(&game.pokemon_sequence, &request.pokemons) {
        SequenceJudgement::Complete => {
            let pokemon = next_in_sequence(&game.initial_team)?;
            let store = state.require_game_store().await?;
            let judged_len = game.pokemon_sequence.len();
            let Some(updated) = store
                .append_to_sequence(game_id, judged_len, pokemon)
                .await?
            else {
                // Either the game is gone or a concurrent attempt already grew it.
                let Some(current) = store.find_game(game_id).await? else {
                    return Err(ServiceError::NotFound(format!(
                        "game `{game_id}` not found for update"
                    )));
                };
                warn!(
                    %game_id,
                    judged_len,
                    length = current.pokemon_sequence.len(),
                    "sequence changed while judging; not extending"
                );
                return Ok(SequenceResponse {
                    result: SequenceResult::Continue,
                    pokemon_sequence: current.pokemon_sequence,
                });
            };

            info!(
                %game_id,
                pokemon,
                length = updated.pokemon_sequence.len(),
                "sequence extended"
            );
            Ok(SequenceResponse {
                result: SequenceResult::Continue,
                pokemon_sequence: updated.pokemon_sequence,
            })
        }
        SequenceJudgement::Partial => Ok(SequenceResponse {
            result: SequenceResult::Continue,
            pokemon_sequence: game.pokemon_sequence,
        }),
        SequenceJudgement::Mismatch => {
            info!(
                %game_id,
                length = game.pokemon_sequence.len(),
                "sequence mismatch; game over"
            );
            Ok(SequenceResponse {
                result: SequenceResult::GameOver,
                pokemon_sequence: game.pokemon_sequence,
            })
        }
    }
}

async fn find_game(state: &SharedState, id: Uuid) -> Result<GameEntity, ServiceError> {
    let store = state.require_game_store().await?;
    match store.find_game(id).await? {
        Some(game) => Ok(game),
        None => {
            warn!(game_id = %id, "game not found");
            Err(ServiceError::NotFound(format!("game `{id}` not found")))
        }
    }
}

#[cfg(test)]
mod tests {
    use std::{
        io,
        sync::{
            Arc, Mutex,
            atomic::{AtomicBool, Ordering},
        },
    };

    use futures::future::BoxFuture;

    use super::*;
    use crate::{
        config::AppConfig,
        dao::{
            game_store::{GameStore, MemoryGameStore},
            models::PokemonInfo,
            pokedex::{CatalogError, CatalogResult, PokemonCatalog},
            storage::{StorageError, StorageResult},
        },
        state::AppState,
    };

    struct FakeCatalog;

    impl PokemonCatalog for FakeCatalog {
        fn fetch_pokemon(&self, id: PokemonId) -> BoxFuture<'static, CatalogResult<PokemonInfo>> {
            Box::pin(async move {
                Ok(PokemonInfo {
                    id,
                    name: format!("pokemon-{id}"),
                    image_url: Some(format!("url-{id}")),
                })
            })
        }
    }

    struct BrokenCatalog;

    impl PokemonCatalog for BrokenCatalog {
        fn fetch_pokemon(&self, _id: PokemonId) -> BoxFuture<'static, CatalogResult<PokemonInfo>> {
            Box::pin(async {
                Err(CatalogError::new(
                    "api error".into(),
                    io::Error::other("api error"),
                ))
            })
        }
    }

    /// Store whose every call fails.
    struct BrokenStore;

    fn db_error() -> StorageError {
        StorageError::unavailable("database error".into(), io::Error::other("database error"))
    }

    impl GameStore for BrokenStore {
        fn create_game(&self, _game: GameEntity) -> BoxFuture<'static, StorageResult<()>> {
            Box::pin(async { Err(db_error()) })
        }

        fn find_game(&self, _id: Uuid) -> BoxFuture<'static, StorageResult<Option<GameEntity>>> {
            Box::pin(async { Err(db_error()) })
        }

        fn append_to_sequence(
            &self,
            _id: Uuid,
            _expected_len: usize,
            _pokemon: PokemonId,
        ) -> BoxFuture<'static, StorageResult<Option<GameEntity>>> {
            Box::pin(async { Err(db_error()) })
        }

        fn health_check(&self) -> BoxFuture<'static, StorageResult<()>> {
            Box::pin(async { Err(db_error()) })
        }

        fn try_reconnect(&self) -> BoxFuture<'static, StorageResult<()>> {
            Box::pin(async { Err(db_error()) })
        }
    }

    /// Finds games in `inner` once, then loses them before they can be updated.
    struct VanishingStore {
        inner: MemoryGameStore,
        found: AtomicBool,
    }

    impl GameStore for VanishingStore {
        fn create_game(&self, game: GameEntity) -> BoxFuture<'static, StorageResult<()>> {
            self.inner.create_game(game)
        }

        fn find_game(&self, id: Uuid) -> BoxFuture<'static, StorageResult<Option<GameEntity>>> {
            if self.found.swap(true, Ordering::SeqCst) {
                return Box::pin(async { Ok(None) });
            }
            self.inner.find_game(id)
        }

        fn append_to_sequence(
            &self,
            _id: Uuid,
            _expected_len: usize,
            _pokemon: PokemonId,
        ) -> BoxFuture<'static, StorageResult<Option<GameEntity>>> {
            Box::pin(async { Ok(None) })
        }

        fn health_check(&self) -> BoxFuture<'static, StorageResult<()>> {
            self.inner.health_check()
        }

        fn try_reconnect(&self) -> BoxFuture<'static, StorageResult<()>> {
            self.inner.try_reconnect()
        }
    }

    /// Serves one outdated copy of a game, as if another request grew it meanwhile.
    struct OutdatedReadStore {
        inner: MemoryGameStore,
        snapshot: Mutex<Option<GameEntity>>,
    }

    impl GameStore for OutdatedReadStore {
        fn create_game(&self, game: GameEntity) -> BoxFuture<'static, StorageResult<()>> {
            self.inner.create_game(game)
        }

        fn find_game(&self, id: Uuid) -> BoxFuture<'static, StorageResult<Option<GameEntity>>> {
            match self.snapshot.lock().unwrap().take() {
                Some(game) => Box::pin(async move { Ok(Some(game)) }),
                None => self.inner.find_game(id),
            }
        }

        fn append_to_sequence(
            &self,
            id: Uuid,
            expected_len: usize,
            pokemon: PokemonId,
        ) -> BoxFuture<'static, StorageResult<Option<GameEntity>>> {
            self.inner.append_to_sequence(id, expected_len, pokemon)
        }

        fn health_check(&self) -> BoxFuture<'static, StorageResult<()>> {
            self.inner.health_check()
        }

        fn try_reconnect(&self) -> BoxFuture<'static, StorageResult<()>> {
            self.inner.try_reconnect()
        }
    }

    async fn state_with(
        catalog: Arc<dyn PokemonCatalog>,
        store: Option<Arc<dyn GameStore>>,
    ) -> SharedState {
        let state = AppState::new(AppConfig::default(), catalog);
        if let Some(store) = store {
            state.install_game_store(store).await;
        }
        state
    }

    async fn seeded(sequence: Vec<PokemonId>) -> (SharedState, MemoryGameStore, Uuid) {
        let store = MemoryGameStore::new();
        let mut game = GameEntity::new(vec![1, 2, 3, 4, 5, 6]);
        game.pokemon_sequence = sequence;
        let id = game.id;
        store.create_game(game).await.unwrap();
        let state = state_with(Arc::new(FakeCatalog), Some(Arc::new(store.clone()))).await;
        (state, store, id)
    }

    fn attempt(id: Uuid, pokemons: Vec<PokemonId>) -> SubmitSequenceRequest {
        SubmitSequenceRequest {
            game_id: id,
            pokemons,
        }
    }

    #[test]
    fn judge_full_match_is_complete() {
        assert_eq!(judge_sequence(&[1, 2], &[1, 2]), SequenceJudgement::Complete);
        assert_eq!(judge_sequence(&[], &[]), SequenceJudgement::Complete);
    }

    #[test]
    fn judge_correct_prefix_is_partial() {
        assert_eq!(judge_sequence(&[1, 2, 3], &[1]), SequenceJudgement::Partial);
        assert_eq!(judge_sequence(&[1, 2, 3], &[]), SequenceJudgement::Partial);
    }

    #[test]
    fn judge_wrong_or_too_long_is_mismatch() {
        assert_eq!(judge_sequence(&[1, 2, 3], &[1, 3]), SequenceJudgement::Mismatch);
        assert_eq!(judge_sequence(&[1], &[1, 2]), SequenceJudgement::Mismatch);
        assert_eq!(judge_sequence(&[], &[4]), SequenceJudgement::Mismatch);
    }

    #[tokio::test]
    async fn start_game_persists_team_with_empty_sequence() {
        let store = MemoryGameStore::new();
        let state = state_with(Arc::new(FakeCatalog), Some(Arc::new(store.clone()))).await;

        let response = start_game(&state).await.unwrap();

        assert_eq!(response.initial_team.len(), 6);
        let stored = store.find_game(response.game_id).await.unwrap().unwrap();
        let ids: Vec<_> = response.initial_team.iter().map(|p| p.id).collect();
        assert_eq!(stored.initial_team, ids);
        assert!(stored.pokemon_sequence.is_empty());
        assert_eq!(response.initial_team[0].name, format!("pokemon-{}", ids[0]));
    }

    #[tokio::test]
    async fn start_game_api_failure_persists_nothing() {
        let store = MemoryGameStore::new();
        let state = state_with(Arc::new(BrokenCatalog), Some(Arc::new(store.clone()))).await;

        let err = start_game(&state).await.unwrap_err();

        assert!(matches!(err, ServiceError::Catalog(_)));
        assert!(err.to_string().contains("api error"));
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn start_game_database_failure_propagates() {
        let state = state_with(Arc::new(FakeCatalog), Some(Arc::new(BrokenStore))).await;
        let err = start_game(&state).await.unwrap_err();
        assert!(matches!(err, ServiceError::Unavailable(_)));
        assert!(err.to_string().contains("database error"));
    }

    #[tokio::test]
    async fn start_game_without_store_is_degraded() {
        let state = state_with(Arc::new(FakeCatalog), None).await;
        assert!(matches!(
            start_game(&state).await,
            Err(ServiceError::Degraded)
        ));
    }

    #[tokio::test]
    async fn start_game_with_reversed_range_fails() {
        let config = AppConfig::from_json(r#"{ "pokedex_start": 10, "pokedex_end": 1 }"#).unwrap();
        let state = AppState::new(config, Arc::new(FakeCatalog));
        state
            .install_game_store(Arc::new(MemoryGameStore::new()))
            .await;

        let err = start_game(&state).await.unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid range: start 10 is greater than end 1"
        );
    }

    #[tokio::test]
    async fn get_game_returns_stored_state() {
        let (state, _store, id) = seeded(vec![3]).await;
        let details = get_game(&state, &id.to_string()).await.unwrap();
        assert_eq!(details.game_id, id);
        assert_eq!(details.pokemon_sequence, vec![3]);
    }

    #[tokio::test]
    async fn get_game_unknown_id_is_not_found() {
        let (state, _store, _id) = seeded(vec![]).await;
        let missing = Uuid::new_v4();
        let err = get_game(&state, &missing.to_string()).await.unwrap_err();
        assert_eq!(err.to_string(), format!("not found: game `{missing}` not found"));
    }

    #[tokio::test]
    async fn empty_attempt_on_fresh_game_starts_sequence() {
        let (state, store, id) = seeded(vec![]).await;

        let response = submit_sequence(&state, attempt(id, vec![])).await.unwrap();

        assert_eq!(response.result, SequenceResult::Continue);
        assert_eq!(response.pokemon_sequence.len(), 1);
        assert!((1..=6).contains(&response.pokemon_sequence[0]));
        let stored = store.find_game(id).await.unwrap().unwrap();
        assert_eq!(stored.pokemon_sequence, response.pokemon_sequence);
    }

    #[tokio::test]
    async fn full_match_extends_by_one() {
        let (state, _store, id) = seeded(vec![1]).await;

        let response = submit_sequence(&state, attempt(id, vec![1])).await.unwrap();

        assert_eq!(response.result, SequenceResult::Continue);
        assert_eq!(response.pokemon_sequence.len(), 2);
        assert_eq!(response.pokemon_sequence[0], 1);
    }

    #[tokio::test]
    async fn partial_match_keeps_sequence() {
        let (state, _store, id) = seeded(vec![2, 5, 2]).await;

        let response = submit_sequence(&state, attempt(id, vec![2, 5])).await.unwrap();

        assert_eq!(response.result, SequenceResult::Continue);
        assert_eq!(response.pokemon_sequence, vec![2, 5, 2]);
    }

    #[tokio::test]
    async fn mismatch_is_game_over_and_keeps_sequence() {
        let (state, store, id) = seeded(vec![2, 5]).await;

        let response = submit_sequence(&state, attempt(id, vec![2, 6])).await.unwrap();

        assert_eq!(response.result, SequenceResult::GameOver);
        assert_eq!(response.pokemon_sequence, vec![2, 5]);
        let stored = store.find_game(id).await.unwrap().unwrap();
        assert_eq!(stored.pokemon_sequence, vec![2, 5]);
    }

    #[tokio::test]
    async fn unknown_game_is_not_found() {
        let (state, _store, _id) = seeded(vec![]).await;
        let err = submit_sequence(&state, attempt(Uuid::new_v4(), vec![]))
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
    }

    #[tokio::test]
    async fn game_removed_before_update_is_not_found() {
        let inner = MemoryGameStore::new();
        let game = GameEntity::new(vec![1, 2, 3]);
        let id = game.id;
        inner.create_game(game).await.unwrap();
        let state = state_with(
            Arc::new(FakeCatalog),
            Some(Arc::new(VanishingStore {
                inner,
                found: AtomicBool::new(false),
            })),
        )
        .await;

        let err = submit_sequence(&state, attempt(id, vec![]))
            .await
            .unwrap_err();

        assert_eq!(
            err.to_string(),
            format!("not found: game `{id}` not found for update")
        );
    }

    #[tokio::test]
    async fn missing_game_id_is_rejected() {
        let (state, _store, _id) = seeded(vec![]).await;
        let err = submit_sequence(&state, attempt(Uuid::nil(), vec![1]))
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn get_game_malformed_id_is_rejected() {
        let (state, _store, _id) = seeded(vec![]).await;
        let err = get_game(&state, "not-a-uuid").await.unwrap_err();
        assert!(matches!(err, ServiceError::InvalidInput(_)));
        assert!(err.to_string().contains("not-a-uuid"));
    }

    #[tokio::test]
    async fn attempt_judged_on_outdated_sequence_does_not_grow_it() {
        let inner = MemoryGameStore::new();
        let mut game = GameEntity::new(vec![1, 2, 3]);
        game.pokemon_sequence = vec![2];
        let id = game.id;
        let snapshot = game.clone();
        inner.create_game(game).await.unwrap();
        inner.append_to_sequence(id, 1, 3).await.unwrap().unwrap();
        let state = state_with(
            Arc::new(FakeCatalog),
            Some(Arc::new(OutdatedReadStore {
                inner: inner.clone(),
                snapshot: Mutex::new(Some(snapshot)),
            })),
        )
        .await;

        let response = submit_sequence(&state, attempt(id, vec![2])).await.unwrap();

        assert_eq!(response.result, SequenceResult::Continue);
        assert_eq!(response.pokemon_sequence, vec![2, 3]);
        let stored = inner.find_game(id).await.unwrap().unwrap();
        assert_eq!(stored.pokemon_sequence, vec![2, 3]);
    }

    #[tokio::test]
    async fn database_failure_on_lookup_propagates() {
        let state = state_with(Arc::new(FakeCatalog), Some(Arc::new(BrokenStore))).await;
        let err = submit_sequence(&state, attempt(Uuid::new_v4(), vec![]))
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Unavailable(_)));
    }
}
