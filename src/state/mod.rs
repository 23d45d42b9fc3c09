use std::sync::Arc;

use tokio::sync::RwLock;

use crate::{
    config::AppConfig,
    dao::{game_store::GameStore, pokedex::PokemonCatalog},
    error::ServiceError,
};

/// Reference-counted handle shared by every request handler.
pub type SharedState = Arc<AppState>;

/// Central application state: configuration, Pokémon catalog and database handle.
pub struct AppState {
    config: AppConfig,
    catalog: Arc<dyn PokemonCatalog>,
    game_store: RwLock<Option<Arc<dyn GameStore>>>,
}

impl AppState {
    /// Construct a new [`AppState`] wrapped in an [`Arc`] so it can be cloned cheaply.
    ///
    /// The application starts in degraded mode until a storage backend is installed.
    pub fn new(config: AppConfig, catalog: Arc<dyn PokemonCatalog>) -> SharedState {
        Arc::new(Self {
            config,
            catalog,
            game_store: RwLock::new(None),
        })
    }

    /// Runtime configuration.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Source of Pokémon display data.
    pub fn catalog(&self) -> &dyn PokemonCatalog {
        self.catalog.as_ref()
    }

    /// Obtain a handle to the current game store, if one is installed.
    pub async fn game_store(&self) -> Option<Arc<dyn GameStore>> {
        let guard = self.game_store.read().await;
        guard.as_ref().cloned()
    }

    /// Same as [`AppState::game_store`] but fails with [`ServiceError::Degraded`] when absent.
    pub async fn require_game_store(&self) -> Result<Arc<dyn GameStore>, ServiceError> {
        self.game_store().await.ok_or(ServiceError::Degraded)
    }

    /// Install a new game store implementation and leave degraded mode.
    pub async fn install_game_store(&self, store: Arc<dyn GameStore>) {
        let mut guard = self.game_store.write().await;
        *guard = Some(store);
    }

    /// Remove the current game store and enter degraded mode.
    pub async fn clear_game_store(&self) {
        let mut guard = self.game_store.write().await;
        guard.take();
    }

    /// Current degraded flag.
    pub async fn is_degraded(&self) -> bool {
        let guard = self.game_store.read().await;
        guard.is_none()
    }
}
