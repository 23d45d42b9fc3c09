//! Application-level configuration loading: team size, Pokédex range and API settings.

use std::{env, fs, io::ErrorKind, ops::RangeInclusive, path::PathBuf, time::Duration};

use serde::Deserialize;
use tracing::{info, warn};

use crate::dao::{models::PokemonId, pokedex::DEFAULT_BASE_URL};

/// Default location on disk where the server looks for the JSON configuration.
const DEFAULT_CONFIG_PATH: &str = "config/app.json";
/// Environment variable that overrides [`DEFAULT_CONFIG_PATH`].
const CONFIG_PATH_ENV: &str = "POKE_SIMON_CONFIG_PATH";

const DEFAULT_TEAM_SIZE: usize = 6;
/// First generation of the national Pokédex.
const DEFAULT_POKEDEX_START: PokemonId = 1;
const DEFAULT_POKEDEX_END: PokemonId = 151;
const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 10_000;

#[derive(Debug, Clone, PartialEq, Eq)]
/// Immutable runtime configuration shared across the application.
pub struct AppConfig {
    /// Number of Pokémon drawn for every new game.
    pub team_size: usize,
    /// Pokédex numbers a team is drawn from.
    pub pokedex_range: RangeInclusive<PokemonId>,
    /// Base URL of the Pokémon API.
    pub pokeapi_base_url: String,
    /// Per-request timeout applied to Pokémon API calls.
    pub request_timeout: Duration,
}

impl AppConfig {
    /// Load the application configuration from disk, falling back to built-in defaults.
    pub fn load() -> Self {
        let path = resolve_config_path();
        match fs::read_to_string(&path) {
            Ok(contents) => match Self::from_json(&contents) {
                Ok(app_config) => {
                    info!(
                        path = %path.display(),
                        team_size = app_config.team_size,
                        "loaded game settings from config"
                    );
                    app_config
                }
                Err(err) => {
                    warn!(
                        path = %path.display(),
                        error = %err,
                        "failed to parse config; falling back to defaults"
                    );
                    Self::default()
                }
            },
            Err(err) if err.kind() == ErrorKind::NotFound => {
                info!(
                    path = %path.display(),
                    "config file not found; using built-in defaults"
                );
                Self::default()
            }
            Err(err) => {
                warn!(
                    path = %path.display(),
                    error = %err,
                    "failed to read config; falling back to defaults"
                );
                Self::default()
            }
        }
    }

    /// Parse a JSON document; keys left out keep their default value.
    pub fn from_json(contents: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str::<RawConfig>(contents).map(Into::into)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        RawConfig::default().into()
    }
}

#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
/// JSON representation of the configuration file located at [`DEFAULT_CONFIG_PATH`].
struct RawConfig {
    team_size: usize,
    pokedex_start: PokemonId,
    pokedex_end: PokemonId,
    pokeapi_base_url: String,
    request_timeout_ms: u64,
}

impl Default for RawConfig {
    fn default() -> Self {
        Self {
            team_size: DEFAULT_TEAM_SIZE,
            pokedex_start: DEFAULT_POKEDEX_START,
            pokedex_end: DEFAULT_POKEDEX_END,
            pokeapi_base_url: DEFAULT_BASE_URL.to_owned(),
            request_timeout_ms: DEFAULT_REQUEST_TIMEOUT_MS,
        }
    }
}

impl From<RawConfig> for AppConfig {
    fn from(value: RawConfig) -> Self {
        Self {
            team_size: value.team_size,
            pokedex_range: value.pokedex_start..=value.pokedex_end,
            pokeapi_base_url: value.pokeapi_base_url,
            request_timeout: Duration::from_millis(value.request_timeout_ms),
        }
    }
}

/// Resolve the configuration path taking the environment override into account.
fn resolve_config_path() -> PathBuf {
    env::var_os(CONFIG_PATH_ENV)
        .map(PathBuf::from)
        .filter(|path| !path.as_os_str().is_empty())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH))
}
