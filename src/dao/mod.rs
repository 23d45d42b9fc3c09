/// Game state storage and retrieval operations.
pub mod game_store;
/// Database model definitions.
pub mod models;
/// Client for the public Pokémon data API.
pub mod pokedex;
/// Storage abstraction layer for database operations.
pub mod storage;
