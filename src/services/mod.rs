/// OpenAPI documentation generation.
pub mod documentation;
/// Random picks for teams and sequences.
pub mod draw;
/// Game creation and sequence checking.
pub mod game_service;
/// Health check service.
pub mod health_service;
