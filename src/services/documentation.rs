use utoipa::OpenApi;

#[derive(OpenApi)]
/// Aggregated OpenAPI specification for the game backend.
#[openapi(
    paths(
        crate::routes::health::healthcheck,
        crate::routes::game::start_game,
        crate::routes::game::submit_sequence,
        crate::routes::game::get_game,
    ),
    components(
        schemas(
            crate::dto::health::HealthResponse,
            crate::dto::game::StartGameResponse,
            crate::dto::game::PokemonSummary,
            crate::dto::game::SubmitSequenceRequest,
            crate::dto::game::SequenceResponse,
            crate::dto::game::SequenceResult,
            crate::dto::game::GameDetails,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "game", description = "Start games and check sequences"),
    )
)]
pub struct ApiDoc;
