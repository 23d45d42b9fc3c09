use axum::{
    Json, Router,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
    routing::{get, post},
};

use crate::{
    dto::game::{GameDetails, SequenceResponse, StartGameResponse, SubmitSequenceRequest},
    error::AppError,
    services::game_service,
    state::SharedState,
};

/// Routes driving a game: start, submit attempts, inspect.
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/start-game", get(start_game))
        .route("/submit-sequence", post(submit_sequence))
        .route("/games/{id}", get(get_game))
}

/// Draw a team and persist a new game.
#[utoipa::path(
    get,
    path = "/start-game",
    tag = "game",
    responses(
        (status = 200, description = "Game started", body = StartGameResponse),
        (status = 500, description = "Team lookup or storage failed")
    )
)]
pub async fn start_game(
    State(state): State<SharedState>,
) -> Result<Json<StartGameResponse>, AppError> {
    let response = game_service::start_game(&state)
        .await
        .map_err(AppError::StartGame)?;
    Ok(Json(response))
}

/// Compare an attempt with the stored sequence, growing it on a full match.
#[utoipa::path(
    post,
    path = "/submit-sequence",
    tag = "game",
    request_body = SubmitSequenceRequest,
    responses(
        (status = 200, description = "Attempt judged", body = SequenceResponse),
        (status = 500, description = "Unknown game, invalid body or storage failure")
    )
)]
pub async fn submit_sequence(
    State(state): State<SharedState>,
    payload: Result<Json<SubmitSequenceRequest>, JsonRejection>,
) -> Result<Json<SequenceResponse>, AppError> {
    let Json(payload) =
        payload.map_err(|rejection| AppError::CompareSequence(rejection.into()))?;
    let response = game_service::submit_sequence(&state, payload)
        .await
        .map_err(AppError::CompareSequence)?;
    Ok(Json(response))
}

/// Return the stored team and sequence of a game.
#[utoipa::path(
    get,
    path = "/games/{id}",
    tag = "game",
    params(("id" = String, Path, description = "Identifier of the game")),
    responses(
        (status = 200, description = "Stored game", body = GameDetails),
        (status = 500, description = "Unknown game, malformed id or storage failure")
    )
)]
pub async fn get_game(
    State(state): State<SharedState>,
    id: Result<Path<String>, PathRejection>,
) -> Result<Json<GameDetails>, AppError> {
    let Path(id) = id.map_err(|rejection| AppError::ReadGame(rejection.into()))?;
    let details = game_service::get_game(&state, &id)
        .await
        .map_err(AppError::ReadGame)?;
    Ok(Json(details))
}
