use axum::extract::{Path, State};
use axum::response::Json;
use serde::Serialize;

use arcade_core::catalog::GameDescriptor;

use crate::error::AppError;
use crate::state::AppState;

/// Response for the catalog listing.
#[derive(Debug, Serialize)]
pub struct GamesResponse {
    pub count: usize,
    pub games: Vec<GameDescriptor>,
}

/// `GET /api/v1/games`: the whole catalog in display order.
pub async fn list_games(State(state): State<AppState>) -> Json<GamesResponse> {
    let games: Vec<GameDescriptor> = state.catalog.iter().cloned().collect();
    Json(GamesResponse {
        count: games.len(),
        games,
    })
}

/// `GET /api/v1/games/{game_id}`: a single descriptor.
pub async fn get_game(
    State(state): State<AppState>,
    Path(game_id): Path<String>,
) -> Result<Json<GameDescriptor>, AppError> {
    state
        .catalog
        .get(&game_id)
        .cloned()
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("unknown game `{game_id}`")))
}
