use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::api::state::AppState;
use crate::api::ApiError;
use crate::models::Player;
use crate::storage::JsonlWriter;

#[derive(Debug, Serialize)]
pub struct PlayerListResponse {
    pub players: Vec<Player>,
    pub total: u32,
}

/// The roster as persisted.
pub async fn list(State(state): State<AppState>) -> Result<Json<PlayerListResponse>, ApiError> {
    let players = state.load_players()?;
    let total = players.len() as u32;
    Ok(Json(PlayerListResponse { players, total }))
}

#[derive(Debug, Deserialize)]
pub struct AddPlayerRequest {
    pub name: String,

    #[serde(default)]
    pub profile_image_url: String,

    /// Optional `DD-MM` birthday.
    #[serde(default)]
    pub birthday: String,
}

/// Add a roster entry.
pub async fn add(
    State(state): State<AppState>,
    Json(req): Json<AddPlayerRequest>,
) -> Result<(StatusCode, Json<Player>), ApiError> {
    let name = req.name.trim().to_string();
    if name.is_empty() {
        return Err(ApiError::BadRequest("Player name must be non-empty".to_string()));
    }

    let player = Player {
        name,
        profile_image_url: req.profile_image_url.trim().to_string(),
        birthday: req.birthday.trim().to_string(),
    };
    if !player.birthday.is_empty() && player.birthday_day_month().is_none() {
        return Err(ApiError::BadRequest(format!(
            "Birthday must be DD-MM, got {:?}",
            player.birthday
        )));
    }

    let roster = state.load_players()?;
    if roster.iter().any(|p| p.name == player.name) {
        return Err(ApiError::BadRequest(format!(
            "Player {:?} already on the roster",
            player.name
        )));
    }

    JsonlWriter::<Player>::new(state.storage.players_path())
        .append(&player)
        .map_err(|e| ApiError::Internal(e.to_string()))?;

    info!(player = %player.name, "Added roster entry");
    Ok((StatusCode::CREATED, Json(player)))
}
