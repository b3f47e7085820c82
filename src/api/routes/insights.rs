use axum::extract::{Path, Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::api::state::AppState;
use crate::api::ApiError;
use crate::calculate::{
    adjusted_points, head_to_head, rankings, recent_trend, rivalries, set_win_pct, win_streak,
    HeadToHeadRecord, Rivalry,
};

#[derive(Debug, Serialize)]
pub struct PlayerInsightsResponse {
    pub player: String,
    pub recent_trend: String,
    pub win_streak: u32,
    pub set_win_pct: f64,
    pub adjusted_points: f64,
    pub head_to_head: std::collections::BTreeMap<String, HeadToHeadRecord>,
}

/// Derived insight bundle for one player.
///
/// Unknown players yield zeroed values, not an error.
pub async fn player_insights(
    State(state): State<AppState>,
    Path(player): Path<String>,
) -> Result<Json<PlayerInsightsResponse>, ApiError> {
    let matches = state.load_matches()?;
    let table = rankings(&matches, state.ranking.trend_length);
    let adjusted = adjusted_points(&matches, &table, state.ranking.strength_divisor);
    let mut h2h = head_to_head(&matches);

    Ok(Json(PlayerInsightsResponse {
        recent_trend: recent_trend(&matches, &player, state.ranking.trend_length),
        win_streak: win_streak(&matches, &player),
        set_win_pct: set_win_pct(&matches, &player),
        adjusted_points: adjusted.get(&player).copied().unwrap_or(0.0),
        head_to_head: h2h.remove(&player).unwrap_or_default(),
        player,
    }))
}

#[derive(Debug, Deserialize)]
pub struct RivalriesParams {
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct RivalriesResponse {
    pub rivalries: Vec<Rivalry>,
}

/// Top rivalries across the group, by matches played against each other.
pub async fn top_rivalries(
    State(state): State<AppState>,
    Query(params): Query<RivalriesParams>,
) -> Result<Json<RivalriesResponse>, ApiError> {
    let matches = state.load_matches()?;
    let limit = params.limit.unwrap_or(10).min(100);
    Ok(Json(RivalriesResponse {
        rivalries: rivalries(&matches, limit),
    }))
}
