use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::api::state::AppState;
use crate::api::ApiError;
use crate::models::{generate_match_id, MatchRecord, RawMatchRow};
use crate::normalize;
use crate::storage::JsonlWriter;

#[derive(Debug, Serialize)]
pub struct MatchListResponse {
    pub matches: Vec<MatchRecord>,
    pub total: u32,
}

/// The normalized match log, oldest entry first.
pub async fn list(State(state): State<AppState>) -> Result<Json<MatchListResponse>, ApiError> {
    let matches = state.load_matches()?;
    let total = matches.len() as u32;
    Ok(Json(MatchListResponse { matches, total }))
}

#[derive(Debug, Deserialize)]
pub struct SubmitMatchRequest {
    pub date: String,

    /// "Singles" or "Doubles"; inferred from team sizes when empty.
    #[serde(default)]
    pub match_type: String,

    pub team1: Vec<String>,
    pub team2: Vec<String>,

    /// Up to three "6-3" style set scores.
    #[serde(default)]
    pub sets: Vec<String>,

    pub winner: String,

    #[serde(default)]
    pub image_url: String,
}

#[derive(Debug, Serialize)]
pub struct SubmitMatchResponse {
    pub match_id: String,
}

fn validate(req: &SubmitMatchRequest) -> Result<NaiveDate, ApiError> {
    let date = normalize::parse_date(&req.date).ok_or_else(|| {
        ApiError::BadRequest(format!("Unparseable date: {:?}", req.date))
    })?;
    if normalize::parse_winner(&req.winner).is_none() {
        return Err(ApiError::BadRequest(format!(
            "Winner must be Team1, Team2 or Tie, got {:?}",
            req.winner
        )));
    }

    let sizes = (req.team1.len(), req.team2.len());
    if !matches!(sizes, (1, 1) | (2, 2)) {
        return Err(ApiError::BadRequest(
            "Teams must both have 1 (singles) or 2 (doubles) players".to_string(),
        ));
    }
    if req.sets.len() > 3 {
        return Err(ApiError::BadRequest("At most 3 sets per match".to_string()));
    }

    // No player name may repeat across any team slot.
    let mut names: Vec<String> = req
        .team1
        .iter()
        .chain(req.team2.iter())
        .map(|n| n.trim().to_string())
        .collect();
    if names.iter().any(|n| n.is_empty()) {
        return Err(ApiError::BadRequest("Player names must be non-empty".to_string()));
    }
    names.sort();
    if names.windows(2).any(|w| w[0] == w[1]) {
        return Err(ApiError::BadRequest(
            "A player may only appear once per match".to_string(),
        ));
    }

    Ok(date)
}

/// Record a new match: validate, assign a quarter-scoped ID, append to
/// the log.
pub async fn submit(
    State(state): State<AppState>,
    Json(req): Json<SubmitMatchRequest>,
) -> Result<(StatusCode, Json<SubmitMatchResponse>), ApiError> {
    let date = validate(&req)?;

    // IDs must not collide with any persisted row, including rows the
    // normalizer would drop.
    let raw = state.load_raw_matches()?;
    let existing_ids: Vec<&str> = raw.iter().map(|r| r.match_id.as_str()).collect();
    let match_id = generate_match_id(&existing_ids, date);

    let get = |team: &[String], i: usize| team.get(i).map(|s| s.trim().to_string()).unwrap_or_default();
    let match_type = if req.match_type.trim().is_empty() {
        if req.team1.len() == 2 { "Doubles" } else { "Singles" }.to_string()
    } else {
        req.match_type.trim().to_string()
    };

    let row = RawMatchRow {
        match_id: match_id.clone(),
        date: req.date.trim().to_string(),
        match_type,
        team1_player1: get(&req.team1, 0),
        team1_player2: get(&req.team1, 1),
        team2_player1: get(&req.team2, 0),
        team2_player2: get(&req.team2, 1),
        set1: req.sets.first().cloned().unwrap_or_default(),
        set2: req.sets.get(1).cloned().unwrap_or_default(),
        set3: req.sets.get(2).cloned().unwrap_or_default(),
        winner: req.winner.trim().to_string(),
        image_url: req.image_url.trim().to_string(),
    };

    JsonlWriter::<RawMatchRow>::new(state.storage.matches_path())
        .append(&row)
        .map_err(|e| ApiError::Internal(e.to_string()))?;

    info!(%match_id, "Recorded match");
    Ok((StatusCode::CREATED, Json(SubmitMatchResponse { match_id })))
}
