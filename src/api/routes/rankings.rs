use std::collections::HashMap;

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::api::state::AppState;
use crate::api::ApiError;
use crate::calculate::rankings;
use crate::models::PlayerRankingRow;

#[derive(Debug, Serialize)]
pub struct RankingEntry {
    #[serde(flatten)]
    pub row: PlayerRankingRow,

    /// Joined from the roster; empty when the player has no entry.
    pub profile_image_url: String,
}

#[derive(Debug, Serialize)]
pub struct RankingsResponse {
    pub rankings: Vec<RankingEntry>,
    pub total_matches: u32,
    pub total_players: u32,
}

/// The full standings table, recomputed from the current snapshot.
pub async fn table(State(state): State<AppState>) -> Result<Json<RankingsResponse>, ApiError> {
    let matches = state.load_matches()?;
    let roster = state.load_players()?;

    let images: HashMap<&str, &str> = roster
        .iter()
        .map(|p| (p.name.as_str(), p.profile_image_url.as_str()))
        .collect();

    let rows = rankings(&matches, state.ranking.trend_length);
    let total_players = rows.len() as u32;
    let entries: Vec<RankingEntry> = rows
        .into_iter()
        .map(|row| {
            let profile_image_url = images
                .get(row.player.as_str())
                .map(|s| s.to_string())
                .unwrap_or_default();
            RankingEntry {
                row,
                profile_image_url,
            }
        })
        .collect();

    Ok(Json(RankingsResponse {
        rankings: entries,
        total_matches: matches.len() as u32,
        total_players,
    }))
}

#[cfg(test)]
mod tests {
    use crate::api::build_router;
    use crate::api::state::AppState;
    use crate::config::RankingConfig;
    use crate::models::{Player, RawMatchRow};
    use crate::storage::StorageConfig;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use serde_json::Value;

    use tower::util::ServiceExt;

    fn write_jsonl<T: serde::Serialize>(path: &std::path::Path, items: &[T]) {
        let mut content = String::new();
        for item in items {
            content.push_str(&serde_json::to_string(item).unwrap());
            content.push('\n');
        }
        std::fs::write(path, content).unwrap();
    }

    async fn get_json(app: axum::Router, uri: &str) -> (StatusCode, Value) {
        let resp = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = resp.status();
        let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: Value = serde_json::from_slice(&body).unwrap_or(Value::Null);
        (status, json)
    }

    fn setup_state(dir: &std::path::Path) -> AppState {
        AppState::new(
            StorageConfig::new(dir.to_path_buf()),
            RankingConfig::default(),
        )
    }

    fn singles_row(id: &str, date: &str, p1: &str, p2: &str, set1: &str, winner: &str) -> RawMatchRow {
        RawMatchRow {
            match_id: id.to_string(),
            date: date.to_string(),
            match_type: "Singles".to_string(),
            team1_player1: p1.to_string(),
            team2_player1: p2.to_string(),
            set1: set1.to_string(),
            winner: winner.to_string(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_rankings_table() {
        let tmp = tempfile::tempdir().unwrap();
        let state = setup_state(tmp.path());

        write_jsonl(
            &tmp.path().join("matches.jsonl"),
            &[
                singles_row("m1", "2024-07-01", "Ana", "Ben", "6-3", "Team1"),
                singles_row("m2", "2024-07-02", "Ana", "Ben", "6-4", "Team1"),
            ],
        );
        let mut ana = Player::new("Ana".to_string());
        ana.profile_image_url = "https://example.com/ana.jpg".to_string();
        write_jsonl(&tmp.path().join("players.jsonl"), &[ana]);

        let app = build_router(state);
        let (status, json) = get_json(app, "/api/rankings").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["total_matches"], 2);
        assert_eq!(json["total_players"], 2);

        let rows = json["rankings"].as_array().unwrap();
        assert_eq!(rows[0]["player"], "Ana");
        assert_eq!(rows[0]["rank"], 1);
        assert_eq!(rows[0]["points"], 6.0);
        assert_eq!(rows[0]["profile_image_url"], "https://example.com/ana.jpg");
        assert_eq!(rows[1]["player"], "Ben");
        assert_eq!(rows[1]["profile_image_url"], "");
    }

    #[tokio::test]
    async fn test_rankings_empty_log() {
        let tmp = tempfile::tempdir().unwrap();
        let state = setup_state(tmp.path());

        let app = build_router(state);
        let (status, json) = get_json(app, "/api/rankings").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["total_matches"], 0);
        assert!(json["rankings"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_rankings_visitor_absent() {
        let tmp = tempfile::tempdir().unwrap();
        let state = setup_state(tmp.path());

        write_jsonl(
            &tmp.path().join("matches.jsonl"),
            &[singles_row("m1", "2024-07-01", "Ana", "Visitor", "6-0", "Team1")],
        );

        let app = build_router(state);
        let (status, json) = get_json(app, "/api/rankings").await;

        assert_eq!(status, StatusCode::OK);
        let rows = json["rankings"].as_array().unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["player"], "Ana");
    }

    #[tokio::test]
    async fn test_rankings_honor_configured_trend_length() {
        let tmp = tempfile::tempdir().unwrap();
        let state = AppState::new(
            StorageConfig::new(tmp.path().to_path_buf()),
            RankingConfig {
                trend_length: 2,
                ..RankingConfig::default()
            },
        );

        write_jsonl(
            &tmp.path().join("matches.jsonl"),
            &[
                singles_row("m1", "2024-07-01", "Ana", "Ben", "6-3", "Team1"),
                singles_row("m2", "2024-07-02", "Ana", "Ben", "6-3", "Team1"),
                singles_row("m3", "2024-07-03", "Ana", "Ben", "6-3", "Team1"),
            ],
        );

        let app = build_router(state);
        let (status, json) = get_json(app, "/api/rankings").await;

        assert_eq!(status, StatusCode::OK);
        let rows = json["rankings"].as_array().unwrap();
        assert_eq!(rows[0]["player"], "Ana");
        assert_eq!(rows[0]["recent_trend"], "W W");
    }

    #[tokio::test]
    async fn test_rankings_duplicate_id_last_wins() {
        let tmp = tempfile::tempdir().unwrap();
        let state = setup_state(tmp.path());

        write_jsonl(
            &tmp.path().join("matches.jsonl"),
            &[
                singles_row("dup", "2024-07-01", "Ana", "Ben", "6-3", "Team1"),
                singles_row("dup", "2024-07-01", "Ana", "Ben", "3-6", "Team2"),
            ],
        );

        let app = build_router(state);
        let (status, json) = get_json(app, "/api/rankings").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["total_matches"], 1);
        let rows = json["rankings"].as_array().unwrap();
        // Corrected row stands: Ben won.
        assert_eq!(rows[0]["player"], "Ben");
        assert_eq!(rows[0]["wins"], 1);
    }
}
