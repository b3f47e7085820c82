//! Ranking table models.

use serde::{Deserialize, Serialize};

/// Cumulative per-player totals folded from the match log.
///
/// Intermediate accumulator; rates and rank are computed when the
/// accumulator is turned into a [`PlayerRankingRow`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlayerTotals {
    pub points: f64,
    pub wins: u32,
    pub losses: u32,
    pub matches_played: u32,
    pub games_won: u32,
    pub game_diff: f64,
}

/// One row of the ranking table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerRankingRow {
    pub player: String,

    pub points: f64,

    /// Win percentage, 0–100.
    pub win_pct: f64,

    pub matches_played: u32,

    pub wins: u32,

    pub losses: u32,

    /// Raw games taken across parsed sets, all matches.
    pub games_won: u32,

    /// Per-match mean game differential averaged over matches played.
    pub game_diff_avg: f64,

    /// 1-based position after sorting; assigned fresh on every computation.
    pub rank: u32,

    /// Recent form, e.g. "W L W", most recent first. Ties emit no token.
    pub recent_trend: String,
}

impl PlayerRankingRow {
    /// Build a row from accumulated totals.
    ///
    /// `rank` starts at 0 and is assigned after the table is sorted.
    pub fn from_totals(player: String, totals: &PlayerTotals, recent_trend: String) -> Self {
        let (win_pct, game_diff_avg) = if totals.matches_played > 0 {
            (
                totals.wins as f64 / totals.matches_played as f64 * 100.0,
                totals.game_diff / totals.matches_played as f64,
            )
        } else {
            (0.0, 0.0)
        };

        Self {
            player,
            points: totals.points,
            win_pct,
            matches_played: totals.matches_played,
            wins: totals.wins,
            losses: totals.losses,
            games_won: totals.games_won,
            game_diff_avg,
            rank: 0,
            recent_trend,
        }
    }
}
