//! Ranking aggregation.
//!
//! Folds the normalized match log into per-player cumulative totals and
//! produces the sorted, ranked standings table. Recomputed in full from
//! the snapshot on every call; there is no incremental state.

use std::collections::HashMap;

use crate::calculate::insights::recent_trend;
use crate::models::{MatchRecord, PlayerRankingRow, PlayerTotals, Winner, VISITOR};

/// Points per match result.
pub const POINTS_WIN: f64 = 3.0;
pub const POINTS_LOSS: f64 = 1.0;
pub const POINTS_TIE: f64 = 1.5;

fn credit_side(
    totals: &mut HashMap<String, PlayerTotals>,
    side: &[String],
    won: Option<bool>,
    games: u32,
    game_diff: f64,
) {
    for player in side.iter().filter(|p| p.as_str() != VISITOR) {
        let t = totals.entry(player.clone()).or_default();
        t.matches_played += 1;
        t.games_won += games;
        match won {
            Some(true) => {
                t.points += POINTS_WIN;
                t.wins += 1;
                t.game_diff += game_diff;
            }
            Some(false) => {
                t.points += POINTS_LOSS;
                t.losses += 1;
                t.game_diff += game_diff;
            }
            // Ties score points but book no win/loss and no differential.
            None => t.points += POINTS_TIE,
        }
    }
}

/// Fold the match log into per-player totals.
pub fn player_totals(matches: &[MatchRecord]) -> HashMap<String, PlayerTotals> {
    let mut totals: HashMap<String, PlayerTotals> = HashMap::new();

    for m in matches {
        let diff = m.game_diff();
        let (games1, games2) = m.games();

        let (team1_won, team2_won) = match m.winner {
            Winner::Team1 => (Some(true), Some(false)),
            Winner::Team2 => (Some(false), Some(true)),
            Winner::Tie => (None, None),
        };

        // Each side books the differential from its own perspective.
        credit_side(&mut totals, &m.team1, team1_won, games1, diff);
        credit_side(&mut totals, &m.team2, team2_won, games2, -diff);
    }

    totals
}

/// Compute the full ranking table: one row per non-Visitor player with at
/// least one match, sorted and ranked. `trend_length` bounds each row's
/// recent-form string.
///
/// Sort keys, in order: points desc, win percentage desc, average game
/// differential desc, games won desc, player name asc. The final name
/// tiebreak makes the order total, so two runs over the same snapshot
/// always agree.
pub fn rankings(matches: &[MatchRecord], trend_length: usize) -> Vec<PlayerRankingRow> {
    let totals = player_totals(matches);

    let mut rows: Vec<PlayerRankingRow> = totals
        .into_iter()
        .map(|(player, t)| {
            let trend = recent_trend(matches, &player, trend_length);
            PlayerRankingRow::from_totals(player, &t, trend)
        })
        .collect();

    rows.sort_by(|a, b| {
        b.points
            .total_cmp(&a.points)
            .then_with(|| b.win_pct.total_cmp(&a.win_pct))
            .then_with(|| b.game_diff_avg.total_cmp(&a.game_diff_avg))
            .then_with(|| b.games_won.cmp(&a.games_won))
            .then_with(|| a.player.cmp(&b.player))
    });

    for (i, row) in rows.iter_mut().enumerate() {
        row.rank = (i + 1) as u32;
    }

    rows
}
