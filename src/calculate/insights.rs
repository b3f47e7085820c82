//! Derived insight computations.
//!
//! Secondary views over the normalized match log: recent-form trends,
//! head-to-head records, set win percentage, current win streaks, and
//! opponent-adjusted points. Everything here is a pure function of the
//! snapshot it is handed.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::models::{MatchRecord, PlayerRankingRow, Winner, VISITOR};

/// How many recent matches feed the trend string.
pub const DEFAULT_TREND_LENGTH: usize = 5;

/// Scaling constant for opponent strength multipliers. Arbitrary but
/// stable; exposed in config as `ranking.strength_divisor`.
pub const DEFAULT_STRENGTH_DIVISOR: f64 = 10.0;

/// A player's matches, most recent first. Input order breaks date ties,
/// so the result is deterministic for a fixed snapshot.
fn matches_desc<'a>(matches: &'a [MatchRecord], player: &str) -> Vec<&'a MatchRecord> {
    if player == VISITOR {
        return Vec::new();
    }
    let mut mine: Vec<&MatchRecord> = matches
        .iter()
        .filter(|m| m.side_of(player).is_some())
        .collect();
    mine.sort_by(|a, b| b.date.cmp(&a.date));
    mine
}

/// The player's result in one match, `None` for a tie.
fn result_for(m: &MatchRecord, player: &str) -> Option<bool> {
    match m.winner {
        Winner::Tie => None,
        winner => Some(m.side_of(player) == Some(winner)),
    }
}

/// Recent form as a space-joined string of `W`/`L` tokens, most recent
/// first. Up to `limit` matches are considered; ties emit no token. Empty
/// when the player has no matches.
pub fn recent_trend(matches: &[MatchRecord], player: &str, limit: usize) -> String {
    let tokens: Vec<&str> = matches_desc(matches, player)
        .into_iter()
        .take(limit)
        .filter_map(|m| result_for(m, player).map(|won| if won { "W" } else { "L" }))
        .collect();
    tokens.join(" ")
}

/// Current win streak counted back from the most recent match.
///
/// Wins extend the streak, ties are skipped, the first loss stops the
/// scan. 0 when the most recent non-tie match is a loss.
pub fn win_streak(matches: &[MatchRecord], player: &str) -> u32 {
    let mut streak = 0;
    for m in matches_desc(matches, player) {
        match result_for(m, player) {
            Some(true) => streak += 1,
            Some(false) => break,
            None => continue,
        }
    }
    streak
}

/// Percentage of parsed sets the player's side took more games in,
/// 0–100. A drawn set counts as played but not won.
pub fn set_win_pct(matches: &[MatchRecord], player: &str) -> f64 {
    if player == VISITOR {
        return 0.0;
    }

    let mut played = 0u32;
    let mut won = 0u32;
    for m in matches {
        let side = match m.side_of(player) {
            Some(side) => side,
            None => continue,
        };
        for set in &m.sets {
            played += 1;
            let (mine, theirs) = match side {
                Winner::Team1 => (set.team1, set.team2),
                _ => (set.team2, set.team1),
            };
            if mine > theirs {
                won += 1;
            }
        }
    }

    if played == 0 {
        0.0
    } else {
        won as f64 / played as f64 * 100.0
    }
}

/// Accumulated record of one player against one opponent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct HeadToHeadRecord {
    pub wins: u32,
    pub losses: u32,
    pub ties: u32,
    pub matches: u32,
}

/// Two-level head-to-head table: player -> opponent -> record from the
/// player's perspective. Both directions are present and mirror each
/// other.
pub type HeadToHeadTable = BTreeMap<String, BTreeMap<String, HeadToHeadRecord>>;

/// Accumulate head-to-head records over every opposing pair (team1 ×
/// team2 cross product), Visitor excluded.
pub fn head_to_head(matches: &[MatchRecord]) -> HeadToHeadTable {
    let mut table = HeadToHeadTable::new();

    for m in matches {
        for p1 in m.team1.iter().filter(|p| p.as_str() != VISITOR) {
            for p2 in m.team2.iter().filter(|p| p.as_str() != VISITOR) {
                for (player, opponent, won) in [
                    (p1, p2, result_for(m, p1)),
                    (p2, p1, result_for(m, p2)),
                ] {
                    let rec = table
                        .entry(player.clone())
                        .or_default()
                        .entry(opponent.clone())
                        .or_default();
                    rec.matches += 1;
                    match won {
                        Some(true) => rec.wins += 1,
                        Some(false) => rec.losses += 1,
                        None => rec.ties += 1,
                    }
                }
            }
        }
    }

    table
}

/// One rivalry: an unordered player pair and the record from the first
/// player's perspective.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Rivalry {
    pub player: String,
    pub opponent: String,
    pub record: HeadToHeadRecord,
}

/// Top rivalries by match count. Each unordered pair appears once, with
/// the lexicographically first name as `player`; ties on match count fall
/// back to name order, keeping the list deterministic.
pub fn rivalries(matches: &[MatchRecord], limit: usize) -> Vec<Rivalry> {
    let table = head_to_head(matches);

    let mut pairs: Vec<Rivalry> = table
        .iter()
        .flat_map(|(player, opponents)| {
            opponents
                .iter()
                .filter(move |(opponent, _)| player < *opponent)
                .map(|(opponent, rec)| Rivalry {
                    player: player.clone(),
                    opponent: opponent.clone(),
                    record: *rec,
                })
        })
        .collect();

    pairs.sort_by(|a, b| b.record.matches.cmp(&a.record.matches));
    pairs.truncate(limit);
    pairs
}

/// Opponent-strength-adjusted points per player.
///
/// For each match, the multiplier is the mean ranking points of the
/// non-Visitor opponents divided by `divisor` (0 when the opposing side
/// is all Visitor). Each participant accrues their result points (3,
/// 1, or 1.5) scaled by that multiplier. Informational only; never feeds
/// the primary ranking.
pub fn adjusted_points(
    matches: &[MatchRecord],
    rankings: &[PlayerRankingRow],
    divisor: f64,
) -> BTreeMap<String, f64> {
    let points: HashMap<&str, f64> = rankings
        .iter()
        .map(|r| (r.player.as_str(), r.points))
        .collect();

    let side_strength = |side: &[String]| -> f64 {
        let ranked: Vec<f64> = side
            .iter()
            .filter(|p| p.as_str() != VISITOR)
            .map(|p| points.get(p.as_str()).copied().unwrap_or(0.0))
            .collect();
        if ranked.is_empty() {
            0.0
        } else {
            ranked.iter().sum::<f64>() / ranked.len() as f64 / divisor
        }
    };

    let mut adjusted: BTreeMap<String, f64> = BTreeMap::new();
    for m in matches {
        let strengths = [side_strength(&m.team2), side_strength(&m.team1)];
        for (side, opponent_strength) in [(&m.team1, strengths[0]), (&m.team2, strengths[1])] {
            for player in side.iter().filter(|p| p.as_str() != VISITOR) {
                let base = match result_for(m, player) {
                    Some(true) => 3.0,
                    Some(false) => 1.0,
                    None => 1.5,
                };
                *adjusted.entry(player.clone()).or_default() += base * opponent_strength;
            }
        }
    }

    adjusted
}
