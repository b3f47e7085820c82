//! Match record models: raw persisted rows and normalized match records.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Reserved participant name for a non-ranked filler player.
///
/// A `Visitor` fills an empty slot so a match can be recorded, but must
/// never appear in any ranking, partner, or insight output.
pub const VISITOR: &str = "Visitor";

/// Singles or doubles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchType {
    Singles,
    Doubles,
}

impl std::fmt::Display for MatchType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MatchType::Singles => write!(f, "Singles"),
            MatchType::Doubles => write!(f, "Doubles"),
        }
    }
}

/// Match outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Winner {
    Team1,
    Team2,
    Tie,
}

/// Games won by each side in a single set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetScore {
    pub team1: u32,
    pub team2: u32,
}

impl SetScore {
    /// Parse a `"6-3"` style score string.
    ///
    /// Both sides must parse as non-negative integers; anything else
    /// (empty string, missing separator, junk) yields `None`. Callers
    /// treat an unparseable set as absent, never as an error.
    pub fn parse(s: &str) -> Option<Self> {
        let (left, right) = s.trim().split_once('-')?;
        let team1 = left.trim().parse::<u32>().ok()?;
        let team2 = right.trim().parse::<u32>().ok()?;
        Some(Self { team1, team2 })
    }

    /// Set margin from team1's perspective.
    pub fn margin(&self) -> f64 {
        self.team1 as f64 - self.team2 as f64
    }
}

impl std::fmt::Display for SetScore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.team1, self.team2)
    }
}

/// A raw match row as returned by the persistence layer.
///
/// Every column may be missing or empty; normalization decides what is
/// usable. This is the shape stored in `matches.jsonl`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawMatchRow {
    #[serde(default)]
    pub match_id: String,

    /// Calendar date string; accepted formats are decided by the normalizer.
    #[serde(default)]
    pub date: String,

    /// "Singles" or "Doubles"; inferred from team slots when empty.
    #[serde(default)]
    pub match_type: String,

    #[serde(default)]
    pub team1_player1: String,

    #[serde(default)]
    pub team1_player2: String,

    #[serde(default)]
    pub team2_player1: String,

    #[serde(default)]
    pub team2_player2: String,

    /// Set score strings like "6-3"; empty or junk is skipped per set.
    #[serde(default)]
    pub set1: String,

    #[serde(default)]
    pub set2: String,

    #[serde(default)]
    pub set3: String,

    /// "Team1", "Team2" or "Tie".
    #[serde(default)]
    pub winner: String,

    /// Optional photo of the score sheet; irrelevant to aggregation.
    #[serde(default)]
    pub image_url: String,
}

/// A validated, normalized match record.
///
/// `sets` holds only the scores that parsed successfully, so aggregators
/// never see a malformed set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchRecord {
    pub match_id: String,
    pub date: NaiveDate,
    pub match_type: MatchType,
    /// 1 player (Singles) or 2 players (Doubles).
    pub team1: Vec<String>,
    pub team2: Vec<String>,
    pub sets: Vec<SetScore>,
    pub winner: Winner,
    pub image_url: Option<String>,
}

impl MatchRecord {
    /// Which side a player is on, if any.
    pub fn side_of(&self, player: &str) -> Option<Winner> {
        if self.team1.iter().any(|p| p == player) {
            Some(Winner::Team1)
        } else if self.team2.iter().any(|p| p == player) {
            Some(Winner::Team2)
        } else {
            None
        }
    }

    /// Total games taken by each side across parsed sets (team1, team2).
    pub fn games(&self) -> (u32, u32) {
        self.sets.iter().fold((0, 0), |(t1, t2), s| {
            (t1 + s.team1, t2 + s.team2)
        })
    }

    /// Mean per-set game differential from team1's perspective.
    ///
    /// 0 when no set parsed.
    pub fn game_diff(&self) -> f64 {
        if self.sets.is_empty() {
            return 0.0;
        }
        let total: f64 = self.sets.iter().map(|s| s.margin()).sum();
        total / self.sets.len() as f64
    }

    /// All non-Visitor participants.
    pub fn participants(&self) -> impl Iterator<Item = &str> {
        self.team1
            .iter()
            .chain(self.team2.iter())
            .map(|s| s.as_str())
            .filter(|p| *p != VISITOR)
    }
}
