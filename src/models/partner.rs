//! Partnership statistics models.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Accumulated record of one (player, partner) pairing over doubles
/// matches where both were teammates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PartnerRecord {
    pub wins: u32,
    pub losses: u32,
    pub ties: u32,
    pub matches: u32,
    /// Sum of the side's per-match game differentials.
    pub game_diff_sum: f64,
}

impl PartnerRecord {
    /// Wins per match, 0 when the pairing never played.
    pub fn win_ratio(&self) -> f64 {
        if self.matches == 0 {
            0.0
        } else {
            self.wins as f64 / self.matches as f64
        }
    }
}

/// Two-level partner table: player -> partner -> record.
///
/// `BTreeMap` keeps iteration deterministic, which the
/// most-effective-partner tie rule relies on.
pub type PartnerTable = BTreeMap<String, BTreeMap<String, PartnerRecord>>;
