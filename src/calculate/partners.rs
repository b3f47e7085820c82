//! Partnership aggregation.
//!
//! Folds doubles matches into a pairwise (player, partner) table. Singles
//! matches contribute nothing. Both directions of a pairing are updated
//! symmetrically, so `table["Ana"]["Ben"]` and `table["Ben"]["Ana"]` always
//! agree.

use crate::models::{MatchRecord, MatchType, PartnerRecord, PartnerTable, Winner, VISITOR};

fn credit_pair(table: &mut PartnerTable, side: &[String], won: Option<bool>, game_diff: f64) {
    let [p1, p2] = match side {
        [a, b] => [a, b],
        _ => return,
    };
    if p1 == VISITOR || p2 == VISITOR || p1 == p2 {
        return;
    }

    for (player, partner) in [(p1, p2), (p2, p1)] {
        let rec = table
            .entry(player.clone())
            .or_default()
            .entry(partner.clone())
            .or_insert_with(PartnerRecord::default);
        rec.matches += 1;
        rec.game_diff_sum += game_diff;
        match won {
            Some(true) => rec.wins += 1,
            Some(false) => rec.losses += 1,
            None => rec.ties += 1,
        }
    }
}

/// Build the full partner table from the match log.
pub fn aggregate_partners(matches: &[MatchRecord]) -> PartnerTable {
    let mut table = PartnerTable::new();

    for m in matches.iter().filter(|m| m.match_type == MatchType::Doubles) {
        let diff = m.game_diff();
        let (team1_won, team2_won) = match m.winner {
            Winner::Team1 => (Some(true), Some(false)),
            Winner::Team2 => (Some(false), Some(true)),
            Winner::Tie => (None, None),
        };

        credit_pair(&mut table, &m.team1, team1_won, diff);
        credit_pair(&mut table, &m.team2, team2_won, -diff);
    }

    table
}

/// The partner a player wins most often with: highest wins-per-match
/// ratio, strictly-greater comparison, so ratio ties resolve to the first
/// partner in the table's ordered iteration.
pub fn most_effective_partner<'a>(
    table: &'a PartnerTable,
    player: &str,
) -> Option<(&'a str, &'a PartnerRecord)> {
    let partners = table.get(player)?;

    let mut best: Option<(&str, &PartnerRecord)> = None;
    for (partner, rec) in partners {
        match best {
            Some((_, current)) if rec.win_ratio() <= current.win_ratio() => {}
            _ => best = Some((partner.as_str(), rec)),
        }
    }
    best
}
