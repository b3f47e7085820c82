//! Match log normalization.
//!
//! Turns raw persisted rows into validated [`MatchRecord`]s. Parsing is
//! best-effort throughout: a malformed set score is skipped, a row with an
//! unusable date or winner is dropped from the computed snapshot with a
//! warning. Nothing here raises; storage keeps the raw row either way.

use chrono::NaiveDate;
use tracing::warn;

use crate::models::{MatchRecord, MatchType, RawMatchRow, SetScore, Winner};

/// Date formats accepted in raw rows, tried in order.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%d-%m-%Y", "%d/%m/%Y"];

/// Parse a raw date string against the accepted formats.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
}

/// Parse a raw winner string ("Team1", "Team2", "Tie"), case-insensitive.
pub fn parse_winner(s: &str) -> Option<Winner> {
    match s.trim().to_lowercase().as_str() {
        "team1" => Some(Winner::Team1),
        "team2" => Some(Winner::Team2),
        "tie" => Some(Winner::Tie),
        _ => None,
    }
}

fn parse_match_type(row: &RawMatchRow) -> MatchType {
    match row.match_type.trim().to_lowercase().as_str() {
        "singles" => MatchType::Singles,
        "doubles" => MatchType::Doubles,
        // Missing type: infer doubles when both second slots are filled.
        _ => {
            if !row.team1_player2.trim().is_empty() && !row.team2_player2.trim().is_empty() {
                MatchType::Doubles
            } else {
                MatchType::Singles
            }
        }
    }
}

fn team(first: &str, second: &str, match_type: MatchType) -> Vec<String> {
    let mut players = vec![first.trim().to_string()];
    if match_type == MatchType::Doubles {
        // A Singles row's second slot is ignored even when filled.
        players.push(second.trim().to_string());
    }
    players.retain(|p| !p.is_empty());
    players
}

/// Normalize a single raw row.
///
/// `None` when the row has no usable date or winner.
pub fn normalize_row(row: &RawMatchRow) -> Option<MatchRecord> {
    let date = parse_date(&row.date)?;
    let winner = parse_winner(&row.winner)?;
    let match_type = parse_match_type(row);

    let sets: Vec<SetScore> = [&row.set1, &row.set2, &row.set3]
        .iter()
        .filter_map(|s| SetScore::parse(s))
        .collect();

    let image_url = match row.image_url.trim() {
        "" => None,
        url => Some(url.to_string()),
    };

    Some(MatchRecord {
        match_id: row.match_id.trim().to_string(),
        date,
        match_type,
        team1: team(&row.team1_player1, &row.team1_player2, match_type),
        team2: team(&row.team2_player1, &row.team2_player2, match_type),
        sets,
        winner,
        image_url,
    })
}

/// Normalize a raw match log snapshot.
///
/// Duplicate `match_id`s are resolved by keeping the last occurrence;
/// rows that fail to normalize are dropped with a warning. Output order
/// follows the input order of the surviving rows.
pub fn normalize(rows: &[RawMatchRow]) -> Vec<MatchRecord> {
    let mut records: Vec<MatchRecord> = Vec::with_capacity(rows.len());

    for row in rows {
        match normalize_row(row) {
            Some(record) => {
                // Last occurrence wins for duplicated ids.
                if !record.match_id.is_empty() {
                    if let Some(pos) = records.iter().position(|r| r.match_id == record.match_id) {
                        records.remove(pos);
                    }
                }
                records.push(record);
            }
            None => {
                warn!(
                    match_id = %row.match_id,
                    date = %row.date,
                    winner = %row.winner,
                    "Skipping unusable match row"
                );
            }
        }
    }

    records
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(id: &str, date: &str) -> RawMatchRow {
        RawMatchRow {
            match_id: id.to_string(),
            date: date.to_string(),
            match_type: "Singles".to_string(),
            team1_player1: "Ana".to_string(),
            team2_player1: "Ben".to_string(),
            set1: "6-3".to_string(),
            winner: "Team1".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_parse_date_formats() {
        let expected = NaiveDate::from_ymd_opt(2024, 7, 14).unwrap();
        assert_eq!(parse_date("2024-07-14"), Some(expected));
        assert_eq!(parse_date("14-07-2024"), Some(expected));
        assert_eq!(parse_date("14/07/2024"), Some(expected));
        assert_eq!(parse_date("July 14th"), None);
        assert_eq!(parse_date(""), None);
    }

    #[test]
    fn test_normalize_row_singles() {
        let mut row = raw("AR Q3 2024-01", "2024-07-14");
        // Second-slot value on a singles row is ignored.
        row.team1_player2 = "Stray".to_string();

        let rec = normalize_row(&row).unwrap();
        assert_eq!(rec.match_type, MatchType::Singles);
        assert_eq!(rec.team1, vec!["Ana"]);
        assert_eq!(rec.team2, vec!["Ben"]);
        assert_eq!(rec.sets.len(), 1);
        assert_eq!(rec.winner, Winner::Team1);
    }

    #[test]
    fn test_normalize_row_doubles() {
        let mut row = raw("AR Q3 2024-02", "2024-07-15");
        row.match_type = "Doubles".to_string();
        row.team1_player2 = "Cleo".to_string();
        row.team2_player2 = "Dana".to_string();

        let rec = normalize_row(&row).unwrap();
        assert_eq!(rec.match_type, MatchType::Doubles);
        assert_eq!(rec.team1, vec!["Ana", "Cleo"]);
        assert_eq!(rec.team2, vec!["Ben", "Dana"]);
    }

    #[test]
    fn test_match_type_inferred_when_missing() {
        let mut row = raw("x", "2024-07-15");
        row.match_type = String::new();
        assert_eq!(normalize_row(&row).unwrap().match_type, MatchType::Singles);

        row.team1_player2 = "Cleo".to_string();
        row.team2_player2 = "Dana".to_string();
        assert_eq!(normalize_row(&row).unwrap().match_type, MatchType::Doubles);
    }

    #[test]
    fn test_bad_sets_skipped_silently() {
        let mut row = raw("x", "2024-07-14");
        row.set1 = "6-3".to_string();
        row.set2 = "abandoned".to_string();
        row.set3 = String::new();

        let rec = normalize_row(&row).unwrap();
        assert_eq!(rec.sets.len(), 1);
    }

    #[test]
    fn test_unparseable_date_drops_row() {
        assert!(normalize_row(&raw("x", "sometime in July")).is_none());
        assert!(normalize_row(&raw("x", "")).is_none());
    }

    #[test]
    fn test_unknown_winner_drops_row() {
        let mut row = raw("x", "2024-07-14");
        row.winner = "rain delay".to_string();
        assert!(normalize_row(&row).is_none());
    }

    #[test]
    fn test_normalize_drops_bad_rows_keeps_good() {
        let rows = vec![raw("a", "2024-07-14"), raw("b", "nope"), raw("c", "2024-07-16")];
        let records = normalize(&rows);
        let ids: Vec<&str> = records.iter().map(|r| r.match_id.as_str()).collect();
        assert_eq!(ids, vec!["a", "c"]);
    }

    #[test]
    fn test_duplicate_id_last_occurrence_wins() {
        let mut first = raw("dup", "2024-07-14");
        first.winner = "Team1".to_string();
        let mut second = raw("dup", "2024-07-20");
        second.winner = "Team2".to_string();

        let records = normalize(&[first, second]);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].winner, Winner::Team2);
        assert_eq!(records[0].date, NaiveDate::from_ymd_opt(2024, 7, 20).unwrap());
    }

    #[test]
    fn test_rows_without_id_are_all_kept() {
        let records = normalize(&[raw("", "2024-07-14"), raw("", "2024-07-15")]);
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn test_tie_winner_and_image_url() {
        let mut row = raw("x", "2024-07-14");
        row.winner = "tie".to_string();
        row.image_url = " https://example.com/sheet.jpg ".to_string();

        let rec = normalize_row(&row).unwrap();
        assert_eq!(rec.winner, Winner::Tie);
        assert_eq!(rec.image_url.as_deref(), Some("https://example.com/sheet.jpg"));
    }
}
