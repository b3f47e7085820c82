//! Quarter-scoped sequential match ID generation.
//!
//! IDs read `AR Q<quarter> <year>-<NN>`, e.g. `AR Q3 2024-07`. The serial
//! restarts each quarter and is zero-padded to two digits, widening past 99.
//! Legacy rows may carry free-form IDs; those never match a quarter prefix
//! and are only consulted for collisions.

use chrono::{Datelike, NaiveDate};
use std::collections::HashSet;

/// Calendar quarter label for a date: Q1 Jan–Mar through Q4 Oct–Dec.
pub fn quarter_label(date: NaiveDate) -> &'static str {
    match date.month() {
        1..=3 => "Q1",
        4..=6 => "Q2",
        7..=9 => "Q3",
        _ => "Q4",
    }
}

/// Generate a fresh match ID for a match played on `date`.
///
/// The serial is one greater than the count of existing IDs already in
/// that quarter/year, then probed upward until it collides with nothing.
/// Probing covers backfilled IDs and concurrent inserts that left gaps or
/// duplicates in the sequence.
pub fn generate_match_id<S: AsRef<str>>(existing_ids: &[S], date: NaiveDate) -> String {
    let prefix = format!("AR {} {}", quarter_label(date), date.year());

    let taken: HashSet<&str> = existing_ids.iter().map(|s| s.as_ref()).collect();
    let in_quarter = taken.iter().filter(|id| id.starts_with(&prefix)).count();

    let mut serial = in_quarter + 1;
    loop {
        let candidate = format!("{}-{:02}", prefix, serial);
        if !taken.contains(candidate.as_str()) {
            return candidate;
        }
        serial += 1;
    }
}
