//! Reduction of raw vote rows into per-tool counters.
//!
//! Vote rows have been written by several client versions and the direction
//! column has gone by `vote_type`, `vote` and `type`. Rows are therefore read
//! as loose JSON objects and classified here.

use std::collections::HashMap;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::types::DbId;

/// Columns checked, in order, for the vote direction.
pub const DIRECTION_KEYS: [&str; 3] = ["vote_type", "vote", "type"];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct VoteCounts {
    pub up: i64,
    pub down: i64,
}

impl VoteCounts {
    pub fn record(&mut self, direction: VoteDirection) {
        match direction {
            VoteDirection::Up => self.up += 1,
            VoteDirection::Down => self.down += 1,
        }
    }

    pub fn total(&self) -> i64 {
        self.up + self.down
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoteDirection {
    Up,
    Down,
}

/// Classify a raw direction string. Unrecognised values count for neither side.
pub fn classify_vote(raw: &str) -> Option<VoteDirection> {
    match raw.to_lowercase().as_str() {
        "up" | "like" | "positive" => Some(VoteDirection::Up),
        "down" | "dislike" | "negative" => Some(VoteDirection::Down),
        _ => None,
    }
}

/// First string among [`DIRECTION_KEYS`], classified.
pub fn vote_direction(row: &Map<String, Value>) -> Option<VoteDirection> {
    DIRECTION_KEYS
        .iter()
        .find_map(|key| row.get(*key).and_then(Value::as_str))
        .and_then(classify_vote)
}

fn owner_id(row: &Map<String, Value>) -> Option<DbId> {
    row.get("tool_id").and_then(Value::as_i64)
}

/// Tally vote rows per tool.
///
/// Every tool with at least one well-formed row gets an entry, even when none
/// of its votes could be classified. Rows without a numeric `tool_id` (or
/// that are not objects) are skipped.
pub fn tally_votes<'a>(rows: impl IntoIterator<Item = &'a Value>) -> HashMap<DbId, VoteCounts> {
    let mut counts: HashMap<DbId, VoteCounts> = HashMap::new();
    for row in rows {
        let Some(row) = row.as_object() else {
            continue;
        };
        let Some(tool_id) = owner_id(row) else {
            continue;
        };
        let entry = counts.entry(tool_id).or_default();
        if let Some(direction) = vote_direction(row) {
            entry.record(direction);
        }
    }
    counts
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn classify_accepts_synonyms_case_insensitively() {
        assert_eq!(classify_vote("UP"), Some(VoteDirection::Up));
        assert_eq!(classify_vote("Like"), Some(VoteDirection::Up));
        assert_eq!(classify_vote("positive"), Some(VoteDirection::Up));
        assert_eq!(classify_vote("down"), Some(VoteDirection::Down));
        assert_eq!(classify_vote("Dislike"), Some(VoteDirection::Down));
        assert_eq!(classify_vote("NEGATIVE"), Some(VoteDirection::Down));
        assert_eq!(classify_vote("maybe"), None);
    }

    #[test]
    fn padded_values_are_not_recognised() {
        assert_eq!(classify_vote(" up "), None);
        assert_eq!(classify_vote("down\n"), None);
    }

    #[test]
    fn direction_uses_first_string_key() {
        let row = json!({ "vote_type": null, "vote": 1, "type": "down" });
        assert_eq!(vote_direction(row.as_object().unwrap()), Some(VoteDirection::Down));

        let row = json!({ "vote_type": "up", "type": "down" });
        assert_eq!(vote_direction(row.as_object().unwrap()), Some(VoteDirection::Up));
    }

    #[test]
    fn tally_counts_each_tool_separately() {
        let rows = vec![
            json!({ "tool_id": 1, "vote_type": "up" }),
            json!({ "tool_id": 1, "vote": "like" }),
            json!({ "tool_id": 1, "type": "down" }),
            json!({ "tool_id": 2, "vote_type": "negative" }),
        ];
        let counts = tally_votes(&rows);
        assert_eq!(counts[&1], VoteCounts { up: 2, down: 1 });
        assert_eq!(counts[&2], VoteCounts { up: 0, down: 1 });
        assert_eq!(counts[&1].total(), 3);
    }

    #[test]
    fn unrecognised_votes_count_for_neither_bucket() {
        let rows = vec![json!({ "tool_id": 5, "vote_type": "maybe" })];
        let counts = tally_votes(&rows);
        assert_eq!(counts.get(&5), Some(&VoteCounts::default()));
    }

    #[test]
    fn rows_without_numeric_tool_id_are_skipped() {
        let rows = vec![
            json!({ "tool_id": "7", "vote_type": "up" }),
            json!({ "vote_type": "up" }),
            json!("up"),
        ];
        assert!(tally_votes(&rows).is_empty());
    }

    #[test]
    fn tools_without_rows_are_absent() {
        let rows: Vec<Value> = Vec::new();
        assert!(tally_votes(&rows).get(&1).is_none());
    }
}
