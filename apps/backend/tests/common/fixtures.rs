//! Test fixtures and factory functions for creating test data.

use serde_json::json;
use uuid::Uuid;

/// Create a start-session request body.
pub fn start_session_request(name: &str, student_id: &str) -> serde_json::Value {
    json!({ "student_name": name, "student_id": student_id })
}

/// Create a select-card request body.
pub fn select_card_request(card_id: i64) -> serde_json::Value {
    json!({ "card_id": card_id })
}

/// Pull (lexeme ID, translation ID) out of a session view's deck for every
/// pair, in pair order. This is the order a test plays to win.
pub fn pairs_from_deck(view: &serde_json::Value) -> Vec<(i64, i64)> {
    let deck = view["deck"].as_array().expect("deck array");
    let mut pairs = vec![(0i64, 0i64); deck.len() / 2];
    for card in deck {
        let pair_id = card["pair_id"].as_i64().expect("pair_id") as usize;
        let card_id = card["id"].as_i64().expect("card id");
        match card["kind"].as_str().expect("kind") {
            "lexeme" => pairs[pair_id - 1].0 = card_id,
            _ => pairs[pair_id - 1].1 = card_id,
        }
    }
    pairs
}

/// Two card IDs that can never pair (two lexemes), for forcing a mismatch.
pub fn mismatched_card_ids(view: &serde_json::Value) -> (i64, i64) {
    let pairs = pairs_from_deck(view);
    (pairs[0].0, pairs[1].0)
}

/// Generate a unique student ID to avoid collisions between test runs.
pub fn unique_student_id(prefix: &str) -> String {
    format!("{}_{}", prefix, &Uuid::new_v4().to_string()[..8])
}
