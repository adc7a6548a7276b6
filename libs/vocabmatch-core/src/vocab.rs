//! The fixed classroom exercise: word list and grading constants.

use crate::types::VocabPair;

/// Exercise identifier recorded with every submission.
pub const EXERCISE_ID: &str = "vocab-matching-game";

/// Completion is pass/fail; a finished game always records full marks.
pub const COMPLETION_SCORE: i32 = 100;

/// The builtin English/Chinese word list, one game's worth of pairs.
pub fn builtin_pairs() -> Vec<VocabPair> {
    [
        ("apple", "苹果"),
        ("cat", "猫"),
        ("dog", "狗"),
        ("book", "书"),
        ("sun", "太阳"),
        ("water", "水"),
    ]
    .iter()
    .enumerate()
    .map(|(idx, &(lexeme, translation))| VocabPair::new(idx as i64 + 1, lexeme, translation))
    .collect()
}
