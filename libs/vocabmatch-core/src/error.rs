//! Error types for vocabmatch-core.

use thiserror::Error;

/// Result type alias using GameError.
pub type Result<T> = std::result::Result<T, GameError>;

/// Errors that can occur while assembling a deck from a card set.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DeckError {
    #[error("empty card set")]
    Empty,

    #[error("odd number of cards: {count}")]
    OddCardCount { count: usize },

    #[error("duplicate card ID {id}")]
    DuplicateCardId { id: i64 },

    #[error("pair {pair_id} is missing a lexeme or a translation")]
    BrokenPair { pair_id: i64 },

    #[error("pair IDs must run from 1 to {pair_count}, found {pair_id}")]
    PairIdOutOfRange { pair_id: i64, pair_count: i64 },
}

/// Errors that can occur during play.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GameError {
    #[error("card {id} is not in the deck")]
    UnknownCard { id: i64 },
}

/// Errors that can occur while validating a student identity.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum IdentityError {
    #[error("student name must not be empty")]
    MissingName,

    #[error("student ID must not be empty")]
    MissingStudentId,
}
