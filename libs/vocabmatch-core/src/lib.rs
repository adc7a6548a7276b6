//! Core matching-game library shared by the backend service and its tests.
//!
//! Provides:
//! - Deck construction and validation for lexeme/translation card sets
//! - The matching-game state machine (two-phase selection, mismatch cooldown)
//! - The builtin classroom word list and grading constants
//! - Shared types (Card, CardKind, Student, etc.)

pub mod deck;
pub mod engine;
pub mod error;
pub mod types;
pub mod vocab;

pub use engine::{CooldownHandle, MatchingEngine, Selection, MISMATCH_COOLDOWN};
pub use error::{DeckError, GameError, IdentityError, Result};
pub use types::{Card, CardKind, Student, VocabPair};
pub use vocab::{builtin_pairs, COMPLETION_SCORE, EXERCISE_ID};
