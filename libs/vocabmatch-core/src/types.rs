//! Core types for the vocabulary matching game.

use serde::{Deserialize, Serialize};

use crate::error::IdentityError;

/// Which half of a vocabulary pair a card shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CardKind {
    Lexeme,
    Translation,
}

/// One face-up card on the board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub id: i64,
    pub word: String,
    pub kind: CardKind,
    pub pair_id: i64,
}

/// A lexeme and its translation, the source material for two cards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VocabPair {
    pub pair_id: i64,
    pub lexeme: String,
    pub translation: String,
}

impl VocabPair {
    pub fn new(pair_id: i64, lexeme: &str, translation: &str) -> Self {
        Self {
            pair_id,
            lexeme: lexeme.to_string(),
            translation: translation.to_string(),
        }
    }
}

/// Validated student identity. Both fields are non-empty once constructed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    pub name: String,
    pub student_id: String,
}

impl Student {
    /// Trim and validate the identifying fields.
    pub fn new(name: &str, student_id: &str) -> Result<Self, IdentityError> {
        let name = name.trim();
        let student_id = student_id.trim();

        if name.is_empty() {
            return Err(IdentityError::MissingName);
        }
        if student_id.is_empty() {
            return Err(IdentityError::MissingStudentId);
        }

        Ok(Self {
            name: name.to_string(),
            student_id: student_id.to_string(),
        })
    }
}
