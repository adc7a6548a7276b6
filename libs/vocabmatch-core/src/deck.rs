//! Deck construction and validation.
//!
//! A valid card set holds exactly two cards per pair ID (one lexeme, one
//! translation), pair IDs running from 1 to the number of pairs, and no
//! duplicate card IDs. [`deal`] produces such a set from a vocabulary
//! list; [`validate`] checks the invariants on any set handed in.

use std::collections::{HashMap, HashSet};

use crate::error::DeckError;
use crate::types::{Card, CardKind, VocabPair};

/// Build the card set for a vocabulary list: one lexeme card and one
/// translation card per pair, card IDs assigned in deal order starting at 1.
pub fn deal(pairs: &[VocabPair]) -> Vec<Card> {
    let mut cards = Vec::with_capacity(pairs.len() * 2);
    for pair in pairs {
        cards.push(Card {
            id: cards.len() as i64 + 1,
            word: pair.lexeme.clone(),
            kind: CardKind::Lexeme,
            pair_id: pair.pair_id,
        });
        cards.push(Card {
            id: cards.len() as i64 + 1,
            word: pair.translation.clone(),
            kind: CardKind::Translation,
            pair_id: pair.pair_id,
        });
    }
    cards
}

/// Check the card-set invariants.
pub fn validate(cards: &[Card]) -> Result<(), DeckError> {
    if cards.is_empty() {
        return Err(DeckError::Empty);
    }
    if cards.len() % 2 != 0 {
        return Err(DeckError::OddCardCount { count: cards.len() });
    }

    let mut seen_ids = HashSet::new();
    for card in cards {
        if !seen_ids.insert(card.id) {
            return Err(DeckError::DuplicateCardId { id: card.id });
        }
    }

    let pair_count = (cards.len() / 2) as i64;
    let mut kinds: HashMap<i64, (u32, u32)> = HashMap::new();
    for card in cards {
        if card.pair_id < 1 || card.pair_id > pair_count {
            return Err(DeckError::PairIdOutOfRange {
                pair_id: card.pair_id,
                pair_count,
            });
        }
        let entry = kinds.entry(card.pair_id).or_insert((0, 0));
        match card.kind {
            CardKind::Lexeme => entry.0 += 1,
            CardKind::Translation => entry.1 += 1,
        }
    }

    for pair_id in 1..=pair_count {
        if kinds.get(&pair_id) != Some(&(1, 1)) {
            return Err(DeckError::BrokenPair { pair_id });
        }
    }

    Ok(())
}
