//! State machine for one round of the matching game.
//!
//! Selection is two-phase: the first pick is held, the second is judged
//! against it. A mismatch clears the selection, locks input, and hands the
//! caller a [`CooldownHandle`]; the host schedules the unlock and calls
//! [`MatchingEngine::release_cooldown`] when the cooldown elapses. The
//! engine never blocks and never reads a clock.

use std::collections::BTreeSet;
use std::time::Duration;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::deck;
use crate::error::{DeckError, GameError, Result};
use crate::types::Card;

/// How long input stays locked after a mismatched pair.
pub const MISMATCH_COOLDOWN: Duration = Duration::from_millis(600);

/// Token for one scheduled mismatch unlock. Only the lock it was issued
/// for honors it; resets and earlier releases leave the handle stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CooldownHandle(u64);

/// Outcome of a single card selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    /// Input was locked or the card is already matched; nothing changed.
    Ignored,
    /// The card became the first half of a prospective pair.
    First { card_id: i64 },
    /// The two picks pair up; both cards are now matched.
    Matched { pair_id: i64, card_ids: [i64; 2] },
    /// The picks do not pair (or were the same card). Input is locked
    /// until the handle is released.
    Mismatched { cooldown: CooldownHandle },
}

/// One round of the matching game.
#[derive(Debug, Clone)]
pub struct MatchingEngine {
    deck: Vec<Card>,
    first_selected: Option<i64>,
    matched: BTreeSet<i64>,
    input_locked: bool,
    lock_epoch: u64,
}

impl MatchingEngine {
    /// Shuffle `cards` into a fresh deck and start a round.
    pub fn new(cards: Vec<Card>, rng: &mut impl Rng) -> std::result::Result<Self, DeckError> {
        let mut engine = Self::with_order(cards)?;
        engine.deck.shuffle(rng);
        Ok(engine)
    }

    /// Start a round over `cards` in the given order, for callers that
    /// control the permutation themselves.
    pub fn with_order(cards: Vec<Card>) -> std::result::Result<Self, DeckError> {
        deck::validate(&cards)?;
        Ok(Self {
            deck: cards,
            first_selected: None,
            matched: BTreeSet::new(),
            input_locked: false,
            lock_epoch: 0,
        })
    }

    /// Apply one card selection and report the transition.
    pub fn select_card(&mut self, card_id: i64) -> Result<Selection> {
        let pair_id = self
            .pair_id_of(card_id)
            .ok_or(GameError::UnknownCard { id: card_id })?;

        if self.input_locked || self.matched.contains(&card_id) {
            return Ok(Selection::Ignored);
        }

        // First pick: hold it and wait for the second.
        let Some(first_id) = self.first_selected.take() else {
            self.first_selected = Some(card_id);
            return Ok(Selection::First { card_id });
        };

        // Second pick: the selection is already cleared either way; only
        // the matched set and the input lock differ. Picking the held card
        // again cannot satisfy its own pair.
        if self.pair_id_of(first_id) == Some(pair_id) && first_id != card_id {
            self.matched.insert(first_id);
            self.matched.insert(card_id);
            return Ok(Selection::Matched {
                pair_id,
                card_ids: [first_id, card_id],
            });
        }

        self.input_locked = true;
        self.lock_epoch += 1;
        Ok(Selection::Mismatched {
            cooldown: CooldownHandle(self.lock_epoch),
        })
    }

    /// Release the input lock for an elapsed cooldown. Returns false when
    /// the handle is stale: the lock was already released, or the round was
    /// reset since the handle was issued.
    pub fn release_cooldown(&mut self, handle: CooldownHandle) -> bool {
        if self.input_locked && handle == CooldownHandle(self.lock_epoch) {
            self.input_locked = false;
            true
        } else {
            false
        }
    }

    /// Reshuffle the same cards into a fresh round. Outstanding cooldown
    /// handles become stale, so a pending unlock cannot fire into the new
    /// round.
    pub fn reset(&mut self, rng: &mut impl Rng) {
        self.deck.shuffle(rng);
        self.first_selected = None;
        self.matched.clear();
        self.input_locked = false;
        self.lock_epoch += 1;
    }

    /// True once every card in the deck has been matched.
    pub fn is_complete(&self) -> bool {
        self.matched.len() == self.deck.len()
    }

    /// True while a mismatch cooldown is pending.
    pub fn is_locked(&self) -> bool {
        self.input_locked
    }

    /// The deck in its current display order.
    pub fn deck(&self) -> &[Card] {
        &self.deck
    }

    /// The held first pick, if any.
    pub fn first_selected(&self) -> Option<i64> {
        self.first_selected
    }

    /// IDs of all matched cards, ascending.
    pub fn matched(&self) -> impl Iterator<Item = i64> + '_ {
        self.matched.iter().copied()
    }

    pub fn matched_count(&self) -> usize {
        self.matched.len()
    }

    fn pair_id_of(&self, card_id: i64) -> Option<i64> {
        self.deck.iter().find(|c| c.id == card_id).map(|c| c.pair_id)
    }
}
