use strum::IntoEnumIterator;
use tracing::trace;

use crate::cards::{Card, Rank, Suit};
use crate::game_error::GameError;

/// Number of distinct cards, see [Rank] and [Suit] enums.
pub const DECK_SIZE: usize = 52;

/// Returns a full deck of cards (all [ranks](Rank), each in all
/// [suits](Suit), in order).  Indigo never shuffles, so `A♦ A♥ A♠ A♣ 2♦ …` is
/// the order in which cards are dealt.
pub fn deck() -> Vec<Card> {
    let mut result = Vec::with_capacity(DECK_SIZE);
    for rank in Rank::iter() {
        for suit in Suit::iter() {
            result.push(Card::new(rank, suit))
        }
    }
    result
}

/// The stock cards are drawn from.  It only ever shrinks.
#[derive(Clone, Debug)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    pub fn new() -> Self {
        Self { cards: deck() }
    }

    /// Deck with a prepared card order; the first card is drawn first.
    pub fn from_cards(cards: Vec<Card>) -> Self {
        Self { cards }
    }

    /// Removes and returns the first `count` cards.  Over-requesting leaves
    /// the deck untouched.
    pub fn draw(&mut self, count: usize) -> Result<Vec<Card>, GameError> {
        if count > self.cards.len() {
            return Err(GameError::InsufficientCards {
                requested: count,
                remaining: self.cards.len(),
            });
        }
        trace!(count, remaining = self.cards.len() - count, "drawing cards");
        Ok(self.cards.drain(..count).collect())
    }

    /// Full deck in canonical order, except that `top_cards` are moved to the
    /// front (in the given order).
    pub fn with_top_cards(top_cards: &[Card]) -> Self {
        let mut cards = top_cards.to_vec();
        cards.extend(deck().into_iter().filter(|card| !top_cards.contains(card)));
        Self { cards }
    }

    pub fn remaining(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }
}

impl Default for Deck {
    fn default() -> Self {
        Self::new()
    }
}
