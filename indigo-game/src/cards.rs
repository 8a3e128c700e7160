use std::fmt;

use serde::{Deserialize, Serialize};
use strum_macros::EnumIter;

/// Suits in the order they appear within each rank of a fresh deck.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, EnumIter, Serialize, Deserialize)]
pub enum Suit {
    Diamonds,
    Hearts,
    Spades,
    Clubs,
}

/// Ranks in deck order (the ace comes first in Indigo).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, EnumIter, Serialize, Deserialize)]
pub enum Rank {
    Ace,
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Jack,
    Queen,
    King,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    pub rank: Rank,
    pub suit: Suit,
}

impl Card {
    pub fn new(rank: Rank, suit: Suit) -> Self {
        Self { rank, suit }
    }

    fn rank_str(&self) -> &'static str {
        match self.rank {
            Rank::Ace => "A",
            Rank::Two => "2",
            Rank::Three => "3",
            Rank::Four => "4",
            Rank::Five => "5",
            Rank::Six => "6",
            Rank::Seven => "7",
            Rank::Eight => "8",
            Rank::Nine => "9",
            Rank::Ten => "10",
            Rank::Jack => "J",
            Rank::Queen => "Q",
            Rank::King => "K",
        }
    }

    fn suit_str(&self) -> &'static str {
        match self.suit {
            Suit::Diamonds => "♦",
            Suit::Hearts => "♥",
            Suit::Spades => "♠",
            Suit::Clubs => "♣",
        }
    }

    pub fn short_str(&self) -> String {
        String::from(self.rank_str()) + self.suit_str()
    }

    /// A card can capture the table if it shares rank or suit with the top
    /// card.
    pub fn matches(&self, other: &Card) -> bool {
        self.rank == other.rank || self.suit == other.suit
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank_str(), self.suit_str())
    }
}

/// Points a won card is worth in the final count: one for every ace, ten and
/// face card.
pub fn card_points(card: &Card) -> u32 {
    match card.rank {
        Rank::Ace | Rank::Ten | Rank::Jack | Rank::Queen | Rank::King => 1,
        _ => 0,
    }
}

/// Renders cards separated by single spaces, e.g. `"A♦ 10♥ K♣"`.
pub fn short_strs(cards: &[Card]) -> String {
    itertools::join(cards.iter().map(Card::short_str), " ")
}

#[cfg(test)]
mod tests {
    use super::{card_points, short_strs, Card, Rank, Suit};

    #[test]
    fn test_card_str() {
        let card = Card::new(Rank::King, Suit::Hearts);
        assert_eq!(card.short_str(), "K♥");
        assert_eq!(Card::new(Rank::Ten, Suit::Clubs).to_string(), "10♣");
    }

    #[test]
    fn test_matches() {
        let top = Card::new(Rank::Seven, Suit::Spades);
        assert!(Card::new(Rank::Seven, Suit::Hearts).matches(&top));
        assert!(Card::new(Rank::Two, Suit::Spades).matches(&top));
        assert!(!Card::new(Rank::Two, Suit::Hearts).matches(&top));
    }

    #[test]
    fn test_card_points() {
        let points: u32 = [Rank::Ace, Rank::Ten, Rank::Jack, Rank::Queen, Rank::King]
            .into_iter()
            .map(|rank| card_points(&Card::new(rank, Suit::Diamonds)))
            .sum();
        assert_eq!(points, 5);
        assert_eq!(card_points(&Card::new(Rank::Nine, Suit::Diamonds)), 0);
        assert_eq!(card_points(&Card::new(Rank::Two, Suit::Clubs)), 0);
    }

    #[test]
    fn test_short_strs() {
        let cards = [
            Card::new(Rank::Ace, Suit::Diamonds),
            Card::new(Rank::Ten, Suit::Hearts),
        ];
        assert_eq!(short_strs(&cards), "A♦ 10♥");
        assert_eq!(short_strs(&[]), "");
    }
}
