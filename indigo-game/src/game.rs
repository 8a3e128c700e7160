use std::fmt;

use serde::{Deserialize, Serialize};

use crate::cards::{card_points, Card};

/// The two seats at an Indigo table.  Only the way a card gets chosen differs
/// between them, so they are tags rather than separate player types.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Participant {
    Human,
    Computer,
}

impl Participant {
    pub fn other(self) -> Self {
        match self {
            Participant::Human => Participant::Computer,
            Participant::Computer => Participant::Human,
        }
    }

    /// Name used in game output.
    pub fn name(self) -> &'static str {
        match self {
            Participant::Human => "Player",
            Participant::Computer => "Computer",
        }
    }
}

impl fmt::Display for Participant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct PlayerState {
    /// Cards held, in the order they were dealt.  Choices refer to positions
    /// in this list.
    pub hand: Vec<Card>,
    /// Captured cards, in capture order.
    pub won: Vec<Card>,
}

impl PlayerState {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn score(&self) -> u32 {
        self.won.iter().map(card_points).sum()
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Initial cards are being put onto the table and into the hands.
    Dealing,
    AwaitingTurn(Participant),
    /// A played card is being compared against the table.
    Resolving,
    /// Both hands ran empty and get refilled from the deck.
    Redealing,
    Ended,
}
