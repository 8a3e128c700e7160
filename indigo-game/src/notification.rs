use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{cards::short_strs, game::Participant, Card};

/// Running totals as shown after every capture and at the end of the game,
/// always ordered (human, computer).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Statistics {
    pub score: (u32, u32),
    pub cards: (usize, usize),
}

/// Everything the engine reports to the output boundary.  The [Display]
/// form of each event is the text the terminal front end prints.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    InitialTable(Vec<Card>),
    TableStatus { count: usize, top: Option<Card> },
    CardPlayed { by: Participant, card: Card },
    CardsWon(Participant),
    Statistics(Statistics),
    GameOver,
}

impl GameEvent {
    pub fn table_status(table: &[Card]) -> Self {
        GameEvent::TableStatus {
            count: table.len(),
            top: table.last().copied(),
        }
    }
}

impl fmt::Display for GameEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameEvent::InitialTable(cards) => {
                write!(f, "Initial cards on the table: {}", short_strs(cards))
            }
            GameEvent::TableStatus { count, top: Some(top) } => {
                write!(f, "{count} cards on the table, and the top card is {top}")
            }
            GameEvent::TableStatus { top: None, .. } => f.write_str("No cards on the table"),
            GameEvent::CardPlayed { by, card } => write!(f, "{by} plays {card}"),
            GameEvent::CardsWon(winner) => write!(f, "{winner} wins cards"),
            GameEvent::Statistics(stats) => write!(
                f,
                "Score: Player {} - Computer {}\nCards: Player {} - Computer {}",
                stats.score.0, stats.score.1, stats.cards.0, stats.cards.1
            ),
            GameEvent::GameOver => f.write_str("Game Over"),
        }
    }
}
