use thiserror::Error;

use crate::game::{GamePhase, Participant};

#[derive(Debug, Error)]
pub enum GameError {
    /// The deck cannot satisfy a draw.
    #[error("the remaining cards are insufficient to meet the request ({requested} requested, {remaining} left)")]
    InsufficientCards { requested: usize, remaining: usize },
    #[error("not {0}'s turn")]
    NotParticipantsTurn(Participant),
    #[error("invalid card index {index} (hand holds {hand_size} cards)")]
    InvalidCardIndex { index: usize, hand_size: usize },
    #[error("not possible while the game is {0:?}")]
    InvalidPhase(GamePhase),
    #[error("input/output failed")]
    Io(#[from] std::io::Error),
}
