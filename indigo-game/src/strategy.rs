use crate::{game_error::GameError, Card};

/// What a participant decided to do on its turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Choice {
    /// Play the card at this (0-based) position of the hand.
    Play(usize),
    /// Leave the game immediately.
    Exit,
}

/// Picks the card to play for one seat.  `hand` is never empty when this is
/// called.
pub trait Strategy {
    fn choose_card(&mut self, hand: &[Card], top_card: Option<&Card>)
        -> Result<Choice, GameError>;

    /// Interactive strategies already show their choice to the user, so the
    /// engine does not announce it again.
    fn is_interactive(&self) -> bool {
        false
    }
}
