pub mod cards;
pub mod decks;
pub mod game;
pub mod game_error;
pub mod human_player;
pub mod indigo_ai;
pub mod indigo_game;
pub mod notification;
pub mod strategy;

pub use cards::{Card, Rank, Suit};
