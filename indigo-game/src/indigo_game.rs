use std::cmp::Ordering;
use std::io::Write;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::{
    cards::short_strs,
    decks::Deck,
    game::{GamePhase, Participant, PlayerState},
    game_error::GameError,
    notification::{GameEvent, Statistics},
    strategy::{Choice, Strategy},
    Card,
};

/// Cards put face up onto the table before the first turn.
pub const INITIAL_TABLE_CARDS: usize = 4;
/// Cards dealt to each participant whenever both hands are empty.
pub const HAND_SIZE: usize = 6;
/// Extra points for winning more cards than the opponent.
pub const CARD_COUNT_BONUS: u32 = 3;

/// Result of a finished game; pairs are ordered (human, computer).
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct FinalScore {
    pub card_points: (u32, u32),
    pub card_count_points: (u32, u32),
    pub cards_won: (usize, usize),
}

impl FinalScore {
    pub fn total_points(&self) -> (u32, u32) {
        (
            self.card_points.0 + self.card_count_points.0,
            self.card_points.1 + self.card_count_points.1,
        )
    }

    pub fn statistics(&self) -> Statistics {
        Statistics {
            score: self.total_points(),
            cards: self.cards_won,
        }
    }
}

/// How a game came to an end.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GameEnd {
    /// All cards were played and the table was awarded.
    Completed(FinalScore),
    /// The human typed "exit" (or input ended); nothing was awarded.
    Aborted,
    /// Both hands were empty but the deck could not refill them.
    DeckExhausted,
}

/// What a single turn led to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TurnOutcome {
    Continue,
    /// The last card was played; the game is scored.
    Finished,
    Abort,
    /// A redeal was due but the deck held too few cards.
    Insufficient,
}

/// A card put onto the table and what it captured (empty if nothing).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Play {
    pub card: Card,
    pub captured: Vec<Card>,
}

/// One game of Indigo between the human and the computer.
pub struct IndigoGame {
    deck: Deck,
    human: PlayerState,
    computer: PlayerState,
    /// face up cards, last one on top
    table: Vec<Card>,
    /// number of cards in the game, for consistency checks
    card_total: usize,
    first_player: Participant,
    active: Participant,
    /// participant who captured the table most recently; gets the remaining
    /// table cards at the end
    last_winner: Option<Participant>,
    phase: GamePhase,
    /// number of cards played so far
    turn: usize,
    history: Vec<GameEvent>,
    /// number of history entries already written by [IndigoGame::run]
    reported: usize,
}

impl IndigoGame {
    pub fn new(first_player: Participant) -> Self {
        Self::with_deck(Deck::new(), first_player)
    }

    pub fn with_deck(deck: Deck, first_player: Participant) -> Self {
        Self {
            card_total: deck.remaining(),
            deck,
            human: PlayerState::new(),
            computer: PlayerState::new(),
            table: Vec::new(),
            first_player,
            active: first_player,
            last_winner: None,
            phase: GamePhase::Dealing,
            turn: 0,
            history: Vec::new(),
            reported: 0,
        }
    }

    /// Puts the initial cards onto the table and deals both hands.
    pub fn setup_game(&mut self) -> Result<(), GameError> {
        if self.phase != GamePhase::Dealing {
            return Err(GameError::InvalidPhase(self.phase));
        }
        // check up front so that a failing setup draws nothing
        let needed = INITIAL_TABLE_CARDS + 2 * HAND_SIZE;
        if self.deck.remaining() < needed {
            return Err(GameError::InsufficientCards {
                requested: needed,
                remaining: self.deck.remaining(),
            });
        }
        self.table = self.deck.draw(INITIAL_TABLE_CARDS)?;
        self.history.push(GameEvent::InitialTable(self.table.clone()));
        self.deal_hands()?;
        self.history.push(GameEvent::table_status(&self.table));
        self.phase = GamePhase::AwaitingTurn(self.active);
        Ok(())
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn finished(&self) -> bool {
        self.phase == GamePhase::Ended
    }

    pub fn active_participant(&self) -> Participant {
        self.active
    }

    pub fn first_player(&self) -> Participant {
        self.first_player
    }

    pub fn last_winner(&self) -> Option<Participant> {
        self.last_winner
    }

    pub fn turn(&self) -> usize {
        self.turn
    }

    pub fn table(&self) -> &[Card] {
        &self.table
    }

    pub fn top_card(&self) -> Option<&Card> {
        self.table.last()
    }

    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    pub fn player(&self, participant: Participant) -> &PlayerState {
        match participant {
            Participant::Human => &self.human,
            Participant::Computer => &self.computer,
        }
    }

    fn player_mut(&mut self, participant: Participant) -> &mut PlayerState {
        match participant {
            Participant::Human => &mut self.human,
            Participant::Computer => &mut self.computer,
        }
    }

    pub fn history(&self) -> &[GameEvent] {
        &self.history
    }

    /// Cards in the deck, on the table, in hands and in won piles; always
    /// equals the size of the deck the game started with.
    pub fn cards_accounted(&self) -> usize {
        self.deck.remaining()
            + self.table.len()
            + [&self.human, &self.computer]
                .iter()
                .map(|player| player.hand.len() + player.won.len())
                .sum::<usize>()
    }

    /// Score and card counts so far, without the card count bonus.
    pub fn statistics(&self) -> Statistics {
        Statistics {
            score: (self.human.score(), self.computer.score()),
            cards: (self.human.won.len(), self.computer.won.len()),
        }
    }

    /// Score including the card count bonus.  On equal card counts the bonus
    /// goes to the computer.
    pub fn final_score(&self) -> FinalScore {
        let cards_won = (self.human.won.len(), self.computer.won.len());
        let card_count_points = match cards_won.0.cmp(&cards_won.1) {
            Ordering::Greater => (CARD_COUNT_BONUS, 0),
            Ordering::Equal | Ordering::Less => (0, CARD_COUNT_BONUS),
        };
        FinalScore {
            card_points: (self.human.score(), self.computer.score()),
            card_count_points,
            cards_won,
        }
    }

    fn hands_empty(&self) -> bool {
        self.human.hand.is_empty() && self.computer.hand.is_empty()
    }

    fn deal_hands(&mut self) -> Result<(), GameError> {
        // check up front so that a failing deal leaves no partial hands
        if self.deck.remaining() < 2 * HAND_SIZE {
            return Err(GameError::InsufficientCards {
                requested: 2 * HAND_SIZE,
                remaining: self.deck.remaining(),
            });
        }
        for participant in [Participant::Human, Participant::Computer] {
            let cards = self.deck.draw(HAND_SIZE)?;
            self.player_mut(participant).hand.extend(cards);
        }
        Ok(())
    }

    /// Refills both (empty) hands from the deck.
    pub fn redeal(&mut self) -> Result<(), GameError> {
        if !matches!(self.phase, GamePhase::AwaitingTurn(_)) || !self.hands_empty() {
            return Err(GameError::InvalidPhase(self.phase));
        }
        self.phase = GamePhase::Redealing;
        let result = self.deal_hands();
        self.phase = GamePhase::AwaitingTurn(self.active);
        debug!(
            remaining = self.deck.remaining(),
            ok = result.is_ok(),
            "redealing"
        );
        result
    }

    /// Moves a card from the participant's hand onto the table.  If it shares
    /// rank or suit with the previous top card, the participant captures the
    /// whole table including the played card.  Turns alternate either way.
    pub fn play_card(
        &mut self,
        participant: Participant,
        card_index: usize,
    ) -> Result<Play, GameError> {
        match self.phase {
            GamePhase::AwaitingTurn(active) if active == participant => {}
            GamePhase::AwaitingTurn(_) => {
                return Err(GameError::NotParticipantsTurn(participant))
            }
            phase => return Err(GameError::InvalidPhase(phase)),
        }
        let hand_size = self.player(participant).hand.len();
        if card_index >= hand_size {
            return Err(GameError::InvalidCardIndex {
                index: card_index,
                hand_size,
            });
        }

        self.phase = GamePhase::Resolving;
        let previous_top = self.table.last().copied();
        let card = self.player_mut(participant).hand.remove(card_index);
        self.table.push(card);

        let captured = if previous_top.is_some_and(|top| card.matches(&top)) {
            let captured: Vec<Card> = self.table.drain(..).collect();
            debug!(%participant, cards = %short_strs(&captured), "capture");
            self.player_mut(participant).won.extend_from_slice(&captured);
            self.last_winner = Some(participant);
            self.history.push(GameEvent::CardsWon(participant));
            self.history.push(GameEvent::Statistics(self.statistics()));
            captured
        } else {
            Vec::new()
        };
        self.history.push(GameEvent::table_status(&self.table));

        self.turn += 1;
        self.active = participant.other();
        self.phase = GamePhase::AwaitingTurn(self.active);
        debug_assert_eq!(self.cards_accounted(), self.card_total);

        Ok(Play { card, captured })
    }

    /// True once the deck and both hands are empty.
    fn all_cards_played(&self) -> bool {
        self.deck.is_empty() && self.hands_empty()
    }

    /// Awards the cards left on the table and scores the game.
    fn finish_game(&mut self) {
        let receiver = self.last_winner.unwrap_or(self.first_player);
        let leftovers: Vec<Card> = self.table.drain(..).collect();
        info!(%receiver, count = leftovers.len(), "awarding remaining table cards");
        self.player_mut(receiver).won.extend(leftovers);

        self.phase = GamePhase::Ended;
        let score = self.final_score();
        info!(?score, "game finished");
        self.history.push(GameEvent::Statistics(score.statistics()));
        self.history.push(GameEvent::GameOver);
    }

    /// Ends the game early; table cards are not awarded.
    fn abandon(&mut self) {
        self.phase = GamePhase::Ended;
        self.history.push(GameEvent::GameOver);
    }

    /// Lets the active participant's `strategy` play one card, refilling the
    /// hands first if necessary.
    pub fn take_turn(&mut self, strategy: &mut dyn Strategy) -> Result<TurnOutcome, GameError> {
        if !matches!(self.phase, GamePhase::AwaitingTurn(_)) {
            return Err(GameError::InvalidPhase(self.phase));
        }

        if self.hands_empty() {
            match self.redeal() {
                Ok(()) => {}
                Err(GameError::InsufficientCards {
                    requested,
                    remaining,
                }) => {
                    info!(requested, remaining, "deck cannot refill the hands");
                    self.abandon();
                    return Ok(TurnOutcome::Insufficient);
                }
                Err(err) => return Err(err),
            }
        }

        let participant = self.active;
        let choice = strategy.choose_card(&self.player(participant).hand, self.top_card())?;
        let card_index = match choice {
            Choice::Play(card_index) => card_index,
            Choice::Exit => {
                info!(%participant, "leaving the game");
                self.abandon();
                return Ok(TurnOutcome::Abort);
            }
        };

        if !strategy.is_interactive() {
            if let Some(&card) = self.player(participant).hand.get(card_index) {
                self.history.push(GameEvent::CardPlayed {
                    by: participant,
                    card,
                });
            }
        }
        self.play_card(participant, card_index)?;

        if self.all_cards_played() {
            self.finish_game();
            return Ok(TurnOutcome::Finished);
        }
        Ok(TurnOutcome::Continue)
    }

    fn write_new_events(&mut self, out: &mut impl Write) -> Result<(), GameError> {
        for event in &self.history[self.reported..] {
            writeln!(out, "{event}")?;
        }
        self.reported = self.history.len();
        out.flush()?;
        Ok(())
    }

    /// Plays the game to its end, writing every event to `out` as it happens.
    /// Sets the game up first if that has not happened yet.
    pub fn run(
        &mut self,
        human: &mut dyn Strategy,
        computer: &mut dyn Strategy,
        out: &mut impl Write,
    ) -> Result<GameEnd, GameError> {
        if self.phase == GamePhase::Dealing {
            self.setup_game()?;
        }
        self.write_new_events(out)?;

        loop {
            let strategy: &mut dyn Strategy = match self.active {
                Participant::Human => &mut *human,
                Participant::Computer => &mut *computer,
            };
            let outcome = self.take_turn(strategy)?;
            self.write_new_events(out)?;

            match outcome {
                TurnOutcome::Continue => {}
                TurnOutcome::Finished => return Ok(GameEnd::Completed(self.final_score())),
                TurnOutcome::Abort => return Ok(GameEnd::Aborted),
                TurnOutcome::Insufficient => return Ok(GameEnd::DeckExhausted),
            }
        }
    }
}
