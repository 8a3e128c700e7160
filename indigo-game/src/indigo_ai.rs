use std::hash::Hash;

use itertools::Itertools;
use rand::{rngs::StdRng, Rng, SeedableRng};
use tracing::{debug, trace};

use crate::{
    cards::short_strs,
    game_error::GameError,
    strategy::{Choice, Strategy},
    Card,
};

/// Source of the uniform random picks the computer uses to break ties.
/// Implementations must return a value in `0..len`; `len` is at least 2.
pub trait RandomChoice {
    fn choose_index(&mut self, len: usize) -> usize;
}

/// [RandomChoice] backed by any [rand::Rng].
pub struct RngChoice<R> {
    rng: R,
}

impl<R: Rng> RngChoice<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> RandomChoice for RngChoice<R> {
    fn choose_index(&mut self, len: usize) -> usize {
        self.rng.gen_range(0..len)
    }
}

/// The computer opponent.  It prefers cards that capture the table, and
/// among those the ones following the top card's suit; without a capture it
/// keeps pairs together by playing from a suit (or else rank) it holds
/// several of.
pub struct ComputerPlayer<C = RngChoice<StdRng>> {
    chooser: C,
}

impl ComputerPlayer {
    pub fn seeded(seed: u64) -> Self {
        Self::new(RngChoice::new(StdRng::seed_from_u64(seed)))
    }
}

impl<C: RandomChoice> ComputerPlayer<C> {
    pub fn new(chooser: C) -> Self {
        Self { chooser }
    }

    /// Index into `hand` of the card to play.  `hand` must not be empty.
    pub fn choose_index(&mut self, hand: &[Card], top_card: Option<&Card>) -> usize {
        let Some(top_card) = top_card else {
            trace!("table is empty");
            return self.choose_without_candidates(hand);
        };

        let candidates = hand
            .iter()
            .positions(|card| card.matches(top_card))
            .collect_vec();

        match candidates.len() {
            0 => self.choose_without_candidates(hand),
            1 => candidates[0],
            _ => self.choose_among_candidates(hand, &candidates, top_card),
        }
    }

    fn choose_without_candidates(&mut self, hand: &[Card]) -> usize {
        let same_suit = groups_with_pairs(hand, |card| card.suit);
        if !same_suit.is_empty() {
            trace!(groups = same_suit.len(), "playing from a suit held several times");
            return self.pick_group(&same_suit)[0];
        }

        let same_rank = groups_with_pairs(hand, |card| card.rank);
        if !same_rank.is_empty() {
            trace!(groups = same_rank.len(), "playing from a rank held several times");
            return self.pick_group(&same_rank)[0];
        }

        self.pick(&(0..hand.len()).collect_vec())
    }

    fn choose_among_candidates(
        &mut self,
        hand: &[Card],
        candidates: &[usize],
        top_card: &Card,
    ) -> usize {
        let same_suit = candidates
            .iter()
            .copied()
            .filter(|&i| hand[i].suit == top_card.suit)
            .collect_vec();
        if !same_suit.is_empty() {
            return self.pick(&same_suit);
        }

        let same_rank = candidates
            .iter()
            .copied()
            .filter(|&i| hand[i].rank == top_card.rank)
            .collect_vec();
        if !same_rank.is_empty() {
            return self.pick(&same_rank);
        }

        // unreachable as long as candidates share rank or suit with top_card
        self.pick(candidates)
    }

    /// Uniform pick among `options`; a single option is taken without
    /// consulting the chooser.
    fn pick(&mut self, options: &[usize]) -> usize {
        match options {
            [only] => *only,
            _ => options[self.chooser.choose_index(options.len())],
        }
    }

    fn pick_group<'a>(&mut self, groups: &'a [Vec<usize>]) -> &'a [usize] {
        match groups {
            [only] => only.as_slice(),
            _ => groups[self.chooser.choose_index(groups.len())].as_slice(),
        }
    }
}

impl<C: RandomChoice> Strategy for ComputerPlayer<C> {
    fn choose_card(
        &mut self,
        hand: &[Card],
        top_card: Option<&Card>,
    ) -> Result<Choice, GameError> {
        debug!(hand = %short_strs(hand), top_card = ?top_card.map(Card::short_str), "computer to play");
        Ok(Choice::Play(self.choose_index(hand, top_card)))
    }
}

/// Positions of cards grouped by `key`, keeping only groups of two or more.
/// Groups come in the order their key first appears in `hand`.
fn groups_with_pairs<K, F>(hand: &[Card], key: F) -> Vec<Vec<usize>>
where
    K: Clone + Eq + Hash,
    F: Fn(&Card) -> K,
{
    hand.iter()
        .map(&key)
        .unique()
        .map(|k| hand.iter().positions(|card| key(card) == k).collect_vec())
        .filter(|group| group.len() > 1)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{groups_with_pairs, ComputerPlayer, RandomChoice};
    use crate::strategy::{Choice, Strategy};
    use crate::{Card, Rank, Suit};

    /// Replays fixed choices and remembers what it was asked.
    struct Scripted {
        answers: Vec<usize>,
        asked: Vec<usize>,
    }

    impl Scripted {
        fn new(answers: &[usize]) -> Self {
            Self {
                answers: answers.to_vec(),
                asked: Vec::new(),
            }
        }
    }

    impl RandomChoice for Scripted {
        fn choose_index(&mut self, len: usize) -> usize {
            self.asked.push(len);
            self.answers.remove(0)
        }
    }

    struct NoRandomness;

    impl RandomChoice for NoRandomness {
        fn choose_index(&mut self, len: usize) -> usize {
            panic!("unexpected random choice among {len}")
        }
    }

    fn c(rank: Rank, suit: Suit) -> Card {
        Card::new(rank, suit)
    }

    #[test]
    fn test_single_candidate_is_played() {
        let hand = [
            c(Rank::Two, Suit::Hearts),
            c(Rank::Nine, Suit::Clubs),
            c(Rank::Three, Suit::Hearts),
            c(Rank::Four, Suit::Hearts),
        ];
        let top = c(Rank::King, Suit::Clubs);
        let mut ai = ComputerPlayer::new(NoRandomness);
        assert_eq!(ai.choose_index(&hand, Some(&top)), 1);
    }

    #[test]
    fn test_suit_candidates_win_over_rank_candidates() {
        let hand = [
            c(Rank::Seven, Suit::Hearts),
            c(Rank::Two, Suit::Spades),
            c(Rank::Seven, Suit::Diamonds),
            c(Rank::Jack, Suit::Spades),
        ];
        let top = c(Rank::Seven, Suit::Spades);

        let mut ai = ComputerPlayer::new(Scripted::new(&[1]));
        assert_eq!(ai.choose_index(&hand, Some(&top)), 3);
        assert_eq!(ai.chooser.asked, vec![2]);

        let mut ai = ComputerPlayer::new(Scripted::new(&[0]));
        assert_eq!(ai.choose_index(&hand, Some(&top)), 1);
    }

    #[test]
    fn test_single_suit_candidate_beats_rank_candidates() {
        let hand = [
            c(Rank::Seven, Suit::Hearts),
            c(Rank::Seven, Suit::Diamonds),
            c(Rank::Ten, Suit::Spades),
        ];
        let top = c(Rank::Seven, Suit::Spades);
        let mut ai = ComputerPlayer::new(NoRandomness);
        assert_eq!(ai.choose_index(&hand, Some(&top)), 2);
    }

    #[test]
    fn test_rank_candidates_when_no_suit_matches() {
        let hand = [
            c(Rank::Five, Suit::Hearts),
            c(Rank::Queen, Suit::Hearts),
            c(Rank::Queen, Suit::Diamonds),
            c(Rank::Queen, Suit::Clubs),
        ];
        let top = c(Rank::Queen, Suit::Spades);
        let mut ai = ComputerPlayer::new(Scripted::new(&[2]));
        assert_eq!(ai.choose_index(&hand, Some(&top)), 3);
        assert_eq!(ai.chooser.asked, vec![3]);
    }

    #[test]
    fn test_fallback_prefers_suit_groups() {
        // two hearts, two spades, plus a pair of sixes across suits
        let hand = [
            c(Rank::Two, Suit::Hearts),
            c(Rank::Six, Suit::Spades),
            c(Rank::Six, Suit::Clubs),
            c(Rank::Nine, Suit::Hearts),
            c(Rank::Ten, Suit::Spades),
        ];
        let mut ai = ComputerPlayer::new(Scripted::new(&[1]));
        // no card matches the top card, so the fallback applies
        let top = c(Rank::King, Suit::Diamonds);
        assert_eq!(ai.choose_index(&hand, Some(&top)), 1);
        assert_eq!(ai.chooser.asked, vec![2]);

        let mut ai = ComputerPlayer::new(Scripted::new(&[0]));
        assert_eq!(ai.choose_index(&hand, None), 0);
    }

    #[test]
    fn test_fallback_single_suit_group_needs_no_randomness() {
        let hand = [
            c(Rank::Two, Suit::Hearts),
            c(Rank::Six, Suit::Spades),
            c(Rank::Nine, Suit::Spades),
        ];
        let mut ai = ComputerPlayer::new(NoRandomness);
        assert_eq!(ai.choose_index(&hand, None), 1);
    }

    #[test]
    fn test_fallback_rank_groups() {
        let hand = [
            c(Rank::Two, Suit::Hearts),
            c(Rank::Six, Suit::Spades),
            c(Rank::Two, Suit::Clubs),
            c(Rank::Six, Suit::Diamonds),
        ];
        let mut ai = ComputerPlayer::new(Scripted::new(&[1]));
        assert_eq!(ai.choose_index(&hand, None), 1);
    }

    #[test]
    fn test_fallback_random_card() {
        let hand = [
            c(Rank::Two, Suit::Hearts),
            c(Rank::Six, Suit::Spades),
            c(Rank::Nine, Suit::Clubs),
        ];
        let mut ai = ComputerPlayer::new(Scripted::new(&[2]));
        assert_eq!(ai.choose_index(&hand, None), 2);
        assert_eq!(ai.chooser.asked, vec![3]);

        let mut ai = ComputerPlayer::new(NoRandomness);
        assert_eq!(ai.choose_index(&hand[..1], None), 0);
    }

    #[test]
    fn test_groups_keep_first_appearance_order() {
        let hand = [
            c(Rank::Two, Suit::Clubs),
            c(Rank::Six, Suit::Hearts),
            c(Rank::Seven, Suit::Diamonds),
            c(Rank::Eight, Suit::Hearts),
            c(Rank::Nine, Suit::Clubs),
        ];
        assert_eq!(
            groups_with_pairs(&hand, |card| card.suit),
            vec![vec![0, 4], vec![1, 3]]
        );
        assert!(groups_with_pairs(&hand, |card| card.rank).is_empty());
    }

    #[test]
    fn test_seeded_player_stays_in_hand() {
        let hand = [
            c(Rank::Two, Suit::Hearts),
            c(Rank::Six, Suit::Spades),
            c(Rank::Nine, Suit::Clubs),
        ];
        let mut ai = ComputerPlayer::seeded(7);
        for _ in 0..20 {
            match ai.choose_card(&hand, None).unwrap() {
                Choice::Play(index) => assert!(index < hand.len()),
                Choice::Exit => panic!("computer never exits"),
            }
        }
    }
}
