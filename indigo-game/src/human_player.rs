use std::io::{BufRead, Write};

use itertools::Itertools;
use tracing::trace;

use crate::{
    game::Participant,
    game_error::GameError,
    strategy::{Choice, Strategy},
    Card,
};

/// Typing this instead of a card number ends the game.
pub const EXIT_TOKEN: &str = "exit";

/// The human seat, reading choices line by line from `input` and prompting on
/// `output`.
pub struct HumanPlayer<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> HumanPlayer<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_inner(self) -> (R, W) {
        (self.input, self.output)
    }
}

/// Next input line without its line ending, `None` at end of input.  Other
/// whitespace is kept, so " 3" or "exit " are not valid answers.
fn read_line(input: &mut impl BufRead) -> Result<Option<String>, GameError> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim_end_matches(&['\r', '\n'][..]).to_string()))
}

impl<R: BufRead, W: Write> Strategy for HumanPlayer<R, W> {
    fn choose_card(
        &mut self,
        hand: &[Card],
        _top_card: Option<&Card>,
    ) -> Result<Choice, GameError> {
        writeln!(
            self.output,
            "Cards in hand: {}",
            hand.iter()
                .enumerate()
                .map(|(i, card)| format!("{}){}", i + 1, card))
                .join(" ")
        )?;

        loop {
            writeln!(self.output, "Choose a card to play (1-{}):", hand.len())?;
            self.output.flush()?;

            let Some(line) = read_line(&mut self.input)? else {
                trace!("end of input, leaving the game");
                return Ok(Choice::Exit);
            };
            if line == EXIT_TOKEN {
                return Ok(Choice::Exit);
            }
            match line.parse::<usize>() {
                Ok(number) if (1..=hand.len()).contains(&number) => {
                    return Ok(Choice::Play(number - 1))
                }
                _ => trace!(input = %line, "ignoring input"),
            }
        }
    }

    fn is_interactive(&self) -> bool {
        true
    }
}

/// Asks whether the human wants to play first until the answer is "yes" or
/// "no" (in any letter case).  Returns `None` if input ends before that.
pub fn ask_play_first(
    input: &mut impl BufRead,
    output: &mut impl Write,
) -> Result<Option<Participant>, GameError> {
    loop {
        writeln!(output, "Play first?")?;
        output.flush()?;

        let Some(answer) = read_line(input)? else {
            return Ok(None);
        };
        match answer.to_lowercase().as_str() {
            "yes" => return Ok(Some(Participant::Human)),
            "no" => return Ok(Some(Participant::Computer)),
            _ => {}
        }
    }
}
