use indigo_game::game::Participant;
use indigo_game::indigo_ai::ComputerPlayer;
use indigo_game::indigo_game::{GameEnd, IndigoGame};

/// Plays a few seeded games computer against computer and prints the results.
fn main() -> Result<(), indigo_game::game_error::GameError> {
    let mut totals = (0, 0);

    for seed in 0..5u64 {
        let first = if seed % 2 == 0 {
            Participant::Human
        } else {
            Participant::Computer
        };
        let mut game = IndigoGame::new(first);
        let mut players = [ComputerPlayer::seeded(2 * seed), ComputerPlayer::seeded(2 * seed + 1)];
        let [human, computer] = &mut players;

        let mut transcript = Vec::new();
        let end = game.run(human, computer, &mut transcript)?;

        match end {
            GameEnd::Completed(score) => {
                let points = score.total_points();
                println!(
                    "game {seed}: {} vs. {} points ({} vs. {} cards)",
                    points.0, points.1, score.cards_won.0, score.cards_won.1
                );
                totals.0 += points.0;
                totals.1 += points.1;
            }
            other => println!("game {seed}: ended early ({other:?})"),
        }
    }

    println!("Scores: {} vs. {}", totals.0, totals.1);
    Ok(())
}
