use std::io;

use clap::Parser;
use indigo_game::game::Participant;
use indigo_game::human_player::{ask_play_first, HumanPlayer};
use indigo_game::indigo_ai::ComputerPlayer;
use indigo_game::indigo_game::{GameEnd, IndigoGame};
use tracing::{debug, info};
use tracing_subscriber::filter::{LevelFilter, Targets};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Parser)]
#[command(about = "Play Indigo against the computer")]
struct Args {
    /// RNG seed for the computer's choices
    #[arg(long)]
    seed: Option<u64>,

    /// Let a second computer player take the human's seat
    #[arg(long, default_value_t = false)]
    autoplay: bool,

    /// A log level among "off", "error", "warn", "info", "debug", "trace"
    #[arg(short, long, default_value = "off")]
    log_level: LevelFilter,
}

fn init_logging(level: LevelFilter) {
    let format = tracing_subscriber::fmt::format()
        .with_target(false)
        .compact();

    let filter = Targets::new().with_default(level);

    // stdout belongs to the game
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .event_format(format)
                .with_writer(io::stderr),
        )
        .with(filter)
        .init();
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(args.log_level);

    println!("Indigo Card Game");

    let mut input = io::stdin().lock();
    let mut output = io::stdout();

    let first = if args.autoplay {
        Participant::Human
    } else {
        match ask_play_first(&mut input, &mut output)? {
            Some(first) => first,
            None => return Ok(()),
        }
    };

    let seed = args.seed.unwrap_or_else(rand::random);
    info!(seed, %first, autoplay = args.autoplay, "starting game");

    let mut computer = ComputerPlayer::seeded(seed);
    let mut game = IndigoGame::new(first);
    let end = if args.autoplay {
        let mut stand_in = ComputerPlayer::seeded(seed.wrapping_add(1));
        game.run(&mut stand_in, &mut computer, &mut output)?
    } else {
        let mut human = HumanPlayer::new(input, io::stdout());
        game.run(&mut human, &mut computer, &mut output)?
    };

    match end {
        GameEnd::Completed(score) => debug!(?score, "game completed"),
        GameEnd::Aborted => debug!("game aborted"),
        GameEnd::DeckExhausted => debug!("deck exhausted"),
    }
    Ok(())
}
