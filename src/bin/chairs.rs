use std::io::{self, BufRead};
use std::sync::Mutex;

use clap::Parser;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoroshiro64StarStar;
use tracing::info;
use tracing_subscriber::EnvFilter;

use chair_game::ai::minimax::MiniMaxBot;
use chair_game::ai::simple::RandomBot;
use chair_game::ai::{Bot, SelectError};
use chair_game::console::{rules, ConsolePlayer};
use chair_game::games::chairs::{DefaultChairBoard, Sit, DEFAULT_CHAIRS};
use chair_game::heuristic::chairs::OpenChairsHeuristic;
use chair_game::position::Identity;
use chair_game::util::board_gen::random_position_with_moves;
use chair_game::util::bot_game::{play_game, run, GameObserver};
use chair_game::util::tiny::seeded_rng;

const DEFAULT_NAME: &str = "Player";
const COMPUTER_NAME: &str = "Computer";

// a 14 chair game can always last at least this long
const MAX_RANDOM_MOVES: u32 = 6;

#[derive(Parser, Debug)]
#[command(name = "chairs")]
#[command(about = "Chairs in a circle against a minimax computer player", long_about = None)]
struct Args {
    /// Search depth of the computer player.
    #[arg(long, default_value_t = 5)]
    depth: u32,

    /// Name of the human player, asked for when not given.
    #[arg(long)]
    name: Option<String>,

    /// Let the computer make the first move.
    #[arg(long)]
    computer_first: bool,

    /// Play this many games between bots instead of an interactive game.
    #[arg(long)]
    self_play: Option<u32>,

    /// Search depth of the second bot during self-play, a random bot is used if not given.
    #[arg(long)]
    opponent_depth: Option<u32>,

    /// Number of random moves played before each self-play game starts.
    #[arg(long, default_value_t = 0)]
    random_moves: u32,

    /// Search the moves of the root position in parallel.
    #[arg(long)]
    parallel: bool,

    #[arg(long)]
    seed: Option<u64>,

    #[arg(long, default_value = "warn")]
    log_level: String,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level)))
        .with_writer(io::stderr)
        .init();

    match args.self_play {
        Some(games) => self_play(&args, games),
        None => interactive(&args),
    }
}

fn interactive(args: &Args) -> anyhow::Result<()> {
    println!("{}", rules(DEFAULT_CHAIRS));
    println!();

    let name = match &args.name {
        Some(name) => name.clone(),
        None => ask_name(&mut io::stdin().lock())?,
    };

    let human_identity = if args.computer_first {
        Identity::Second
    } else {
        Identity::First
    };
    let mut human = ConsolePlayer::new(name.clone(), human_identity, io::stdin().lock(), io::stdout());
    let mut computer: MiniMaxBot<DefaultChairBoard, _> =
        MiniMaxBot::new(human_identity.opponent(), args.depth, OpenChairsHeuristic).with_parallel(args.parallel);
    info!(?computer, "starting interactive game");

    let mut observer = ConsoleObserver {
        human_identity,
        human_name: name,
    };

    let start = DefaultChairBoard::default();
    println!("{}", start);

    let replay = if args.computer_first {
        play_game(&start, &mut computer, &mut human, &mut observer)?
    } else {
        play_game(&start, &mut human, &mut computer, &mut observer)?
    };

    match replay.winner {
        Some(Identity::None) => println!("Draw"),
        Some(winner) => println!("{} won!", observer.name(winner)),
        None => println!("Game aborted"),
    }
    Ok(())
}

fn ask_name(input: &mut impl BufRead) -> io::Result<String> {
    println!("Please enter your name: ");
    let mut line = String::new();
    input.read_line(&mut line)?;

    let name = line.trim();
    if name.is_empty() {
        Ok(DEFAULT_NAME.to_owned())
    } else {
        Ok(name.to_owned())
    }
}

struct ConsoleObserver {
    human_identity: Identity,
    human_name: String,
}

impl ConsoleObserver {
    fn name(&self, player: Identity) -> &str {
        if player == self.human_identity {
            &self.human_name
        } else {
            COMPUTER_NAME
        }
    }
}

impl GameObserver<DefaultChairBoard> for ConsoleObserver {
    fn moved(&mut self, position: &DefaultChairBoard, player: Identity, mv: Sit) {
        println!("{} sat on chair {}", self.name(player), mv);
        println!();
        println!("{}", position);
    }

    fn rejected(&mut self, _: Identity, error: &SelectError) {
        println!("{}, try again", error);
    }
}

fn self_play(args: &Args, games: u32) -> anyhow::Result<()> {
    anyhow::ensure!(
        args.random_moves <= MAX_RANDOM_MOVES,
        "at most {} random moves are supported, got {}",
        MAX_RANDOM_MOVES,
        args.random_moves
    );

    let rng = match args.seed {
        Some(seed) => seeded_rng(seed),
        None => Xoroshiro64StarStar::from_entropy(),
    };
    let rng = Mutex::new(rng);

    match args.opponent_depth {
        Some(opponent_depth) => {
            let parallel = args.parallel;
            self_play_against(args, games, &rng, |player| {
                MiniMaxBot::<DefaultChairBoard, _>::new(player, opponent_depth, OpenChairsHeuristic).with_parallel(parallel)
            })
        }
        None => self_play_against(args, games, &rng, |_| {
            let seed = rng.lock().unwrap_or_else(|e| e.into_inner()).gen();
            RandomBot::new(SmallRng::seed_from_u64(seed))
        }),
    }
}

fn self_play_against<R: Bot<DefaultChairBoard>>(
    args: &Args,
    games: u32,
    rng: &Mutex<Xoroshiro64StarStar>,
    opponent: impl Fn(Identity) -> R + Sync,
) -> anyhow::Result<()> {
    let depth = args.depth;
    let parallel = args.parallel;
    let random_moves = args.random_moves;

    let start = || {
        let mut rng = rng.lock().unwrap_or_else(|e| e.into_inner());
        random_position_with_moves(&DefaultChairBoard::default(), random_moves, &mut *rng)
    };

    let result = run(
        start,
        |player| MiniMaxBot::<DefaultChairBoard, _>::new(player, depth, OpenChairsHeuristic).with_parallel(parallel),
        opponent,
        games,
        true,
        |tally, replay| info!(?tally, moves = replay.moves.len(), "finished game"),
    )?;

    println!("{:?}", result);
    Ok(())
}
