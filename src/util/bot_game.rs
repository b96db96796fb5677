//! Drive games between players, and run bots against each other and report the results.
use std::fmt::Write;
use std::fmt::{Debug, Formatter};
use std::sync::Mutex;
use std::time::Instant;

use itertools::Itertools;
use rayon::iter::IntoParallelIterator;
use rayon::iter::ParallelIterator;
use tracing::{info, warn};

use crate::ai::{Bot, SelectError};
use crate::position::{Identity, Position};

/// Callbacks for following a game driven by [play_game].
pub trait GameObserver<P: Position> {
    /// `player` played `mv`, resulting in `position`.
    #[allow(unused_variables)]
    fn moved(&mut self, position: &P, player: Identity, mv: P::Move) {}

    /// An interactive player gave a move that was rejected, it will be asked again.
    #[allow(unused_variables)]
    fn rejected(&mut self, player: Identity, error: &SelectError) {}
}

/// Observer that ignores everything.
impl<P: Position> GameObserver<P> for () {}

/// Play a game from `start` until it is terminal, asking the bot owning the next player for each move.
///
/// Recoverable errors from interactive bots are reported to `observer` and the bot is asked again,
/// any other error ends the game and is returned. A bot that returns no move ends the game without a winner.
pub fn play_game<P: Position, F: Bot<P> + ?Sized, S: Bot<P> + ?Sized>(
    start: &P,
    bot_first: &mut F,
    bot_second: &mut S,
    observer: &mut impl GameObserver<P>,
) -> Result<Replay<P>, SelectError> {
    let mut position = start.clone();
    let mut moves = vec![];
    let mut total_time = [0.0; 2];
    let mut move_count = [0; 2];

    while !position.is_terminal() {
        let player = position.next_player();
        let side = if player == Identity::First { 0 } else { 1 };

        let start_time = Instant::now();
        let mv = if side == 0 {
            ask_move(bot_first, &position, observer)?
        } else {
            ask_move(bot_second, &position, observer)?
        };
        total_time[side] += start_time.elapsed().as_secs_f32();
        move_count[side] += 1;

        let mv = match mv {
            Some(mv) => mv,
            None => {
                info!(?player, "no move given, stopping the game");
                break;
            }
        };

        // bots are not trusted to only return applicable moves
        if position.apply(mv).is_err() {
            return Err(SelectError::UnavailableMove(mv.to_string()));
        }
        info!(?player, %mv, "applied move");
        moves.push(mv);
        observer.moved(&position, player, mv);
    }

    let winner = position.outcome();
    info!(?winner, moves = moves.len(), "game finished");

    Ok(Replay {
        start: start.clone(),
        moves,
        end: position,
        winner,
        total_time_first: total_time[0],
        total_time_second: total_time[1],
        move_count_first: move_count[0],
        move_count_second: move_count[1],
    })
}

fn ask_move<P: Position, B: Bot<P> + ?Sized>(
    bot: &mut B,
    position: &P,
    observer: &mut impl GameObserver<P>,
) -> Result<Option<P::Move>, SelectError> {
    loop {
        match bot.select_move(position) {
            Ok(mv) => return Ok(mv),
            Err(e) if bot.is_interactive() && e.is_recoverable() => {
                let player = position.next_player();
                warn!(?player, error = %e, "move rejected");
                observer.rejected(player, &e);
            }
            Err(e) => return Err(e),
        }
    }
}

/// Run `bot_l` against `bot_r` on positions generated by `start`.
///
/// `games_per_side` games are run, except if `both_sides` is true, in
/// which case a match consists of two games per start position where players switch sides.
/// The bot constructors receive the player they will be playing as.
///
/// `callback` is called after every finished game with the running totals.
pub fn run<P: Position, L: Bot<P>, R: Bot<P>>(
    start: impl Fn() -> P + Sync,
    bot_l: impl Fn(Identity) -> L + Sync,
    bot_r: impl Fn(Identity) -> R + Sync,
    games_per_side: u32,
    both_sides: bool,
    callback: impl Fn(Tally, &Replay<P>) + Sync,
) -> Result<BotGameResult<P>, SelectError> {
    let callback = &callback;

    // this instantiates both at least once so we catch errors before starting a bunch of threads
    let debug_l = debug_to_string(&bot_l(Identity::First));
    let debug_r = debug_to_string(&bot_r(Identity::Second));

    let game_count = if both_sides { 2 * games_per_side } else { games_per_side };
    let starts = (0..games_per_side).map(|_| start()).collect_vec();

    let partial_tally = Mutex::new(Tally::default());

    let replays: Vec<MatchReplay<P>> = (0..game_count)
        .into_par_iter()
        .panic_fuse()
        .map(|game_i| -> Result<MatchReplay<P>, SelectError> {
            let flip = if both_sides { game_i % 2 == 1 } else { false };
            let pair_i = if both_sides { game_i / 2 } else { game_i };
            let start = &starts[pair_i as usize];

            let player_l = if flip {
                start.next_player().opponent()
            } else {
                start.next_player()
            };
            let mut l = bot_l(player_l);
            let mut r = bot_r(player_l.opponent());

            let replay = if player_l == Identity::First {
                play_game(start, &mut l, &mut r, &mut ())?
            } else {
                play_game(start, &mut r, &mut l, &mut ())?
            };

            let mut partial_tally = partial_tally.lock().unwrap_or_else(|e| e.into_inner());
            partial_tally.add(replay.winner, player_l);
            callback(*partial_tally, &replay);

            Ok(MatchReplay { replay, player_l })
        })
        .collect::<Result<_, SelectError>>()?;

    let mut tally = Tally::default();
    let mut total_time_l = 0.0;
    let mut total_time_r = 0.0;
    let mut move_count_l = 0;
    let mut move_count_r = 0;

    for MatchReplay { replay, player_l } in &replays {
        tally.add(replay.winner, *player_l);
        let (time_l, time_r, count_l, count_r) = if *player_l == Identity::First {
            (replay.total_time_first, replay.total_time_second, replay.move_count_first, replay.move_count_second)
        } else {
            (replay.total_time_second, replay.total_time_first, replay.move_count_second, replay.move_count_first)
        };
        total_time_l += time_l;
        total_time_r += time_r;
        move_count_l += count_l;
        move_count_r += count_r;
    }

    Ok(BotGameResult {
        game_count,
        average_game_length: replays.iter().map(|r| r.replay.moves.len() as f32).sum::<f32>() / game_count as f32,
        tally,
        time_l: total_time_l / move_count_l.max(1) as f32,
        time_r: total_time_r / move_count_r.max(1) as f32,
        debug_l,
        debug_r,
        replays: replays.into_iter().map(|r| r.replay).collect(),
    })
}

#[derive(Debug, Clone)]
pub struct Replay<P: Position> {
    pub start: P,
    pub moves: Vec<P::Move>,
    pub end: P,

    /// The winner, `None` if the game was stopped before it ended.
    pub winner: Option<Identity>,

    pub total_time_first: f32,
    pub total_time_second: f32,
    pub move_count_first: u32,
    pub move_count_second: u32,
}

struct MatchReplay<P: Position> {
    replay: Replay<P>,
    player_l: Identity,
}

/// Game results from the POV of the left bot.
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq)]
pub struct Tally {
    pub wins: u32,
    pub draws: u32,
    pub losses: u32,
    pub unfinished: u32,
}

impl Tally {
    pub fn add(&mut self, winner: Option<Identity>, player_l: Identity) {
        match winner {
            None => self.unfinished += 1,
            Some(Identity::None) => self.draws += 1,
            Some(winner) if winner == player_l => self.wins += 1,
            Some(_) => self.losses += 1,
        }
    }

    pub fn total(&self) -> u32 {
        self.wins + self.draws + self.losses + self.unfinished
    }
}

/// Structure returned by the function [`run`].
pub struct BotGameResult<P: Position> {
    pub game_count: u32,
    pub replays: Vec<Replay<P>>,

    pub average_game_length: f32,
    pub tally: Tally,

    //time per move in seconds
    pub time_l: f32,
    pub time_r: f32,

    pub debug_l: String,
    pub debug_r: String,
}

impl<P: Position> Debug for BotGameResult<P> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "BotGameResult {{")?;
        writeln!(
            f,
            "  {} games, average length {}",
            self.game_count, self.average_game_length
        )?;
        writeln!(f, "  left      {:?}", self.tally)?;
        writeln!(
            f,
            "  left      win rate {:.3}",
            self.tally.wins as f32 / self.game_count as f32
        )?;
        writeln!(f, "  time_l:   {:.4}, time_r: {:.4}", self.time_l, self.time_r)?;
        writeln!(f, "  left:     {}", self.debug_l)?;
        writeln!(f, "  right:    {}", self.debug_r)?;
        writeln!(f, "}}")?;

        Ok(())
    }
}

fn debug_to_string(d: &impl Debug) -> String {
    let mut s = String::new();
    // writing to a String cannot fail
    let _ = write!(&mut s, "{:?}", d);
    s
}
