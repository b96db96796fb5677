use std::cmp::{max, min};
use std::fmt::{Debug, Formatter};
use std::marker::PhantomData;

use internal_iterator::InternalIterator;
use rayon::prelude::*;
use tracing::{debug, trace};

use crate::ai::{Bot, SelectError};
use crate::position::{Identity, Position};

/// The value of a terminal position won by the searching player.
pub const WIN_SCORE: i32 = i32::MAX - 1;

/// The value of a terminal position lost by the searching player.
pub const LOSS_SCORE: i32 = i32::MIN + 1;

pub trait Heuristic<P: Position> {
    /// Return the heuristic value of the non-terminal `position` from the POV of `player`.
    /// Larger is better for `player`.
    ///
    /// Values must stay strictly between [LOSS_SCORE] and [WIN_SCORE].
    fn value(&self, position: &P, player: Identity) -> i32;
}

impl<P: Position, F: Fn(&P, Identity) -> i32> Heuristic<P> for F {
    fn value(&self, position: &P, player: Identity) -> i32 {
        self(position, player)
    }
}

/// A search was started that cannot produce a move.
#[derive(Debug, Copy, Clone, Eq, PartialEq, thiserror::Error)]
pub enum SearchError {
    #[error("the position is terminal")]
    Terminal,
    #[error("it is the turn of {actual:?}, not {expected:?}")]
    NotOwnTurn { expected: Identity, actual: Identity },
    #[error("the search depth must be at least 1")]
    ZeroDepth,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct MinimaxResult<M> {
    /// The value of the position for the searching player.
    pub value: i32,

    /// The best move to play, only `None` if there were no moves at all.
    pub best_move: Option<M>,
}

/// Evaluate the position using plain minimax with the given heuristic up to the given depth,
/// for `player` who must be the next player. Return both the value and the best move.
///
/// If multiple moves have the same value the first one in `operators` order is picked,
/// so the result is deterministic.
pub fn minimax<P: Position, H: Heuristic<P>>(
    position: &P,
    heuristic: &H,
    depth: u32,
    player: Identity,
) -> Result<MinimaxResult<P::Move>, SearchError> {
    check_search(position, depth, player)?;

    let mut selector = FirstBestSelector::new();
    position.operators().for_each(|mv: P::Move| {
        let value = minimax_value(&child(position, mv), heuristic, depth - 1, player);
        trace!(%mv, value, "scored root move");
        selector.offer(mv, value);
    });

    let result = selector.finish();
    debug!(depth, ?player, value = result.value, best_move = ?result.best_move, "minimax finished");
    Ok(result)
}

/// The same as [minimax], except that the children of the root are searched in parallel.
/// The result is always identical to the one returned by [minimax].
pub fn minimax_parallel<P: Position, H: Heuristic<P> + Sync>(
    position: &P,
    heuristic: &H,
    depth: u32,
    player: Identity,
) -> Result<MinimaxResult<P::Move>, SearchError> {
    check_search(position, depth, player)?;

    let moves: Vec<P::Move> = position.operators().collect();
    let values: Vec<i32> = moves
        .par_iter()
        .map(|&mv| minimax_value(&child(position, mv), heuristic, depth - 1, player))
        .collect();

    let mut selector = FirstBestSelector::new();
    for (&mv, &value) in moves.iter().zip(&values) {
        trace!(%mv, value, "scored root move");
        selector.offer(mv, value);
    }

    let result = selector.finish();
    debug!(depth, ?player, value = result.value, best_move = ?result.best_move, "parallel minimax finished");
    Ok(result)
}

/// The minimax value of `position` for `player` searched up to `depth` moves deep.
///
/// Terminal positions are worth [WIN_SCORE], [LOSS_SCORE] or zero for a draw, whatever the depth.
/// Otherwise the heuristic is used once `depth` reaches zero.
pub fn minimax_value<P: Position, H: Heuristic<P>>(position: &P, heuristic: &H, depth: u32, player: Identity) -> i32 {
    if position.is_terminal() {
        let winner = position.winner();
        return if winner == Identity::None {
            0
        } else if winner == player {
            WIN_SCORE
        } else {
            LOSS_SCORE
        };
    }

    if depth == 0 {
        return heuristic.value(position, player);
    }

    let maximize = position.next_player() == player;
    let mut best = if maximize { i32::MIN } else { i32::MAX };

    position.operators().for_each(|mv: P::Move| {
        let value = minimax_value(&child(position, mv), heuristic, depth - 1, player);
        best = if maximize { max(best, value) } else { min(best, value) };
    });

    best
}

fn check_search<P: Position>(position: &P, depth: u32, player: Identity) -> Result<(), SearchError> {
    if position.is_terminal() {
        return Err(SearchError::Terminal);
    }
    if position.next_player() != player {
        return Err(SearchError::NotOwnTurn {
            expected: player,
            actual: position.next_player(),
        });
    }
    if depth == 0 {
        return Err(SearchError::ZeroDepth);
    }
    Ok(())
}

/// Apply a move taken from `position.operators()` to a clone of `position`.
fn child<P: Position>(position: &P, mv: P::Move) -> P {
    let mut child = position.clone();
    let applied = child.apply(mv);
    debug_assert!(applied.is_ok(), "operator {} not applicable to {:?}", mv, position);
    child
}

/// Keeps the first move with the strictly highest value.
struct FirstBestSelector<M> {
    value: i32,
    best_move: Option<M>,
}

impl<M> FirstBestSelector<M> {
    fn new() -> Self {
        FirstBestSelector {
            value: i32::MIN,
            best_move: None,
        }
    }

    fn offer(&mut self, mv: M, value: i32) {
        if value > self.value {
            self.value = value;
            self.best_move = Some(mv);
        }
    }

    fn finish(self) -> MinimaxResult<M> {
        MinimaxResult {
            value: self.value,
            best_move: self.best_move,
        }
    }
}

/// The computer player: picks moves for a fixed player using [minimax].
pub struct MiniMaxBot<P: Position, H: Heuristic<P>> {
    player: Identity,
    depth: u32,
    heuristic: H,
    parallel: bool,
    ph: PhantomData<P>,
}

impl<P: Position, H: Heuristic<P> + Debug> Debug for MiniMaxBot<P, H> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "MiniMaxBot {{ player: {:?}, depth: {}, heuristic: {:?}, parallel: {} }}",
            self.player, self.depth, self.heuristic, self.parallel
        )
    }
}

impl<P: Position, H: Heuristic<P>> MiniMaxBot<P, H> {
    /// A depth of zero is accepted here, but every search will fail with [SearchError::ZeroDepth].
    pub fn new(player: Identity, depth: u32, heuristic: H) -> Self {
        MiniMaxBot {
            player,
            depth,
            heuristic,
            parallel: false,
            ph: PhantomData,
        }
    }

    /// Search the children of the root in parallel, see [minimax_parallel].
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn player(&self) -> Identity {
        self.player
    }

    pub fn depth(&self) -> u32 {
        self.depth
    }

    pub fn set_depth(&mut self, depth: u32) {
        self.depth = depth;
    }

    pub fn heuristic(&self) -> &H {
        &self.heuristic
    }

    pub fn set_heuristic(&mut self, heuristic: H) {
        self.heuristic = heuristic;
    }
}

impl<P: Position, H: Heuristic<P> + Debug + Sync> Bot<P> for MiniMaxBot<P, H> {
    fn select_move(&mut self, position: &P) -> Result<Option<P::Move>, SelectError> {
        let result = if self.parallel {
            minimax_parallel(position, &self.heuristic, self.depth, self.player)?
        } else {
            minimax(position, &self.heuristic, self.depth, self.player)?
        };
        Ok(result.best_move)
    }
}
