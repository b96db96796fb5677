use std::fmt::{Debug, Display};
use std::hash::Hash;
use std::ops::ControlFlow;
use std::panic::{RefUnwindSafe, UnwindSafe};

use internal_iterator::InternalIterator;
use rand::Rng;

/// One of the two players, or neither of them.
///
/// [Identity::None] is used for empty cells and for the winner of a drawn game.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Identity {
    First,
    Second,
    None,
}

/// Error returned when a move is requested from a terminal position.
#[derive(Debug, Copy, Clone, Eq, PartialEq, thiserror::Error)]
#[error("the position is terminal")]
pub struct TerminalPosition;

/// Error returned by [Position::apply]. The position is left unchanged.
#[derive(Debug, Copy, Clone, Eq, PartialEq, thiserror::Error)]
pub enum PlayError {
    #[error("the position is terminal")]
    Terminal,
    #[error("the move is not applicable to this position")]
    UnavailableMove,
}

/// The main trait of this crate. Represents the state of a two player, perfect information game.
///
/// Positions are mutated in place by [Position::apply], so searches explore the future on clones.
/// Each game implementation provides its own constructors for the start position.
pub trait Position:
    'static + Debug + Display + Clone + Eq + Hash + Send + Sync + UnwindSafe + RefUnwindSafe
where
    for<'a> Self: PositionMoves<'a, Self>,
{
    /// The type used to represent moves on this position.
    type Move: Operator<Self> + Debug + Display + Eq + Ord + Hash + Copy + Send + Sync + UnwindSafe + RefUnwindSafe;

    /// Return the player to make the next move.
    /// Once the position is terminal this keeps returning the player that would have been next.
    fn next_player(&self) -> Identity;

    /// Return whether `mv` is legal in this position. Always `false` for terminal positions.
    fn is_applicable(&self, mv: Self::Move) -> bool;

    /// Apply `mv`, modifying this position and passing the turn.
    /// Fails without changing anything if `mv` is not applicable.
    fn apply(&mut self, mv: Self::Move) -> Result<(), PlayError>;

    /// Clone this position, apply `mv` to the clone and return it.
    fn clone_and_apply(&self, mv: Self::Move) -> Result<Self, PlayError> {
        let mut next = self.clone();
        next.apply(mv)?;
        Ok(next)
    }

    /// Whether the game has ended, which is the case exactly when there are no [PositionMoves::operators].
    /// Can be overridden for better performance.
    fn is_terminal(&self) -> bool {
        self.operators().find_map(Some).is_none()
    }

    /// The winner of a terminal position, [Identity::None] for a draw.
    /// The result is meaningless for positions that are not terminal.
    ///
    /// The default implementation is for games where the player that cannot move loses.
    fn winner(&self) -> Identity {
        self.next_player().opponent()
    }

    /// The winner of this position, or `None` if the game has not ended yet.
    fn outcome(&self) -> Option<Identity> {
        if self.is_terminal() {
            Some(self.winner())
        } else {
            None
        }
    }

    /// The error [Position::apply] should return for `mv` if it is not applicable.
    fn unavailable_error(&self) -> PlayError {
        if self.is_terminal() {
            PlayError::Terminal
        } else {
            PlayError::UnavailableMove
        }
    }

    /// Pick a random move from the `operators` with a uniform distribution.
    /// Can be overridden for better performance.
    fn random_operator(&self, rng: &mut impl Rng) -> Result<Self::Move, TerminalPosition> {
        let count = self.operators().count();
        if count == 0 {
            return Err(TerminalPosition);
        }
        let index = rng.gen_range(0..count);
        self.operators().nth(index).ok_or(TerminalPosition)
    }

    /// Apply a random move from the `operators` with a uniform distribution.
    fn apply_random_operator(&mut self, rng: &mut impl Rng) -> Result<(), TerminalPosition> {
        let mv = self.random_operator(rng)?;
        let applied = self.apply(mv);
        debug_assert!(applied.is_ok(), "generated operator {} was not applicable", mv);
        Ok(())
    }
}

/// A helper trait to get the correct lifetimes for [PositionMoves::operators].
/// This is a workaround to get generic associated types, See <https://github.com/rust-lang/rust/issues/44265>.
pub trait PositionMoves<'a, P: Position> {
    type AllMovesIterator: InternalIterator<Item = P::Move>;
    type OperatorsIterator: InternalIterator<Item = P::Move>;

    /// All theoretically possible moves, for any possible position of this game.
    /// Moves returned by `operators` will always be a subset of these moves.
    fn all_possible_moves() -> Self::AllMovesIterator;

    /// Return an iterator over the legal moves, empty exactly when the position is terminal.
    /// The order stays consistent as long as the position is not modified.
    fn operators(&'a self) -> Self::OperatorsIterator;
}

/// The move side of the game abstraction: a value that can be checked against and applied to a position.
pub trait Operator<P>: Copy {
    /// Whether this move is legal in `position`.
    fn is_applicable_to(&self, position: &P) -> bool;

    /// Return the position that results from playing this move on a clone of `position`.
    fn apply_to(&self, position: &P) -> Result<P, PlayError>;
}

impl Identity {
    pub const BOTH: [Identity; 2] = [Identity::First, Identity::Second];

    pub fn opponent(self) -> Identity {
        match self {
            Identity::First => Identity::Second,
            Identity::Second => Identity::First,
            Identity::None => Identity::None,
        }
    }

    /// The signed weight of this identity, used as a cell marker and as an evaluation sign.
    pub fn value(self) -> i32 {
        match self {
            Identity::First => 1,
            Identity::Second => -1,
            Identity::None => 0,
        }
    }

    pub fn is_player(self) -> bool {
        self != Identity::None
    }

    pub fn to_char(self) -> char {
        match self {
            Identity::First => 'A',
            Identity::Second => 'B',
            Identity::None => '_',
        }
    }
}

/// A helper struct that can be used to implement [InternalIterator] for [PositionMoves::operators]
/// based on [PositionMoves::all_possible_moves] and [Position::is_applicable].
/// The moves are yielded in the order of `all_possible_moves`.
#[derive(Debug)]
pub struct BruteforceMoveIterator<'a, P: Position> {
    position: &'a P,
}

impl<'a, P: Position> BruteforceMoveIterator<'a, P> {
    pub fn new(position: &'a P) -> Self {
        BruteforceMoveIterator { position }
    }
}

impl<'a, P: Position> InternalIterator for BruteforceMoveIterator<'a, P> {
    type Item = P::Move;

    fn try_for_each<R, F>(self, mut f: F) -> ControlFlow<R>
    where
        F: FnMut(Self::Item) -> ControlFlow<R>,
    {
        P::all_possible_moves().try_for_each(|mv: P::Move| {
            if self.position.is_applicable(mv) {
                f(mv)
            } else {
                ControlFlow::Continue(())
            }
        })
    }
}
