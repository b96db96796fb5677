//! Chairs in a circle.
//!
//! # Rules
//! A ring of chairs, by default 14 of them, starts out empty.
//! The players take turns seating one of their own people on an empty chair,
//! but nobody may be seated directly next to a person of the opponent.
//! The player that seats the last person wins, or equivalently, the player that cannot move loses.
//!
//! The number of chairs is a const generic parameter, [DefaultChairBoard] is the standard 14 chair game.
use std::fmt::{Display, Formatter};
use std::iter::Map;
use std::ops::Range;
use std::str::FromStr;

use internal_iterator::{Internal, IteratorExt};
use nom::Finish;

use crate::position::{BruteforceMoveIterator, Identity, Operator, PlayError, Position, PositionMoves};

pub const DEFAULT_CHAIRS: usize = 14;

pub type DefaultChairBoard = ChairBoard<DEFAULT_CHAIRS>;

#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct ChairBoard<const N: usize> {
    chairs: [Identity; N],
    next_player: Identity,
}

/// Seat the player to move on the chair with the given zero-based index.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Sit(usize);

#[derive(Debug, Clone, Eq, PartialEq, thiserror::Error)]
#[error("invalid chair notation {notation:?}: {reason}")]
pub struct InvalidNotation {
    pub notation: String,
    pub reason: &'static str,
}

impl Sit {
    pub fn new(index: usize) -> Self {
        Sit(index)
    }

    pub fn index(self) -> usize {
        self.0
    }
}

impl<const N: usize> Default for ChairBoard<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> ChairBoard<N> {
    /// An empty ring with [Identity::First] to move.
    pub fn new() -> Self {
        assert!(N >= 3, "a ring needs at least 3 chairs, got {}", N);
        ChairBoard {
            chairs: [Identity::None; N],
            next_player: Identity::First,
        }
    }

    pub fn cells(&self) -> &[Identity; N] {
        &self.chairs
    }

    pub fn cell(&self, i: usize) -> Identity {
        self.chairs[i]
    }

    pub fn left(&self, i: usize) -> Identity {
        self.chairs[(i + N - 1) % N]
    }

    pub fn right(&self, i: usize) -> Identity {
        self.chairs[(i + 1) % N]
    }

    pub fn second_left(&self, i: usize) -> Identity {
        self.chairs[(i + N - 2) % N]
    }

    pub fn second_right(&self, i: usize) -> Identity {
        self.chairs[(i + 2) % N]
    }

    /// Parse a position from its notation: one char per chair (`a`, `b` or `.`),
    /// a space and the player to move (`a` or `b`), for example `"a...b.. b"` for 7 chairs.
    ///
    /// The position does not need to be reachable from the empty ring.
    pub fn from_notation(notation: &str) -> Result<Self, InvalidNotation> {
        let err = |reason| InvalidNotation {
            notation: notation.to_owned(),
            reason,
        };

        let (_, (cells, next_player)) = parse::notation(notation)
            .finish()
            .map_err(|_| err("expected chairs 'a', 'b' or '.', a space and the player to move"))?;

        if cells.len() != N {
            return Err(err("wrong number of chairs"));
        }

        let mut chairs = [Identity::None; N];
        chairs.copy_from_slice(&cells);
        Ok(ChairBoard { chairs, next_player })
    }

    pub fn to_notation(&self) -> String {
        let chairs: String = self.chairs.iter().map(|&c| notation_char(c)).collect();
        format!("{} {}", chairs, notation_char(self.next_player))
    }
}

fn notation_char(identity: Identity) -> char {
    match identity {
        Identity::First => 'a',
        Identity::Second => 'b',
        Identity::None => '.',
    }
}

mod parse {
    use nom::character::complete::{char, one_of};
    use nom::combinator::{eof, map};
    use nom::multi::many1;
    use nom::sequence::{separated_pair, terminated};
    use nom::IResult;

    use crate::position::Identity;

    fn chair(input: &str) -> IResult<&str, Identity> {
        map(one_of("ab."), |c| match c {
            'a' => Identity::First,
            'b' => Identity::Second,
            _ => Identity::None,
        })(input)
    }

    fn player(input: &str) -> IResult<&str, Identity> {
        map(one_of("ab"), |c| match c {
            'a' => Identity::First,
            _ => Identity::Second,
        })(input)
    }

    pub(super) fn notation(input: &str) -> IResult<&str, (Vec<Identity>, Identity)> {
        terminated(separated_pair(many1(chair), char(' '), player), eof)(input)
    }
}

impl<const N: usize> FromStr for ChairBoard<N> {
    type Err = InvalidNotation;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ChairBoard::from_notation(s)
    }
}

impl<const N: usize> Position for ChairBoard<N> {
    type Move = Sit;

    fn next_player(&self) -> Identity {
        self.next_player
    }

    fn is_applicable(&self, mv: Sit) -> bool {
        let i = mv.0;
        if i >= N || self.chairs[i] != Identity::None {
            return false;
        }

        let opponent = self.next_player.opponent();
        self.left(i) != opponent && self.right(i) != opponent
    }

    fn apply(&mut self, mv: Sit) -> Result<(), PlayError> {
        if !self.is_applicable(mv) {
            return Err(self.unavailable_error());
        }

        self.chairs[mv.0] = self.next_player;
        self.next_player = self.next_player.opponent();
        Ok(())
    }

    fn is_terminal(&self) -> bool {
        !(0..N).any(|i| self.is_applicable(Sit(i)))
    }
}

impl<'a, const N: usize> PositionMoves<'a, ChairBoard<N>> for ChairBoard<N> {
    type AllMovesIterator = Internal<Map<Range<usize>, fn(usize) -> Sit>>;
    type OperatorsIterator = BruteforceMoveIterator<'a, ChairBoard<N>>;

    fn all_possible_moves() -> Self::AllMovesIterator {
        let f: fn(usize) -> Sit = Sit;
        (0..N).map(f).into_internal()
    }

    fn operators(&'a self) -> Self::OperatorsIterator {
        BruteforceMoveIterator::new(self)
    }
}

impl<const N: usize> Operator<ChairBoard<N>> for Sit {
    fn is_applicable_to(&self, position: &ChairBoard<N>) -> bool {
        position.is_applicable(*self)
    }

    fn apply_to(&self, position: &ChairBoard<N>) -> Result<ChairBoard<N>, PlayError> {
        position.clone_and_apply(*self)
    }
}

/// Chairs are displayed one-based, the way players refer to them.
impl Display for Sit {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0 + 1)
    }
}

impl<const N: usize> Display for ChairBoard<N> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for (i, chair) in self.chairs.iter().enumerate() {
            writeln!(f, "{:>2}: {}", i + 1, chair.to_char())?;
        }
        write!(f, "next: {}", self.next_player.to_char())
    }
}
