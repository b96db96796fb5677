//! Dummy game useful for testing search algorithms.
//!
//! It is simply an explicit tree that leads to different winners.
//!
//! # Example
//!
//! ```
//! use chair_game::games::dummy::DummyGame;
//! use chair_game::position::{Identity, Position};
//!
//! let game: DummyGame = "A".parse().unwrap();
//! assert_eq!(game.outcome(), Some(Identity::First));
//! let game: DummyGame = "B".parse().unwrap();
//! assert_eq!(game.outcome(), Some(Identity::Second));
//! let game: DummyGame = "=".parse().unwrap();
//! assert_eq!(game.outcome(), Some(Identity::None));
//!
//! let game: DummyGame = "(AA(BB)=B)".parse().unwrap();
//! // This position has 5 moves:
//! // * the first two lead to a victory by First
//! // * the third one leads to a position with two moves: both victories by Second
//! // * the fourth move leads to a draw
//! // * the fifth move leads to a victory by Second
//! assert_eq!(game.outcome(), None);
//! ```
use std::fmt;
use std::str::FromStr;

use internal_iterator::{Internal, IteratorExt};
use nom::error::Error;
use nom::Finish;

use crate::position::{Identity, Operator, PlayError, Position, PositionMoves};

mod parse {
    use nom::branch::alt;
    use nom::character::complete::{char, one_of};
    use nom::combinator::{eof, map};
    use nom::multi::many1;
    use nom::sequence::{delimited, terminated};
    use nom::IResult;

    use super::*;

    fn winner(input: &str) -> IResult<&str, Identity> {
        map(one_of("AB="), |c| match c {
            'A' => Identity::First,
            'B' => Identity::Second,
            _ => Identity::None,
        })(input)
    }

    fn node(input: &str) -> IResult<&str, Tree> {
        alt((
            map(winner, Tree::Leaf),
            map(delimited(char('('), many1(node), char(')')), Tree::Node),
        ))(input)
    }

    pub(super) fn tree(input: &str) -> IResult<&str, Tree> {
        terminated(node, eof)(input)
    }
}

impl FromStr for Tree {
    type Err = Error<String>;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match parse::tree(s).finish() {
            Ok((_, tree)) => Ok(tree),
            Err(Error { input, code }) => Err(Error {
                input: input.to_string(),
                code,
            }),
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq, Hash)]
enum Tree {
    Leaf(Identity),
    Node(Vec<Tree>),
}

impl Tree {
    fn choose(&mut self, i: usize) {
        if let Tree::Node(children) = self {
            *self = children.swap_remove(i);
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct DummyGame {
    state: Tree,
    player: Identity,
}

impl FromStr for DummyGame {
    type Err = Error<String>;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(DummyGame {
            state: s.parse()?,
            player: Identity::First,
        })
    }
}

impl fmt::Display for DummyGame {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl Position for DummyGame {
    type Move = usize;

    fn next_player(&self) -> Identity {
        self.player
    }

    fn is_applicable(&self, mv: Self::Move) -> bool {
        if let Tree::Node(children) = &self.state {
            mv < children.len()
        } else {
            false
        }
    }

    fn apply(&mut self, mv: Self::Move) -> Result<(), PlayError> {
        if !self.is_applicable(mv) {
            return Err(self.unavailable_error());
        }

        self.state.choose(mv);
        self.player = self.player.opponent();
        Ok(())
    }

    fn is_terminal(&self) -> bool {
        matches!(self.state, Tree::Leaf(_))
    }

    fn winner(&self) -> Identity {
        match self.state {
            Tree::Leaf(winner) => winner,
            Tree::Node(_) => Identity::None,
        }
    }
}

impl<'a> PositionMoves<'a, DummyGame> for DummyGame {
    type AllMovesIterator = Internal<std::ops::RangeFrom<usize>>;
    type OperatorsIterator = Internal<std::ops::Range<usize>>;

    /// Trees can be arbitrarily wide, so this iterator never ends.
    fn all_possible_moves() -> Self::AllMovesIterator {
        (0..).into_internal()
    }

    fn operators(&'a self) -> Self::OperatorsIterator {
        match &self.state {
            Tree::Node(children) => (0..children.len()).into_internal(),
            Tree::Leaf(_) => (0..0).into_internal(),
        }
    }
}

impl Operator<DummyGame> for usize {
    fn is_applicable_to(&self, position: &DummyGame) -> bool {
        position.is_applicable(*self)
    }

    fn apply_to(&self, position: &DummyGame) -> Result<DummyGame, PlayError> {
        position.clone_and_apply(*self)
    }
}
