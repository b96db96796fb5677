//! Playing the chair game from a text console.
use std::fmt::{Debug, Formatter};
use std::io::{BufRead, Write};

use crate::ai::minimax::SearchError;
use crate::ai::{Bot, SelectError};
use crate::games::chairs::{ChairBoard, Sit};
use crate::position::{Identity, Position};

/// The rules of the game on a ring of `chairs` chairs, as shown to a human player.
pub fn rules(chairs: usize) -> String {
    format!(
        "\
Rules:
There are {} chairs positioned in a circle. One player seats A people on the chairs,
the other seats B people. The players take turns, however an A and a B may never
be seated right next to each other. The player who seats the last person wins the game.
Chairs are numbered from 1 to {}.",
        chairs, chairs
    )
}

/// Interactive player that reads one-based chair numbers, one per line, from `input`.
///
/// Prompts are written to `output`. Unparsable or illegal input is reported as a
/// recoverable [SelectError], the end of `input` as `Ok(None)`.
pub struct ConsolePlayer<R, W> {
    name: String,
    identity: Identity,
    input: R,
    output: W,
}

impl<R, W> Debug for ConsolePlayer<R, W> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "ConsolePlayer {{ name: {:?}, identity: {:?} }}", self.name, self.identity)
    }
}

impl<R: BufRead, W: Write> ConsolePlayer<R, W> {
    pub fn new(name: impl Into<String>, identity: Identity, input: R, output: W) -> Self {
        ConsolePlayer {
            name: name.into(),
            identity,
            input,
            output,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn identity(&self) -> Identity {
        self.identity
    }

    pub fn into_inner(self) -> (R, W) {
        (self.input, self.output)
    }
}

impl<const N: usize, R: BufRead, W: Write> Bot<ChairBoard<N>> for ConsolePlayer<R, W> {
    fn select_move(&mut self, position: &ChairBoard<N>) -> Result<Option<Sit>, SelectError> {
        if position.next_player() != self.identity {
            return Err(SearchError::NotOwnTurn {
                expected: self.identity,
                actual: position.next_player(),
            }
            .into());
        }
        if position.is_terminal() {
            return Err(SearchError::Terminal.into());
        }

        write!(self.output, "{}'s turn: ", self.name)?;
        self.output.flush()?;

        // bytes that are not utf-8 are bad input like any other, not an io failure
        let mut bytes = vec![];
        if self.input.read_until(b'\n', &mut bytes)? == 0 {
            return Ok(None);
        }
        let line = String::from_utf8_lossy(&bytes);
        let line = line.trim();

        let chair: usize = line
            .parse()
            .map_err(|_| SelectError::InvalidInput(line.to_owned()))?;
        if !(1..=N).contains(&chair) {
            return Err(SelectError::InvalidInput(line.to_owned()));
        }

        let mv = Sit::new(chair - 1);
        if !position.is_applicable(mv) {
            return Err(SelectError::UnavailableMove(mv.to_string()));
        }
        Ok(Some(mv))
    }

    fn is_interactive(&self) -> bool {
        true
    }
}
