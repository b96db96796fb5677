//! Utilities to generate a `Position` in a random state.
use rand::Rng;

use crate::position::{Identity, PlayError, Position, TerminalPosition};

/// Apply the given moves, starting from `start`.
pub fn position_with_moves<P: Position>(start: P, moves: &[P::Move]) -> Result<P, PlayError> {
    let mut curr = start;
    for &mv in moves {
        curr.apply(mv)?;
    }
    Ok(curr)
}

/// Generate a `Position` by applying `n` random moves to `start`.
/// Games that end before `n` moves are thrown away and started again, so `start` must allow for `n` moves.
pub fn random_position_with_moves<P: Position>(start: &P, n: u32, rng: &mut impl Rng) -> P {
    'new_try: loop {
        let mut position = start.clone();
        for _ in 0..n {
            match position.apply_random_operator(rng) {
                Ok(()) => {}
                Err(TerminalPosition) => continue 'new_try,
            }
        }
        return position;
    }
}

/// Generate a random terminal `Position` won by `winner`.
pub fn random_position_with_winner<P: Position>(start: &P, winner: Identity, rng: &mut impl Rng) -> P {
    loop {
        let mut position = start.clone();
        while position.apply_random_operator(rng).is_ok() {}
        if position.winner() == winner {
            return position;
        }
    }
}

/// Generate a `Position` by applying random moves until `cond(&position)` returns true.
pub fn random_position_with_condition<P: Position>(start: &P, rng: &mut impl Rng, mut cond: impl FnMut(&P) -> bool) -> P {
    if cond(start) {
        return start.clone();
    }
    assert!(
        !start.is_terminal(),
        "Start position is terminal and does not match condition, so we won't find anything that does"
    );

    loop {
        let mut position = start.clone();
        while let Ok(()) = position.apply_random_operator(rng) {
            if cond(&position) {
                return position;
            }
        }
    }
}

/// Iterator over randomly generated positions.
/// Yields all intermediate positions, including the start and end of each simulated game.
#[derive(Debug, Clone)]
pub struct RandomPositionIterator<P: Position, R: Rng> {
    start: P,
    rng: R,
    curr: P,
}

impl<P: Position, R: Rng> RandomPositionIterator<P, R> {
    pub fn new(start: P, rng: R) -> Result<Self, TerminalPosition> {
        if start.is_terminal() {
            return Err(TerminalPosition);
        }
        Ok(RandomPositionIterator {
            start: start.clone(),
            rng,
            curr: start,
        })
    }
}

impl<P: Position, R: Rng> Iterator for RandomPositionIterator<P, R> {
    type Item = P;

    fn next(&mut self) -> Option<Self::Item> {
        let result = self.curr.clone();

        match self.curr.apply_random_operator(&mut self.rng) {
            Ok(()) => {}
            Err(TerminalPosition) => {
                self.curr = self.start.clone();
            }
        }

        Some(result)
    }
}
