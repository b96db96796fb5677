//! A simple baseline bot: `RandomBot`.
use std::fmt::{Debug, Formatter};

use rand::Rng;

use crate::ai::minimax::SearchError;
use crate::ai::{Bot, SelectError};
use crate::position::Position;

/// Bot that chooses moves randomly uniformly among the operators.
pub struct RandomBot<R: Rng> {
    rng: R,
}

impl<R: Rng> Debug for RandomBot<R> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "RandomBot")
    }
}

impl<R: Rng> RandomBot<R> {
    pub fn new(rng: R) -> Self {
        RandomBot { rng }
    }
}

impl<P: Position, R: Rng> Bot<P> for RandomBot<R> {
    fn select_move(&mut self, position: &P) -> Result<Option<P::Move>, SelectError> {
        match position.random_operator(&mut self.rng) {
            Ok(mv) => Ok(Some(mv)),
            Err(_) => Err(SearchError::Terminal.into()),
        }
    }
}
