use std::fmt::Debug;

use crate::ai::minimax::SearchError;
use crate::position::Position;

pub mod minimax;
pub mod simple;

/// Error returned by [Bot::select_move].
#[derive(Debug, thiserror::Error)]
pub enum SelectError {
    /// The bot was asked for a move it cannot give: terminal position, wrong turn, invalid settings.
    #[error("illegal move request: {0}")]
    Illegal(#[from] SearchError),

    #[error("invalid move {0:?}")]
    InvalidInput(String),

    #[error("move {0} is not available")]
    UnavailableMove(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl SelectError {
    /// Whether asking again can give a different result, which is only the case for bad external input.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, SelectError::InvalidInput(_) | SelectError::UnavailableMove(_))
    }
}

/// A player: something that picks moves for a position.
pub trait Bot<P: Position>: Debug {
    /// Pick a move to play on `position` for its next player.
    ///
    /// Returns `Ok(None)` if the bot has no move to offer, for example because its input ended.
    /// `self` is mutable to allow for random state and input streams.
    fn select_move(&mut self, position: &P) -> Result<Option<P::Move>, SelectError>;

    /// Whether this bot waits for external input, as opposed to computing its moves.
    /// Errors from interactive bots that are [recoverable](SelectError::is_recoverable) are retried.
    fn is_interactive(&self) -> bool {
        false
    }
}
