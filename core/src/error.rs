use thiserror::Error;

use crate::Side;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum JumpError {
    #[error("Board size {0} is not supported")]
    InvalidSize(usize),
    #[error("Invalid square")]
    InvalidSquare,
    #[error("Illegal move by {side} at square {square}")]
    IllegalMove { side: Side, square: usize },
    #[error("Game already won, no new moves are accepted")]
    GameOver,
    #[error("Cannot search: {0}")]
    SearchPrecondition(Precondition),
}

/// Reason a search refused to start.
#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum Precondition {
    #[error("game already won")]
    AlreadyWon,
    #[error("searching side is not on move")]
    WrongSide,
    #[error("depth must be at least one")]
    ZeroDepth,
}

pub type Result<T> = core::result::Result<T, JumpError>;
