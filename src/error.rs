use thiserror::Error;

use crate::types::Coord;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("coordinates ({0}, {1}) are outside the board")]
    OutOfBounds(Coord, Coord),
    #[error("defeat not yet acknowledged, no new moves are accepted")]
    AlreadyEnded,
    #[error("no defeat to acknowledge")]
    NotDefeated,
}

pub type Result<T> = core::result::Result<T, GameError>;
