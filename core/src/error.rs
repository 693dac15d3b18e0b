use thiserror::Error;

use crate::{CellCount, CellIndex, ProtocolError};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Cell index {index} is outside a grid of {cells} cells")]
    OutOfRange { index: CellIndex, cells: CellCount },
    #[error("A list of {len} cells is not a supported square grid")]
    InvalidGridShape { len: usize },
    #[error("Invalid cell value {0}, expected 0 or 1")]
    InvalidCell(u8),
    #[error("Only the leader can start a new game")]
    NotLeader,
    #[error("Persisted state could not be read: {0}")]
    CorruptPersistedState(String),
    #[error(transparent)]
    Protocol(#[from] ProtocolError),
}

pub type Result<T> = core::result::Result<T, GameError>;
