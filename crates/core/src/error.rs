use thiserror::Error;

use crate::types::MAX_GRID_SIZE;

/// Rejected board construction input
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoardError {
    #[error("board has no rows")]
    Empty,
    #[error("board size {0} exceeds the maximum of {MAX_GRID_SIZE}")]
    TooLarge(usize),
    #[error("row {row} has {len} cells, expected {expected}")]
    RaggedRow {
        row: usize,
        len: usize,
        expected: usize,
    },
}
