use thiserror::Error;

use crate::cell::Position;

pub type Result<T> = std::result::Result<T, GridError>;

/// Construction-time errors, raised before any grid is cloned or mutated.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum GridError {
    #[error("position ({row}, {col}) is outside the {size}x{size} grid")]
    InvalidPosition { row: usize, col: usize, size: usize },

    #[error("invalid marker placement at {position}: {reason}")]
    InvalidMarker {
        position: Position,
        reason: &'static str,
    },
}

impl GridError {
    pub(crate) fn out_of_bounds(position: Position, size: usize) -> GridError {
        GridError::InvalidPosition {
            row: position.row,
            col: position.col,
            size,
        }
    }
}
