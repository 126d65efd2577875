//! Error Types
//!
//! Construction-time failures. Tick mechanics are total once a grid
//! exists and never return errors.

use thiserror::Error;

use crate::core::coord::Coord;

/// Level data could not be turned into a grid.
#[derive(Debug, Error)]
pub enum LevelError {
    /// Level has no rows or no columns.
    #[error("level is empty")]
    Empty,

    /// A row's width differs from the first row.
    #[error("row {row} has {found} cells, expected {expected}")]
    RaggedRow {
        /// Offending row index
        row: usize,
        /// Width of row 0
        expected: usize,
        /// Width of the offending row
        found: usize,
    },

    /// A raw code does not name any tile.
    #[error("unknown tile code {code} at row {row}, column {col}")]
    UnknownTileCode {
        /// The unrecognised code
        code: u8,
        /// Row index
        row: usize,
        /// Column index
        col: usize,
    },

    /// A text glyph does not name any tile.
    #[error("unknown tile glyph {glyph:?} at row {row}, column {col}")]
    UnknownTileGlyph {
        /// The unrecognised glyph
        glyph: char,
        /// Row index
        row: usize,
        /// Column index
        col: usize,
    },

    /// No player-start code present.
    #[error("level has no player start")]
    MissingPlayerStart,

    /// More than one player-start code present.
    #[error("level has more than one player start: {first} and {second}")]
    MultiplePlayerStarts {
        /// First start found (row-major)
        first: Coord,
        /// Second start found
        second: Coord,
    },

    /// Level file was not a JSON array of code rows.
    #[error("invalid level file: {0}")]
    Json(#[from] serde_json::Error),
}

/// Input boundary rejected an intent.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    /// Key or script token does not map to a direction.
    #[error("unknown direction {0:?}")]
    UnknownDirection(String),
}
