//! Error types for layout and pagination
//!
//! Every variant is a data-contract violation on the caller's side. None of
//! them are transient, so nothing here is retried; the export request fails
//! with the display message.

use thiserror::Error;

use crate::models::{PersonKey, Tense};

/// Top-level error type for the layout engine
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayoutError {
    /// Highlight range with start after end
    #[error("Invalid highlight range: start {start} > end {end}")]
    InvalidRange { start: usize, end: usize },

    /// Highlight range reaching past the end of its field
    #[error("Highlight range [{start}, {end}) exceeds text length {len}")]
    RangeOutOfBounds { start: usize, end: usize, len: usize },

    /// Two highlight ranges in the same field overlap
    #[error("Highlight ranges [{}, {}) and [{}, {}) overlap", .first.0, .first.1, .second.0, .second.1)]
    OverlappingRanges {
        first: (usize, usize),
        second: (usize, usize),
    },

    /// Text already contains an emphasis marker
    #[error("Text '{text}' already contains the emphasis marker '{marker}'")]
    MarkerInText { text: String, marker: String },

    /// No conjugation record for the requested person/tense
    #[error("No {tense} conjugation for '{person}' in verb '{verb}'")]
    MissingConjugation {
        verb: String,
        person: PersonKey,
        tense: Tense,
    },

    /// Page size of zero passed to the repadding engine
    #[error("Invalid page size: {0} (must be at least 1)")]
    InvalidPageSize(usize),

    /// A page slice that does not fit the grid
    #[error("{cards} cards do not fit a page grid with capacity {capacity}")]
    GridOverflow { cards: usize, capacity: usize },

    /// Grid too small to hold anything besides the reserved cell
    #[error("Invalid grid {rows}x{cols}: needs at least 2 cells")]
    InvalidGrid { rows: usize, cols: usize },

    /// Exercise assignment pointing past the table list
    #[error("No table at index {index} for verb '{verb}'")]
    UnknownTable { index: usize, verb: String },

    /// Settings document could not be parsed
    #[error("Invalid settings: {0}")]
    Settings(String),
}

pub type Result<T> = std::result::Result<T, LayoutError>;
