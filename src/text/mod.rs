//! Text assembly
//!
//! Character-range emphasis for generated verb forms and table cells, and the
//! regional spelling applied to printed tables.
//!
//! ## Modules
//!
//! - `highlight`: Validated highlight ranges and marker assembly
//! - `spelling`: Swiss ß to ss replacement that keeps ranges aligned

pub mod highlight;
pub mod spelling;

// Re-exports for convenience
pub use highlight::{
    apply_highlight_set, apply_highlights, highlight_segments, strip_highlights, strip_markers,
    EmphasisMarkers, HighlightRange, HighlightSet, TextSegment, HIGHLIGHT_CLOSE, HIGHLIGHT_OPEN,
};
pub use spelling::{swiss_spelling, swiss_spelling_with_ranges};
