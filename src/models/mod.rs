//! Models module for the worksheet layout engine
//!
//! Data structures produced by the editor and consumed by the layout
//! engines: flashcards, declension tables and verb conjugation tables.

pub mod conjugation;
pub mod declension;
pub mod flashcard;

// Re-export commonly used types
pub use conjugation::*;
pub use declension::*;
pub use flashcard::*;
