//! Flashcard pagination and print layout
//!
//! ## Modules
//!
//! - `grid`: Placement of one page's cards on the print grid
//! - `repad`: Group-aware padding to page boundaries
//! - `deck`: Whole-deck layout in duplex order
//! - `generate`: Cards generated from conjugation tables

pub mod deck;
pub mod generate;
pub mod grid;
pub mod repad;

pub use deck::{layout_deck, DeckLayout, DeckPage};
pub use generate::{generate_flashcards, FlashcardSelection, GenerateOptions, SortOrder, VERB_MARKER};
pub use grid::{image_fit, place_on_grid, CutLines, GridCell, GridSpec, ImageFit, CONTENT_AREA_RATIO};
pub use repad::{materialize, repad, split_groups, strip_hints};
