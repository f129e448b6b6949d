//! Worksheet Layout WASM API
//!
//! JavaScript-facing bindings for the layout engines. Arguments and results
//! cross the boundary as serde values; layout errors surface as JavaScript
//! `Error`s carrying the display message.
//!
//! # Module Structure
//!
//! - `helpers`: Serialization, error conversion, settings, timing and logging
//! - `text`: Highlight markers
//! - `verbs`: Verb-form assembly and exercise helpers
//! - `tables`: Declension and conjugation table layout
//! - `cards`: Flashcard repadding, grid placement, deck layout and generation

pub mod helpers;
pub mod cards;
pub mod tables;
pub mod text;
pub mod verbs;

pub use cards::{generate_flashcards, layout_deck, place_on_grid, repad_cards};
pub use tables::{
    layout_case_section, layout_conjugation_table, layout_conjugation_tables, layout_declension_table,
    plan_conjugation_columns,
};
pub use text::{apply_highlights, strip_highlights};
pub use verbs::{attach_irregular_highlights, build_exercise_assignments, compose_verb_form, pick_distractors};
