//! Verb-form assembly
//!
//! ## Modules
//!
//! - `persons`: Static person rows and their labels
//! - `compose`: Ordered assembly of a form from its morphological parts
//! - `distractors`: Multiple-choice distractors and exercise assignments
//! - `regular`: Weak-verb forms and derived irregularity highlights

pub mod compose;
pub mod distractors;
pub mod persons;
pub mod regular;

pub use compose::{compose_form, compose_highlighted, compose_parts, ComposeMode, FormPart, FormRole};
pub use distractors::{build_assignments, choice_item, choice_items, pick_distractors, ChoiceItem, ExerciseAssignment};
pub use persons::{person_info_line, person_label, person_suffix, row_def, StaticRowDef, CONJUGATION_ROWS};
pub use regular::{attach_highlights, compute_highlight_ranges, regular_forms, RegularForms};
