//! Worksheet Layout WASM Module
//!
//! Layout and pagination core for printable language-learning worksheets:
//! flashcard decks cut from a page grid, adjective declension tables and
//! verb conjugation tables with irregular forms highlighted.

pub mod api;
pub mod cards;
pub mod error;
pub mod models;
pub mod settings;
pub mod tables;
pub mod text;
pub mod verbs;

// Re-export commonly used types
pub use error::{LayoutError, Result};
pub use models::*;
pub use settings::ExportSettings;

use wasm_bindgen::prelude::*;

// This is like the `main` function, but for WASM modules.
#[wasm_bindgen(start)]
pub fn main() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    init_logger();

    log::info!("Worksheet layout WASM module initialized");
}

#[cfg(feature = "console_log")]
fn init_logger() {
    if console_log::init_with_level(log::Level::Debug).is_err() {
        crate::wasm_warn!("logger already initialized");
    }
}

#[cfg(not(feature = "console_log"))]
fn init_logger() {}
