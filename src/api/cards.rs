//! Flashcard pagination operations for the WASM API
//!
//! Cards leave the boundary as authored flashcards: page-break hints are
//! materialized into blank cards before serialization, the form the editor
//! stores.

use wasm_bindgen::prelude::*;

use crate::api::helpers::{deserialize, deserialize_or_default, export_settings, layout_error, serialize, timed};
use crate::cards::{self, GenerateOptions, GridSpec};
use crate::models::{classify, Card, Flashcard, PageSide, VerbConjugationTable};
use crate::{wasm_info, wasm_log};

/// Re-pad an authored deck so every blank-separated group starts on a new page
///
/// # Parameters
/// * `cards_js` - Authored flashcards; blank cards separate groups
/// * `page_size` - Cards per page
///
/// # Returns
/// Authored flashcards with fresh blank padding cards
#[wasm_bindgen(js_name = repadCards)]
pub fn repad_cards(cards_js: JsValue, page_size: usize) -> Result<JsValue, JsValue> {
    let authored: Vec<Flashcard> = deserialize(cards_js, "Failed to deserialize cards")?;
    let count = authored.len();

    let repadded = cards::repad(&classify(authored), page_size).map_err(|e| layout_error("repadCards", e))?;
    wasm_log!("repadCards: {} -> {} card(s), page size {}", count, repadded.len(), page_size);

    serialize(&cards::materialize(repadded), "Failed to serialize cards")
}

/// Place one page of cards on the print grid
///
/// # Parameters
/// * `cards_js` - The page's authored cards, at most the grid capacity
/// * `grid_js` - `{ rows, cols }`; 3x3 when omitted
/// * `side_js` - `"front"` or `"back"`
#[wasm_bindgen(js_name = placeOnGrid)]
pub fn place_on_grid(cards_js: JsValue, grid_js: JsValue, side_js: JsValue) -> Result<JsValue, JsValue> {
    let page: Vec<Card> = classify(deserialize(cards_js, "Failed to deserialize cards")?);
    let grid: GridSpec = deserialize_or_default(grid_js, "Failed to deserialize grid")?;
    let side: PageSide = deserialize(side_js, "Failed to deserialize page side")?;

    let cells = cards::place_on_grid(&page, grid, side).map_err(|e| layout_error("placeOnGrid", e))?;
    serialize(&cells, "Failed to serialize grid cells")
}

/// Lay out a whole authored deck as duplex print pages
#[wasm_bindgen(js_name = layoutDeck)]
pub fn layout_deck(cards_js: JsValue, settings_js: JsValue) -> Result<JsValue, JsValue> {
    let authored: Vec<Flashcard> = deserialize(cards_js, "Failed to deserialize cards")?;
    let settings = export_settings(settings_js)?;

    let layout = timed("layoutDeck", || cards::layout_deck(authored, &settings))
        .map_err(|e| layout_error("layoutDeck", e))?;
    wasm_info!(
        "layoutDeck: {} card(s) on {} sheet(s)",
        layout.card_count,
        layout.sheet_count
    );

    serialize(&layout, "Failed to serialize deck layout")
}

/// Generate flashcards from conjugation tables
///
/// # Parameters
/// * `tables_js` - Conjugation tables
/// * `options_js` - `{ selection?, sortOrder?, locale?, verbModus? }`
///
/// # Returns
/// Authored flashcards; with the infinitive order, blank cards separate verbs
#[wasm_bindgen(js_name = generateFlashcards)]
pub fn generate_flashcards(tables_js: JsValue, options_js: JsValue) -> Result<JsValue, JsValue> {
    let tables: Vec<VerbConjugationTable> = deserialize(tables_js, "Failed to deserialize tables")?;
    let options: GenerateOptions = deserialize_or_default(options_js, "Failed to deserialize options")?;

    let generated =
        cards::generate_flashcards(&tables, &options).map_err(|e| layout_error("generateFlashcards", e))?;
    wasm_info!("generateFlashcards: {} card(s) from {} table(s)", generated.len(), tables.len());

    serialize(&cards::materialize(generated), "Failed to serialize cards")
}
