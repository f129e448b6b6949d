//! Highlight text operations for the WASM API

use wasm_bindgen::prelude::*;

use crate::api::helpers::{deserialize, layout_error};
use crate::models::RawRange;
use crate::text;
use crate::wasm_log;

/// Wrap char ranges of `text` in `{{hl}}`/`{{/hl}}` markers
///
/// # Parameters
/// * `text` - Field text
/// * `ranges_js` - Array of `[start, end]` char offsets
///
/// # Returns
/// The annotated text, or an Error for an invalid range set
#[wasm_bindgen(js_name = applyHighlights)]
pub fn apply_highlights(text: &str, ranges_js: JsValue) -> Result<String, JsValue> {
    let ranges: Vec<RawRange> = deserialize(ranges_js, "Failed to deserialize ranges")?;
    wasm_log!("applyHighlights: {} range(s) over {} char(s)", ranges.len(), text.chars().count());

    text::apply_highlights(text, &ranges).map_err(|e| layout_error("applyHighlights", e))
}

/// Remove every highlight marker from `annotated`
#[wasm_bindgen(js_name = stripHighlights)]
pub fn strip_highlights(annotated: &str) -> String {
    text::strip_highlights(annotated)
}
