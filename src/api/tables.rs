//! Grammar table layout operations for the WASM API

use wasm_bindgen::prelude::*;

use crate::api::helpers::{deserialize, export_settings, layout_error, serialize, timed};
use crate::models::{CaseSection, DeclensionTable, VerbConjugationTable, VerbFlags};
use crate::tables;
use crate::wasm_info;

/// Lay out one case section of a declension table
///
/// # Parameters
/// * `section_js` - `{ case, groups, prepositionHeading?, prepositions? }`
/// * `settings_js` - Export settings; defaults when omitted
#[wasm_bindgen(js_name = layoutCaseSection)]
pub fn layout_case_section(section_js: JsValue, settings_js: JsValue) -> Result<JsValue, JsValue> {
    let section: CaseSection = deserialize(section_js, "Failed to deserialize case section")?;
    let settings = export_settings(settings_js)?;

    let grid = tables::layout_case_section(&section, &settings);
    serialize(&grid, "Failed to serialize case grid")
}

/// Lay out a whole declension table as two pages of case grids
#[wasm_bindgen(js_name = layoutDeclensionTable)]
pub fn layout_declension_table(table_js: JsValue, settings_js: JsValue) -> Result<JsValue, JsValue> {
    let table: DeclensionTable = deserialize(table_js, "Failed to deserialize declension table")?;
    let settings = export_settings(settings_js)?;

    let pages = timed("layoutDeclensionTable", || tables::layout_declension_table(&table, &settings));
    wasm_info!("layoutDeclensionTable: {} page(s)", pages.len());

    serialize(&pages, "Failed to serialize declension pages")
}

/// Per-tense column counts and width fractions for a verb
///
/// # Parameters
/// * `flags_js` - `{ isSeparable, isReflexive }`
#[wasm_bindgen(js_name = planConjugationColumns)]
pub fn plan_conjugation_columns(flags_js: JsValue) -> Result<JsValue, JsValue> {
    let flags: VerbFlags = deserialize(flags_js, "Failed to deserialize verb flags")?;
    serialize(&tables::plan_columns(flags), "Failed to serialize column plan")
}

/// Lay out a verb's conjugation table
///
/// # Returns
/// The grid, or an Error when a listed person has no record for a tense
#[wasm_bindgen(js_name = layoutConjugationTable)]
pub fn layout_conjugation_table(table_js: JsValue, settings_js: JsValue) -> Result<JsValue, JsValue> {
    let table: VerbConjugationTable = deserialize(table_js, "Failed to deserialize conjugation table")?;
    let settings = export_settings(settings_js)?;

    let grid = timed("layoutConjugationTable", || tables::layout_conjugation_table(&table, &settings))
        .map_err(|e| layout_error("layoutConjugationTable", e))?;
    wasm_info!("layoutConjugationTable: {} with {} row(s)", table.verb(), grid.rows.len());

    serialize(&grid, "Failed to serialize conjugation grid")
}

/// Lay out every verb of a conjugation export
///
/// # Parameters
/// * `tables_js` - Conjugation tables, in print order
/// * `settings_js` - Export settings; `grammarTable.simplified` picks the
///   side-by-side mode and `grammarTable.insertEmptyTables` adds blank tables
///
/// # Returns
/// `{ mode: "full", grids }` or `{ mode: "simplified", label, grids }`
#[wasm_bindgen(js_name = layoutConjugationTables)]
pub fn layout_conjugation_tables(tables_js: JsValue, settings_js: JsValue) -> Result<JsValue, JsValue> {
    let tables: Vec<VerbConjugationTable> = deserialize(tables_js, "Failed to deserialize conjugation tables")?;
    let settings = export_settings(settings_js)?;

    let document = timed("layoutConjugationTables", || tables::layout_conjugation_tables(&tables, &settings))
        .map_err(|e| layout_error("layoutConjugationTables", e))?;
    wasm_info!(
        "layoutConjugationTables: {} verb(s) -> {} table(s)",
        tables.len(),
        document.grid_count()
    );

    serialize(&document, "Failed to serialize conjugation document")
}
