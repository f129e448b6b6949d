//! Verb-form and exercise operations for the WASM API
//!
//! Randomized helpers draw from the thread RNG here; the core functions take
//! the RNG as an argument.

use serde::Deserialize;
use wasm_bindgen::prelude::*;

use crate::api::helpers::{deserialize, deserialize_or_default, layout_error, serialize};
use crate::models::{PersonKey, Tense, TenseConjugation, VerbConjugationTable, VerbFlags};
use crate::verbs::{self, ComposeMode};
use crate::{wasm_info, wasm_log};

/// Arguments of `composeVerbForm`
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ComposeRequest {
    conjugation: TenseConjugation,
    tense: Tense,
    #[serde(default)]
    flags: VerbFlags,
    #[serde(default)]
    mode: ComposeMode,
    /// Wrap irregular ranges in highlight markers
    #[serde(default)]
    highlighted: bool,
}

/// Assemble a verb form from its parts
///
/// # Parameters
/// * `request_js` - `{ conjugation, tense, flags?, mode?, highlighted? }`;
///   `mode` is `"choice"` or `"fullDisplay"` (default)
#[wasm_bindgen(js_name = composeVerbForm)]
pub fn compose_verb_form(request_js: JsValue) -> Result<String, JsValue> {
    let request: ComposeRequest = deserialize(request_js, "Failed to deserialize compose request")?;

    if request.highlighted {
        verbs::compose_highlighted(&request.conjugation, request.tense, request.flags, request.mode)
            .map_err(|e| layout_error("composeVerbForm", e))
    } else {
        Ok(verbs::compose_form(&request.conjugation, request.tense, request.flags, request.mode))
    }
}

/// Two wrong answers for a multiple-choice item
///
/// # Parameters
/// * `table_js` - Conjugation table of the verb
/// * `person_js`, `tense_js` - The asked person and tense
/// * `correct_form` - Form to exclude
/// * `tenses_js` - Fallback tenses, in order; defaults to all
#[wasm_bindgen(js_name = pickDistractors)]
pub fn pick_distractors(
    table_js: JsValue,
    person_js: JsValue,
    tense_js: JsValue,
    correct_form: &str,
    tenses_js: JsValue,
) -> Result<JsValue, JsValue> {
    let table: VerbConjugationTable = deserialize(table_js, "Failed to deserialize table")?;
    let person: PersonKey = deserialize(person_js, "Failed to deserialize person")?;
    let tense: Tense = deserialize(tense_js, "Failed to deserialize tense")?;
    let tenses = tenses_or_all(tenses_js)?;

    let distractors = verbs::pick_distractors(
        &table,
        person,
        tense,
        correct_form,
        &tenses,
        &mut rand::thread_rng(),
    );
    wasm_log!("pickDistractors: {} {} {} -> {:?}", table.verb(), person, tense, distractors);

    serialize(&distractors, "Failed to serialize distractors")
}

/// Shuffled exercise assignments, each with its answer options
///
/// # Returns
/// Array of `{ verb, pronoun, person, tense, correctForm, distractors }`
#[wasm_bindgen(js_name = buildExerciseAssignments)]
pub fn build_exercise_assignments(
    tables_js: JsValue,
    tenses_js: JsValue,
    sentences_per_verb: usize,
) -> Result<JsValue, JsValue> {
    let tables: Vec<VerbConjugationTable> = deserialize(tables_js, "Failed to deserialize tables")?;
    let tenses = tenses_or_all(tenses_js)?;
    let mut rng = rand::thread_rng();

    let assignments = verbs::build_assignments(&tables, &tenses, sentences_per_verb, &mut rng);
    let items = verbs::choice_items(&tables, &assignments, &tenses, &mut rng)
        .map_err(|e| layout_error("buildExerciseAssignments", e))?;

    wasm_info!("buildExerciseAssignments: {} item(s) for {} verb(s)", items.len(), tables.len());
    serialize(&items, "Failed to serialize assignments")
}

/// Derive irregularity highlights from the regular paradigm
///
/// # Returns
/// The table with `main`/`partizip` highlights rewritten
#[wasm_bindgen(js_name = attachIrregularHighlights)]
pub fn attach_irregular_highlights(table_js: JsValue) -> Result<JsValue, JsValue> {
    let mut table: VerbConjugationTable = deserialize(table_js, "Failed to deserialize table")?;
    verbs::attach_highlights(&mut table);
    serialize(&table, "Failed to serialize table")
}

fn tenses_or_all(tenses_js: JsValue) -> Result<Vec<Tense>, JsValue> {
    let tenses: Vec<Tense> = deserialize_or_default(tenses_js, "Failed to deserialize tenses")?;
    Ok(if tenses.is_empty() { Tense::ALL.to_vec() } else { tenses })
}
