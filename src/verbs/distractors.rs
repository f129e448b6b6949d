//! Exercise helpers
//!
//! Distractor selection for multiple-choice verb exercises and the shuffled
//! verb/person/tense assignments those exercises are built from. Randomness
//! comes from the caller's RNG, so a seeded RNG gives reproducible output.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::compose::{compose_form, ComposeMode};
use super::persons::row_def;
use crate::error::{LayoutError, Result};
use crate::models::{PersonKey, Tense, VerbConjugationTable};

/// Number of wrong answers offered next to the correct one
pub const DISTRACTOR_COUNT: usize = 2;

/// Unique choice-mode forms of one tense, in person order, with the persons
/// that share each form
pub fn collect_all_forms(table: &VerbConjugationTable, tense: Tense) -> Vec<(String, Vec<PersonKey>)> {
    let flags = table.flags();
    let mut forms: Vec<(String, Vec<PersonKey>)> = Vec::new();

    for person in table.persons() {
        let Some(conj) = table.get(person, tense) else {
            continue;
        };
        let form = compose_form(conj, tense, flags, ComposeMode::Choice);
        if form.trim().is_empty() {
            continue;
        }
        match forms.iter_mut().find(|(existing, _)| *existing == form) {
            Some((_, persons)) => persons.push(person),
            None => forms.push((form, vec![person])),
        }
    }

    forms
}

/// Pick up to two wrong answers for `correct_form`
///
/// Candidates are the other forms of the same tense, shuffled. When fewer than
/// two exist, forms of the remaining `tenses` fill up in order.
pub fn pick_distractors<R: Rng + ?Sized>(
    table: &VerbConjugationTable,
    person: PersonKey,
    tense: Tense,
    correct_form: &str,
    tenses: &[Tense],
    rng: &mut R,
) -> Vec<String> {
    let mut candidates: Vec<String> = collect_all_forms(table, tense)
        .into_iter()
        .map(|(form, _)| form)
        .filter(|form| form != correct_form)
        .collect();
    candidates.shuffle(rng);
    candidates.truncate(DISTRACTOR_COUNT);

    let fallback = tenses
        .iter()
        .filter(|&&other| other != tense)
        .flat_map(|&other| collect_all_forms(table, other))
        .map(|(form, _)| form);

    for form in fallback {
        if candidates.len() >= DISTRACTOR_COUNT {
            break;
        }
        if form != correct_form && !candidates.contains(&form) {
            candidates.push(form);
        }
    }

    log::debug!(
        "{} {} {}: {} distractor(s)",
        table.verb(),
        person,
        tense,
        candidates.len()
    );

    candidates
}

/// One sentence to generate: which verb, in which person and tense
///
/// `table_index` points into the table list the assignment was built from;
/// two tables may share an infinitive.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ExerciseAssignment {
    pub table_index: usize,
    pub verb: String,
    pub person: PersonKey,
    pub tense: Tense,
}

/// Shuffled assignments: `sentences_per_verb` per verb and tense, cycling
/// through a shuffled list of the verb's persons
pub fn build_assignments<R: Rng + ?Sized>(
    tables: &[VerbConjugationTable],
    tenses: &[Tense],
    sentences_per_verb: usize,
    rng: &mut R,
) -> Vec<ExerciseAssignment> {
    let mut assignments = Vec::with_capacity(tables.len() * tenses.len() * sentences_per_verb);

    for (table_index, table) in tables.iter().enumerate() {
        let mut persons = table.persons();
        persons.shuffle(rng);

        for &tense in tenses {
            assignments.extend((0..sentences_per_verb).map(|i| ExerciseAssignment {
                table_index,
                verb: table.verb().to_string(),
                person: persons[i % persons.len()],
                tense,
            }));
        }
    }

    assignments.shuffle(rng);
    assignments
}

/// Answer options for one assignment
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ChoiceItem {
    pub verb: String,
    pub pronoun: String,
    pub person: PersonKey,
    pub tense: Tense,
    pub correct_form: String,
    pub distractors: Vec<String>,
}

/// Correct form and distractors for an assignment
pub fn choice_item<R: Rng + ?Sized>(
    table: &VerbConjugationTable,
    assignment: &ExerciseAssignment,
    tenses: &[Tense],
    rng: &mut R,
) -> Result<ChoiceItem> {
    let conj = table.conjugation(assignment.person, assignment.tense)?;
    let correct_form = compose_form(conj, assignment.tense, table.flags(), ComposeMode::Choice);
    let distractors = pick_distractors(
        table,
        assignment.person,
        assignment.tense,
        &correct_form,
        tenses,
        rng,
    );

    Ok(ChoiceItem {
        verb: table.verb().to_string(),
        pronoun: row_def(assignment.person).pronoun.to_string(),
        person: assignment.person,
        tense: assignment.tense,
        correct_form,
        distractors,
    })
}

/// Choice items for assignments built from `tables`
pub fn choice_items<R: Rng + ?Sized>(
    tables: &[VerbConjugationTable],
    assignments: &[ExerciseAssignment],
    tenses: &[Tense],
    rng: &mut R,
) -> Result<Vec<ChoiceItem>> {
    assignments
        .iter()
        .map(|assignment| {
            let table = tables
                .get(assignment.table_index)
                .ok_or_else(|| LayoutError::UnknownTable {
                    index: assignment.table_index,
                    verb: assignment.verb.clone(),
                })?;
            choice_item(table, assignment, tenses, rng)
        })
        .collect()
}
