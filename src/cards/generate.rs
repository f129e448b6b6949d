//! Flashcard generation from conjugation tables
//!
//! One card per selected verb, tense and person. The front asks for the form
//! and the back shows the full form with its irregular ranges marked.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use crate::error::Result;
use crate::models::{Card, Flashcard, Locale, PersonKey, Tense, VerbConjugationTable, VerbModus};
use crate::verbs::persons::{person_info_line, person_label, person_suffix};
use crate::verbs::{compose_highlighted, ComposeMode};

/// Marks where the verb form starts on a card back
pub const VERB_MARKER: &str = "{{verb}}";

/// Card order
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Verb, then tense, then person; each verb starts a new page group
    #[default]
    Infinitive,
    /// Tense, then verb, then person
    Tense,
    /// Person, then verb, then tense
    Person,
}

/// What to generate cards for
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct FlashcardSelection {
    /// Infinitives to include; `None` takes every table
    pub verbs: Option<Vec<String>>,
    pub tenses: Vec<Tense>,
    pub persons: Vec<PersonKey>,
}

impl Default for FlashcardSelection {
    fn default() -> Self {
        Self {
            verbs: None,
            tenses: Tense::ALL.to_vec(),
            persons: PersonKey::ALL.to_vec(),
        }
    }
}

impl FlashcardSelection {
    fn wants_verb(&self, verb: &str) -> bool {
        self.verbs
            .as_ref()
            .map_or(true, |verbs| verbs.iter().any(|v| v == verb))
    }
}

/// Generation options
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct GenerateOptions {
    pub selection: FlashcardSelection,
    pub sort_order: SortOrder,
    pub locale: Locale,
    pub verb_modus: VerbModus,
}

struct Entry {
    verb: String,
    sort_verb: String,
    tense: Tense,
    person: PersonKey,
    front: String,
    back: String,
}

impl Entry {
    fn compare(&self, other: &Self, order: SortOrder) -> Ordering {
        let verb = || self.sort_verb.cmp(&other.sort_verb);
        let tense = || self.tense.cmp(&other.tense);
        let person = || self.person.cmp(&other.person);

        match order {
            SortOrder::Infinitive => verb().then_with(tense).then_with(person),
            SortOrder::Tense => tense().then_with(verb).then_with(person),
            SortOrder::Person => person().then_with(verb).then_with(tense),
        }
    }
}

fn front_text(verb: &str, tense: Tense, person: PersonKey, options: &GenerateOptions) -> String {
    format!(
        "{}\n{} {}\n{}\n{} \u{2026}",
        verb,
        tense.label(options.locale),
        options.verb_modus.label(options.locale),
        person_info_line(person),
        person_label(person)
    )
}

/// Generate cards from conjugation tables
///
/// Skips unselected verbs, tenses and persons, non-third persons of
/// third-person-only tables, and records without their key form. With the
/// infinitive order a page-break hint separates consecutive verbs.
pub fn generate_flashcards(tables: &[VerbConjugationTable], options: &GenerateOptions) -> Result<Vec<Card>> {
    let selection = &options.selection;
    let mut entries = Vec::new();

    for table in tables.iter().filter(|t| selection.wants_verb(t.verb())) {
        let verb = table.verb();
        let mut skipped = 0usize;

        for &tense in Tense::ALL.iter().filter(|t| selection.tenses.contains(t)) {
            for person in table.persons().into_iter().filter(|p| selection.persons.contains(p)) {
                let Some(conj) = table.get(person, tense).filter(|c| c.has_key_form(tense)) else {
                    skipped += 1;
                    continue;
                };

                let form = compose_highlighted(conj, tense, table.flags(), ComposeMode::FullDisplay)?;
                entries.push(Entry {
                    verb: verb.to_string(),
                    sort_verb: verb.to_lowercase(),
                    tense,
                    person,
                    front: front_text(verb, tense, person, options),
                    back: format!("{}{} {}{}", person_label(person), person_suffix(person), VERB_MARKER, form),
                });
            }
        }

        if skipped > 0 {
            log::warn!("{}: skipped {} selected form(s) without data", verb, skipped);
        }
    }

    entries.sort_by(|a, b| a.compare(b, options.sort_order));

    let mut cards = Vec::with_capacity(entries.len());
    let mut previous_verb: Option<String> = None;
    for entry in entries {
        if options.sort_order == SortOrder::Infinitive
            && previous_verb.as_deref().is_some_and(|v| v != entry.verb)
        {
            cards.push(Card::PageBreakHint);
        }
        cards.push(Card::Content(Flashcard::with_text(entry.front, entry.back)));
        previous_verb = Some(entry.verb);
    }

    log::debug!("generated {} card(s) from {} table(s)", cards.len(), tables.len());
    Ok(cards)
}
