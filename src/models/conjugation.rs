//! Verb conjugation data model
//!
//! One `VerbConjugationTable` per verb, keyed by person and then tense.
//! Records arrive from the authoring/generation side already shaped:
//! Perfekt fills `auxiliary` + `partizip`, other tenses fill `main`
//! (plus `prefix` for separable and `reflexive` for reflexive verbs).

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::error::{LayoutError, Result};

/// German verb tenses covered by the tables
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum Tense {
    Praesens,
    Perfekt,
    Praeteritum,
}

impl Tense {
    /// Display order used by every table and generator
    pub const ALL: [Tense; 3] = [Tense::Praesens, Tense::Perfekt, Tense::Praeteritum];

    pub fn as_str(&self) -> &'static str {
        match self {
            Tense::Praesens => "praesens",
            Tense::Perfekt => "perfekt",
            Tense::Praeteritum => "praeteritum",
        }
    }

    /// Position in `Tense::ALL`
    pub fn index(&self) -> usize {
        match self {
            Tense::Praesens => 0,
            Tense::Perfekt => 1,
            Tense::Praeteritum => 2,
        }
    }

    pub fn is_perfekt(&self) -> bool {
        matches!(self, Tense::Perfekt)
    }

    /// Header label in the given locale
    pub fn label(&self, locale: Locale) -> &'static str {
        match (self, locale) {
            (Tense::Praesens, Locale::De) => "Präsens",
            (Tense::Praesens, Locale::En) => "Present",
            (Tense::Perfekt, Locale::De) => "Perfekt",
            (Tense::Perfekt, Locale::En) => "Perfect",
            (Tense::Praeteritum, Locale::De) => "Präteritum",
            (Tense::Praeteritum, Locale::En) => "Past",
        }
    }
}

impl fmt::Display for Tense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Label language for generated text
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    De,
    En,
}

/// Grammatical mood the table was generated for
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum VerbModus {
    #[default]
    Indikativ,
    #[serde(rename = "konjunktiv1")]
    KonjunktivI,
    #[serde(rename = "konjunktiv2")]
    KonjunktivII,
}

impl VerbModus {
    pub fn label(&self, locale: Locale) -> &'static str {
        match (self, locale) {
            (VerbModus::Indikativ, Locale::De) => "Indikativ",
            (VerbModus::Indikativ, Locale::En) => "Indicative",
            (VerbModus::KonjunktivI, Locale::De) => "Konjunktiv I",
            (VerbModus::KonjunktivI, Locale::En) => "Subjunctive I",
            (VerbModus::KonjunktivII, Locale::De) => "Konjunktiv II",
            (VerbModus::KonjunktivII, Locale::En) => "Subjunctive II",
        }
    }
}

/// One of the eight fixed grammatical persons
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PersonKey {
    #[serde(rename = "ich")]
    Ich,
    #[serde(rename = "du")]
    Du,
    #[serde(rename = "Sie_sg")]
    SieSg,
    #[serde(rename = "er_sie_es")]
    ErSieEs,
    #[serde(rename = "wir")]
    Wir,
    #[serde(rename = "ihr")]
    Ihr,
    #[serde(rename = "Sie_pl")]
    SiePl,
    #[serde(rename = "sie_pl")]
    SiePlural,
}

impl PersonKey {
    /// Table row order
    pub const ALL: [PersonKey; 8] = [
        PersonKey::Ich,
        PersonKey::Du,
        PersonKey::SieSg,
        PersonKey::ErSieEs,
        PersonKey::Wir,
        PersonKey::Ihr,
        PersonKey::SiePl,
        PersonKey::SiePlural,
    ];

    pub const THIRD_PERSON: [PersonKey; 2] = [PersonKey::ErSieEs, PersonKey::SiePlural];

    /// Wire name, as stored by the editor
    pub fn as_str(&self) -> &'static str {
        match self {
            PersonKey::Ich => "ich",
            PersonKey::Du => "du",
            PersonKey::SieSg => "Sie_sg",
            PersonKey::ErSieEs => "er_sie_es",
            PersonKey::Wir => "wir",
            PersonKey::Ihr => "ihr",
            PersonKey::SiePl => "Sie_pl",
            PersonKey::SiePlural => "sie_pl",
        }
    }

    /// Position in `PersonKey::ALL`
    pub fn index(&self) -> usize {
        PersonKey::ALL
            .iter()
            .position(|p| p == self)
            .unwrap_or_default()
    }

    pub fn is_third_person(&self) -> bool {
        PersonKey::THIRD_PERSON.contains(self)
    }
}

impl fmt::Display for PersonKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raw `[start, end)` char offsets as stored by the editor
pub type RawRange = (usize, usize);

/// Per-field irregularity highlights for one conjugation record
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Default)]
#[serde(default)]
pub struct TenseHighlights {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub main: Option<Vec<RawRange>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prefix: Option<Vec<RawRange>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auxiliary: Option<Vec<RawRange>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub partizip: Option<Vec<RawRange>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reflexive: Option<Vec<RawRange>>,
}

impl TenseHighlights {
    pub fn is_empty(&self) -> bool {
        self.main.is_none()
            && self.prefix.is_none()
            && self.auxiliary.is_none()
            && self.partizip.is_none()
            && self.reflexive.is_none()
    }
}

/// A conjugation for a single person in a single tense
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Default)]
#[serde(default)]
pub struct TenseConjugation {
    /// Conjugated form ("mache", "hole")
    pub main: String,
    /// Separated prefix of a separable verb ("ab")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,
    /// Reflexive pronoun (mich, dich, sich, uns, euch)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reflexive: Option<String>,
    /// Perfekt auxiliary (habe, bin, ...)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auxiliary: Option<String>,
    /// Partizip II
    #[serde(skip_serializing_if = "Option::is_none")]
    pub partizip: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub highlights: Option<TenseHighlights>,
}

/// Non-blank value of an optional form field
pub(crate) fn present(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|s| !s.trim().is_empty())
}

impl TenseConjugation {
    /// The field a tense cannot do without: `partizip` for Perfekt, `main` otherwise
    pub fn has_key_form(&self, tense: Tense) -> bool {
        if tense.is_perfekt() {
            present(&self.partizip).is_some()
        } else {
            !self.main.trim().is_empty()
        }
    }
}

/// All tenses for one person
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Default)]
#[serde(default)]
pub struct PersonConjugations {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub praesens: Option<TenseConjugation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub perfekt: Option<TenseConjugation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub praeteritum: Option<TenseConjugation>,
}

impl PersonConjugations {
    pub fn get(&self, tense: Tense) -> Option<&TenseConjugation> {
        match tense {
            Tense::Praesens => self.praesens.as_ref(),
            Tense::Perfekt => self.perfekt.as_ref(),
            Tense::Praeteritum => self.praeteritum.as_ref(),
        }
    }

    pub fn get_mut(&mut self, tense: Tense) -> Option<&mut TenseConjugation> {
        match tense {
            Tense::Praesens => self.praesens.as_mut(),
            Tense::Perfekt => self.perfekt.as_mut(),
            Tense::Praeteritum => self.praeteritum.as_mut(),
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Default)]
pub struct VerbInput {
    pub verb: String,
}

/// Complete conjugation table for one verb
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct VerbConjugationTable {
    pub input: VerbInput,
    pub is_separable: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub separable_prefix: Option<String>,
    pub is_reflexive: bool,
    /// Only er/sie/es and sie (plural) are populated
    pub third_person_only: bool,
    pub conjugations: BTreeMap<PersonKey, PersonConjugations>,
}

/// Separability/reflexivity flags, the only verb data the planners consume
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct VerbFlags {
    pub is_separable: bool,
    pub is_reflexive: bool,
}

/// Infinitive of a fill-in table; a non-breaking space keeps its header
/// row at full height
pub const BLANK_VERB: &str = "\u{a0}";

impl VerbConjugationTable {
    /// Fill-in table: an empty record for every person and tense
    pub fn blank() -> Self {
        let empty = PersonConjugations {
            praesens: Some(TenseConjugation::default()),
            perfekt: Some(TenseConjugation::default()),
            praeteritum: Some(TenseConjugation::default()),
        };
        Self {
            input: VerbInput {
                verb: BLANK_VERB.to_string(),
            },
            conjugations: PersonKey::ALL.iter().map(|&p| (p, empty.clone())).collect(),
            ..Default::default()
        }
    }

    pub fn is_blank(&self) -> bool {
        self.input.verb == BLANK_VERB
    }

    pub fn verb(&self) -> &str {
        &self.input.verb
    }

    pub fn flags(&self) -> VerbFlags {
        VerbFlags {
            is_separable: self.is_separable,
            is_reflexive: self.is_reflexive,
        }
    }

    /// Persons this table covers, in row order
    pub fn persons(&self) -> Vec<PersonKey> {
        if self.third_person_only {
            PersonKey::THIRD_PERSON.to_vec()
        } else {
            PersonKey::ALL.to_vec()
        }
    }

    /// Look up a record, if one exists
    pub fn get(&self, person: PersonKey, tense: Tense) -> Option<&TenseConjugation> {
        self.conjugations.get(&person).and_then(|p| p.get(tense))
    }

    /// Look up a record that must exist
    pub fn conjugation(&self, person: PersonKey, tense: Tense) -> Result<&TenseConjugation> {
        self.get(person, tense)
            .ok_or_else(|| LayoutError::MissingConjugation {
                verb: self.input.verb.clone(),
                person,
                tense,
            })
    }
}
