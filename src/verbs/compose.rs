//! Verb-form compositor
//!
//! Assembles a conjugated form from the independent parts of a conjugation
//! record. Part order is fixed per tense:
//!
//! | tense        | full display                  | choice                        |
//! |--------------|-------------------------------|-------------------------------|
//! | perfekt      | auxiliary, reflexive?, partizip | auxiliary, reflexive?, partizip |
//! | other tenses | reflexive?, main, prefix?     | main                          |
//!
//! The separable prefix trails because it moves clause-final in a main
//! clause. Outside Perfekt the prefix and the reflexive are only taken when
//! the verb carries the matching flag, the same rule the column planner
//! uses. Absent parts are omitted, never left as empty slots.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::models::{present, RawRange, Tense, TenseConjugation, TenseHighlights, VerbFlags};
use crate::text::{apply_highlight_set, EmphasisMarkers, HighlightSet};

/// Separator between composed parts
pub const PART_SEPARATOR: &str = " ";

/// Which parts a composed form keeps
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub enum ComposeMode {
    /// Fill-in-the-blank answer; prefix and reflexive stay in the sentence
    Choice,
    /// Flashcard backs and table cells
    #[default]
    FullDisplay,
}

/// Morphological role of one part, naming the record field it comes from
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum FormRole {
    Main,
    Prefix,
    Reflexive,
    Auxiliary,
    Partizip,
}

impl FormRole {
    /// Field text, if present and non-blank
    pub fn field<'a>(&self, conj: &'a TenseConjugation) -> Option<&'a str> {
        match self {
            FormRole::Main => Some(conj.main.as_str()).filter(|s| !s.trim().is_empty()),
            FormRole::Prefix => present(&conj.prefix),
            FormRole::Reflexive => present(&conj.reflexive),
            FormRole::Auxiliary => present(&conj.auxiliary),
            FormRole::Partizip => present(&conj.partizip),
        }
    }

    /// Highlight ranges stored for this field
    pub fn highlights<'a>(&self, highlights: &'a TenseHighlights) -> &'a [RawRange] {
        let ranges = match self {
            FormRole::Main => &highlights.main,
            FormRole::Prefix => &highlights.prefix,
            FormRole::Reflexive => &highlights.reflexive,
            FormRole::Auxiliary => &highlights.auxiliary,
            FormRole::Partizip => &highlights.partizip,
        };
        ranges.as_deref().unwrap_or_default()
    }

    /// Validated highlights of this field in `conj`
    pub fn highlight_set(&self, conj: &TenseConjugation) -> Result<HighlightSet> {
        let text = self.field(conj).unwrap_or_default();
        match &conj.highlights {
            Some(highlights) => HighlightSet::new(text, self.highlights(highlights)),
            None => Ok(HighlightSet::empty()),
        }
    }
}

/// One part of a composed form
#[derive(Serialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct FormPart<'a> {
    pub role: FormRole,
    pub text: &'a str,
}

/// Ordered roles a tense uses in the given mode, before presence filtering
pub fn role_order(tense: Tense, flags: VerbFlags, mode: ComposeMode) -> Vec<FormRole> {
    match (tense.is_perfekt(), mode) {
        (true, _) => vec![FormRole::Auxiliary, FormRole::Reflexive, FormRole::Partizip],
        (false, ComposeMode::Choice) => vec![FormRole::Main],
        (false, ComposeMode::FullDisplay) => {
            let mut roles = Vec::with_capacity(3);
            if flags.is_reflexive {
                roles.push(FormRole::Reflexive);
            }
            roles.push(FormRole::Main);
            if flags.is_separable {
                roles.push(FormRole::Prefix);
            }
            roles
        }
    }
}

/// Ordered parts of a form, absent parts dropped
pub fn compose_parts<'a>(
    conj: &'a TenseConjugation,
    tense: Tense,
    flags: VerbFlags,
    mode: ComposeMode,
) -> Vec<FormPart<'a>> {
    role_order(tense, flags, mode)
        .into_iter()
        .filter_map(|role| role.field(conj).map(|text| FormPart { role, text }))
        .collect()
}

/// Composed form as plain text
pub fn compose_form(
    conj: &TenseConjugation,
    tense: Tense,
    flags: VerbFlags,
    mode: ComposeMode,
) -> String {
    compose_parts(conj, tense, flags, mode)
        .iter()
        .map(|part| part.text)
        .collect::<Vec<_>>()
        .join(PART_SEPARATOR)
}

/// Composed form with each part's irregular ranges wrapped in the default
/// emphasis markers. Ranges apply to their own field only.
pub fn compose_highlighted(
    conj: &TenseConjugation,
    tense: Tense,
    flags: VerbFlags,
    mode: ComposeMode,
) -> Result<String> {
    let markers = EmphasisMarkers::default();
    let parts = compose_parts(conj, tense, flags, mode)
        .into_iter()
        .map(|part| {
            let set = part.role.highlight_set(conj)?;
            apply_highlight_set(part.text, &set, &markers)
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(parts.join(PART_SEPARATOR))
}
