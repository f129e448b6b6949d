//! Static person rows
//!
//! The eight grammatical persons in table order, with the pronoun and labels
//! shown in conjugation tables and on generated flashcards.

use serde::{Deserialize, Serialize};

use crate::models::PersonKey;

/// Superscript marker pair understood by the card renderers
pub const SUP_OPEN: &str = "{{sup}}";
pub const SUP_CLOSE: &str = "{{/sup}}";

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Formality {
    Informell,
    Formell,
}

impl Formality {
    pub fn label(&self) -> &'static str {
        match self {
            Formality::Informell => "informell",
            Formality::Formell => "formell",
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum NumberSection {
    Singular,
    Plural,
}

impl NumberSection {
    pub fn label(&self) -> &'static str {
        match self {
            NumberSection::Singular => "Singular",
            NumberSection::Plural => "Plural",
        }
    }
}

/// Fixed row definition for one person
#[derive(Serialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct StaticRowDef {
    pub person_key: PersonKey,
    /// 1, 2 or 3
    pub person: u8,
    pub formality: Option<Formality>,
    pub pronoun: &'static str,
    pub section: NumberSection,
}

pub const CONJUGATION_ROWS: [StaticRowDef; 8] = [
    StaticRowDef {
        person_key: PersonKey::Ich,
        person: 1,
        formality: None,
        pronoun: "ich",
        section: NumberSection::Singular,
    },
    StaticRowDef {
        person_key: PersonKey::Du,
        person: 2,
        formality: Some(Formality::Informell),
        pronoun: "du",
        section: NumberSection::Singular,
    },
    StaticRowDef {
        person_key: PersonKey::SieSg,
        person: 2,
        formality: Some(Formality::Formell),
        pronoun: "Sie",
        section: NumberSection::Singular,
    },
    StaticRowDef {
        person_key: PersonKey::ErSieEs,
        person: 3,
        formality: None,
        pronoun: "er / sie / es",
        section: NumberSection::Singular,
    },
    StaticRowDef {
        person_key: PersonKey::Wir,
        person: 1,
        formality: None,
        pronoun: "wir",
        section: NumberSection::Plural,
    },
    StaticRowDef {
        person_key: PersonKey::Ihr,
        person: 2,
        formality: Some(Formality::Informell),
        pronoun: "ihr",
        section: NumberSection::Plural,
    },
    StaticRowDef {
        person_key: PersonKey::SiePl,
        person: 2,
        formality: Some(Formality::Formell),
        pronoun: "Sie",
        section: NumberSection::Plural,
    },
    StaticRowDef {
        person_key: PersonKey::SiePlural,
        person: 3,
        formality: None,
        pronoun: "sie",
        section: NumberSection::Plural,
    },
];

/// Row definition for a person
pub fn row_def(person: PersonKey) -> &'static StaticRowDef {
    &CONJUGATION_ROWS[person.index()]
}

fn sup(text: &str) -> String {
    format!("{}{}{}", SUP_OPEN, text, SUP_CLOSE)
}

/// "3. Person Singular", "2. Person Plural formell"
pub fn person_info_line(person: PersonKey) -> String {
    let row = row_def(person);
    let formality = match row.formality {
        Some(Formality::Formell) => " formell",
        _ => "",
    };
    format!("{}. Person {}{}", row.person, row.section.label(), formality)
}

/// Pronoun as shown on a card; the feminine "sie" of er/sie/es is marked singular
pub fn person_label(person: PersonKey) -> String {
    match person {
        PersonKey::ErSieEs => format!("er / sie{} / es", sup("SIN")),
        _ => row_def(person).pronoun.to_string(),
    }
}

/// Disambiguating superscript for pronouns shared between persons
pub fn person_suffix(person: PersonKey) -> String {
    let row = row_def(person);
    if row.formality == Some(Formality::Formell) {
        sup("FOR")
    } else if row.person == 3 && row.section == NumberSection::Plural {
        sup("PLU")
    } else {
        String::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rows_follow_person_order() {
        for (row, key) in CONJUGATION_ROWS.iter().zip(PersonKey::ALL) {
            assert_eq!(row.person_key, key);
            assert_eq!(row_def(key).person_key, key);
        }
    }

    #[test]
    fn test_info_lines() {
        assert_eq!(person_info_line(PersonKey::Ich), "1. Person Singular");
        assert_eq!(person_info_line(PersonKey::ErSieEs), "3. Person Singular");
        assert_eq!(person_info_line(PersonKey::SiePl), "2. Person Plural formell");
        // informell is not spelled out
        assert_eq!(person_info_line(PersonKey::Ihr), "2. Person Plural");
    }

    #[test]
    fn test_labels_and_suffixes() {
        assert_eq!(person_label(PersonKey::ErSieEs), "er / sie{{sup}}SIN{{/sup}} / es");
        assert_eq!(person_label(PersonKey::SieSg), "Sie");
        assert_eq!(person_suffix(PersonKey::SieSg), "{{sup}}FOR{{/sup}}");
        assert_eq!(person_suffix(PersonKey::SiePlural), "{{sup}}PLU{{/sup}}");
        assert_eq!(person_suffix(PersonKey::Du), "");
    }
}
