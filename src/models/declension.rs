//! Adjective declension data model
//!
//! A table holds one `CaseSection` per grammatical case. Each section is an
//! ordered list of article groups; rows inside a group share the group's
//! adjective and noun, except that a row may override the plural pair.

use serde::{Deserialize, Serialize};

use super::conjugation::Locale;

/// German grammatical cases
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Case {
    Nominativ,
    Akkusativ,
    Dativ,
    Genitiv,
}

impl Case {
    pub const ALL: [Case; 4] = [Case::Nominativ, Case::Akkusativ, Case::Dativ, Case::Genitiv];

    /// Prepositions apply to Akkusativ and Dativ
    pub fn takes_prepositions(&self) -> bool {
        matches!(self, Case::Akkusativ | Case::Dativ)
    }

    /// Notes apply to Nominativ and Genitiv
    pub fn takes_notes(&self) -> bool {
        matches!(self, Case::Nominativ | Case::Genitiv)
    }

    pub fn label(&self, locale: Locale) -> &'static str {
        match (self, locale) {
            (Case::Nominativ, Locale::De) => "Nominativ",
            (Case::Nominativ, Locale::En) => "Nominative",
            (Case::Akkusativ, Locale::De) => "Akkusativ",
            (Case::Akkusativ, Locale::En) => "Accusative",
            (Case::Dativ, Locale::De) => "Dativ",
            (Case::Dativ, Locale::En) => "Dative",
            (Case::Genitiv, Locale::De) => "Genitiv",
            (Case::Genitiv, Locale::En) => "Genitive",
        }
    }
}

/// Grammatical genders plus plural, in column order
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Maskulin,
    Neutrum,
    Feminin,
    Plural,
}

impl Gender {
    pub const ALL: [Gender; 4] = [Gender::Maskulin, Gender::Neutrum, Gender::Feminin, Gender::Plural];

    pub fn label(&self, locale: Locale) -> &'static str {
        match (self, locale) {
            (Gender::Maskulin, Locale::De) => "Maskulin",
            (Gender::Maskulin, Locale::En) => "Masculine",
            (Gender::Neutrum, Locale::De) => "Neutrum",
            (Gender::Neutrum, Locale::En) => "Neuter",
            (Gender::Feminin, Locale::De) => "Feminin",
            (Gender::Feminin, Locale::En) => "Feminine",
            (Gender::Plural, _) => "Plural",
        }
    }
}

/// Adjective + noun pair
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Default)]
#[serde(default)]
pub struct NounPhrase {
    pub adjective: String,
    pub noun: String,
}

impl NounPhrase {
    pub fn new(adjective: impl Into<String>, noun: impl Into<String>) -> Self {
        Self {
            adjective: adjective.into(),
            noun: noun.into(),
        }
    }
}

/// One value per gender column
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Default)]
pub struct PerGender<T> {
    #[serde(default)]
    pub maskulin: T,
    #[serde(default)]
    pub neutrum: T,
    #[serde(default)]
    pub feminin: T,
    #[serde(default)]
    pub plural: T,
}

impl<T> PerGender<T> {
    pub fn get(&self, gender: Gender) -> &T {
        match gender {
            Gender::Maskulin => &self.maskulin,
            Gender::Neutrum => &self.neutrum,
            Gender::Feminin => &self.feminin,
            Gender::Plural => &self.plural,
        }
    }
}

/// Article variant row of a group
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct ArticleRow {
    pub maskulin: String,
    pub neutrum: String,
    pub feminin: String,
    pub plural: String,
    /// Replaces the group's shared plural pair for this row
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plural_override: Option<NounPhrase>,
}

impl ArticleRow {
    pub fn article(&self, gender: Gender) -> &str {
        match gender {
            Gender::Maskulin => &self.maskulin,
            Gender::Neutrum => &self.neutrum,
            Gender::Feminin => &self.feminin,
            Gender::Plural => &self.plural,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ArticleKind {
    #[default]
    Definite,
    Indefinite,
    Zero,
}

/// Rows sharing one adjective/noun pair per gender
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct ArticleGroup {
    #[serde(rename = "type")]
    pub kind: ArticleKind,
    pub shared: PerGender<NounPhrase>,
    pub article_rows: Vec<ArticleRow>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl ArticleGroup {
    /// Visual rows this group occupies; a group without rows still takes one
    pub fn row_count(&self) -> usize {
        self.article_rows.len().max(1)
    }
}

/// One case of the declension table
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CaseSection {
    pub case: Case,
    #[serde(default)]
    pub groups: Vec<ArticleGroup>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preposition_heading: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prepositions: Option<Vec<String>>,
}

impl CaseSection {
    pub fn new(case: Case) -> Self {
        Self {
            case,
            groups: Vec::new(),
            preposition_heading: None,
            prepositions: None,
        }
    }

    /// Sum of group row counts
    pub fn total_rows(&self) -> usize {
        self.groups.iter().map(ArticleGroup::row_count).sum()
    }
}

/// Complete adjective declension table
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Default)]
#[serde(default)]
pub struct DeclensionTable {
    pub input: PerGender<NounPhrase>,
    pub cases: Vec<CaseSection>,
}

impl DeclensionTable {
    pub fn section(&self, case: Case) -> Option<&CaseSection> {
        self.cases.iter().find(|c| c.case == case)
    }
}
