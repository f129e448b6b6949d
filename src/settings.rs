//! Export settings
//!
//! Mirrors the settings JSON the editor stores next to each document. Missing
//! fields take their defaults, so partial documents are accepted as-is.
//! Unknown fields are ignored; older documents still carry a `cardsPerPage`
//! value, which is always derived from the grid instead.

use serde::{Deserialize, Serialize};

use crate::cards::GridSpec;
use crate::error::{LayoutError, Result};
use crate::models::{Locale, Tense};

/// Grammar table export switches
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct GrammarTableSettings {
    /// Notes column on Nominativ/Genitiv
    pub show_notes: bool,
    /// Prepositions column on Akkusativ/Dativ
    pub show_prepositions: bool,
    /// Emphasize irregular ranges in conjugation cells
    pub show_irregular_highlights: bool,
    /// Emphasize the declined ending of each adjective
    pub highlight_endings: bool,
    /// Up to three verbs side by side, one table per selected tense
    pub simplified: bool,
    pub simplified_tenses: TenseSelection,
    /// Pad the verb list with blank tables for students to fill in
    pub insert_empty_tables: bool,
    /// Swiss spelling: every ß is printed as ss
    pub swiss_spelling: bool,
}

impl Default for GrammarTableSettings {
    fn default() -> Self {
        Self {
            show_notes: true,
            show_prepositions: true,
            show_irregular_highlights: false,
            highlight_endings: false,
            simplified: false,
            simplified_tenses: TenseSelection::default(),
            insert_empty_tables: false,
            swiss_spelling: false,
        }
    }
}

/// Tenses switched on for simplified conjugation tables
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(default)]
pub struct TenseSelection {
    pub praesens: bool,
    pub perfekt: bool,
    pub praeteritum: bool,
}

impl Default for TenseSelection {
    fn default() -> Self {
        Self {
            praesens: true,
            perfekt: false,
            praeteritum: false,
        }
    }
}

impl TenseSelection {
    pub fn contains(&self, tense: Tense) -> bool {
        match tense {
            Tense::Praesens => self.praesens,
            Tense::Perfekt => self.perfekt,
            Tense::Praeteritum => self.praeteritum,
        }
    }

    /// Selected tenses in display order
    pub fn tenses(&self) -> Vec<Tense> {
        Tense::ALL.iter().copied().filter(|&t| self.contains(t)).collect()
    }
}

/// Flashcard export switches
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct FlashcardSettings {
    /// Re-pad separator groups to page boundaries; when off separators are dropped
    pub pad_groups: bool,
}

impl Default for FlashcardSettings {
    fn default() -> Self {
        Self { pad_groups: true }
    }
}

/// Everything one export request needs
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct ExportSettings {
    pub locale: Locale,
    pub grammar_table: GrammarTableSettings,
    pub flashcards: FlashcardSettings,
    pub grid: GridSpec,
}

impl ExportSettings {
    /// Parse a JSON settings document
    pub fn from_json(json: &str) -> Result<Self> {
        let settings: Self =
            serde_json::from_str(json).map_err(|e| LayoutError::Settings(e.to_string()))?;
        settings.validated()
    }

    /// Parse a YAML settings document
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let settings: Self =
            serde_yaml::from_str(yaml).map_err(|e| LayoutError::Settings(e.to_string()))?;
        settings.validated()
    }

    /// Reject grids too small to hold a card
    pub fn validated(self) -> Result<Self> {
        let capacity = self.grid.validate()?;
        log::debug!("{}x{} grid, {} card(s) per page", self.grid.rows, self.grid.cols, capacity);
        Ok(self)
    }

    /// Cards per page: every grid cell except the reserved one
    pub fn cards_per_page(&self) -> usize {
        self.grid.capacity()
    }
}
