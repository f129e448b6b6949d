//! Grammar table layout
//!
//! Both table engines produce the same output shape: rows of positioned
//! cells carrying rowspan/colspan, column-group tags and corner hints. A
//! renderer turns these into markup without any layout decisions of its own.
//!
//! ## Modules
//!
//! - `declension`: Adjective declension grids with grouped rowspans
//! - `conjugation`: Verb conjugation grids with per-tense column plans
//! - `simplified`: Side-by-side verb grids for one tense, and blank-table padding

pub mod conjugation;
pub mod declension;
pub mod simplified;

use serde::{Deserialize, Serialize};

use crate::models::{Gender, Tense};
use crate::text::{swiss_spelling, swiss_spelling_with_ranges, HighlightRange};
use crate::verbs::FormRole;

pub use conjugation::{
    layout_conjugation_table, plan_columns, ColumnCount, ColumnPlan, ConjugationGrid, TenseColumns,
};
pub use declension::{
    adjective_ending_range, annotate_rows, layout_case_section, layout_case_section_with_base,
    layout_declension_table, row_spans, AnnotationKind, CaseGrid, DeclensionField, DeclensionPage, RowEntry,
    RowSpan,
};
pub use simplified::{
    layout_conjugation_tables, layout_simplified_tables, pad_with_empty_tables, ConjugationDocument,
    SimplifiedGrid, SimplifiedLayout,
};

/// Rounded outer corners of a table, as presentation hints
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CornerHints {
    pub top_left: bool,
    pub top_right: bool,
    pub bottom_left: bool,
    pub bottom_right: bool,
}

impl CornerHints {
    pub fn is_none(&self) -> bool {
        *self == Self::default()
    }
}

/// What a cell shows
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum CellRole {
    /// Column-group header (gender, tense, annotation)
    Header,
    /// Field header under a column group
    SubHeader,
    /// Full-width section divider (SINGULAR / PLURAL)
    Section,
    /// "1. Person"
    Person,
    Formality,
    Pronoun,
    /// Declension field
    Declension(DeclensionField),
    /// Conjugation field
    Form(FormRole),
    /// Third person singular Perfekt and Präteritum under a verb's name
    KeyForms,
    Prepositions,
    Note,
}

/// A single table cell with all rendering information
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TableCell {
    pub role: CellRole,

    /// Display text
    pub text: String,

    /// Additional lines below the text (preposition lists)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub lines: Vec<String>,

    pub rowspan: usize,
    pub colspan: usize,

    /// Gender column group, for per-gender styling
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<Gender>,

    /// Tense column group, for per-tense styling
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tense: Option<Tense>,

    /// Position of the verb in a side-by-side table, for per-verb colors
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verb_slot: Option<usize>,

    #[serde(default, skip_serializing_if = "CornerHints::is_none")]
    pub corners: CornerHints,

    /// Validated emphasis ranges into `text`
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub highlights: Vec<HighlightRange>,
}

impl TableCell {
    pub fn new(role: CellRole, text: impl Into<String>) -> Self {
        Self {
            role,
            text: text.into(),
            lines: Vec::new(),
            rowspan: 1,
            colspan: 1,
            gender: None,
            tense: None,
            verb_slot: None,
            corners: CornerHints::default(),
            highlights: Vec::new(),
        }
    }

    pub fn with_rowspan(mut self, rowspan: usize) -> Self {
        self.rowspan = rowspan;
        self
    }

    pub fn with_colspan(mut self, colspan: usize) -> Self {
        self.colspan = colspan;
        self
    }

    pub fn with_gender(mut self, gender: Gender) -> Self {
        self.gender = Some(gender);
        self
    }

    pub fn with_tense(mut self, tense: Tense) -> Self {
        self.tense = Some(tense);
        self
    }

    pub fn with_verb_slot(mut self, slot: usize) -> Self {
        self.verb_slot = Some(slot);
        self
    }

    pub fn with_lines(mut self, lines: Vec<String>) -> Self {
        self.lines = lines;
        self
    }

    pub fn with_corners(mut self, corners: CornerHints) -> Self {
        self.corners = corners;
        self
    }

    pub fn with_highlights(mut self, highlights: Vec<HighlightRange>) -> Self {
        self.highlights = highlights;
        self
    }

    /// Rewrite text and lines in Swiss spelling, keeping highlights aligned
    pub fn to_swiss_spelling(&mut self) {
        let (text, highlights) = swiss_spelling_with_ranges(&self.text, &self.highlights);
        self.text = text;
        self.highlights = highlights;
        for line in &mut self.lines {
            *line = swiss_spelling(line);
        }
    }
}

/// One rendered table row
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Default)]
pub struct GridRow {
    pub cells: Vec<TableCell>,
}

impl GridRow {
    pub fn new(cells: Vec<TableCell>) -> Self {
        Self { cells }
    }

    /// Columns this row starts, counting colspans
    pub fn span_width(&self) -> usize {
        self.cells.iter().map(|c| c.colspan).sum()
    }
}

/// Swiss spelling over every cell of `rows`
pub fn to_swiss_spelling<'a>(rows: impl IntoIterator<Item = &'a mut GridRow>) {
    for row in rows {
        row.cells.iter_mut().for_each(TableCell::to_swiss_spelling);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_swiss_spelling_moves_highlights() {
        let mut row = GridRow::new(vec![
            TableCell::new(CellRole::Form(FormRole::Main), "aßen").with_highlights(vec![HighlightRange {
                start: 0,
                end: 2,
            }]),
            TableCell::new(CellRole::Prepositions, "").with_lines(vec!["außer".into(), "mit".into()]),
        ]);
        to_swiss_spelling([&mut row]);

        assert_eq!(row.cells[0].text, "assen");
        assert_eq!(row.cells[0].highlights, vec![HighlightRange { start: 0, end: 3 }]);
        assert_eq!(row.cells[1].lines, vec!["ausser", "mit"]);
    }
}
