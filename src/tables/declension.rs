//! Declension table grouper
//!
//! Lays out a case section as a grid of four gender column groups, each with
//! Artikel, Adjektiv and Nomen columns, plus an optional annotation column.
//!
//! Layout runs in two phases. `annotate_rows` flattens the groups into one
//! entry per visual row, tagged with its group and position. `row_spans`
//! derives span metadata from those entries alone. Rows are then built from
//! the pair without any running counters.
//!
//! Article cells appear on every row. Adjektiv and Nomen cells appear only on
//! the first row of a group and span the whole group. With ending highlights
//! on, each Adjektiv cell marks where the declined form leaves the base
//! adjective of its gender.

use serde::{Deserialize, Serialize};

use super::{CellRole, CornerHints, GridRow, TableCell};
use crate::models::{
    ArticleGroup, ArticleRow, Case, CaseSection, DeclensionTable, Gender, Locale, NounPhrase, PerGender,
};
use crate::settings::ExportSettings;
use crate::text::HighlightRange;

/// Columns per gender group, and of the annotation column
pub const GROUP_COLUMNS: usize = 3;

/// Cases shown on each printed page
pub const PAGE_CASES: [[Case; 2]; 2] = [
    [Case::Nominativ, Case::Akkusativ],
    [Case::Dativ, Case::Genitiv],
];

/// Field within a gender column group
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum DeclensionField {
    Artikel,
    Adjektiv,
    Nomen,
}

impl DeclensionField {
    pub const ALL: [DeclensionField; 3] = [
        DeclensionField::Artikel,
        DeclensionField::Adjektiv,
        DeclensionField::Nomen,
    ];

    pub fn label(&self, locale: Locale) -> &'static str {
        match (self, locale) {
            (DeclensionField::Artikel, Locale::De) => "Artikel",
            (DeclensionField::Artikel, Locale::En) => "Article",
            (DeclensionField::Adjektiv, Locale::De) => "Adjektiv",
            (DeclensionField::Adjektiv, Locale::En) => "Adjective",
            (DeclensionField::Nomen, Locale::De) => "Nomen",
            (DeclensionField::Nomen, Locale::En) => "Noun",
        }
    }
}

/// Trailing annotation column content
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AnnotationKind {
    /// One cell spanning the whole section
    Prepositions,
    /// One cell per group
    Notes,
}

impl AnnotationKind {
    /// Annotation shown for a case under the given switches, if any
    pub fn for_case(case: Case, settings: &ExportSettings) -> Option<Self> {
        let table = &settings.grammar_table;
        if case.takes_prepositions() && table.show_prepositions {
            Some(AnnotationKind::Prepositions)
        } else if case.takes_notes() && table.show_notes {
            Some(AnnotationKind::Notes)
        } else {
            None
        }
    }

    pub fn label(&self, locale: Locale) -> &'static str {
        match (self, locale) {
            (AnnotationKind::Prepositions, Locale::De) => "Präpositionen",
            (AnnotationKind::Prepositions, Locale::En) => "Prepositions",
            (AnnotationKind::Notes, Locale::De) => "Anmerkungen",
            (AnnotationKind::Notes, Locale::En) => "Notes",
        }
    }
}

// ============================================================================
// Phase 1: annotated row entries
// ============================================================================

/// One visual row, tagged with its position
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RowEntry<'a> {
    pub group_index: usize,
    pub row_in_group: usize,
    /// Visual rows of the owning group, at least 1
    pub row_count: usize,
    pub global_row: usize,
    pub group: &'a ArticleGroup,
    /// `None` for the placeholder row of a group without article rows
    pub row: Option<&'a ArticleRow>,
}

/// Flatten a section's groups into one entry per visual row
pub fn annotate_rows(section: &CaseSection) -> Vec<RowEntry<'_>> {
    section
        .groups
        .iter()
        .enumerate()
        .flat_map(|(group_index, group)| {
            let row_count = group.row_count();
            (0..row_count).map(move |row_in_group| (group_index, row_in_group, row_count, group))
        })
        .enumerate()
        .map(|(global_row, (group_index, row_in_group, row_count, group))| RowEntry {
            group_index,
            row_in_group,
            row_count,
            global_row,
            group,
            row: group.article_rows.get(row_in_group),
        })
        .collect()
}

// ============================================================================
// Phase 2: span metadata
// ============================================================================

/// Span metadata for one visual row
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RowSpan {
    pub first_in_group: bool,
    /// Rowspan of cells anchored on this row's group
    pub group_span: usize,
    pub is_first_row: bool,
    pub is_last_row: bool,
    pub is_last_group: bool,
}

/// Span metadata for each entry, computed from the entries alone
pub fn row_spans(entries: &[RowEntry<'_>]) -> Vec<RowSpan> {
    let total_rows = entries.len();
    let last_group = entries.last().map(|e| e.group_index);

    entries
        .iter()
        .map(|entry| RowSpan {
            first_in_group: entry.row_in_group == 0,
            group_span: entry.row_count,
            is_first_row: entry.global_row == 0,
            is_last_row: entry.global_row + 1 == total_rows,
            is_last_group: Some(entry.group_index) == last_group,
        })
        .collect()
}

// ============================================================================
// Grid assembly
// ============================================================================

/// Laid-out case section
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CaseGrid {
    pub case: Case,

    /// Case label shown above the table
    pub title: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub annotation: Option<AnnotationKind>,

    /// Relative column widths, summing to 1
    pub column_widths: Vec<f64>,

    /// Gender header row and field sub-header row
    pub header: Vec<GridRow>,

    pub rows: Vec<GridRow>,
}

impl CaseGrid {
    /// Sections without groups produce no header and no rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_count(&self) -> usize {
        self.column_widths.len()
    }
}

/// Article/adjective/noun for one gender on one row; a plural override
/// replaces the shared plural pair field by field
fn phrase_for(entry: &RowEntry<'_>, gender: Gender) -> NounPhrase {
    let shared = entry.group.shared.get(gender);
    let override_pair = match gender {
        Gender::Plural => entry.row.and_then(|r| r.plural_override.as_ref()),
        _ => None,
    };

    match override_pair {
        Some(pair) => {
            let pick = |own: &str, fallback: &str| {
                if own.is_empty() { fallback.to_string() } else { own.to_string() }
            };
            NounPhrase::new(
                pick(&pair.adjective, &shared.adjective),
                pick(&pair.noun, &shared.noun),
            )
        }
        None => shared.clone(),
    }
}

/// Ending of `declined` past its common prefix with `base`, compared
/// case-insensitively
///
/// "frisch" and "frische" give `[6, 7)`. Nothing is marked when either side
/// is empty or the declined form adds nothing.
pub fn adjective_ending_range(base: &str, declined: &str) -> Option<HighlightRange> {
    if base.is_empty() || declined.is_empty() {
        return None;
    }

    let common = base
        .chars()
        .flat_map(char::to_lowercase)
        .zip(declined.chars().flat_map(char::to_lowercase))
        .take_while(|(a, b)| a == b)
        .count();
    let len = declined.chars().count();

    (common < len).then_some(HighlightRange { start: common, end: len })
}

fn header_rows(annotation: Option<AnnotationKind>, locale: Locale) -> Vec<GridRow> {
    let last_gender = Gender::ALL.len() - 1;

    let mut groups: Vec<TableCell> = Gender::ALL
        .iter()
        .enumerate()
        .map(|(i, &gender)| {
            TableCell::new(CellRole::Header, gender.label(locale))
                .with_colspan(GROUP_COLUMNS)
                .with_gender(gender)
                .with_corners(CornerHints {
                    top_left: i == 0,
                    top_right: i == last_gender && annotation.is_none(),
                    ..Default::default()
                })
        })
        .collect();

    let mut fields: Vec<TableCell> = Gender::ALL
        .iter()
        .flat_map(|&gender| {
            DeclensionField::ALL
                .iter()
                .map(move |field| TableCell::new(CellRole::SubHeader, field.label(locale)).with_gender(gender))
        })
        .collect();

    if let Some(kind) = annotation {
        groups.push(
            TableCell::new(CellRole::Header, kind.label(locale))
                .with_colspan(GROUP_COLUMNS)
                .with_corners(CornerHints {
                    top_right: true,
                    ..Default::default()
                }),
        );
        fields.push(TableCell::new(CellRole::SubHeader, "").with_colspan(GROUP_COLUMNS));
    }

    vec![GridRow::new(groups), GridRow::new(fields)]
}

fn build_row(
    section: &CaseSection,
    entry: &RowEntry<'_>,
    span: &RowSpan,
    annotation: Option<AnnotationKind>,
    total_rows: usize,
    ending_base: Option<&PerGender<NounPhrase>>,
) -> GridRow {
    let mut cells = Vec::new();

    for gender in Gender::ALL {
        let article = entry.row.map(|r| r.article(gender)).unwrap_or_default();
        cells.push(
            TableCell::new(CellRole::Declension(DeclensionField::Artikel), article)
                .with_gender(gender)
                .with_corners(CornerHints {
                    bottom_left: span.is_last_row && gender == Gender::Maskulin,
                    ..Default::default()
                }),
        );

        if span.first_in_group {
            let phrase = phrase_for(entry, gender);
            let ending = ending_base
                .and_then(|base| adjective_ending_range(&base.get(gender).adjective, &phrase.adjective));
            cells.push(
                TableCell::new(CellRole::Declension(DeclensionField::Adjektiv), phrase.adjective)
                    .with_rowspan(span.group_span)
                    .with_gender(gender)
                    .with_highlights(ending.into_iter().collect()),
            );
            cells.push(
                TableCell::new(CellRole::Declension(DeclensionField::Nomen), phrase.noun)
                    .with_rowspan(span.group_span)
                    .with_gender(gender)
                    .with_corners(CornerHints {
                        bottom_right: gender == Gender::Plural
                            && span.is_last_group
                            && annotation.is_none(),
                        ..Default::default()
                    }),
            );
        }
    }

    match annotation {
        Some(AnnotationKind::Prepositions) if span.is_first_row => {
            cells.push(
                TableCell::new(
                    CellRole::Prepositions,
                    section.preposition_heading.clone().unwrap_or_default(),
                )
                .with_lines(section.prepositions.clone().unwrap_or_default())
                .with_rowspan(total_rows)
                .with_colspan(GROUP_COLUMNS)
                .with_corners(CornerHints {
                    bottom_right: true,
                    ..Default::default()
                }),
            );
        }
        Some(AnnotationKind::Notes) if span.first_in_group => {
            cells.push(
                TableCell::new(CellRole::Note, entry.group.note.clone().unwrap_or_default())
                    .with_rowspan(span.group_span)
                    .with_colspan(GROUP_COLUMNS)
                    .with_corners(CornerHints {
                        bottom_right: span.is_last_group,
                        ..Default::default()
                    }),
            );
        }
        _ => {}
    }

    GridRow::new(cells)
}

/// Lay out one case section
pub fn layout_case_section(section: &CaseSection, settings: &ExportSettings) -> CaseGrid {
    layout_case_section_with_base(section, None, settings)
}

/// Lay out one case section against the table's base adjectives, which
/// ending highlights are measured from
pub fn layout_case_section_with_base(
    section: &CaseSection,
    base: Option<&PerGender<NounPhrase>>,
    settings: &ExportSettings,
) -> CaseGrid {
    let locale = settings.locale;
    let title = section.case.label(locale).to_string();

    if section.groups.is_empty() {
        return CaseGrid {
            case: section.case,
            title,
            annotation: None,
            column_widths: Vec::new(),
            header: Vec::new(),
            rows: Vec::new(),
        };
    }

    for (index, group) in section.groups.iter().enumerate() {
        if group.article_rows.is_empty() {
            log::warn!(
                "{:?} group {} has no article rows; laying it out as one empty row",
                section.case,
                index
            );
        }
    }

    let annotation = AnnotationKind::for_case(section.case, settings);
    let entries = annotate_rows(section);
    let spans = row_spans(&entries);
    let total_rows = entries.len();
    let ending_base = base.filter(|_| settings.grammar_table.highlight_endings);

    let mut rows: Vec<GridRow> = entries
        .iter()
        .zip(&spans)
        .map(|(entry, span)| build_row(section, entry, span, annotation, total_rows, ending_base))
        .collect();

    let mut header = header_rows(annotation, locale);
    if settings.grammar_table.swiss_spelling {
        super::to_swiss_spelling(rows.iter_mut().chain(header.iter_mut()));
    }

    let columns = Gender::ALL.len() * GROUP_COLUMNS + annotation.map_or(0, |_| GROUP_COLUMNS);

    log::debug!(
        "{:?}: {} group(s), {} row(s), {} column(s)",
        section.case,
        section.groups.len(),
        total_rows,
        columns
    );

    CaseGrid {
        case: section.case,
        title,
        annotation,
        column_widths: vec![1.0 / columns as f64; columns],
        header,
        rows,
    }
}

/// One printed page of a declension table
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DeclensionPage {
    pub page_index: usize,
    pub grids: Vec<CaseGrid>,
}

/// Lay out a whole table: Nominativ and Akkusativ on the first page, Dativ
/// and Genitiv on the second. Empty grids and pages are left out.
pub fn layout_declension_table(table: &DeclensionTable, settings: &ExportSettings) -> Vec<DeclensionPage> {
    PAGE_CASES
        .iter()
        .map(|cases| {
            cases
                .iter()
                .filter_map(|&case| table.section(case))
                .map(|section| layout_case_section_with_base(section, Some(&table.input), settings))
                .filter(|grid| !grid.is_empty())
                .collect::<Vec<_>>()
        })
        .filter(|grids| !grids.is_empty())
        .enumerate()
        .map(|(page_index, grids)| DeclensionPage { page_index, grids })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ArticleKind;

    fn row(m: &str, n: &str, f: &str, p: &str) -> ArticleRow {
        ArticleRow {
            maskulin: m.into(),
            neutrum: n.into(),
            feminin: f.into(),
            plural: p.into(),
            plural_override: None,
        }
    }

    fn shared() -> PerGender<NounPhrase> {
        PerGender {
            maskulin: NounPhrase::new("gute", "Wein"),
            neutrum: NounPhrase::new("gute", "Bier"),
            feminin: NounPhrase::new("gute", "Milch"),
            plural: NounPhrase::new("guten", "Säfte"),
        }
    }

    fn nominativ() -> CaseSection {
        let mut section = CaseSection::new(Case::Nominativ);
        section.groups = vec![
            ArticleGroup {
                kind: ArticleKind::Definite,
                shared: shared(),
                article_rows: vec![row("der", "das", "die", "die"), row("dieser", "dieses", "diese", "diese")],
                note: Some("bestimmt".into()),
            },
            ArticleGroup {
                kind: ArticleKind::Zero,
                shared: shared(),
                article_rows: Vec::new(),
                note: None,
            },
        ];
        section
    }

    fn cells_with(grid: &CaseGrid, role: CellRole, gender: Gender) -> Vec<&TableCell> {
        grid.rows
            .iter()
            .flat_map(|r| &r.cells)
            .filter(|c| c.role == role && c.gender == Some(gender))
            .collect()
    }

    #[test]
    fn test_annotate_rows_flattens_groups() {
        let section = nominativ();
        let entries = annotate_rows(&section);
        assert_eq!(entries.len(), 3);
        assert_eq!(
            entries.iter().map(|e| (e.group_index, e.row_in_group, e.global_row)).collect::<Vec<_>>(),
            vec![(0, 0, 0), (0, 1, 1), (1, 0, 2)]
        );
        assert!(entries[2].row.is_none());
        assert_eq!(entries[2].row_count, 1);
    }

    #[test]
    fn test_row_spans() {
        let section = nominativ();
        let spans = row_spans(&annotate_rows(&section));
        assert!(spans[0].first_in_group && spans[0].is_first_row);
        assert_eq!(spans[0].group_span, 2);
        assert!(!spans[1].first_in_group && !spans[1].is_last_group);
        assert!(spans[2].is_last_row && spans[2].is_last_group);
    }

    #[test]
    fn test_rowspan_cells_once_per_group() {
        let grid = layout_case_section(&nominativ(), &ExportSettings::default());

        for gender in Gender::ALL {
            let adjectives = cells_with(&grid, CellRole::Declension(DeclensionField::Adjektiv), gender);
            assert_eq!(adjectives.len(), 2);
            assert_eq!(adjectives[0].rowspan, 2);
            assert_eq!(adjectives[1].rowspan, 1);
            assert_eq!(cells_with(&grid, CellRole::Declension(DeclensionField::Artikel), gender).len(), 3);
        }
    }

    #[test]
    fn test_notes_column_per_group() {
        let grid = layout_case_section(&nominativ(), &ExportSettings::default());
        assert_eq!(grid.annotation, Some(AnnotationKind::Notes));
        assert_eq!(grid.column_count(), 15);

        let notes: Vec<_> = grid.rows.iter().flat_map(|r| &r.cells).filter(|c| c.role == CellRole::Note).collect();
        assert_eq!(notes.len(), 2);
        assert_eq!(notes[0].text, "bestimmt");
        assert_eq!((notes[0].rowspan, notes[0].colspan), (2, 3));
        assert!(notes[1].corners.bottom_right);
        assert_eq!(grid.header[0].cells.last().unwrap().text, "Anmerkungen");
    }

    #[test]
    fn test_notes_switched_off() {
        let mut settings = ExportSettings::default();
        settings.grammar_table.show_notes = false;
        let grid = layout_case_section(&nominativ(), &settings);

        assert_eq!(grid.annotation, None);
        assert_eq!(grid.column_widths, vec![1.0 / 12.0; 12]);
        let plural_nouns = cells_with(&grid, CellRole::Declension(DeclensionField::Nomen), Gender::Plural);
        assert!(plural_nouns.last().unwrap().corners.bottom_right);
        assert!(grid.header[0].cells[3].corners.top_right);
    }

    #[test]
    fn test_prepositions_span_whole_section() {
        let mut section = nominativ();
        section.case = Case::Akkusativ;
        section.preposition_heading = Some("mit Akkusativ".into());
        section.prepositions = Some(vec!["durch".into(), "für".into()]);

        let grid = layout_case_section(&section, &ExportSettings::default());
        let preps: Vec<_> = grid
            .rows
            .iter()
            .flat_map(|r| &r.cells)
            .filter(|c| c.role == CellRole::Prepositions)
            .collect();

        assert_eq!(preps.len(), 1);
        assert_eq!(preps[0].rowspan, 3);
        assert_eq!(preps[0].text, "mit Akkusativ");
        assert_eq!(preps[0].lines, vec!["durch", "für"]);
        assert_eq!(grid.rows[0].cells.last().unwrap().role, CellRole::Prepositions);
    }

    #[test]
    fn test_plural_override_on_anchor_row() {
        let mut section = nominativ();
        section.groups[0].article_rows[0].plural_override = Some(NounPhrase::new("", "Weine"));

        let grid = layout_case_section(&section, &ExportSettings::default());
        let plural_nouns = cells_with(&grid, CellRole::Declension(DeclensionField::Nomen), Gender::Plural);
        let plural_adjs = cells_with(&grid, CellRole::Declension(DeclensionField::Adjektiv), Gender::Plural);
        assert_eq!(plural_nouns[0].text, "Weine");
        assert_eq!(plural_adjs[0].text, "guten");
        // maskulin is never overridden
        let masc = cells_with(&grid, CellRole::Declension(DeclensionField::Nomen), Gender::Maskulin);
        assert_eq!(masc[0].text, "Wein");
    }

    #[test]
    fn test_empty_section_is_empty_grid() {
        let grid = layout_case_section(&CaseSection::new(Case::Dativ), &ExportSettings::default());
        assert!(grid.is_empty());
        assert!(grid.header.is_empty());
    }

    #[test]
    fn test_pages_skip_empty_sections() {
        let table = DeclensionTable {
            input: shared(),
            cases: vec![nominativ(), CaseSection::new(Case::Akkusativ), CaseSection::new(Case::Dativ)],
        };
        let pages = layout_declension_table(&table, &ExportSettings::default());
        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].grids.len(), 1);
        assert_eq!(pages[0].grids[0].case, Case::Nominativ);
    }

    #[test]
    fn test_adjective_ending_range() {
        assert_eq!(adjective_ending_range("frisch", "frische"), Some(HighlightRange { start: 6, end: 7 }));
        assert_eq!(adjective_ending_range("dunkel", "dunklen"), Some(HighlightRange { start: 4, end: 7 }));
        assert_eq!(adjective_ending_range("Gut", "guten"), Some(HighlightRange { start: 3, end: 5 }));
        assert_eq!(adjective_ending_range("süß", "süße"), Some(HighlightRange { start: 3, end: 4 }));
        assert_eq!(adjective_ending_range("gut", "gut"), None);
        assert_eq!(adjective_ending_range("", "gute"), None);
    }

    #[test]
    fn test_ending_highlights_follow_setting() {
        let table = DeclensionTable {
            input: PerGender {
                maskulin: NounPhrase::new("gut", "Wein"),
                neutrum: NounPhrase::new("gut", "Bier"),
                feminin: NounPhrase::new("gut", "Milch"),
                plural: NounPhrase::new("gut", "Säfte"),
            },
            cases: vec![nominativ()],
        };

        let plain = layout_declension_table(&table, &ExportSettings::default());
        assert!(plain[0].grids[0].rows.iter().flat_map(|r| &r.cells).all(|c| c.highlights.is_empty()));

        let mut settings = ExportSettings::default();
        settings.grammar_table.highlight_endings = true;
        let marked = layout_declension_table(&table, &settings);
        let grid = &marked[0].grids[0];
        let masc = cells_with(grid, CellRole::Declension(DeclensionField::Adjektiv), Gender::Maskulin);
        assert_eq!(masc[0].highlights, vec![HighlightRange { start: 3, end: 4 }]);
        let plural = cells_with(grid, CellRole::Declension(DeclensionField::Adjektiv), Gender::Plural);
        assert_eq!(plural[0].highlights, vec![HighlightRange { start: 3, end: 5 }]);
        let nouns = cells_with(grid, CellRole::Declension(DeclensionField::Nomen), Gender::Maskulin);
        assert!(nouns[0].highlights.is_empty());

        // a lone section has no base adjectives to measure against
        let section = layout_case_section(&nominativ(), &settings);
        assert!(section.rows.iter().flat_map(|r| &r.cells).all(|c| c.highlights.is_empty()));
    }

    #[test]
    fn test_swiss_spelling_in_cells() {
        let mut section = nominativ();
        section.groups[0].shared.feminin = NounPhrase::new("große", "Straße");
        let mut settings = ExportSettings::default();
        settings.grammar_table.swiss_spelling = true;
        settings.grammar_table.highlight_endings = true;

        let base = PerGender {
            feminin: NounPhrase::new("groß", ""),
            ..Default::default()
        };
        let grid = layout_case_section_with_base(&section, Some(&base), &settings);
        let adj = cells_with(&grid, CellRole::Declension(DeclensionField::Adjektiv), Gender::Feminin);
        assert_eq!(adj[0].text, "grosse");
        assert_eq!(adj[0].highlights, vec![HighlightRange { start: 5, end: 6 }]);
        let noun = cells_with(&grid, CellRole::Declension(DeclensionField::Nomen), Gender::Feminin);
        assert_eq!(noun[0].text, "Strasse");
    }
}
