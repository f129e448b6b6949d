//! Simplified conjugation tables
//!
//! Instead of one table per verb with every tense, a simplified export prints
//! one table per selected tense with up to three verbs side by side. Each
//! verb column group is headed by its infinitive and a line with the third
//! person singular Perfekt and Präteritum forms. All eight person rows are
//! shown; third-person-only verbs leave the other rows blank.
//!
//! Either export can be padded with blank tables so students get empty
//! tables to fill in and the last printed page is full.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};

use super::conjugation::{
    layout_conjugation_table, plan_tense, section_label, ConjugationGrid, TenseColumns, LEAD_COLUMNS,
    LEAD_WIDTHS, TENSE_AREA_WIDTH,
};
use super::{CellRole, CornerHints, GridRow, TableCell};
use crate::error::Result;
use crate::models::{Locale, PersonKey, Tense, VerbConjugationTable};
use crate::settings::ExportSettings;
use crate::text::swiss_spelling;
use crate::verbs::persons::{row_def, NumberSection};
use crate::verbs::FormRole;

/// Verbs side by side in one simplified table
pub const VERBS_PER_TABLE: usize = 3;

/// Full tables are padded to a multiple of this
pub const FULL_PAD_MULTIPLE: usize = 6;

/// Simplified tables are padded to a multiple of this, two pages' worth
pub const SIMPLIFIED_PAD_MULTIPLE: usize = 12;

/// Append blank tables until the count is a whole multiple of the page fill
/// for the mode. A list that already fills its pages is returned as-is.
pub fn pad_with_empty_tables(tables: &[VerbConjugationTable], simplified: bool) -> Vec<VerbConjugationTable> {
    let multiple = if simplified {
        SIMPLIFIED_PAD_MULTIPLE
    } else {
        FULL_PAD_MULTIPLE
    };

    let mut padded = tables.to_vec();
    let remainder = tables.len() % multiple;
    if remainder != 0 {
        padded.extend(std::iter::repeat_with(VerbConjugationTable::blank).take(multiple - remainder));
    }
    padded
}

/// One tense for up to three verbs
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SimplifiedGrid {
    pub tense: Tense,

    /// Infinitives, left to right
    pub verbs: Vec<String>,

    /// Sub-columns of each verb
    pub per_verb: Vec<TenseColumns>,

    /// Absolute column widths in percent. Every verb gets a third of the
    /// tense area, so a table with fewer verbs is narrower.
    pub column_widths: Vec<f64>,

    /// Infinitive row and key forms row
    pub header: Vec<GridRow>,

    /// Section rows and person rows, top to bottom
    pub rows: Vec<GridRow>,
}

impl SimplifiedGrid {
    pub fn total_columns(&self) -> usize {
        LEAD_COLUMNS + self.per_verb.iter().map(|c| c.count.get()).sum::<usize>()
    }
}

/// All simplified tables of an export, tense by tense
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SimplifiedLayout {
    /// Running page header naming the tenses shown
    pub label: String,
    pub grids: Vec<SimplifiedGrid>,
}

/// Laid-out conjugation export in either mode
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(tag = "mode", rename_all = "camelCase")]
pub enum ConjugationDocument {
    Full { grids: Vec<ConjugationGrid> },
    Simplified(SimplifiedLayout),
}

impl ConjugationDocument {
    pub fn grid_count(&self) -> usize {
        match self {
            ConjugationDocument::Full { grids } => grids.len(),
            ConjugationDocument::Simplified(layout) => layout.grids.len(),
        }
    }
}

/// "3. Person Singular" Perfekt with the reflexive, then Präteritum with the
/// reflexive and the separated prefix, joined by " | "
fn key_forms(table: &VerbConjugationTable) -> String {
    let sich = table.is_reflexive.then_some("sich");
    let join = |parts: [Option<&str>; 3]| parts.into_iter().flatten().collect::<Vec<_>>().join(" ");

    let perfekt = table
        .get(PersonKey::ErSieEs, Tense::Perfekt)
        .map(|c| join([FormRole::Auxiliary.field(c), sich, FormRole::Partizip.field(c)]));
    let praeteritum = table
        .get(PersonKey::ErSieEs, Tense::Praeteritum)
        .map(|c| join([FormRole::Main.field(c), sich, FormRole::Prefix.field(c)]));

    [perfekt, praeteritum]
        .into_iter()
        .flatten()
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(" | ")
}

fn key_forms_label(tenses: &[Tense], locale: Locale) -> String {
    let names = tenses.iter().map(|t| t.label(locale)).collect::<Vec<_>>().join(" · ");
    match locale {
        Locale::De => format!("{} | 3. Person Singular Perfekt und Präteritum", names),
        Locale::En => format!("{} | 3rd person singular Perfect and Past", names),
    }
}

fn header_rows(tables: &[VerbConjugationTable], columns: &[TenseColumns], tense: Tense) -> Vec<GridRow> {
    let last = tables.len().saturating_sub(1);
    let lead = |top_left: bool| {
        TableCell::new(CellRole::Header, "")
            .with_colspan(LEAD_COLUMNS)
            .with_corners(CornerHints {
                top_left,
                ..Default::default()
            })
    };

    let mut names = vec![lead(true)];
    let mut forms = vec![lead(false)];
    for (slot, (table, plan)) in tables.iter().zip(columns).enumerate() {
        names.push(
            TableCell::new(CellRole::Header, table.verb())
                .with_colspan(plan.count.get())
                .with_tense(tense)
                .with_verb_slot(slot)
                .with_corners(CornerHints {
                    top_right: slot == last,
                    ..Default::default()
                }),
        );
        forms.push(
            TableCell::new(CellRole::KeyForms, key_forms(table))
                .with_colspan(plan.count.get())
                .with_verb_slot(slot),
        );
    }

    vec![GridRow::new(names), GridRow::new(forms)]
}

fn person_row(
    tables: &[VerbConjugationTable],
    columns: &[TenseColumns],
    tense: Tense,
    person: PersonKey,
    is_last_row: bool,
    show_highlights: bool,
) -> Result<GridRow> {
    let def = row_def(person);
    let mut cells = vec![
        TableCell::new(CellRole::Person, format!("{}. Person", def.person)).with_corners(CornerHints {
            bottom_left: is_last_row,
            ..Default::default()
        }),
        TableCell::new(CellRole::Formality, def.formality.map(|f| f.label()).unwrap_or_default()),
        TableCell::new(CellRole::Pronoun, def.pronoun),
    ];

    let last_slot = tables.len().saturating_sub(1);
    for (slot, (table, plan)) in tables.iter().zip(columns).enumerate() {
        let conj = if table.third_person_only && !person.is_third_person() {
            None
        } else {
            Some(table.conjugation(person, tense)?)
        };
        let last_role = plan.roles.len().saturating_sub(1);

        for (role_index, role) in plan.roles.iter().enumerate() {
            let (text, highlights) = match conj {
                Some(conj) if show_highlights => (
                    role.field(conj).unwrap_or_default(),
                    role.highlight_set(conj)?.ranges().to_vec(),
                ),
                Some(conj) => (role.field(conj).unwrap_or_default(), Vec::new()),
                None => ("", Vec::new()),
            };

            cells.push(
                TableCell::new(CellRole::Form(*role), text)
                    .with_tense(tense)
                    .with_verb_slot(slot)
                    .with_highlights(highlights)
                    .with_corners(CornerHints {
                        bottom_right: is_last_row && slot == last_slot && role_index == last_role,
                        ..Default::default()
                    }),
            );
        }
    }

    Ok(GridRow::new(cells))
}

fn layout_grid(tables: &[VerbConjugationTable], tense: Tense, settings: &ExportSettings) -> Result<SimplifiedGrid> {
    let per_verb: Vec<TenseColumns> = tables.iter().map(|t| plan_tense(tense, t.flags())).collect();
    let total_columns = LEAD_COLUMNS + per_verb.iter().map(|c| c.count.get()).sum::<usize>();
    let show_highlights = settings.grammar_table.show_irregular_highlights;

    let share = TENSE_AREA_WIDTH / VERBS_PER_TABLE as f64;
    let column_widths = LEAD_WIDTHS
        .iter()
        .copied()
        .chain(per_verb.iter().flat_map(|c| c.widths.iter().map(move |w| share * w)))
        .collect();

    let mut rows = Vec::with_capacity(PersonKey::ALL.len() + 2);
    for section in [NumberSection::Singular, NumberSection::Plural] {
        rows.push(GridRow::new(vec![
            TableCell::new(CellRole::Section, section_label(section)).with_colspan(total_columns)
        ]));
        for person in PersonKey::ALL.iter().copied().filter(|&p| row_def(p).section == section) {
            let is_last_row = Some(&person) == PersonKey::ALL.last();
            rows.push(person_row(tables, &per_verb, tense, person, is_last_row, show_highlights)?);
        }
    }

    let mut header = header_rows(tables, &per_verb, tense);
    let mut verbs: Vec<String> = tables.iter().map(|t| t.verb().to_string()).collect();
    if settings.grammar_table.swiss_spelling {
        super::to_swiss_spelling(rows.iter_mut().chain(header.iter_mut()));
        verbs = verbs.iter().map(|v| swiss_spelling(v)).collect();
    }

    Ok(SimplifiedGrid {
        tense,
        verbs,
        per_verb,
        column_widths,
        header,
        rows,
    })
}

/// Lay out simplified tables: for every selected tense, the verbs in groups
/// of three, in list order
pub fn layout_simplified_tables(
    tables: &[VerbConjugationTable],
    settings: &ExportSettings,
) -> Result<SimplifiedLayout> {
    let tenses = settings.grammar_table.simplified_tenses.tenses();
    if tenses.is_empty() {
        log::warn!("simplified export with no tense selected; no tables laid out");
    }

    let mut grids = Vec::with_capacity(tenses.len() * tables.len().div_ceil(VERBS_PER_TABLE));
    for &tense in &tenses {
        for chunk in tables.chunks(VERBS_PER_TABLE) {
            grids.push(layout_grid(chunk, tense, settings)?);
        }
    }

    log::debug!(
        "simplified: {} verb(s), {} tense(s), {} table(s)",
        tables.len(),
        tenses.len(),
        grids.len()
    );

    Ok(SimplifiedLayout {
        label: key_forms_label(&tenses, settings.locale),
        grids,
    })
}

/// Lay out every verb of an export in the mode the settings ask for,
/// padded with blank tables when `insertEmptyTables` is on
pub fn layout_conjugation_tables(
    tables: &[VerbConjugationTable],
    settings: &ExportSettings,
) -> Result<ConjugationDocument> {
    let grammar = &settings.grammar_table;
    let tables: Cow<'_, [VerbConjugationTable]> = if grammar.insert_empty_tables {
        Cow::Owned(pad_with_empty_tables(tables, grammar.simplified))
    } else {
        Cow::Borrowed(tables)
    };

    if grammar.simplified {
        return Ok(ConjugationDocument::Simplified(layout_simplified_tables(&tables, settings)?));
    }

    let grids = tables
        .iter()
        .map(|table| layout_conjugation_table(table, settings))
        .collect::<Result<Vec<_>>>()?;
    Ok(ConjugationDocument::Full { grids })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LayoutError;
    use crate::models::{PersonConjugations, TenseConjugation, TenseHighlights, VerbInput};

    fn form(main: &str) -> Option<TenseConjugation> {
        Some(TenseConjugation {
            main: main.into(),
            ..Default::default()
        })
    }

    /// "sich waschen" with every person filled the same way
    fn waschen() -> VerbConjugationTable {
        let record = PersonConjugations {
            praesens: Some(TenseConjugation {
                main: "wäscht".into(),
                reflexive: Some("sich".into()),
                highlights: Some(TenseHighlights {
                    main: Some(vec![(1, 2)]),
                    ..Default::default()
                }),
                ..Default::default()
            }),
            perfekt: Some(TenseConjugation {
                auxiliary: Some("hat".into()),
                reflexive: Some("sich".into()),
                partizip: Some("gewaschen".into()),
                ..Default::default()
            }),
            praeteritum: Some(TenseConjugation {
                main: "wusch".into(),
                reflexive: Some("sich".into()),
                ..Default::default()
            }),
        };
        VerbConjugationTable {
            input: VerbInput { verb: "sich waschen".into() },
            is_reflexive: true,
            conjugations: PersonKey::ALL.iter().map(|&p| (p, record.clone())).collect(),
            ..Default::default()
        }
    }

    fn regnen() -> VerbConjugationTable {
        let record = PersonConjugations {
            praesens: form("regnet"),
            perfekt: Some(TenseConjugation {
                auxiliary: Some("hat".into()),
                partizip: Some("geregnet".into()),
                ..Default::default()
            }),
            praeteritum: form("regnete"),
        };
        VerbConjugationTable {
            input: VerbInput { verb: "regnen".into() },
            third_person_only: true,
            conjugations: PersonKey::THIRD_PERSON.iter().map(|&p| (p, record.clone())).collect(),
            ..Default::default()
        }
    }

    #[test]
    fn test_padding_multiples() {
        let tables = vec![regnen(); 7];
        assert_eq!(pad_with_empty_tables(&tables, false).len(), 12);
        assert_eq!(pad_with_empty_tables(&tables, true).len(), 12);

        let padded = pad_with_empty_tables(&tables[..1], true);
        assert_eq!(padded.len(), 12);
        assert!(!padded[0].is_blank());
        assert!(padded[1..].iter().all(VerbConjugationTable::is_blank));

        assert_eq!(pad_with_empty_tables(&tables[..6], false).len(), 6);
        assert!(pad_with_empty_tables(&[], true).is_empty());
    }

    #[test]
    fn test_key_forms_line() {
        assert_eq!(key_forms(&waschen()), "hat sich gewaschen | wusch sich");
        assert_eq!(key_forms(&regnen()), "hat geregnet | regnete");
        assert_eq!(key_forms(&VerbConjugationTable::blank()), "");
    }

    #[test]
    fn test_grid_for_two_verbs() {
        let settings = ExportSettings::default();
        let layout = layout_simplified_tables(&[waschen(), regnen()], &settings).unwrap();
        assert_eq!(layout.grids.len(), 1);
        assert_eq!(layout.label, "Präsens | 3. Person Singular Perfekt und Präteritum");

        let grid = &layout.grids[0];
        // waschen: main | reflexive, regnen: main
        assert_eq!(grid.total_columns(), 3 + 2 + 1);
        assert_eq!(grid.verbs, vec!["sich waschen", "regnen"]);
        assert_eq!(grid.header[0].cells[1].text, "sich waschen");
        assert_eq!(grid.header[0].cells[1].colspan, 2);
        assert_eq!(grid.header[1].cells[2].text, "hat geregnet | regnete");

        // two section rows and all eight persons
        assert_eq!(grid.rows.len(), 10);
        assert!(grid.rows.iter().skip(1).all(|r| r.span_width() == 6));

        let ich = &grid.rows[1];
        assert_eq!(ich.cells[3].text, "wäscht");
        assert_eq!(ich.cells[4].text, "sich");
        assert_eq!(ich.cells[5].text, "");
        assert_eq!(ich.cells[5].verb_slot, Some(1));

        let er = &grid.rows[4];
        assert_eq!(er.cells[5].text, "regnet");

        // partial groups keep the width of a full one
        let used: f64 = grid.column_widths.iter().sum();
        assert!((used - (100.0 - TENSE_AREA_WIDTH / 3.0)).abs() < 1e-9);
    }

    #[test]
    fn test_grids_per_tense_and_group() {
        let mut settings = ExportSettings::default();
        settings.grammar_table.simplified_tenses.perfekt = true;
        let tables = vec![regnen(), regnen(), regnen(), waschen()];

        let layout = layout_simplified_tables(&tables, &settings).unwrap();
        let order: Vec<(Tense, usize)> = layout.grids.iter().map(|g| (g.tense, g.verbs.len())).collect();
        assert_eq!(
            order,
            vec![(Tense::Praesens, 3), (Tense::Praesens, 1), (Tense::Perfekt, 3), (Tense::Perfekt, 1)]
        );
        assert!(layout.label.starts_with("Präsens · Perfekt |"));

        // sich waschen in Perfekt: auxiliary | reflexive | partizip
        let perfekt = &layout.grids[3];
        assert_eq!(perfekt.per_verb[0].roles.len(), 3);
        assert_eq!(perfekt.rows[1].cells[5].text, "gewaschen");
    }

    #[test]
    fn test_highlights_follow_setting() {
        let table = [waschen()];
        let plain = layout_simplified_tables(&table, &ExportSettings::default()).unwrap();
        assert!(plain.grids[0].rows[1].cells[3].highlights.is_empty());

        let mut settings = ExportSettings::default();
        settings.grammar_table.show_irregular_highlights = true;
        let marked = layout_simplified_tables(&table, &settings).unwrap();
        assert_eq!(marked.grids[0].rows[1].cells[3].highlights.len(), 1);
    }

    #[test]
    fn test_missing_record_fails() {
        let mut table = waschen();
        table.conjugations.remove(&PersonKey::Ihr);
        let err = layout_simplified_tables(&[table], &ExportSettings::default()).unwrap_err();
        assert!(matches!(err, LayoutError::MissingConjugation { person: PersonKey::Ihr, .. }));
    }

    #[test]
    fn test_document_mode_and_padding() {
        let mut settings = ExportSettings::default();
        settings.grammar_table.insert_empty_tables = true;

        let full = layout_conjugation_tables(&[waschen()], &settings).unwrap();
        assert!(matches!(full, ConjugationDocument::Full { .. }));
        assert_eq!(full.grid_count(), FULL_PAD_MULTIPLE);

        settings.grammar_table.simplified = true;
        let simplified = layout_conjugation_tables(&[waschen()], &settings).unwrap();
        // twelve tables in groups of three, Präsens only
        assert_eq!(simplified.grid_count(), 4);

        let json = serde_json::to_value(&simplified).unwrap();
        assert_eq!(json["mode"], "simplified");
        assert_eq!(json["grids"][1]["verbs"][0], "\u{a0}");
    }
}
