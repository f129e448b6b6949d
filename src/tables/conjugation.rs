//! Conjugation table column planner and grid
//!
//! Each tense gets an equal share of the table width after the three lead-in
//! columns (person, formality, pronoun). Inside its share a tense uses one to
//! three sub-columns depending on whether the verb is separable or reflexive.

use serde::{Deserialize, Serialize};
use serde_repr::{Deserialize_repr, Serialize_repr};

use super::{CellRole, CornerHints, GridRow, TableCell};
use crate::error::Result;
use crate::models::{Locale, PersonKey, Tense, VerbConjugationTable, VerbFlags};
use crate::settings::ExportSettings;
use crate::text::swiss_spelling;
use crate::verbs::persons::{row_def, NumberSection};
use crate::verbs::FormRole;

/// Person, formality and pronoun columns
pub const LEAD_COLUMNS: usize = 3;

/// Lead-in column widths in percent of the table width
pub const LEAD_WIDTHS: [f64; LEAD_COLUMNS] = [6.5, 6.5, 9.5];

/// Width left for the tense columns, in percent
pub const TENSE_AREA_WIDTH: f64 = 77.5;

/// Sub-columns one tense occupies
#[derive(Serialize_repr, Deserialize_repr, Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
#[repr(u8)]
pub enum ColumnCount {
    One = 1,
    Two = 2,
    Three = 3,
}

impl ColumnCount {
    pub fn get(&self) -> usize {
        *self as usize
    }
}

/// Column plan for a single tense
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TenseColumns {
    pub tense: Tense,
    pub count: ColumnCount,
    /// Fractions of the tense's share, summing to 1
    pub widths: Vec<f64>,
    /// Field shown in each sub-column
    pub roles: Vec<FormRole>,
}

/// Column plan for every tense, in display order
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ColumnPlan {
    pub per_tense: Vec<TenseColumns>,
}

impl ColumnPlan {
    pub fn get(&self, tense: Tense) -> Option<&TenseColumns> {
        self.per_tense.iter().find(|t| t.tense == tense)
    }

    /// Lead-in columns plus every tense's sub-columns
    pub fn total_columns(&self) -> usize {
        LEAD_COLUMNS + self.per_tense.iter().map(|t| t.count.get()).sum::<usize>()
    }
}

/// Sub-columns of one tense
pub(crate) fn plan_tense(tense: Tense, flags: VerbFlags) -> TenseColumns {
    let roles = if tense.is_perfekt() {
        if flags.is_reflexive {
            vec![FormRole::Auxiliary, FormRole::Reflexive, FormRole::Partizip]
        } else {
            vec![FormRole::Auxiliary, FormRole::Partizip]
        }
    } else {
        let mut roles = vec![FormRole::Main];
        if flags.is_reflexive {
            roles.push(FormRole::Reflexive);
        }
        if flags.is_separable {
            roles.push(FormRole::Prefix);
        }
        roles
    };

    let (count, widths) = match (roles.len(), tense.is_perfekt()) {
        (3, true) => (ColumnCount::Three, vec![0.25, 0.25, 0.50]),
        (3, false) => (ColumnCount::Three, vec![0.50, 0.25, 0.25]),
        (2, _) => (ColumnCount::Two, vec![0.50, 0.50]),
        _ => (ColumnCount::One, vec![1.0]),
    };

    TenseColumns {
        tense,
        count,
        widths,
        roles,
    }
}

/// Plan sub-columns for every tense from the verb's two flags
///
/// Perfekt: 3 if reflexive, else 2. Other tenses: 3 if separable and
/// reflexive, 2 if exactly one holds, else 1.
pub fn plan_columns(flags: VerbFlags) -> ColumnPlan {
    ColumnPlan {
        per_tense: Tense::ALL.iter().map(|&tense| plan_tense(tense, flags)).collect(),
    }
}

// ============================================================================
// Grid
// ============================================================================

/// Laid-out conjugation table
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ConjugationGrid {
    /// Infinitive, shown above the table
    pub title: String,

    pub plan: ColumnPlan,

    /// Absolute column widths in percent
    pub column_widths: Vec<f64>,

    pub header: GridRow,

    /// Section rows and person rows, top to bottom
    pub rows: Vec<GridRow>,
}

pub(crate) fn section_label(section: NumberSection) -> &'static str {
    match section {
        NumberSection::Singular => "SINGULAR",
        NumberSection::Plural => "PLURAL",
    }
}

fn column_widths(plan: &ColumnPlan) -> Vec<f64> {
    let share = TENSE_AREA_WIDTH / plan.per_tense.len() as f64;
    LEAD_WIDTHS
        .iter()
        .copied()
        .chain(plan.per_tense.iter().flat_map(|t| t.widths.iter().map(move |w| share * w)))
        .collect()
}

fn header_row(plan: &ColumnPlan, locale: Locale) -> GridRow {
    let last = plan.per_tense.len().saturating_sub(1);
    let lead = TableCell::new(CellRole::Header, "")
        .with_colspan(LEAD_COLUMNS)
        .with_corners(CornerHints {
            top_left: true,
            ..Default::default()
        });

    let tenses = plan.per_tense.iter().enumerate().map(|(i, columns)| {
        TableCell::new(CellRole::Header, columns.tense.label(locale))
            .with_colspan(columns.count.get())
            .with_tense(columns.tense)
            .with_corners(CornerHints {
                top_right: i == last,
                ..Default::default()
            })
    });

    GridRow::new(std::iter::once(lead).chain(tenses).collect())
}

fn person_row(
    table: &VerbConjugationTable,
    plan: &ColumnPlan,
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

    let last_tense = plan.per_tense.len().saturating_sub(1);
    for (tense_index, columns) in plan.per_tense.iter().enumerate() {
        let conj = table.conjugation(person, columns.tense)?;
        let last_role = columns.roles.len().saturating_sub(1);

        for (role_index, role) in columns.roles.iter().enumerate() {
            let highlights = if show_highlights {
                role.highlight_set(conj)?.ranges().to_vec()
            } else {
                Vec::new()
            };

            cells.push(
                TableCell::new(CellRole::Form(*role), role.field(conj).unwrap_or_default())
                    .with_tense(columns.tense)
                    .with_highlights(highlights)
                    .with_corners(CornerHints {
                        bottom_right: is_last_row && tense_index == last_tense && role_index == last_role,
                        ..Default::default()
                    }),
            );
        }
    }

    Ok(GridRow::new(cells))
}

/// Lay out a verb's conjugation table
///
/// Every listed person needs a record for every tense; a gap is a
/// `MissingConjugation` error rather than an empty cell.
pub fn layout_conjugation_table(
    table: &VerbConjugationTable,
    settings: &ExportSettings,
) -> Result<ConjugationGrid> {
    let plan = plan_columns(table.flags());
    let total_columns = plan.total_columns();
    let show_highlights = settings.grammar_table.show_irregular_highlights;
    let persons = table.persons();

    let mut rows = Vec::with_capacity(persons.len() + 2);
    for section in [NumberSection::Singular, NumberSection::Plural] {
        rows.push(GridRow::new(vec![
            TableCell::new(CellRole::Section, section_label(section)).with_colspan(total_columns)
        ]));

        let in_section: Vec<PersonKey> = persons
            .iter()
            .copied()
            .filter(|&p| row_def(p).section == section)
            .collect();

        for person in in_section {
            let is_last_row = Some(&person) == persons.last();
            rows.push(person_row(table, &plan, person, is_last_row, show_highlights)?);
        }
    }

    log::debug!(
        "{}: {} column(s), {} person row(s)",
        table.verb(),
        total_columns,
        persons.len()
    );

    let mut header = header_row(&plan, settings.locale);
    let mut title = table.verb().to_string();
    if settings.grammar_table.swiss_spelling {
        super::to_swiss_spelling(rows.iter_mut().chain(std::iter::once(&mut header)));
        title = swiss_spelling(&title);
    }

    Ok(ConjugationGrid {
        title,
        column_widths: column_widths(&plan),
        header,
        plan,
        rows,
    })
}
