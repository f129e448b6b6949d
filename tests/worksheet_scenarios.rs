//! End-to-end worksheet scenarios through the public API

use worksheet_layout::cards::{generate_flashcards, layout_deck, materialize, repad, GenerateOptions};
use worksheet_layout::models::{
    classify, Card, CardSide, Flashcard, PageSide, PersonConjugations, PersonKey, Tense, TenseConjugation,
    VerbConjugationTable, VerbFlags, VerbInput,
};
use worksheet_layout::settings::ExportSettings;
use worksheet_layout::tables::layout_conjugation_table;
use worksheet_layout::verbs::{attach_highlights, compose_form, compose_highlighted, ComposeMode};
use worksheet_layout::LayoutError;

fn card(id: &str) -> Flashcard {
    Flashcard::new(id, CardSide::text(id), CardSide::text(id.to_lowercase()))
}

fn ids(cards: &[Card]) -> Vec<String> {
    cards
        .iter()
        .map(|c| c.content().map_or_else(|| "_".to_string(), |f| f.id.clone()))
        .collect()
}

/// Regular "machen" with every person in Präsens and Perfekt
fn machen() -> VerbConjugationTable {
    let praesens = ["mache", "machst", "machen", "macht", "machen", "macht", "machen", "machen"];
    let auxiliary = ["habe", "hast", "haben", "hat", "haben", "habt", "haben", "haben"];

    let conjugations = PersonKey::ALL
        .iter()
        .enumerate()
        .map(|(i, &person)| {
            (
                person,
                PersonConjugations {
                    praesens: Some(TenseConjugation {
                        main: praesens[i].into(),
                        ..Default::default()
                    }),
                    perfekt: Some(TenseConjugation {
                        auxiliary: Some(auxiliary[i].into()),
                        partizip: Some("gemacht".into()),
                        ..Default::default()
                    }),
                    praeteritum: Some(TenseConjugation {
                        main: format!("machte{}", ["", "st", "n", "", "n", "t", "n", "n"][i]),
                        ..Default::default()
                    }),
                },
            )
        })
        .collect();

    VerbConjugationTable {
        input: VerbInput { verb: "machen".into() },
        conjugations,
        ..Default::default()
    }
}

#[test]
fn test_repad_three_groups() {
    let authored = vec![
        card("A"),
        card("B"),
        Flashcard::blank(),
        card("C"),
        card("D"),
        card("E"),
        Flashcard::blank(),
        card("F"),
    ];

    let repadded = repad(&classify(authored), 3).unwrap();
    assert_eq!(ids(&repadded), vec!["A", "B", "_", "C", "D", "E", "F"]);

    let stored = materialize(repadded);
    assert_eq!(stored.len(), 7);
    assert!(stored[2].is_blank());
}

#[test]
fn test_repad_without_separators_is_unchanged() {
    let cards = classify(vec![card("A"), card("B"), card("C")]);
    assert_eq!(repad(&cards, 4).unwrap(), cards);
}

#[test]
fn test_compose_examples() {
    let separable = TenseConjugation {
        main: "hole".into(),
        prefix: Some("ab".into()),
        ..Default::default()
    };
    let flags = VerbFlags {
        is_separable: true,
        is_reflexive: false,
    };
    assert_eq!(
        compose_form(&separable, Tense::Praesens, flags, ComposeMode::FullDisplay),
        "hole ab"
    );
    assert_eq!(compose_form(&separable, Tense::Praesens, flags, ComposeMode::Choice), "hole");

    let reflexive = TenseConjugation {
        auxiliary: Some("habe".into()),
        reflexive: Some("mich".into()),
        partizip: Some("gesetzt".into()),
        ..Default::default()
    };
    let flags = VerbFlags {
        is_separable: false,
        is_reflexive: true,
    };
    for mode in [ComposeMode::FullDisplay, ComposeMode::Choice] {
        assert_eq!(compose_form(&reflexive, Tense::Perfekt, flags, mode), "habe mich gesetzt");
    }
}

#[test]
fn test_regular_verb_gets_no_highlights() {
    let mut table = machen();
    attach_highlights(&mut table);

    for person in PersonKey::ALL {
        for tense in Tense::ALL {
            let conj = table.conjugation(person, tense).unwrap();
            assert!(conj.highlights.is_none(), "{} {}", person, tense);
        }
    }
}

#[test]
fn test_irregular_forms_are_marked() {
    let mut table = VerbConjugationTable {
        input: VerbInput { verb: "fahren".into() },
        ..Default::default()
    };
    table.conjugations.insert(
        PersonKey::Du,
        PersonConjugations {
            praesens: Some(TenseConjugation {
                main: "fährst".into(),
                ..Default::default()
            }),
            ..Default::default()
        },
    );

    attach_highlights(&mut table);
    let du = table.conjugation(PersonKey::Du, Tense::Praesens).unwrap();
    let form = compose_highlighted(du, Tense::Praesens, table.flags(), ComposeMode::FullDisplay).unwrap();
    assert_eq!(form, "f{{hl}}ä{{/hl}}hrst");
}

#[test]
fn test_conjugation_table_rows() {
    let grid = layout_conjugation_table(&machen(), &ExportSettings::default()).unwrap();

    // SINGULAR, 4 persons, PLURAL, 4 persons
    assert_eq!(grid.rows.len(), 10);
    assert_eq!(grid.plan.total_columns(), 3 + 1 + 2 + 1);
    let width: f64 = grid.column_widths.iter().sum();
    assert!((width - 100.0).abs() < 1e-9);

    let mut missing = machen();
    missing.conjugations.remove(&PersonKey::Ihr);
    let err = layout_conjugation_table(&missing, &ExportSettings::default()).unwrap_err();
    assert!(matches!(err, LayoutError::MissingConjugation { person: PersonKey::Ihr, .. }));
}

#[test]
fn test_generated_deck_puts_each_verb_on_a_fresh_sheet() {
    let mut gehen = machen();
    gehen.input.verb = "gehen".into();

    let options = GenerateOptions {
        selection: worksheet_layout::cards::FlashcardSelection {
            tenses: vec![Tense::Praesens],
            ..Default::default()
        },
        ..Default::default()
    };
    let generated = generate_flashcards(&[machen(), gehen], &options).unwrap();
    // 8 + hint + 8
    assert_eq!(generated.len(), 17);

    let layout = layout_deck(materialize(generated), &ExportSettings::default()).unwrap();
    assert_eq!(layout.card_count, 16);
    assert_eq!(layout.sheet_count, 2);

    let first_front = &layout.pages[0];
    assert_eq!(first_front.side, PageSide::Front);
    let text = first_front.cells[0][0].face.as_ref().and_then(|f| f.text.clone()).unwrap();
    assert!(text.starts_with("gehen\n"));

    let second_front = &layout.pages[2];
    let text = second_front.cells[0][0].face.as_ref().and_then(|f| f.text.clone()).unwrap();
    assert!(text.starts_with("machen\n"));
}
