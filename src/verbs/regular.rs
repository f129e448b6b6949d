//! Regular (weak) conjugation engine
//!
//! Computes the forms a weak verb would have and diffs them against the
//! actual forms of a table to derive irregularity highlights. All offsets are
//! char offsets.

use serde::{Deserialize, Serialize};

use super::compose::FormRole;
use crate::models::{PersonKey, RawRange, Tense, TenseConjugation, TenseHighlights, VerbConjugationTable};

/// Prefixes whose Partizip II takes no "ge-"
const INSEPARABLE_PREFIXES: [&str; 8] = ["be", "emp", "ent", "er", "ge", "miss", "ver", "zer"];

/// Stem endings that insert an "e" before -st / -t
const EPENTHESIS_ENDINGS: [&str; 7] = ["tm", "dm", "chn", "fn", "gn", "t", "d"];

fn needs_epenthesis(stem: &str) -> bool {
    let lower = stem.to_lowercase();
    EPENTHESIS_ENDINGS.iter().any(|e| lower.ends_with(e))
}

/// Infinitive with the separable prefix removed
fn base_infinitive<'a>(infinitive: &'a str, separable_prefix: Option<&str>) -> &'a str {
    separable_prefix
        .and_then(|prefix| infinitive.strip_prefix(prefix))
        .unwrap_or(infinitive)
}

/// Conjugation stem
///
/// `-eln`/`-ern` lose only the `n` ("handeln" → "handel"), `-en` is stripped
/// ("machen" → "mach"), otherwise a trailing `n` goes ("tun" → "tu").
pub fn extract_stem(infinitive: &str, separable_prefix: Option<&str>) -> String {
    let base = base_infinitive(infinitive, separable_prefix);

    let stem = if base.ends_with("eln") || base.ends_with("ern") {
        &base[..base.len() - 1]
    } else if let Some(stem) = base.strip_suffix("en") {
        stem
    } else {
        base.strip_suffix('n').unwrap_or(base)
    };

    stem.to_string()
}

pub fn regular_praesens(stem: &str, person: PersonKey) -> String {
    let ending = match person {
        PersonKey::Ich => "e",
        PersonKey::Du => "st",
        PersonKey::ErSieEs | PersonKey::Ihr => "t",
        PersonKey::SieSg | PersonKey::Wir | PersonKey::SiePl | PersonKey::SiePlural => "en",
    };
    let epenthesis = matches!(person, PersonKey::Du | PersonKey::ErSieEs | PersonKey::Ihr)
        && needs_epenthesis(stem);

    if epenthesis {
        format!("{}e{}", stem, ending)
    } else {
        format!("{}{}", stem, ending)
    }
}

pub fn regular_praeteritum(stem: &str, person: PersonKey) -> String {
    let ending = match person {
        PersonKey::Ich | PersonKey::ErSieEs => "",
        PersonKey::Du => "st",
        PersonKey::Ihr => "t",
        PersonKey::SieSg | PersonKey::Wir | PersonKey::SiePl | PersonKey::SiePlural => "n",
    };
    let te = if needs_epenthesis(stem) { "ete" } else { "te" };
    format!("{}{}{}", stem, te, ending)
}

/// Partizip II of a weak verb
pub fn regular_partizip(stem: &str, separable_prefix: Option<&str>, base_infinitive: &str) -> String {
    let suffix = if needs_epenthesis(stem) { "et" } else { "t" };
    let prefix = separable_prefix.unwrap_or_default();

    if INSEPARABLE_PREFIXES.iter().any(|p| base_infinitive.starts_with(p)) {
        format!("{}{}{}", prefix, stem, suffix)
    } else {
        format!("{}ge{}{}", prefix, stem, suffix)
    }
}

/// Weak forms of one person
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RegularForms {
    pub praesens: String,
    pub partizip: String,
    pub praeteritum: String,
}

impl RegularForms {
    /// Expected key field for a tense
    pub fn expected(&self, tense: Tense) -> &str {
        match tense {
            Tense::Praesens => &self.praesens,
            Tense::Perfekt => &self.partizip,
            Tense::Praeteritum => &self.praeteritum,
        }
    }
}

/// Weak forms of `infinitive` for every person, in person order
pub fn regular_forms(infinitive: &str, separable_prefix: Option<&str>) -> Vec<(PersonKey, RegularForms)> {
    let base = base_infinitive(infinitive, separable_prefix);
    let stem = extract_stem(infinitive, separable_prefix);
    let partizip = regular_partizip(&stem, separable_prefix, base);

    PersonKey::ALL
        .iter()
        .map(|&person| {
            (
                person,
                RegularForms {
                    praesens: regular_praesens(&stem, person),
                    partizip: partizip.clone(),
                    praeteritum: regular_praeteritum(&stem, person),
                },
            )
        })
        .collect()
}

/// Ranges of `actual` that deviate from `regular`, `None` when identical
///
/// The common prefix and suffix are trimmed and the middle of `actual` is
/// highlighted. A pure deletion backs the suffix off until one char shows;
/// if nothing can be shown the whole form is highlighted.
pub fn compute_highlight_ranges(regular: &str, actual: &str) -> Option<Vec<RawRange>> {
    if regular == actual {
        return None;
    }

    let regular: Vec<char> = regular.chars().collect();
    let actual: Vec<char> = actual.chars().collect();
    let min_len = regular.len().min(actual.len());

    let prefix_len = regular.iter().zip(&actual).take_while(|(a, b)| a == b).count();
    let mut suffix_len = regular
        .iter()
        .rev()
        .zip(actual.iter().rev())
        .take(min_len - prefix_len)
        .take_while(|(a, b)| a == b)
        .count();

    let start = prefix_len;
    let mut end = actual.len() - suffix_len;

    while start >= end && suffix_len > 0 {
        suffix_len -= 1;
        end = actual.len() - suffix_len;
    }

    if start >= end {
        return Some(vec![(0, actual.len())]);
    }

    Some(vec![(start, end)])
}

fn highlight_slot(highlights: &mut TenseHighlights, role: FormRole) -> &mut Option<Vec<RawRange>> {
    match role {
        FormRole::Main => &mut highlights.main,
        FormRole::Prefix => &mut highlights.prefix,
        FormRole::Reflexive => &mut highlights.reflexive,
        FormRole::Auxiliary => &mut highlights.auxiliary,
        FormRole::Partizip => &mut highlights.partizip,
    }
}

/// Replace one field's highlights; an emptied highlight set is dropped
fn set_highlights(conj: &mut TenseConjugation, role: FormRole, ranges: Option<Vec<RawRange>>) {
    let mut highlights = conj.highlights.take().unwrap_or_default();
    *highlight_slot(&mut highlights, role) = ranges;
    conj.highlights = (!highlights.is_empty()).then_some(highlights);
}

/// Rewrite the key-field highlights of every record from the weak forms
///
/// Präsens and Präteritum diff `main`, Perfekt diffs `partizip`. Regular forms
/// lose any stale ranges on that field; other fields are left alone.
pub fn attach_highlights(table: &mut VerbConjugationTable) {
    // "sich freuen", "sich Sorgen machen": the verb is the last word
    let infinitive = table
        .input
        .verb
        .split_whitespace()
        .last()
        .unwrap_or_default()
        .to_string();
    let prefix = if table.is_separable {
        table.separable_prefix.as_deref().filter(|p| !p.is_empty())
    } else {
        None
    };
    let regular = regular_forms(&infinitive, prefix);

    let mut highlighted = 0usize;
    for (person, forms) in &regular {
        let Some(person_conj) = table.conjugations.get_mut(person) else {
            continue;
        };

        for tense in Tense::ALL {
            let role = if tense.is_perfekt() { FormRole::Partizip } else { FormRole::Main };
            let Some(conj) = person_conj.get_mut(tense) else {
                continue;
            };
            let Some(actual) = role.field(conj).map(str::to_string) else {
                continue;
            };

            let ranges = compute_highlight_ranges(forms.expected(tense), &actual);
            highlighted += usize::from(ranges.is_some());
            set_highlights(conj, role, ranges);
        }
    }

    log::debug!("{}: {} irregular form(s)", table.input.verb, highlighted);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{PersonConjugations, VerbInput};

    #[test]
    fn test_stems() {
        assert_eq!(extract_stem("machen", None), "mach");
        assert_eq!(extract_stem("arbeiten", None), "arbeit");
        assert_eq!(extract_stem("handeln", None), "handel");
        assert_eq!(extract_stem("wandern", None), "wander");
        assert_eq!(extract_stem("tun", None), "tu");
        assert_eq!(extract_stem("abholen", Some("ab")), "hol");
    }

    #[test]
    fn test_epenthesis() {
        assert_eq!(regular_praesens("arbeit", PersonKey::Du), "arbeitest");
        assert_eq!(regular_praesens("arbeit", PersonKey::Ich), "arbeite");
        assert_eq!(regular_praesens("rechn", PersonKey::Ihr), "rechnet");
        assert_eq!(regular_praeteritum("arbeit", PersonKey::Wir), "arbeiteten");
        assert_eq!(regular_praeteritum("mach", PersonKey::Du), "machtest");
    }

    #[test]
    fn test_partizip() {
        assert_eq!(regular_partizip("mach", None, "machen"), "gemacht");
        assert_eq!(regular_partizip("arbeit", None, "arbeiten"), "gearbeitet");
        assert_eq!(regular_partizip("hol", Some("ab"), "holen"), "abgeholt");
        assert_eq!(regular_partizip("such", None, "besuchen"), "besucht");
    }

    #[test]
    fn test_diff_ranges() {
        assert_eq!(compute_highlight_ranges("mache", "mache"), None);
        assert_eq!(compute_highlight_ranges("gehte", "ging"), Some(vec![(1, 4)]));
        assert_eq!(compute_highlight_ranges("gegeht", "gegangen"), Some(vec![(3, 8)]));
        // umlaut counts as one char
        assert_eq!(compute_highlight_ranges("fahrst", "fährst"), Some(vec![(1, 2)]));
        // pure deletion
        assert_eq!(compute_highlight_ranges("handele", "handle"), Some(vec![(4, 5)]));
        // nothing left after trimming
        assert_eq!(compute_highlight_ranges("abc", "ab"), Some(vec![(0, 2)]));
    }

    fn record(main: &str) -> Option<TenseConjugation> {
        Some(TenseConjugation {
            main: main.into(),
            ..Default::default()
        })
    }

    #[test]
    fn test_attach_highlights_rewrites_key_fields() {
        let mut table = VerbConjugationTable {
            input: VerbInput {
                verb: "sich fahren".into(),
            },
            is_reflexive: true,
            ..Default::default()
        };
        table.conjugations.insert(
            PersonKey::Du,
            PersonConjugations {
                praesens: Some(TenseConjugation {
                    main: "fährst".into(),
                    reflexive: Some("dich".into()),
                    highlights: Some(TenseHighlights {
                        reflexive: Some(vec![(0, 1)]),
                        ..Default::default()
                    }),
                    ..Default::default()
                }),
                perfekt: Some(TenseConjugation {
                    auxiliary: Some("bist".into()),
                    partizip: Some("gefahren".into()),
                    ..Default::default()
                }),
                praeteritum: Some(TenseConjugation {
                    main: "fuhrst".into(),
                    ..Default::default()
                }),
            },
        );
        table.conjugations.insert(
            PersonKey::Ich,
            PersonConjugations {
                praesens: Some(TenseConjugation {
                    main: "fahre".into(),
                    highlights: Some(TenseHighlights {
                        main: Some(vec![(0, 2)]),
                        ..Default::default()
                    }),
                    ..Default::default()
                }),
                ..Default::default()
            },
        );

        attach_highlights(&mut table);

        let du = &table.conjugations[&PersonKey::Du];
        let praesens = du.praesens.as_ref().unwrap().highlights.as_ref().unwrap();
        assert_eq!(praesens.main, Some(vec![(1, 2)]));
        assert_eq!(praesens.reflexive, Some(vec![(0, 1)]));

        // regular would be "gefahrt"
        let perfekt = du.perfekt.as_ref().unwrap().highlights.as_ref().unwrap();
        assert_eq!(perfekt.partizip, Some(vec![(6, 8)]));

        // regular would be "fahrtest"
        let praeteritum = du.praeteritum.as_ref().unwrap().highlights.as_ref().unwrap();
        assert_eq!(praeteritum.main, Some(vec![(1, 4)]));

        // stale range on a regular form is removed with the empty set
        let ich = &table.conjugations[&PersonKey::Ich];
        assert_eq!(ich.praesens.as_ref().unwrap().highlights, None);
    }

    #[test]
    fn test_attach_ignores_missing_records() {
        let mut table = VerbConjugationTable {
            input: VerbInput { verb: "machen".into() },
            ..Default::default()
        };
        table.conjugations.insert(
            PersonKey::Wir,
            PersonConjugations {
                praesens: record("machen"),
                ..Default::default()
            },
        );
        attach_highlights(&mut table);
        assert_eq!(table.conjugations[&PersonKey::Wir].praesens.as_ref().unwrap().highlights, None);
        assert_eq!(table.conjugations.len(), 1);
    }
}
