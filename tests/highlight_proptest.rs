//! Property-based tests for highlight assembly
//!
//! Texts include umlauts and ß so char offsets and byte offsets differ, and
//! braces and slashes so partial markers show up next to inserted ones.

use proptest::prelude::*;
use worksheet_layout::text::{apply_highlights, strip_highlights, HighlightSet, HIGHLIGHT_CLOSE, HIGHLIGHT_OPEN};
use worksheet_layout::LayoutError;

fn contains_marker(text: &str) -> bool {
    text.contains(HIGHLIGHT_OPEN) || text.contains(HIGHLIGHT_CLOSE)
}

fn text_strategy() -> impl Strategy<Value = String> {
    "[a-zäöüß{}/ ]{0,24}".prop_filter("marker text is rejected", |t| !contains_marker(t))
}

/// Text with a whole marker spliced in somewhere
fn marker_text() -> impl Strategy<Value = String> {
    (
        "[a-zäöü{}/]{0,8}",
        prop::sample::select(vec![HIGHLIGHT_OPEN, HIGHLIGHT_CLOSE]),
        "[a-zäöü{}/]{0,8}",
    )
        .prop_map(|(head, marker, tail)| format!("{}{}{}", head, marker, tail))
}

/// A text plus sorted, disjoint ranges over its chars, shuffled
fn text_with_ranges() -> impl Strategy<Value = (String, Vec<(usize, usize)>)> {
    text_strategy().prop_flat_map(|text| {
        let len = text.chars().count();
        (
            Just(text),
            prop::collection::vec(0..=len, 0..8),
            any::<prop::sample::Index>(),
        )
            .prop_map(|(text, mut cuts, rotate)| {
                cuts.sort_unstable();
                cuts.dedup();
                let mut ranges: Vec<(usize, usize)> =
                    cuts.chunks_exact(2).map(|pair| (pair[0], pair[1])).collect();
                if !ranges.is_empty() {
                    let by = rotate.index(ranges.len());
                    ranges.rotate_left(by);
                }
                (text, ranges)
            })
    })
}

proptest! {
    #[test]
    fn test_empty_ranges_are_identity(text in text_strategy()) {
        prop_assert_eq!(apply_highlights(&text, &[]).unwrap(), text);
    }

    #[test]
    fn test_strip_recovers_text((text, ranges) in text_with_ranges()) {
        let annotated = apply_highlights(&text, &ranges).unwrap();
        prop_assert_eq!(strip_highlights(&annotated), text);
    }

    #[test]
    fn test_unsorted_input_is_sorted((text, ranges) in text_with_ranges()) {
        let set = HighlightSet::new(&text, &ranges).unwrap();
        let starts: Vec<usize> = set.to_raw().iter().map(|r| r.0).collect();
        let mut sorted = starts.clone();
        sorted.sort_unstable();
        prop_assert_eq!(starts, sorted);
    }

    #[test]
    fn test_marker_text_is_rejected(text in marker_text()) {
        let err = apply_highlights(&text, &[(0, 0)]).unwrap_err();
        let is_marker_error = matches!(err, LayoutError::MarkerInText { .. });
        prop_assert!(is_marker_error);
    }

    #[test]
    fn test_out_of_bounds_is_rejected(text in text_strategy(), extra in 1usize..5) {
        let len = text.chars().count();
        let err = apply_highlights(&text, &[(0, len + extra)]).unwrap_err();
        prop_assert_eq!(
            err,
            LayoutError::RangeOutOfBounds { start: 0, end: len + extra, len }
        );
    }
}

#[test]
fn test_overlap_is_rejected() {
    let err = apply_highlights("gefahren", &[(0, 3), (2, 5)]).unwrap_err();
    assert!(matches!(err, LayoutError::OverlappingRanges { .. }));
}

#[test]
fn test_marker_in_text_is_an_error() {
    let err = apply_highlights("a{{hl}}b", &[(0, 1)]).unwrap_err();
    assert!(matches!(err, LayoutError::MarkerInText { .. }));
}

#[test]
fn test_first_char_emphasis() {
    assert_eq!(apply_highlights("gehe", &[(0, 1)]).unwrap(), "{{hl}}g{{/hl}}ehe");
}
