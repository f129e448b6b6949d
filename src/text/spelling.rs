//! Swiss spelling
//!
//! Swiss Standard German has no ß; each one is written ss. Highlight ranges
//! are char offsets, so they are shifted along with the text. A range that
//! covers a ß covers both replacement letters.

use super::highlight::HighlightRange;

const ESZETT: char = 'ß';
const SWISS_ESZETT: &str = "ss";

/// `text` with every ß replaced by ss
pub fn swiss_spelling(text: &str) -> String {
    text.replace(ESZETT, SWISS_ESZETT)
}

/// Swiss spelling of `text`, with `ranges` moved to the same letters
pub fn swiss_spelling_with_ranges(text: &str, ranges: &[HighlightRange]) -> (String, Vec<HighlightRange>) {
    if !text.contains(ESZETT) {
        return (text.to_string(), ranges.to_vec());
    }

    // shifted[i] is where char offset i lands after replacement
    let mut shifted = Vec::with_capacity(text.len() + 1);
    let mut offset = 0;
    for c in text.chars() {
        shifted.push(offset);
        offset += if c == ESZETT { SWISS_ESZETT.len() } else { 1 };
    }
    shifted.push(offset);

    let moved = ranges
        .iter()
        .map(|r| HighlightRange {
            start: shifted.get(r.start).copied().unwrap_or(offset),
            end: shifted.get(r.end).copied().unwrap_or(offset),
        })
        .collect();

    (swiss_spelling(text), moved)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn range(start: usize, end: usize) -> HighlightRange {
        HighlightRange { start, end }
    }

    #[test]
    fn test_plain_replacement() {
        assert_eq!(swiss_spelling("heißen"), "heissen");
        assert_eq!(swiss_spelling("Straße, Fuß"), "Strasse, Fuss");
        assert_eq!(swiss_spelling("gehen"), "gehen");
    }

    #[test]
    fn test_ranges_after_eszett_shift() {
        // "ließ": highlight on "ie"; "aßen": highlight on "en"
        let (text, ranges) = swiss_spelling_with_ranges("ließ", &[range(1, 3)]);
        assert_eq!(text, "liess");
        assert_eq!(ranges, vec![range(1, 3)]);

        let (text, ranges) = swiss_spelling_with_ranges("aßen", &[range(2, 4)]);
        assert_eq!(text, "assen");
        assert_eq!(ranges, vec![range(3, 5)]);
    }

    #[test]
    fn test_range_over_eszett_covers_both_letters() {
        let (text, ranges) = swiss_spelling_with_ranges("weiß", &[range(3, 4)]);
        assert_eq!(text, "weiss");
        assert_eq!(ranges, vec![range(3, 5)]);
    }
}
