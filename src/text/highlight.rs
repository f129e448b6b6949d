//! Highlight ranges and emphasis assembly
//!
//! A highlight marks an irregular stretch of one form field as a `[start, end)`
//! range of char offsets. Ranges are validated once, when a `HighlightSet`
//! is built for a concrete text. Assembly only fails when the text already
//! contains one of the markers, which would make stripping ambiguous.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{LayoutError, Result};
use crate::models::RawRange;

/// Opening emphasis marker understood by the editor's renderers
pub const HIGHLIGHT_OPEN: &str = "{{hl}}";

/// Closing emphasis marker
pub const HIGHLIGHT_CLOSE: &str = "{{/hl}}";

static DEFAULT_MARKERS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        "{}|{}",
        regex::escape(HIGHLIGHT_OPEN),
        regex::escape(HIGHLIGHT_CLOSE)
    ))
    .expect("static marker pattern")
});

/// A `[start, end)` range of char offsets
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "RangeFields")]
pub struct HighlightRange {
    pub start: usize,
    pub end: usize,
}

impl HighlightRange {
    /// Build a range; `start > end` is rejected
    pub fn new(start: usize, end: usize) -> Result<Self> {
        if start > end {
            return Err(LayoutError::InvalidRange { start, end });
        }
        Ok(Self { start, end })
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    fn as_raw(&self) -> RawRange {
        (self.start, self.end)
    }
}

#[derive(Deserialize)]
struct RangeFields {
    start: usize,
    end: usize,
}

impl TryFrom<RangeFields> for HighlightRange {
    type Error = LayoutError;

    fn try_from(fields: RangeFields) -> Result<Self> {
        HighlightRange::new(fields.start, fields.end)
    }
}

/// Validated, sorted, disjoint ranges for one field
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct HighlightSet {
    ranges: Vec<HighlightRange>,
}

impl HighlightSet {
    /// Validate raw ranges against `text`
    ///
    /// Ranges may arrive in any order. Each must satisfy `start <= end` and
    /// `end <= text.chars().count()`, and no two may overlap.
    pub fn new(text: &str, raw: &[RawRange]) -> Result<Self> {
        let len = text.chars().count();
        let mut ranges = raw
            .iter()
            .map(|&(start, end)| {
                let range = HighlightRange::new(start, end)?;
                if range.end > len {
                    return Err(LayoutError::RangeOutOfBounds { start, end, len });
                }
                Ok(range)
            })
            .collect::<Result<Vec<_>>>()?;

        ranges.sort();

        for pair in ranges.windows(2) {
            if pair[1].start < pair[0].end {
                return Err(LayoutError::OverlappingRanges {
                    first: pair[0].as_raw(),
                    second: pair[1].as_raw(),
                });
            }
        }

        Ok(Self { ranges })
    }

    /// Set with no ranges
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    pub fn ranges(&self) -> &[HighlightRange] {
        &self.ranges
    }

    /// Back to the editor's pair form, sorted
    pub fn to_raw(&self) -> Vec<RawRange> {
        self.ranges.iter().map(HighlightRange::as_raw).collect()
    }
}

/// Emphasis marker pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmphasisMarkers {
    pub open: String,
    pub close: String,
}

impl Default for EmphasisMarkers {
    fn default() -> Self {
        Self {
            open: HIGHLIGHT_OPEN.to_string(),
            close: HIGHLIGHT_CLOSE.to_string(),
        }
    }
}

/// A run of text that is either plain or emphasized
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextSegment {
    pub text: String,
    pub emphasized: bool,
}

/// Split `text` into plain and emphasized runs
///
/// `set` must have been validated against this same `text`.
pub fn highlight_segments(text: &str, set: &HighlightSet) -> Vec<TextSegment> {
    let chars: Vec<char> = text.chars().collect();
    let slice = |from: usize, to: usize| chars[from..to].iter().collect::<String>();

    let mut segments = Vec::new();
    let mut cursor = 0;

    for range in set.ranges() {
        if range.start > cursor {
            segments.push(TextSegment {
                text: slice(cursor, range.start),
                emphasized: false,
            });
        }
        segments.push(TextSegment {
            text: slice(range.start, range.end),
            emphasized: true,
        });
        cursor = range.end;
    }

    if cursor < chars.len() {
        segments.push(TextSegment {
            text: slice(cursor, chars.len()),
            emphasized: false,
        });
    }

    segments
}

/// Wrap each range of `text` in the given markers
///
/// Text that already contains either marker is rejected, even with an empty
/// set, so that stripping always gives back exactly `text`.
pub fn apply_highlight_set(text: &str, set: &HighlightSet, markers: &EmphasisMarkers) -> Result<String> {
    for marker in [&markers.open, &markers.close] {
        if !marker.is_empty() && text.contains(marker.as_str()) {
            return Err(LayoutError::MarkerInText {
                text: text.to_string(),
                marker: marker.clone(),
            });
        }
    }

    if set.is_empty() {
        return Ok(text.to_string());
    }

    Ok(highlight_segments(text, set)
        .into_iter()
        .map(|segment| {
            if segment.emphasized {
                format!("{}{}{}", markers.open, segment.text, markers.close)
            } else {
                segment.text
            }
        })
        .collect())
}

/// Validate `ranges` against `text` and wrap them in the default markers
pub fn apply_highlights(text: &str, ranges: &[RawRange]) -> Result<String> {
    let set = HighlightSet::new(text, ranges)?;
    apply_highlight_set(text, &set, &EmphasisMarkers::default())
}

/// Remove the default emphasis markers
pub fn strip_highlights(annotated: &str) -> String {
    DEFAULT_MARKERS.replace_all(annotated, "").into_owned()
}

/// Remove a custom marker pair
pub fn strip_markers(annotated: &str, markers: &EmphasisMarkers) -> String {
    annotated.replace(&markers.open, "").replace(&markers.close, "")
}
