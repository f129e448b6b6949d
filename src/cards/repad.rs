//! Card pagination and repadding
//!
//! Page-break hints split a deck into groups. Repadding drops the original
//! hints and pads each group except the last with fresh hints up to the next
//! page boundary, so every group after the first starts on a new page.
//!
//! Padding is emitted as `Card::PageBreakHint`, which makes `repad` idempotent
//! with exact equality: running it again recovers the same groups and the same
//! padding. `materialize` turns the hints into blank cards at the very end.

use crate::error::{LayoutError, Result};
use crate::models::{Card, Flashcard};

/// Runs of content cards between hints; empty runs are dropped
pub fn split_groups(cards: &[Card]) -> Vec<&[Card]> {
    cards
        .split(Card::is_hint)
        .filter(|group| !group.is_empty())
        .collect()
}

/// Hints needed after `len` cards to reach a multiple of `page_size`
fn padding_after(len: usize, page_size: usize) -> usize {
    match len % page_size {
        0 => 0,
        rem => page_size - rem,
    }
}

/// Re-pad a deck so each group starts on a fresh page
///
/// With zero or one group the content comes back unchanged, hints stripped
/// and nothing added. The last group is never padded after.
pub fn repad(cards: &[Card], page_size: usize) -> Result<Vec<Card>> {
    if page_size == 0 {
        return Err(LayoutError::InvalidPageSize(page_size));
    }

    let groups = split_groups(cards);
    let last = groups.len().saturating_sub(1);

    let (output, padding) = groups.iter().enumerate().fold(
        (Vec::with_capacity(cards.len()), 0usize),
        |(mut output, padding), (index, group)| {
            output.extend_from_slice(group);
            let pad = if index < last { padding_after(output.len(), page_size) } else { 0 };
            output.extend(std::iter::repeat(Card::PageBreakHint).take(pad));
            (output, padding + pad)
        },
    );

    log::debug!(
        "repad: {} group(s), {} padding card(s), page size {}",
        groups.len(),
        padding,
        page_size
    );

    Ok(output)
}

/// Content only, every hint dropped
pub fn strip_hints(cards: &[Card]) -> Vec<Card> {
    cards.iter().filter(|card| !card.is_hint()).cloned().collect()
}

/// Authored cards for storage or rendering; each hint becomes a blank card
/// with a fresh identity
pub fn materialize(cards: Vec<Card>) -> Vec<Flashcard> {
    cards
        .into_iter()
        .map(|card| match card {
            Card::Content(card) => card,
            Card::PageBreakHint => Flashcard::blank(),
        })
        .collect()
}
