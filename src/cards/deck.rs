//! Flashcard deck layout
//!
//! Turns an authored deck into print pages: classify, repad to the grid
//! capacity, cut into sheets, and place each sheet twice, front page first
//! and back page second, in duplex order.

use serde::{Deserialize, Serialize};

use super::grid::{place_on_grid, GridCell, GridSpec};
use super::repad::{repad, strip_hints};
use crate::error::Result;
use crate::models::{classify, Flashcard, PageSide};
use crate::settings::ExportSettings;

/// One printed page side
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DeckPage {
    /// Physical sheet this page is printed on
    pub sheet: usize,
    pub side: PageSide,
    pub cells: Vec<Vec<GridCell>>,
}

/// Complete deck layout
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DeckLayout {
    pub grid: GridSpec,
    /// Cards per page side
    pub page_size: usize,
    /// Content cards placed
    pub card_count: usize,
    pub sheet_count: usize,
    pub pages: Vec<DeckPage>,
}

/// Lay out an authored deck
///
/// With `padGroups` on, blank cards act as group separators and each group
/// starts on a fresh sheet; with it off they are dropped. An empty deck has
/// no pages.
pub fn layout_deck(cards: Vec<Flashcard>, settings: &ExportSettings) -> Result<DeckLayout> {
    let grid = settings.grid;
    let page_size = settings.validated()?.cards_per_page();

    let classified = classify(cards);
    let placed = if settings.flashcards.pad_groups {
        repad(&classified, page_size)?
    } else {
        strip_hints(&classified)
    };

    let mut pages = Vec::new();
    for (sheet, page_cards) in placed.chunks(page_size).enumerate() {
        for side in [PageSide::Front, PageSide::Back] {
            pages.push(DeckPage {
                sheet,
                side,
                cells: place_on_grid(page_cards, grid, side)?,
            });
        }
    }

    let card_count = placed.iter().filter(|c| !c.is_hint()).count();
    let sheet_count = pages.len() / 2;

    log::debug!(
        "deck: {} card(s) on {} sheet(s) of {}x{}",
        card_count,
        sheet_count,
        grid.rows,
        grid.cols
    );

    Ok(DeckLayout {
        grid,
        page_size,
        card_count,
        sheet_count,
        pages,
    })
}
