//! Grid cell placement
//!
//! Maps a page's cards onto a fixed rows x cols grid. The last slot of every
//! page is reserved and always stays empty. Back pages mirror the column order
//! so that after a duplex flip along the vertical axis each card's back lands
//! behind its front.

use serde::{Deserialize, Serialize};

use crate::error::{LayoutError, Result};
use crate::models::{Card, CardSide, PageSide};

/// Width / height of a card face's content area (66mm x 37.125mm)
pub const CONTENT_AREA_RATIO: f64 = 16.0 / 9.0;

/// Page grid dimensions
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(default)]
pub struct GridSpec {
    pub rows: usize,
    pub cols: usize,
}

impl Default for GridSpec {
    fn default() -> Self {
        Self { rows: 3, cols: 3 }
    }
}

impl GridSpec {
    pub fn cells(&self) -> usize {
        self.rows * self.cols
    }

    /// Cards per page side: every cell except the reserved one
    pub fn capacity(&self) -> usize {
        self.cells().saturating_sub(1)
    }

    /// Slot index of the reserved cell
    pub fn reserved_slot(&self) -> usize {
        self.capacity()
    }

    /// Capacity of a usable grid
    pub fn validate(&self) -> Result<usize> {
        if self.cells() < 2 {
            return Err(LayoutError::InvalidGrid {
                rows: self.rows,
                cols: self.cols,
            });
        }
        Ok(self.capacity())
    }

    /// Source slot shown at `row`, `col` on the given side
    pub fn slot(&self, row: usize, col: usize, side: PageSide) -> usize {
        let effective_col = match side {
            PageSide::Front => col,
            PageSide::Back => self.cols - 1 - col,
        };
        row * self.cols + effective_col
    }
}

/// Dashed cutting lines drawn around a front-side cell
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CutLines {
    pub top: bool,
    pub right: bool,
    pub bottom: bool,
    pub left: bool,
}

impl CutLines {
    /// Right and bottom always; left and top only on the outer edge, so
    /// shared edges are drawn once
    pub fn for_cell(row: usize, col: usize, side: PageSide) -> Self {
        match side {
            PageSide::Front => Self {
                top: row == 0,
                right: true,
                bottom: true,
                left: col == 0,
            },
            PageSide::Back => Self::default(),
        }
    }
}

/// Image box as fractions of the face's content area
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct ImageFit {
    pub width: f64,
    pub height: f64,
}

/// Fit an image into the content area
///
/// Images at least as wide as the area fill its width, narrower ones fill
/// its height; `imageScale` (default 100%) shrinks the box.
pub fn image_fit(side: &CardSide) -> Option<ImageFit> {
    side.image.as_deref().filter(|url| !url.is_empty())?;

    let ratio = side.image_aspect_ratio.unwrap_or_default().ratio();
    let scale = f64::from(side.image_scale.unwrap_or(100)) / 100.0;

    let fit = if ratio >= CONTENT_AREA_RATIO {
        ImageFit {
            width: scale,
            height: CONTENT_AREA_RATIO / ratio * scale,
        }
    } else {
        ImageFit {
            width: ratio / CONTENT_AREA_RATIO * scale,
            height: scale,
        }
    };
    Some(fit)
}

/// A positioned cell on one page side
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GridCell {
    pub row: usize,
    pub col: usize,

    /// Index into the page's card slice this cell shows
    pub slot: usize,

    /// The structurally unused cell of the page
    pub reserved: bool,

    /// Identity of the card shown; `None` for empty placeholders
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub card_id: Option<String>,

    /// Face printed on this side
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub face: Option<CardSide>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_fit: Option<ImageFit>,

    pub cut_lines: CutLines,
}

impl GridCell {
    pub fn is_empty(&self) -> bool {
        self.card_id.is_none()
    }
}

/// Place one page's cards, row by row
///
/// `page_cards` holds at most `spec.capacity()` entries. Hints and missing
/// slots become empty placeholders, as does the reserved cell.
pub fn place_on_grid(page_cards: &[Card], spec: GridSpec, side: PageSide) -> Result<Vec<Vec<GridCell>>> {
    let capacity = spec.validate()?;
    if page_cards.len() > capacity {
        return Err(LayoutError::GridOverflow {
            cards: page_cards.len(),
            capacity,
        });
    }

    let reserved_slot = spec.reserved_slot();
    let grid = (0..spec.rows)
        .map(|row| {
            (0..spec.cols)
                .map(|col| {
                    let slot = spec.slot(row, col, side);
                    let card = page_cards.get(slot).and_then(Card::content);
                    let face = card.map(|c| c.side(side).clone());

                    GridCell {
                        row,
                        col,
                        slot,
                        reserved: slot == reserved_slot,
                        card_id: card.map(|c| c.id.clone()),
                        image_fit: face.as_ref().and_then(image_fit),
                        face,
                        cut_lines: CutLines::for_cell(row, col, side),
                    }
                })
                .collect()
        })
        .collect();

    Ok(grid)
}
