//! Flashcard data model
//!
//! Authored decks arrive as plain `Flashcard`s. A card with nothing on either
//! side doubles as a page separator in authored data, so the engine works on
//! `Card`, which names the two meanings apart.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Image aspect ratios offered by the card editor
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum AspectRatio {
    #[serde(rename = "16:9")]
    Wide,
    #[serde(rename = "4:3")]
    Standard,
    #[default]
    #[serde(rename = "1:1")]
    Square,
    #[serde(rename = "3:4")]
    Portrait,
    #[serde(rename = "9:16")]
    Tall,
}

impl AspectRatio {
    /// Width divided by height
    pub fn ratio(&self) -> f64 {
        match self {
            AspectRatio::Wide => 16.0 / 9.0,
            AspectRatio::Standard => 4.0 / 3.0,
            AspectRatio::Square => 1.0,
            AspectRatio::Portrait => 3.0 / 4.0,
            AspectRatio::Tall => 9.0 / 16.0,
        }
    }
}

/// Vertical placement of card text
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum TextPosition {
    Top,
    #[default]
    Center,
    Bottom,
}

/// One face of a flashcard
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct CardSide {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// URL of an uploaded image
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_aspect_ratio: Option<AspectRatio>,
    /// Percentage, 10-100
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_scale: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_position: Option<TextPosition>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f32>,
}

impl CardSide {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Default::default()
        }
    }

    /// True when the side shows text or an image
    pub fn has_content(&self) -> bool {
        let filled = |field: &Option<String>| field.as_deref().is_some_and(|s| !s.is_empty());
        filled(&self.text) || filled(&self.image)
    }
}

/// A flashcard as stored by the editor
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Default)]
pub struct Flashcard {
    pub id: String,
    #[serde(default)]
    pub front: CardSide,
    #[serde(default)]
    pub back: CardSide,
}

impl Flashcard {
    pub fn new(id: impl Into<String>, front: CardSide, back: CardSide) -> Self {
        Self {
            id: id.into(),
            front,
            back,
        }
    }

    /// Card with text on both faces and a fresh identity
    pub fn with_text(front: impl Into<String>, back: impl Into<String>) -> Self {
        Self::new(fresh_id(), CardSide::text(front), CardSide::text(back))
    }

    /// Empty card with a fresh identity
    pub fn blank() -> Self {
        Self::new(fresh_id(), CardSide::default(), CardSide::default())
    }

    /// Neither side has text or an image
    pub fn is_blank(&self) -> bool {
        !self.front.has_content() && !self.back.has_content()
    }

    pub fn side(&self, side: PageSide) -> &CardSide {
        match side {
            PageSide::Front => &self.front,
            PageSide::Back => &self.back,
        }
    }
}

/// New UUID v4 string
pub fn fresh_id() -> String {
    Uuid::new_v4().to_string()
}

/// Deck entry: real content or a page-break hint
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(tag = "kind", content = "card", rename_all = "camelCase")]
pub enum Card {
    Content(Flashcard),
    PageBreakHint,
}

impl Card {
    /// Classify an authored card. Blank cards cannot be told apart from
    /// separators in stored decks, so every blank card becomes a hint.
    pub fn from_authored(card: Flashcard) -> Self {
        if card.is_blank() {
            Card::PageBreakHint
        } else {
            Card::Content(card)
        }
    }

    pub fn is_hint(&self) -> bool {
        matches!(self, Card::PageBreakHint)
    }

    pub fn content(&self) -> Option<&Flashcard> {
        match self {
            Card::Content(card) => Some(card),
            Card::PageBreakHint => None,
        }
    }
}

/// Classify a whole authored deck
pub fn classify(cards: Vec<Flashcard>) -> Vec<Card> {
    cards.into_iter().map(Card::from_authored).collect()
}

/// Printed side of a sheet
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum PageSide {
    Front,
    Back,
}
