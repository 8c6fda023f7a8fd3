use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::CoreError;

pub type DeckId = Uuid;
pub type TopicId = Uuid;
pub type CardId = Uuid;

pub const DECK_NAME_MAX_LENGTH: usize = 40;
pub const DEFAULT_TOPIC_NAME: &str = "Topic";
pub const DEFAULT_COLOR_INDEX: usize = 1;

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DeckColor {
    Clear,
    Gray,
    Pink,
    Red,
    Brown,
    Orange,
    Yellow,
    Green,
    Teal,
    Blue,
    Indigo,
}

pub const DECK_COLORS: [DeckColor; 11] = [
    DeckColor::Clear,
    DeckColor::Gray,
    DeckColor::Pink,
    DeckColor::Red,
    DeckColor::Brown,
    DeckColor::Orange,
    DeckColor::Yellow,
    DeckColor::Green,
    DeckColor::Teal,
    DeckColor::Blue,
    DeckColor::Indigo,
];

impl DeckColor {
    pub fn is_clear(&self) -> bool {
        matches!(self, DeckColor::Clear)
    }

    pub fn name(&self) -> &'static str {
        match self {
            DeckColor::Clear => "clear",
            DeckColor::Gray => "gray",
            DeckColor::Pink => "pink",
            DeckColor::Red => "red",
            DeckColor::Brown => "brown",
            DeckColor::Orange => "orange",
            DeckColor::Yellow => "yellow",
            DeckColor::Green => "green",
            DeckColor::Teal => "teal",
            DeckColor::Blue => "blue",
            DeckColor::Indigo => "indigo",
        }
    }
}

/// Returns the palette entry for `index`, if there is one.
pub fn deck_color(index: usize) -> Option<DeckColor> {
    DECK_COLORS.get(index).copied()
}

/// A deck needs either a visible color or an image (or both).
pub fn check_appearance(color_index: usize, image: Option<&[u8]>) -> Result<(), CoreError> {
    let color = deck_color(color_index).ok_or(CoreError::Invalid("color index out of range"))?;
    if color.is_clear() && image.is_none() {
        return Err(CoreError::Invalid("a clear deck needs an image"));
    }
    Ok(())
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CardSide {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<Vec<u8>>,
}

impl CardSide {
    pub fn new(text: impl Into<String>, image: Option<Vec<u8>>) -> Self {
        Self {
            text: text.into(),
            image,
        }
    }

    pub fn text(text: impl Into<String>) -> Self {
        Self::new(text, None)
    }

    /// A side is complete when it shows something: non-blank text or an image.
    pub fn is_complete(&self) -> bool {
        self.image.is_some() || !self.text.trim().is_empty()
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Card {
    pub id: CardId,
    pub front: CardSide,
    pub back: CardSide,
    pub created_at: DateTime<Utc>,
}

impl Card {
    pub fn new(front: CardSide, back: CardSide) -> Self {
        Self {
            id: Uuid::new_v4(),
            front,
            back,
            created_at: Utc::now(),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Topic {
    pub id: TopicId,
    pub name: String,
    pub order: usize,
    pub created_at: DateTime<Utc>,
    /// Oldest first.
    #[serde(default)]
    pub cards: Vec<Card>,
}

impl Topic {
    pub fn new(name: impl Into<String>, order: usize) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            order,
            created_at: Utc::now(),
            cards: Vec::new(),
        }
    }

    pub fn card(&self, id: CardId) -> Option<&Card> {
        self.cards.iter().find(|c| c.id == id)
    }

    /// Inserts `card` at its creation-time position so the list never needs re-sorting.
    pub fn insert_card(&mut self, card: Card) {
        let at = self
            .cards
            .partition_point(|c| c.created_at <= card.created_at);
        self.cards.insert(at, card);
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Deck {
    pub id: DeckId,
    pub name: String,
    pub color_index: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<Vec<u8>>,
    pub order: usize,
    /// Display order, highest `order` first.
    pub topics: Vec<Topic>,
    pub created_at: DateTime<Utc>,
}

impl Deck {
    /// Builds a deck seeded with its first topic.
    pub fn new(
        name: impl Into<String>,
        color_index: usize,
        image: Option<Vec<u8>>,
        order: usize,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            color_index,
            image,
            order,
            topics: vec![Topic::new(DEFAULT_TOPIC_NAME, 0)],
            created_at: Utc::now(),
        }
    }

    pub fn color(&self) -> DeckColor {
        deck_color(self.color_index).unwrap_or(DECK_COLORS[DEFAULT_COLOR_INDEX])
    }

    /// Palette entries can disappear between releases; fall back to the default color.
    pub fn repair_color(&mut self) -> bool {
        if self.color_index >= DECK_COLORS.len() {
            self.color_index = DEFAULT_COLOR_INDEX;
            true
        } else {
            false
        }
    }

    pub fn topic(&self, id: TopicId) -> Option<&Topic> {
        self.topics.iter().find(|t| t.id == id)
    }

    pub fn recently_added_topic(&self) -> Option<&Topic> {
        self.topics.iter().max_by_key(|t| t.created_at)
    }

    pub fn card_count(&self) -> usize {
        self.topics.iter().map(|t| t.cards.len()).sum()
    }
}
