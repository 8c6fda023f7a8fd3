use crate::{Card, CardSide, CoreError};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Face {
    Front,
    Back,
}

impl Face {
    pub fn flipped(self) -> Self {
        match self {
            Face::Front => Face::Back,
            Face::Back => Face::Front,
        }
    }
}

/// A single pass over a shuffled snapshot of a topic's cards.
///
/// The snapshot is taken at construction; edits to the store afterwards are not seen.
/// Shuffling again means starting a new session.
#[derive(Clone, Debug)]
pub struct StudySession {
    cards: Vec<Card>,
    cursor: usize,
    face: Face,
}

impl StudySession {
    pub fn new(cards: Vec<Card>) -> Result<Self, CoreError> {
        Self::with_rng(cards, &mut rand::thread_rng())
    }

    pub fn with_rng<R: Rng + ?Sized>(mut cards: Vec<Card>, rng: &mut R) -> Result<Self, CoreError> {
        if cards.is_empty() {
            return Err(CoreError::EmptySession);
        }
        cards.shuffle(rng);
        Ok(Self {
            cards,
            cursor: 0,
            face: Face::Front,
        })
    }

    pub fn flip(&mut self) {
        self.face = self.face.flipped();
    }

    pub fn advance(&mut self) {
        if self.cursor + 1 < self.cards.len() {
            self.cursor += 1;
            self.face = Face::Front;
        }
    }

    pub fn retreat(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            self.face = Face::Front;
        }
    }

    pub fn current(&self) -> (&Card, Face) {
        (&self.cards[self.cursor], self.face)
    }

    pub fn current_side(&self) -> &CardSide {
        let card = &self.cards[self.cursor];
        match self.face {
            Face::Front => &card.front,
            Face::Back => &card.back,
        }
    }

    pub fn face(&self) -> Face {
        self.face
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Always false: a session is never built without cards.
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn can_retreat(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_advance(&self) -> bool {
        self.cursor + 1 < self.cards.len()
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }
}
