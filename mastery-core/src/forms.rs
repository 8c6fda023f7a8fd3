//! Editable state behind the create/edit screens, and the validated drafts they produce.

use crate::{
    check_appearance, deck_color, Card, CardId, CardSide, CoreError, Deck, DeckColor, DeckId,
    Repository, Topic, TopicId, DECK_COLORS, DECK_NAME_MAX_LENGTH, DEFAULT_COLOR_INDEX,
};

/// What confirming a form does: add under a parent, or overwrite an existing entity.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Finish<P, E> {
    AddTo(P),
    EditExisting(E),
}

pub type DeckFinish = Finish<(), DeckId>;
pub type TopicFinish = Finish<DeckId, TopicId>;
pub type CardFinish = Finish<TopicId, CardId>;

impl<P, E> Finish<P, E> {
    pub fn title(&self, noun: &str) -> String {
        match self {
            Finish::AddTo(_) => format!("Add {noun}"),
            Finish::EditExisting(_) => format!("Edit {noun}"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ImageTarget {
    Front,
    Back,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeckDraft {
    pub name: String,
    pub color_index: usize,
    pub image: Option<Vec<u8>>,
}

impl DeckDraft {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            color_index: DEFAULT_COLOR_INDEX,
            image: None,
        }
    }

    pub fn validate(&self) -> Result<(), CoreError> {
        if self.name.trim().is_empty() {
            return Err(CoreError::FormIncomplete("deck name"));
        }
        if self.name.chars().count() > DECK_NAME_MAX_LENGTH {
            return Err(CoreError::Invalid("deck name too long"));
        }
        check_appearance(self.color_index, self.image.as_deref())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeckForm {
    name: String,
    color_index: usize,
    image: Option<Vec<u8>>,
}

impl Default for DeckForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            color_index: DEFAULT_COLOR_INDEX,
            image: None,
        }
    }
}

impl DeckForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_deck(deck: &Deck) -> Self {
        Self {
            name: deck.name.clone(),
            color_index: deck.color_index,
            image: deck.image.clone(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn color_index(&self) -> usize {
        self.color_index
    }

    pub fn image(&self) -> Option<&[u8]> {
        self.image.as_deref()
    }

    /// Input past the length limit is cut off as it is typed.
    pub fn set_name(&mut self, name: &str) {
        self.name = name.chars().take(DECK_NAME_MAX_LENGTH).collect();
    }

    pub fn set_color(&mut self, index: usize) -> Result<(), CoreError> {
        let color = deck_color(index).ok_or(CoreError::Invalid("color index out of range"))?;
        if color.is_clear() && self.image.is_none() {
            return Err(CoreError::Invalid("a clear deck needs an image"));
        }
        self.color_index = index;
        Ok(())
    }

    /// A first image over the default color drops the color overlay.
    pub fn set_image(&mut self, data: Vec<u8>) {
        if self.image.is_none() && self.color_index == DEFAULT_COLOR_INDEX {
            self.color_index = 0;
        }
        self.image = Some(data);
    }

    pub fn clear_image(&mut self) {
        self.image = None;
        if deck_color(self.color_index).map_or(true, |c| c.is_clear()) {
            self.color_index = DEFAULT_COLOR_INDEX;
        }
    }

    /// Palette entries the user may pick right now. Clear needs an image behind it.
    pub fn color_choices(&self) -> Vec<(usize, DeckColor)> {
        DECK_COLORS
            .iter()
            .copied()
            .enumerate()
            .filter(|(_, c)| self.image.is_some() || !c.is_clear())
            .collect()
    }

    pub fn is_incomplete(&self) -> bool {
        self.name.trim().is_empty()
    }

    pub fn submit(&self) -> Result<DeckDraft, CoreError> {
        let draft = DeckDraft {
            name: self.name.clone(),
            color_index: self.color_index,
            image: self.image.clone(),
        };
        draft.validate()?;
        Ok(draft)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TopicForm {
    pub name: String,
}

impl TopicForm {
    pub fn from_topic(topic: &Topic) -> Self {
        Self {
            name: topic.name.clone(),
        }
    }

    pub fn is_incomplete(&self) -> bool {
        self.name.trim().is_empty()
    }

    pub fn submit(&self) -> Result<String, CoreError> {
        if self.is_incomplete() {
            return Err(CoreError::FormIncomplete("topic name"));
        }
        Ok(self.name.clone())
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CardDraft {
    pub front: CardSide,
    pub back: CardSide,
}

impl CardDraft {
    pub fn text(front: impl Into<String>, back: impl Into<String>) -> Self {
        Self {
            front: CardSide::text(front),
            back: CardSide::text(back),
        }
    }

    pub fn validate(&self) -> Result<(), CoreError> {
        if !self.front.is_complete() {
            return Err(CoreError::FormIncomplete("front side"));
        }
        if !self.back.is_complete() {
            return Err(CoreError::FormIncomplete("back side"));
        }
        Ok(())
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CardForm {
    pub front: CardSide,
    pub back: CardSide,
}

impl CardForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_card(card: &Card) -> Self {
        Self {
            front: card.front.clone(),
            back: card.back.clone(),
        }
    }

    pub fn side_mut(&mut self, target: ImageTarget) -> &mut CardSide {
        match target {
            ImageTarget::Front => &mut self.front,
            ImageTarget::Back => &mut self.back,
        }
    }

    pub fn set_text(&mut self, target: ImageTarget, text: impl Into<String>) {
        self.side_mut(target).text = text.into();
    }

    pub fn set_image(&mut self, target: ImageTarget, data: Vec<u8>) {
        self.side_mut(target).image = Some(data);
    }

    pub fn clear_image(&mut self, target: ImageTarget) {
        self.side_mut(target).image = None;
    }

    pub fn is_incomplete(&self) -> bool {
        !(self.front.is_complete() && self.back.is_complete())
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn submit(&self) -> Result<CardDraft, CoreError> {
        let draft = CardDraft {
            front: self.front.clone(),
            back: self.back.clone(),
        };
        draft.validate()?;
        Ok(draft)
    }
}

pub async fn finish_deck<R: Repository + ?Sized>(
    repo: &R,
    action: DeckFinish,
    form: &DeckForm,
) -> Result<Deck, CoreError> {
    let draft = form.submit()?;
    match action {
        Finish::AddTo(()) => repo.create_deck(draft).await,
        Finish::EditExisting(id) => repo.update_deck(id, draft).await,
    }
}

pub async fn finish_topic<R: Repository + ?Sized>(
    repo: &R,
    action: TopicFinish,
    form: &mut TopicForm,
) -> Result<Topic, CoreError> {
    let name = form.submit()?;
    match action {
        Finish::AddTo(deck_id) => {
            let topic = repo.add_topic(deck_id, &name).await?;
            form.name.clear();
            Ok(topic)
        }
        Finish::EditExisting(id) => repo.rename_topic(id, &name).await,
    }
}

/// Adding keeps the form open and empty for the next card; editing leaves it as is.
pub async fn finish_card<R: Repository + ?Sized>(
    repo: &R,
    action: CardFinish,
    form: &mut CardForm,
) -> Result<Card, CoreError> {
    let draft = form.submit()?;
    match action {
        Finish::AddTo(topic_id) => {
            let card = repo.add_card(topic_id, draft).await?;
            form.reset();
            Ok(card)
        }
        Finish::EditExisting(id) => repo.update_card(id, draft).await,
    }
}
