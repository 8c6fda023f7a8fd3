//! The deck → topic → card tree.
//!
//! Parents own their children by value, so removing a deck or topic drops its whole
//! subtree and a card's two sides can never be shared. Decks and topics are kept in
//! display order (see [`crate::order`]), cards in creation order.

use crate::{
    order, CardDraft, Card, CardId, CoreError, Deck, DeckDraft, DeckId, Topic, TopicId,
    DEFAULT_TOPIC_NAME,
};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Store {
    decks: Vec<Deck>,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adopts decks loaded from elsewhere, repairing anything the invariants forbid:
    /// order gaps, stale palette indexes, unsorted cards, decks with no topic.
    pub fn from_decks(mut decks: Vec<Deck>) -> Self {
        let mut repaired = order::normalize(&mut decks);
        for deck in decks.iter_mut() {
            repaired |= deck.repair_color();
            if deck.topics.is_empty() {
                deck.topics.push(Topic::new(DEFAULT_TOPIC_NAME, 0));
                repaired = true;
            }
            repaired |= order::normalize(&mut deck.topics);
            for topic in deck.topics.iter_mut() {
                topic.cards.sort_by_key(|c| c.created_at);
            }
        }
        if repaired {
            tracing::warn!("repaired inconsistent deck data on load");
        }
        Self { decks }
    }

    pub fn decks(&self) -> &[Deck] {
        &self.decks
    }

    pub fn into_decks(self) -> Vec<Deck> {
        self.decks
    }

    // ----- decks -----

    pub fn deck(&self, id: DeckId) -> Result<&Deck, CoreError> {
        self.decks
            .iter()
            .find(|d| d.id == id)
            .ok_or(CoreError::NotFound("deck"))
    }

    fn deck_mut(&mut self, id: DeckId) -> Result<&mut Deck, CoreError> {
        self.decks
            .iter_mut()
            .find(|d| d.id == id)
            .ok_or(CoreError::NotFound("deck"))
    }

    pub fn create_deck(&mut self, draft: DeckDraft) -> Result<Deck, CoreError> {
        draft.validate()?;
        let deck = Deck::new(draft.name, draft.color_index, draft.image, 0);
        let id = deck.id;
        order::append(&mut self.decks, deck);
        tracing::debug!(%id, "deck created");
        self.deck(id).cloned()
    }

    pub fn update_deck(&mut self, id: DeckId, draft: DeckDraft) -> Result<Deck, CoreError> {
        draft.validate()?;
        let deck = self.deck_mut(id)?;
        deck.name = draft.name;
        deck.color_index = draft.color_index;
        deck.image = draft.image;
        tracing::debug!(%id, "deck updated");
        Ok(deck.clone())
    }

    pub fn delete_deck(&mut self, id: DeckId) -> Result<Deck, CoreError> {
        let at = order::position(&self.decks, id).ok_or(CoreError::NotFound("deck"))?;
        let deck = order::remove_at(&mut self.decks, at)?;
        tracing::debug!(%id, topics = deck.topics.len(), cards = deck.card_count(), "deck deleted");
        Ok(deck)
    }

    pub fn move_deck(&mut self, id: DeckId, to: usize) -> Result<(), CoreError> {
        order::move_to(&mut self.decks, id, to)?;
        tracing::debug!(%id, to, "deck moved");
        Ok(())
    }

    // ----- topics -----

    fn locate_topic(&self, id: TopicId) -> Result<(usize, usize), CoreError> {
        self.decks
            .iter()
            .enumerate()
            .find_map(|(d, deck)| order::position(&deck.topics, id).map(|t| (d, t)))
            .ok_or(CoreError::NotFound("topic"))
    }

    pub fn topic(&self, id: TopicId) -> Result<&Topic, CoreError> {
        let (d, t) = self.locate_topic(id)?;
        Ok(&self.decks[d].topics[t])
    }

    pub fn deck_of_topic(&self, id: TopicId) -> Result<&Deck, CoreError> {
        let (d, _) = self.locate_topic(id)?;
        Ok(&self.decks[d])
    }

    pub fn add_topic(&mut self, deck_id: DeckId, name: &str) -> Result<Topic, CoreError> {
        if name.trim().is_empty() {
            return Err(CoreError::FormIncomplete("topic name"));
        }
        let deck = self.deck_mut(deck_id)?;
        let topic = Topic::new(name, deck.topics.len());
        order::append(&mut deck.topics, topic.clone());
        tracing::debug!(deck = %deck_id, topic = %topic.id, "topic added");
        Ok(topic)
    }

    pub fn rename_topic(&mut self, id: TopicId, name: &str) -> Result<Topic, CoreError> {
        if name.trim().is_empty() {
            return Err(CoreError::FormIncomplete("topic name"));
        }
        let (d, t) = self.locate_topic(id)?;
        let topic = &mut self.decks[d].topics[t];
        topic.name = name.to_string();
        Ok(topic.clone())
    }

    /// Refuses to remove a deck's only topic.
    pub fn delete_topic(&mut self, id: TopicId) -> Result<Topic, CoreError> {
        let (d, t) = self.locate_topic(id)?;
        let topics = &mut self.decks[d].topics;
        if topics.len() == 1 {
            return Err(CoreError::LastTopic);
        }
        let topic = order::remove_at(topics, t)?;
        tracing::debug!(%id, cards = topic.cards.len(), "topic deleted");
        Ok(topic)
    }

    pub fn move_topic(&mut self, id: TopicId, to: usize) -> Result<(), CoreError> {
        let (d, _) = self.locate_topic(id)?;
        order::move_to(&mut self.decks[d].topics, id, to)?;
        tracing::debug!(%id, to, "topic moved");
        Ok(())
    }

    // ----- cards -----

    fn locate_card(&self, id: CardId) -> Result<(usize, usize, usize), CoreError> {
        for (d, deck) in self.decks.iter().enumerate() {
            for (t, topic) in deck.topics.iter().enumerate() {
                if let Some(c) = topic.cards.iter().position(|c| c.id == id) {
                    return Ok((d, t, c));
                }
            }
        }
        Err(CoreError::NotFound("card"))
    }

    pub fn card(&self, id: CardId) -> Result<&Card, CoreError> {
        let (d, t, c) = self.locate_card(id)?;
        Ok(&self.decks[d].topics[t].cards[c])
    }

    pub fn topic_of_card(&self, id: CardId) -> Result<&Topic, CoreError> {
        let (d, t, _) = self.locate_card(id)?;
        Ok(&self.decks[d].topics[t])
    }

    pub fn add_card(&mut self, topic_id: TopicId, draft: CardDraft) -> Result<Card, CoreError> {
        draft.validate()?;
        let (d, t) = self.locate_topic(topic_id)?;
        let card = Card::new(draft.front, draft.back);
        // Newest timestamp, so this lands at the end.
        self.decks[d].topics[t].insert_card(card.clone());
        tracing::debug!(topic = %topic_id, card = %card.id, "card added");
        Ok(card)
    }

    pub fn update_card(&mut self, id: CardId, draft: CardDraft) -> Result<Card, CoreError> {
        draft.validate()?;
        let (d, t, c) = self.locate_card(id)?;
        let card = &mut self.decks[d].topics[t].cards[c];
        card.front = draft.front;
        card.back = draft.back;
        Ok(card.clone())
    }

    /// Cards carry no order field, so nothing is renumbered.
    pub fn delete_card(&mut self, id: CardId) -> Result<Card, CoreError> {
        let (d, t, c) = self.locate_card(id)?;
        let card = self.decks[d].topics[t].cards.remove(c);
        tracing::debug!(%id, "card deleted");
        Ok(card)
    }

    /// Moves cards into `to`, keeping their ids and timestamps. Either every card moves
    /// or, if any id is unknown, nothing does.
    pub fn move_cards(&mut self, ids: &[CardId], to: TopicId) -> Result<usize, CoreError> {
        let (td, tt) = self.locate_topic(to)?;
        for id in ids {
            self.locate_card(*id)?;
        }
        let mut moved = 0;
        for id in ids {
            let (d, t, c) = self.locate_card(*id)?;
            if (d, t) == (td, tt) {
                continue;
            }
            let card = self.decks[d].topics[t].cards.remove(c);
            self.decks[td].topics[tt].insert_card(card);
            moved += 1;
        }
        tracing::debug!(topic = %to, moved, "cards moved");
        Ok(moved)
    }
}
