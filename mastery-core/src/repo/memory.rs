use crate::{
    Card, CardDraft, CardId, CoreError, Deck, DeckDraft, DeckId, Store, Topic, TopicId,
};
use async_trait::async_trait;
use parking_lot::RwLock;

#[derive(Default)]
pub struct MemoryRepo {
    store: RwLock<Store>,
}

impl MemoryRepo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_store(store: Store) -> Self {
        Self {
            store: RwLock::new(store),
        }
    }
}

#[async_trait]
impl crate::repo::Repository for MemoryRepo {
    async fn create_deck(&self, draft: DeckDraft) -> Result<Deck, CoreError> {
        self.store.write().create_deck(draft)
    }

    async fn get_deck(&self, id: DeckId) -> Result<Deck, CoreError> {
        self.store.read().deck(id).cloned()
    }

    async fn list_decks(&self) -> Result<Vec<Deck>, CoreError> {
        Ok(self.store.read().decks().to_vec())
    }

    async fn update_deck(&self, id: DeckId, draft: DeckDraft) -> Result<Deck, CoreError> {
        self.store.write().update_deck(id, draft)
    }

    async fn delete_deck(&self, id: DeckId) -> Result<(), CoreError> {
        self.store.write().delete_deck(id).map(|_| ())
    }

    async fn move_deck(&self, id: DeckId, to: usize) -> Result<(), CoreError> {
        self.store.write().move_deck(id, to)
    }

    async fn add_topic(&self, deck_id: DeckId, name: &str) -> Result<Topic, CoreError> {
        self.store.write().add_topic(deck_id, name)
    }

    async fn get_topic(&self, id: TopicId) -> Result<Topic, CoreError> {
        self.store.read().topic(id).cloned()
    }

    async fn list_topics(&self, deck_id: DeckId) -> Result<Vec<Topic>, CoreError> {
        Ok(self.store.read().deck(deck_id)?.topics.clone())
    }

    async fn rename_topic(&self, id: TopicId, name: &str) -> Result<Topic, CoreError> {
        self.store.write().rename_topic(id, name)
    }

    async fn delete_topic(&self, id: TopicId) -> Result<(), CoreError> {
        self.store.write().delete_topic(id).map(|_| ())
    }

    async fn move_topic(&self, id: TopicId, to: usize) -> Result<(), CoreError> {
        self.store.write().move_topic(id, to)
    }

    async fn add_card(&self, topic_id: TopicId, draft: CardDraft) -> Result<Card, CoreError> {
        self.store.write().add_card(topic_id, draft)
    }

    async fn get_card(&self, id: CardId) -> Result<Card, CoreError> {
        self.store.read().card(id).cloned()
    }

    async fn list_cards(&self, topic_id: TopicId) -> Result<Vec<Card>, CoreError> {
        Ok(self.store.read().topic(topic_id)?.cards.clone())
    }

    async fn update_card(&self, id: CardId, draft: CardDraft) -> Result<Card, CoreError> {
        self.store.write().update_card(id, draft)
    }

    async fn delete_card(&self, id: CardId) -> Result<(), CoreError> {
        self.store.write().delete_card(id).map(|_| ())
    }

    async fn move_cards(&self, ids: &[CardId], to: TopicId) -> Result<usize, CoreError> {
        self.store.write().move_cards(ids, to)
    }
}
