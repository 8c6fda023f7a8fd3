use crate::{Card, CardDraft, CardId, CoreError, Deck, DeckDraft, DeckId, Topic, TopicId};
use async_trait::async_trait;

pub mod memory;

pub use memory::MemoryRepo;

#[async_trait]
pub trait Repository: Send + Sync {
    // Decks, highest order first
    async fn create_deck(&self, draft: DeckDraft) -> Result<Deck, CoreError>;
    async fn get_deck(&self, id: DeckId) -> Result<Deck, CoreError>;
    async fn list_decks(&self) -> Result<Vec<Deck>, CoreError>;
    async fn update_deck(&self, id: DeckId, draft: DeckDraft) -> Result<Deck, CoreError>;
    async fn delete_deck(&self, id: DeckId) -> Result<(), CoreError>;
    async fn move_deck(&self, id: DeckId, to: usize) -> Result<(), CoreError>;

    // Topics, highest order first
    async fn add_topic(&self, deck_id: DeckId, name: &str) -> Result<Topic, CoreError>;
    async fn get_topic(&self, id: TopicId) -> Result<Topic, CoreError>;
    async fn list_topics(&self, deck_id: DeckId) -> Result<Vec<Topic>, CoreError>;
    async fn rename_topic(&self, id: TopicId, name: &str) -> Result<Topic, CoreError>;
    async fn delete_topic(&self, id: TopicId) -> Result<(), CoreError>;
    async fn move_topic(&self, id: TopicId, to: usize) -> Result<(), CoreError>;

    // Cards, oldest first
    async fn add_card(&self, topic_id: TopicId, draft: CardDraft) -> Result<Card, CoreError>;
    async fn get_card(&self, id: CardId) -> Result<Card, CoreError>;
    async fn list_cards(&self, topic_id: TopicId) -> Result<Vec<Card>, CoreError>;
    async fn update_card(&self, id: CardId, draft: CardDraft) -> Result<Card, CoreError>;
    async fn delete_card(&self, id: CardId) -> Result<(), CoreError>;
    async fn move_cards(&self, ids: &[CardId], to: TopicId) -> Result<usize, CoreError>;
}
