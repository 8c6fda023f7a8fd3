use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mastery_core::{
    repo::Repository, Card, CardDraft, CardId, CoreError, Deck, DeckDraft, DeckId, Store, Topic,
    TopicId,
};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tokio::sync::Mutex;
use tokio::task;

pub mod paths;

const FILE_VERSION: u32 = 1;
const BACKUP_PREFIX: &str = "mastery-";

#[derive(Serialize, Deserialize)]
struct FileImage {
    version: u32,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    decks: Vec<Deck>,
}

struct State {
    created_at: DateTime<Utc>,
    store: Store,
}

impl State {
    fn image(&self) -> FileImage {
        FileImage {
            version: FILE_VERSION,
            created_at: self.created_at,
            updated_at: Utc::now(),
            decks: self.store.decks().to_vec(),
        }
    }
}

/// The whole deck tree in one JSON file, rewritten after every change.
///
/// Writes go through a temp file in the same directory and a rename, so a crash leaves
/// either the old or the new file. Each write also drops a timestamped copy into the
/// backups directory, keeping the newest `max_backups`.
pub struct JsonStore {
    path: PathBuf,
    backups_dir: PathBuf,
    max_backups: usize,
    state: RwLock<State>,
    /// Held from snapshot to disk so writes land in commit order. Counts backups written.
    writer: Mutex<u64>,
}

impl JsonStore {
    pub async fn open_default() -> Result<Self, CoreError> {
        Self::open(paths::default_store_file(), 10).await
    }

    pub async fn open(path: PathBuf, max_backups: usize) -> Result<Self, CoreError> {
        let backups = paths::backups_dir_for(&path);
        Self::open_with(path, backups, max_backups).await
    }

    pub async fn open_with(
        path: PathBuf,
        backups_dir: PathBuf,
        max_backups: usize,
    ) -> Result<Self, CoreError> {
        let state = load_or_init(&path).await?;
        tracing::info!(path = %path.display(), decks = state.store.decks().len(), "store opened");
        Ok(Self {
            path,
            backups_dir,
            max_backups: max_backups.max(1),
            state: RwLock::new(state),
            writer: Mutex::new(0),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read<T>(&self, f: impl FnOnce(&Store) -> Result<T, CoreError>) -> Result<T, CoreError> {
        f(&self.state.read().store)
    }

    /// Applies `f` and writes the result out. Store operations leave the tree untouched
    /// when they fail, so an error from `f` means there is nothing to save.
    async fn commit<T, F>(&self, f: F) -> Result<T, CoreError>
    where
        T: Send,
        F: FnOnce(&mut Store) -> Result<T, CoreError> + Send,
    {
        let mut seq = self.writer.lock().await;
        let (out, image) = {
            let mut s = self.state.write();
            let out = f(&mut s.store)?;
            (out, s.image())
        };
        *seq += 1;
        let backup = backup_name(*seq);
        let path = self.path.clone();
        let backups = self.backups_dir.clone();
        let keep = self.max_backups;
        task::spawn_blocking(move || write_with_backup(&path, &backups, &backup, keep, &image))
            .await
            .map_err(|e| CoreError::Storage(e.to_string()))?
            .map_err(|e| {
                tracing::error!(error = %e, "failed to save store");
                CoreError::Storage(e.to_string())
            })?;
        Ok(out)
    }
}

async fn load_or_init(path: &Path) -> Result<State, CoreError> {
    if path.exists() {
        let p = path.to_path_buf();
        let img = task::spawn_blocking(move || -> Result<FileImage, CoreError> {
            let buf = fs::read(&p).map_err(|e| CoreError::Storage(e.to_string()))?;
            serde_json::from_slice(&buf).map_err(|e| CoreError::Storage(e.to_string()))
        })
        .await
        .map_err(|e| CoreError::Storage(e.to_string()))??;
        if img.version > FILE_VERSION {
            return Err(CoreError::Storage(format!(
                "store file version {} is newer than supported version {FILE_VERSION}",
                img.version
            )));
        }
        Ok(State {
            created_at: img.created_at,
            store: Store::from_decks(img.decks),
        })
    } else {
        let st = State {
            created_at: Utc::now(),
            store: Store::new(),
        };
        let json = encode(&st.image())?;
        let p = path.to_path_buf();
        task::spawn_blocking(move || write_atomic(&p, &json))
            .await
            .map_err(|e| CoreError::Storage(e.to_string()))?
            .map_err(|e| CoreError::Storage(e.to_string()))?;
        Ok(st)
    }
}

fn encode(img: &FileImage) -> Result<Vec<u8>, CoreError> {
    serde_json::to_vec_pretty(img).map_err(|e| CoreError::Storage(e.to_string()))
}

fn write_atomic(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir)?;
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(bytes)?;
    tmp.flush()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

/// `mastery-<local time to the millisecond>-<sequence>.json`. The sequence keeps names
/// unique within a millisecond, and both fields sort lexically.
fn backup_name(seq: u64) -> String {
    let ts = chrono::Local::now().format("%Y%m%d-%H%M%S%.3f");
    format!("{BACKUP_PREFIX}{ts}-{seq:08}.json")
}

fn write_with_backup(
    path: &Path,
    backups_dir: &Path,
    backup: &str,
    keep: usize,
    img: &FileImage,
) -> Result<(), CoreError> {
    let io = |e: std::io::Error| CoreError::Storage(e.to_string());
    let json = encode(img)?;
    write_atomic(path, &json).map_err(io)?;
    write_atomic(&backups_dir.join(backup), &json).map_err(io)?;
    rotate_backups(backups_dir, keep).map_err(io)
}

/// Backup names embed their timestamp, so name order is age order.
fn rotate_backups(dir: &Path, keep: usize) -> std::io::Result<()> {
    let mut names: Vec<PathBuf> = fs::read_dir(dir)?
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| {
            p.extension().and_then(|s| s.to_str()) == Some("json")
                && p.file_name()
                    .and_then(|s| s.to_str())
                    .is_some_and(|s| s.starts_with(BACKUP_PREFIX))
        })
        .collect();
    names.sort();
    if names.len() > keep {
        for p in &names[..names.len() - keep] {
            if let Err(e) = fs::remove_file(p) {
                tracing::warn!(path = %p.display(), error = %e, "could not remove old backup");
            }
        }
    }
    Ok(())
}

#[async_trait]
impl Repository for JsonStore {
    async fn create_deck(&self, draft: DeckDraft) -> Result<Deck, CoreError> {
        self.commit(|s| s.create_deck(draft)).await
    }

    async fn get_deck(&self, id: DeckId) -> Result<Deck, CoreError> {
        self.read(|s| s.deck(id).cloned())
    }

    async fn list_decks(&self) -> Result<Vec<Deck>, CoreError> {
        self.read(|s| Ok(s.decks().to_vec()))
    }

    async fn update_deck(&self, id: DeckId, draft: DeckDraft) -> Result<Deck, CoreError> {
        self.commit(|s| s.update_deck(id, draft)).await
    }

    async fn delete_deck(&self, id: DeckId) -> Result<(), CoreError> {
        self.commit(|s| s.delete_deck(id).map(|_| ())).await
    }

    async fn move_deck(&self, id: DeckId, to: usize) -> Result<(), CoreError> {
        self.commit(|s| s.move_deck(id, to)).await
    }

    async fn add_topic(&self, deck_id: DeckId, name: &str) -> Result<Topic, CoreError> {
        self.commit(|s| s.add_topic(deck_id, name)).await
    }

    async fn get_topic(&self, id: TopicId) -> Result<Topic, CoreError> {
        self.read(|s| s.topic(id).cloned())
    }

    async fn list_topics(&self, deck_id: DeckId) -> Result<Vec<Topic>, CoreError> {
        self.read(|s| Ok(s.deck(deck_id)?.topics.clone()))
    }

    async fn rename_topic(&self, id: TopicId, name: &str) -> Result<Topic, CoreError> {
        self.commit(|s| s.rename_topic(id, name)).await
    }

    async fn delete_topic(&self, id: TopicId) -> Result<(), CoreError> {
        self.commit(|s| s.delete_topic(id).map(|_| ())).await
    }

    async fn move_topic(&self, id: TopicId, to: usize) -> Result<(), CoreError> {
        self.commit(|s| s.move_topic(id, to)).await
    }

    async fn add_card(&self, topic_id: TopicId, draft: CardDraft) -> Result<Card, CoreError> {
        self.commit(|s| s.add_card(topic_id, draft)).await
    }

    async fn get_card(&self, id: CardId) -> Result<Card, CoreError> {
        self.read(|s| s.card(id).cloned())
    }

    async fn list_cards(&self, topic_id: TopicId) -> Result<Vec<Card>, CoreError> {
        self.read(|s| Ok(s.topic(topic_id)?.cards.clone()))
    }

    async fn update_card(&self, id: CardId, draft: CardDraft) -> Result<Card, CoreError> {
        self.commit(|s| s.update_card(id, draft)).await
    }

    async fn delete_card(&self, id: CardId) -> Result<(), CoreError> {
        self.commit(|s| s.delete_card(id).map(|_| ())).await
    }

    async fn move_cards(&self, ids: &[CardId], to: TopicId) -> Result<usize, CoreError> {
        self.commit(|s| s.move_cards(ids, to)).await
    }
}
