use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser, Clone)]
#[command(name = "mastery", version, about = "Mastery flashcards: decks, topics, cards, study")]
pub struct Cli {
    /// Store file (defaults to the app data dir)
    #[arg(long, env = "MASTERY_DATA_FILE", global = true)]
    pub data_file: Option<PathBuf>,

    /// Number of timestamped backups to keep next to the store file
    #[arg(long, default_value_t = 10, global = true)]
    pub max_backups: usize,

    #[command(subcommand)]
    pub cmd: Command,
}

#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Deck operations
    #[command(subcommand)]
    Deck(DeckCmd),
    /// Topic operations
    #[command(subcommand)]
    Topic(TopicCmd),
    /// Card operations
    #[command(subcommand)]
    Card(CardCmd),
    /// Study a topic's cards in shuffled order
    Study(TopicSel),
    /// Launch Terminal UI
    Tui,
}

#[derive(Debug, Subcommand, Clone)]
pub enum DeckCmd {
    Add(DeckAdd),
    List {
        /// Only decks whose name starts with this (case-insensitive)
        #[arg(long)]
        search: Option<String>,
    },
    Edit(DeckEdit),
    Rm { deck: String },
    /// Move a deck to a display position (0 = top)
    Move {
        deck: String,
        #[arg(long)]
        to: usize,
    },
    /// Show the color palette
    Colors,
}

#[derive(Debug, Args, Clone)]
pub struct DeckAdd {
    pub name: String,
    /// Palette index, see `deck colors`
    #[arg(long)]
    pub color: Option<usize>,
    /// Image file to use as the deck background
    #[arg(long)]
    pub image: Option<PathBuf>,
}

#[derive(Debug, Args, Clone)]
pub struct DeckEdit {
    pub deck: String,
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub color: Option<usize>,
    #[arg(long)]
    pub image: Option<PathBuf>,
    #[arg(long, conflicts_with = "image")]
    pub clear_image: bool,
}

/// A deck plus one of its topics. Without `--topic` the most recently added topic is used.
#[derive(Debug, Args, Clone)]
pub struct TopicSel {
    #[arg(long)]
    pub deck: String,
    #[arg(long)]
    pub topic: Option<String>,
}

#[derive(Debug, Subcommand, Clone)]
pub enum TopicCmd {
    Add {
        #[arg(long)]
        deck: String,
        name: String,
    },
    List {
        #[arg(long)]
        deck: String,
        #[arg(long)]
        search: Option<String>,
    },
    Rename {
        #[command(flatten)]
        sel: TopicSel,
        name: String,
    },
    Rm {
        #[command(flatten)]
        sel: TopicSel,
    },
    /// Move a topic to a display position within its deck (0 = top)
    Move {
        #[command(flatten)]
        sel: TopicSel,
        #[arg(long)]
        to: usize,
    },
}

#[derive(Debug, Subcommand, Clone)]
pub enum CardCmd {
    Add(CardAdd),
    List {
        #[command(flatten)]
        sel: TopicSel,
    },
    Edit(CardEdit),
    Rm { card_id: String },
    /// Move cards into another topic
    Move {
        #[arg(required = true)]
        card_ids: Vec<String>,
        #[command(flatten)]
        to: TopicSel,
    },
}

#[derive(Debug, Args, Clone)]
pub struct CardAdd {
    #[command(flatten)]
    pub sel: TopicSel,
    #[arg(long, default_value = "")]
    pub front: String,
    #[arg(long, default_value = "")]
    pub back: String,
    #[arg(long)]
    pub front_image: Option<PathBuf>,
    #[arg(long)]
    pub back_image: Option<PathBuf>,
}

#[derive(Debug, Args, Clone)]
pub struct CardEdit {
    pub card_id: String,
    #[arg(long)]
    pub front: Option<String>,
    #[arg(long)]
    pub back: Option<String>,
    #[arg(long)]
    pub front_image: Option<PathBuf>,
    #[arg(long)]
    pub back_image: Option<PathBuf>,
    #[arg(long, conflicts_with = "front_image")]
    pub clear_front_image: bool,
    #[arg(long, conflicts_with = "back_image")]
    pub clear_back_image: bool,
}
