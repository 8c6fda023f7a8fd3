use directories::ProjectDirs;
use std::path::{Path, PathBuf};

pub fn data_root() -> PathBuf {
    if let Some(pd) = ProjectDirs::from("com", "mastery", "Mastery") {
        pd.data_dir().to_path_buf()
    } else {
        std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
    }
}

pub fn default_store_file() -> PathBuf {
    data_root().join("mastery.json")
}

/// Backups live in a sibling `backups/` directory of the store file.
pub fn backups_dir_for(file: &Path) -> PathBuf {
    file.parent()
        .map(|p| p.join("backups"))
        .unwrap_or_else(|| PathBuf::from("backups"))
}
