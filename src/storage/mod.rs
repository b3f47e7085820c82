//! Filesystem persistence.
//!
//! The raw match log and the player roster live as JSONL files under the
//! data directory. They are the only persisted entities; every ranking or
//! insight table is recomputed from them on demand.

mod jsonl;

pub use jsonl::{JsonlReader, JsonlWriter};

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration for storage paths.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub data_dir: PathBuf,
}

impl StorageConfig {
    pub fn new(data_dir: PathBuf) -> Self {
        Self { data_dir }
    }

    /// Raw match log, one row per line.
    pub fn matches_path(&self) -> PathBuf {
        self.data_dir.join("matches.jsonl")
    }

    /// Player roster, one entry per line.
    pub fn players_path(&self) -> PathBuf {
        self.data_dir.join("players.jsonl")
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self::new(PathBuf::from("./data"))
    }
}
