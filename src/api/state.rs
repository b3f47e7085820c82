use std::sync::Arc;

use crate::api::ApiError;
use crate::config::RankingConfig;
use crate::models::{MatchRecord, Player, RawMatchRow};
use crate::normalize;
use crate::storage::{JsonlReader, StorageConfig};

#[derive(Clone)]
pub struct AppState {
    pub storage: Arc<StorageConfig>,
    pub ranking: Arc<RankingConfig>,
}

impl AppState {
    pub fn new(storage: StorageConfig, ranking: RankingConfig) -> Self {
        Self {
            storage: Arc::new(storage),
            ranking: Arc::new(ranking),
        }
    }

    /// Raw match rows as persisted, including rows normalization would drop.
    pub fn load_raw_matches(&self) -> Result<Vec<RawMatchRow>, ApiError> {
        JsonlReader::<RawMatchRow>::new(self.storage.matches_path())
            .read_all()
            .map_err(|e| ApiError::Internal(e.to_string()))
    }

    /// The normalized match log snapshot used for every computation.
    pub fn load_matches(&self) -> Result<Vec<MatchRecord>, ApiError> {
        Ok(normalize::normalize(&self.load_raw_matches()?))
    }

    pub fn load_players(&self) -> Result<Vec<Player>, ApiError> {
        JsonlReader::<Player>::new(self.storage.players_path())
            .read_all()
            .map_err(|e| ApiError::Internal(e.to_string()))
    }
}
