use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use crate::error::{Result, StorageError};
use crate::lmdb_storage::LmdbStorage;

/// A saved game result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HighScore {
    pub id: u64,
    pub player_id: Uuid,
    pub name: String,
    pub score: u32,
    pub created_at: DateTime<Utc>,
}

/// High score table on top of LMDB
pub struct HighScoreStore {
    storage: Arc<LmdbStorage>,
    next_id: Mutex<u64>,
}

impl HighScoreStore {
    pub fn new(storage: Arc<LmdbStorage>) -> Result<Self> {
        let next_id = storage.last_high_score_id()?.map_or(1, |id| id + 1);
        Ok(Self {
            storage,
            next_id: Mutex::new(next_id),
        })
    }

    /// Save a score under `name`. The name is trimmed and must not be blank.
    pub fn save(&self, score: u32, name: &str) -> Result<HighScore> {
        let name = name.trim();
        if name.is_empty() {
            return Err(StorageError::InvalidName(
                "Player name is required to save a high score".to_string(),
            ));
        }

        // holding the lock across the write keeps ids unique and ordered
        let mut next_id = self.next_id.lock();
        let high_score = HighScore {
            id: *next_id,
            player_id: Uuid::new_v4(),
            name: name.to_string(),
            score,
            created_at: Utc::now(),
        };
        let data = bincode::serialize(&high_score)?;
        self.storage.put_high_score(high_score.id, &data)?;
        *next_id += 1;

        Ok(high_score)
    }

    /// All scores, best first; equal scores list the most recent first
    pub fn list(&self) -> Result<Vec<HighScore>> {
        let mut scores = self
            .storage
            .high_score_entries()?
            .into_iter()
            .map(|(_, data)| bincode::deserialize::<HighScore>(&data))
            .collect::<std::result::Result<Vec<_>, _>>()?;

        scores.sort_by(|a, b| {
            b.score
                .cmp(&a.score)
                .then_with(|| b.created_at.cmp(&a.created_at))
                .then_with(|| b.id.cmp(&a.id))
        });
        Ok(scores)
    }

    /// Top `limit` scores
    pub fn top(&self, limit: usize) -> Result<Vec<HighScore>> {
        let mut scores = self.list()?;
        scores.truncate(limit);
        Ok(scores)
    }
}
