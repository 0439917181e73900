use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;

use crate::error::Result;
use crate::high_scores::HighScoreStore;
use crate::lmdb_storage::LmdbStorage;

/// Owns the data directory: the LMDB word store and the high score table
pub struct StorageManager {
    data_dir: PathBuf,
    lmdb: Arc<LmdbStorage>,
    high_scores: HighScoreStore,
}

impl StorageManager {
    pub fn new<P: AsRef<Path>>(data_dir: P) -> Result<Self> {
        let data_dir = data_dir.as_ref().to_path_buf();
        std::fs::create_dir_all(&data_dir)?;

        let lmdb_path = data_dir.join("lmdb");
        let lmdb = Arc::new(LmdbStorage::new(&lmdb_path)?);
        let high_scores = HighScoreStore::new(lmdb.clone())?;

        let models = lmdb.list_models()?;
        info!("Opened word store at {:?} ({} models)", lmdb_path, models.len());

        Ok(Self {
            data_dir,
            lmdb,
            high_scores,
        })
    }

    /// Word store, usable as a [`crate::WordSource`]
    #[inline]
    pub fn words(&self) -> Arc<LmdbStorage> {
        self.lmdb.clone()
    }

    #[inline]
    pub fn high_scores(&self) -> &HighScoreStore {
        &self.high_scores
    }

    #[inline]
    #[must_use]
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedquest_core::Word;
    use tempfile::TempDir;

    #[test]
    fn test_reopen_keeps_data() {
        let dir = TempDir::new().unwrap();
        {
            let manager = StorageManager::new(dir.path()).unwrap();
            manager
                .words()
                .put_words("mini", &[Word::new("ocean", vec![1.0, 0.0])])
                .unwrap();
            manager.high_scores().save(7, "Ada").unwrap();
        }

        let manager = StorageManager::new(dir.path()).unwrap();
        assert_eq!(manager.words().count_words("mini").unwrap(), 1);
        assert_eq!(manager.high_scores().list().unwrap()[0].score, 7);
        assert_eq!(manager.data_dir(), dir.path());
    }
}
