//! Glue between a [`WordSource`] and the puzzle generator.

use embedquest_core::{Error as CoreError, PuzzleGenerator, PuzzleResponse, RandomSource, ThreadRandom};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, error, warn};

use crate::error::StorageError;
use crate::source::WordSource;

/// Model used when none is configured
pub const DEFAULT_MODEL_ID: &str = "all-MiniLM-L6-v2";
/// Words fetched per puzzle
pub const DEFAULT_POOL_SIZE: usize = 30;

#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("Word source error: {0}")]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Puzzle(#[from] CoreError),
}

impl ServiceError {
    pub fn is_insufficient_words(&self) -> bool {
        match self {
            ServiceError::Puzzle(e) => e.is_insufficient_words(),
            ServiceError::Storage(StorageError::Core(e)) => e.is_insufficient_words(),
            ServiceError::Storage(_) => false,
        }
    }
}

/// Produces client-ready puzzles from a word source
pub struct PuzzleService {
    source: Arc<dyn WordSource>,
    generator: PuzzleGenerator,
    model_id: String,
    pool_size: usize,
}

impl PuzzleService {
    pub fn new(
        source: Arc<dyn WordSource>,
        generator: PuzzleGenerator,
        model_id: impl Into<String>,
        pool_size: usize,
    ) -> Self {
        Self {
            source,
            generator,
            model_id: model_id.into(),
            pool_size,
        }
    }

    /// Service with the default generator, model and pool size
    pub fn with_defaults(source: Arc<dyn WordSource>) -> Self {
        Self::new(source, PuzzleGenerator::default(), DEFAULT_MODEL_ID, DEFAULT_POOL_SIZE)
    }

    #[inline]
    pub fn model_id(&self) -> &str {
        &self.model_id
    }

    #[inline]
    pub fn pool_size(&self) -> usize {
        self.pool_size
    }

    pub fn word_count(&self) -> Result<usize, ServiceError> {
        Ok(self.source.word_count(&self.model_id)?)
    }

    /// Fetch a fresh pool and build a puzzle from it
    pub fn next_puzzle(&self) -> Result<PuzzleResponse, ServiceError> {
        self.next_puzzle_with(&mut ThreadRandom::new())
    }

    pub fn next_puzzle_with<R>(&self, rng: &mut R) -> Result<PuzzleResponse, ServiceError>
    where
        R: RandomSource + ?Sized,
    {
        let pool = self
            .source
            .fetch_random_word_pool(self.pool_size, &self.model_id)?;
        debug!("Fetched {} words for model {}", pool.len(), self.model_id);

        match self.generator.generate(&pool, rng) {
            Ok(puzzle) => Ok(puzzle.to_response()),
            Err(e @ CoreError::DimensionMismatch { .. }) => {
                error!("Word pool for model {} is inconsistent: {}", self.model_id, e);
                Err(e.into())
            }
            Err(e) => {
                warn!("Cannot generate puzzle for model {}: {}", self.model_id, e);
                Err(e.into())
            }
        }
    }
}
