//! # EmbedQuest Storage
//!
//! Word sources and persistence for EmbedQuest: an LMDB word store keyed by
//! embedding model, JSON embeddings import, and the high score table.

pub mod error;
pub mod codec;
pub mod lmdb_storage;
pub mod source;
pub mod import;
pub mod high_scores;
pub mod manager;
pub mod service;

pub use error::{Result, StorageError};
pub use lmdb_storage::LmdbStorage;
pub use source::{InMemoryWordSource, WordSource};
pub use import::{check_dimensions, import_embeddings_file, load_embeddings_file, EmbeddingsFile};
pub use high_scores::{HighScore, HighScoreStore};
pub use manager::StorageManager;
pub use service::{PuzzleService, ServiceError, DEFAULT_MODEL_ID, DEFAULT_POOL_SIZE};
