use thiserror::Error;

pub type Result<T> = std::result::Result<T, StorageError>;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("LMDB error: {0}")]
    Lmdb(#[from] heed::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] bincode::Error),

    #[error("Corrupt embedding for '{word}': {len} bytes is not a whole number of f32 values")]
    CorruptEmbedding { word: String, len: usize },

    #[error("Invalid name: {0}")]
    InvalidName(String),

    #[error(transparent)]
    Core(#[from] embedquest_core::Error),
}
