use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("Need at least {required} words to generate a puzzle, got {available}")]
    InsufficientWords { required: usize, available: usize },

    #[error("Embedding dimension mismatch: {left} vs {right}")]
    DimensionMismatch { left: usize, right: usize },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid answer: {0}")]
    InvalidAnswer(String),
}

impl Error {
    /// True for failures the caller can fix by supplying more words.
    #[inline]
    pub fn is_insufficient_words(&self) -> bool {
        matches!(self, Error::InsufficientWords { .. })
    }
}
