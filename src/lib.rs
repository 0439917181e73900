//! # EmbedQuest
//!
//! A word game built on sentence-transformer embeddings: given a starter word,
//! pick which of two options is closer in meaning.
//!
//! ## Quick Start
//!
//! ### As a Server
//!
//! ```bash
//! embedquest import --file data/embeddings.json
//! embedquest serve --http-port 3000
//! ```
//!
//! ### As a Library
//!
//! ```rust
//! use embedquest::prelude::*;
//!
//! let pool = vec![
//!     Word::new("ocean", vec![1.0, 0.1, 0.0]),
//!     Word::new("sea", vec![0.95, 0.15, 0.0]),
//!     Word::new("desk", vec![0.0, 0.2, 1.0]),
//! ];
//!
//! let puzzle = PuzzleGenerator::default()
//!     .generate(&pool, &mut SeededRandom::new(1))
//!     .unwrap();
//! let response: PuzzleResponse = puzzle.to_response();
//! assert!(response.options.contains(&response.correct_answer));
//! ```
//!
//! ## Crate Structure
//!
//! - `embedquest-core` - similarity, puzzle generation, answer scoring
//! - `embedquest-storage` - LMDB word store, embeddings import, high scores
//! - `embedquest-api` - REST API

// Re-export core types
pub use embedquest_core::{
    check_answer, cosine_similarity, generate_puzzle, word_similarity,
    Error, Feedback, GameState, Puzzle, PuzzleConfig, PuzzleGenerator, PuzzleResponse,
    RandomSource, Result, SeededRandom, SequenceRandom, SimilarityScores, ThreadRandom,
    Vector, Word,
};

// Re-export storage
pub use embedquest_storage::{
    HighScore, HighScoreStore, InMemoryWordSource, LmdbStorage, PuzzleService, StorageError,
    StorageManager, WordSource,
};

// Re-export API
pub use embedquest_api::{AppState, RestApi};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        Error, Feedback, GameState, Puzzle, PuzzleConfig, PuzzleGenerator, PuzzleResponse,
        RandomSource, Result, SeededRandom, ThreadRandom, Vector, Word,
        PuzzleService, StorageManager, WordSource,
        AppState, RestApi,
    };
}
