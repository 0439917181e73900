//! # EmbedQuest Core
//!
//! Puzzle engine for the EmbedQuest word-similarity game.
//!
//! This crate provides:
//!
//! - [`Vector`] / [`Word`] - words with their embeddings
//! - [`cosine_similarity`] / [`word_similarity`] - f64-accumulated cosine similarity
//! - [`PuzzleGenerator`] - picks a starter, a correct answer and a distractor
//! - [`PuzzleResponse`] - the embedding-free projection sent to clients
//! - [`GameState`] - answer scoring for a single player's streak
//!
//! ## Example
//!
//! ```rust
//! use embedquest_core::{generate_puzzle, SeededRandom, Word};
//!
//! let pool = vec![
//!     Word::new("ocean", vec![1.0, 0.0, 0.1]),
//!     Word::new("sea", vec![0.9, 0.1, 0.1]),
//!     Word::new("desk", vec![0.0, 1.0, 0.0]),
//! ];
//!
//! let puzzle = generate_puzzle(&pool, &mut SeededRandom::new(7)).unwrap();
//! let response = puzzle.to_response();
//! assert_ne!(response.options[0], response.options[1]);
//! ```

pub mod error;
pub mod vector;
pub mod word;
pub mod similarity;
pub mod random;
pub mod puzzle;
pub mod response;
pub mod game;

pub use error::{Error, Result};
pub use vector::Vector;
pub use word::Word;
pub use similarity::{cosine_similarity, word_similarity};
pub use random::{RandomSource, SeededRandom, SequenceRandom, ThreadRandom};
pub use puzzle::{
    generate_puzzle, generate_random_puzzle, Puzzle, PuzzleConfig, PuzzleGenerator,
    SimilarityScores, DEFAULT_MIN_GAP, DEFAULT_MIN_SIMILARITY, DEFAULT_TOP_K, MIN_POOL_SIZE,
};
pub use response::PuzzleResponse;
pub use game::{check_answer, Feedback, GameState};
