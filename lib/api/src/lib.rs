//! # EmbedQuest API
//!
//! REST surface for the game: puzzles, answer checking and high scores.

pub mod error;
pub mod rest;

pub use error::ApiError;
pub use rest::{AppState, RestApi};
