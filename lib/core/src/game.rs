//! Round scoring and the per-player game state machine.
//!
//! A game is a streak: every correct answer adds a point, the first wrong
//! answer ends the game.

use serde::{Deserialize, Serialize};

use crate::response::PuzzleResponse;
use crate::{Error, Result};

/// Outcome of answering one puzzle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Feedback {
    pub is_correct: bool,
    pub message: String,
    /// Similarity of the starter to the word the player picked
    pub similarity_score: f64,
}

/// Score a single answer against a puzzle.
///
/// # Errors
/// `InvalidAnswer` if `selected` is not one of the puzzle's options.
pub fn check_answer(puzzle: &PuzzleResponse, selected: &str) -> Result<Feedback> {
    let similarity_score = puzzle.score_for(selected).ok_or_else(|| {
        Error::InvalidAnswer(format!(
            "\"{}\" is not one of the options for \"{}\"",
            selected, puzzle.starter
        ))
    })?;

    let is_correct = selected == puzzle.correct_answer;
    let message = if is_correct {
        format!(
            "Great! \"{}\" is more similar to \"{}\"",
            selected, puzzle.starter
        )
    } else {
        format!("Not quite. The correct answer was \"{}\"", puzzle.correct_answer)
    };

    Ok(Feedback {
        is_correct,
        message,
        similarity_score,
    })
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameState {
    pub score: u32,
    pub puzzle_count: u32,
    pub current_puzzle: Option<PuzzleResponse>,
    pub feedback: Option<Feedback>,
    pub game_over: bool,
}

impl GameState {
    /// Fresh game starting on `puzzle`
    pub fn new(puzzle: PuzzleResponse) -> Self {
        Self {
            current_puzzle: Some(puzzle),
            ..Self::default()
        }
    }

    /// True while the current puzzle is waiting for an answer
    pub fn awaiting_answer(&self) -> bool {
        self.current_puzzle.is_some() && self.feedback.is_none() && !self.game_over
    }

    /// Answer the current puzzle.
    ///
    /// Returns `Ok(None)` when there is nothing to answer (no puzzle, already
    /// answered, or game over).
    pub fn answer(&mut self, selected: &str) -> Result<Option<Feedback>> {
        if !self.awaiting_answer() {
            return Ok(None);
        }
        let Some(puzzle) = self.current_puzzle.as_ref() else {
            return Ok(None);
        };

        let feedback = check_answer(puzzle, selected)?;
        if feedback.is_correct {
            self.score += 1;
        } else {
            self.game_over = true;
        }
        self.feedback = Some(feedback.clone());
        Ok(Some(feedback))
    }

    /// Move on to the next puzzle after a correct answer
    pub fn next_puzzle(&mut self, puzzle: PuzzleResponse) {
        if self.game_over {
            return;
        }
        self.current_puzzle = Some(puzzle);
        self.feedback = None;
        self.puzzle_count += 1;
    }

    /// Start over with a new puzzle
    pub fn reset(&mut self, puzzle: PuzzleResponse) {
        *self = Self::new(puzzle);
    }
}
