use serde::{Deserialize, Serialize};

use crate::puzzle::{Puzzle, SimilarityScores};

/// Client-facing view of a [`Puzzle`]: names and scores only, no embeddings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PuzzleResponse {
    pub starter: String,
    pub options: [String; 2],
    pub correct_answer: String,
    pub similarity_scores: SimilarityScores,
}

impl PuzzleResponse {
    /// Slot of `word` among the options
    pub fn option_index(&self, word: &str) -> Option<usize> {
        self.options.iter().position(|option| option == word)
    }

    /// Similarity of the starter to `word`, if it is one of the options
    pub fn score_for(&self, word: &str) -> Option<f64> {
        self.option_index(word)
            .and_then(|index| self.similarity_scores.get(index))
    }
}

impl From<&Puzzle> for PuzzleResponse {
    fn from(puzzle: &Puzzle) -> Self {
        Self {
            starter: puzzle.starter.name.clone(),
            options: [
                puzzle.options[0].name.clone(),
                puzzle.options[1].name.clone(),
            ],
            correct_answer: puzzle.correct_answer.name.clone(),
            similarity_scores: puzzle.similarity_scores,
        }
    }
}

impl From<Puzzle> for PuzzleResponse {
    fn from(puzzle: Puzzle) -> Self {
        let [first, second] = puzzle.options;
        Self {
            starter: puzzle.starter.name,
            options: [first.name, second.name],
            correct_answer: puzzle.correct_answer.name,
            similarity_scores: puzzle.similarity_scores,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::SequenceRandom;
    use crate::{generate_puzzle, Word};

    fn puzzle() -> Puzzle {
        let pool = vec![
            Word::new("A", vec![1.0, 0.0]),
            Word::new("B", vec![0.9, 0.1]),
            Word::new("C", vec![0.0, 1.0]),
        ];
        generate_puzzle(&pool, &mut SequenceRandom::new(vec![0, 0, 0, 1])).unwrap()
    }

    #[test]
    fn test_projection_strips_embeddings() {
        let response = puzzle().to_response();
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(json["starter"], "A");
        assert_eq!(json["options"], serde_json::json!(["C", "B"]));
        assert_eq!(json["correctAnswer"], "B");
        assert!(json["similarityScores"]["option1"].is_number());
        assert!(json["similarityScores"]["option2"].is_number());
        assert!(!json.to_string().contains("embedding"));
    }

    #[test]
    fn test_owned_and_borrowed_projection_agree() {
        let puzzle = puzzle();
        let borrowed = PuzzleResponse::from(&puzzle);
        assert_eq!(borrowed, PuzzleResponse::from(puzzle));
    }

    #[test]
    fn test_score_for() {
        let response = puzzle().to_response();
        assert_eq!(response.option_index("B"), Some(1));
        assert_eq!(response.score_for("B"), Some(response.similarity_scores.option2));
        assert_eq!(response.score_for("A"), None);
    }
}
