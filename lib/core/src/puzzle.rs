//! Puzzle generation.
//!
//! A puzzle shows a starter word and two options. The correct option is drawn
//! from the few words most similar to the starter; the distractor is a word
//! that is clearly less similar but still related, so the round is neither
//! trivial nor arbitrary.

use ahash::AHashSet;
use serde::{Deserialize, Serialize};

use crate::random::{RandomSource, ThreadRandom};
use crate::response::PuzzleResponse;
use crate::similarity::word_similarity;
use crate::{Error, Result, Word};

/// Smallest pool that can yield a starter plus two distinct options
pub const MIN_POOL_SIZE: usize = 3;
/// Correct answer is drawn from this many best-ranked candidates
pub const DEFAULT_TOP_K: usize = 3;
/// Distractor must trail the correct answer by more than this
pub const DEFAULT_MIN_GAP: f64 = 0.1;
/// Distractor must still be more similar than this
pub const DEFAULT_MIN_SIMILARITY: f64 = 0.3;

/// Tuning knobs for puzzle generation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PuzzleConfig {
    pub top_k: usize,
    pub min_gap: f64,
    pub min_similarity: f64,
    pub min_words: usize,
}

impl Default for PuzzleConfig {
    fn default() -> Self {
        Self {
            top_k: DEFAULT_TOP_K,
            min_gap: DEFAULT_MIN_GAP,
            min_similarity: DEFAULT_MIN_SIMILARITY,
            min_words: MIN_POOL_SIZE,
        }
    }
}

impl PuzzleConfig {
    pub fn validate(&self) -> Result<()> {
        if self.top_k == 0 {
            return Err(Error::InvalidConfig("top_k must be at least 1".to_string()));
        }
        if self.min_words < MIN_POOL_SIZE {
            return Err(Error::InvalidConfig(format!(
                "min_words must be at least {}, got {}",
                MIN_POOL_SIZE, self.min_words
            )));
        }
        if !self.min_gap.is_finite() || !self.min_similarity.is_finite() {
            return Err(Error::InvalidConfig(
                "similarity thresholds must be finite".to_string(),
            ));
        }
        // a negative gap would let the correct answer qualify as its own distractor
        if self.min_gap < 0.0 {
            return Err(Error::InvalidConfig(format!(
                "min_gap must not be negative, got {}",
                self.min_gap
            )));
        }
        Ok(())
    }
}

/// Similarity of the starter to each option, in option order
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimilarityScores {
    pub option1: f64,
    pub option2: f64,
}

impl SimilarityScores {
    /// Score for the option at `index` (0 or 1)
    #[inline]
    pub fn get(&self, index: usize) -> Option<f64> {
        match index {
            0 => Some(self.option1),
            1 => Some(self.option2),
            _ => None,
        }
    }
}

/// One round: a starter word, two options, and which option is correct
#[derive(Debug, Clone, PartialEq)]
pub struct Puzzle {
    pub starter: Word,
    pub options: [Word; 2],
    pub correct_answer: Word,
    pub similarity_scores: SimilarityScores,
}

impl Puzzle {
    /// Slot (0 or 1) that holds the correct answer
    pub fn correct_index(&self) -> usize {
        if self.options[0].same_word(&self.correct_answer) {
            0
        } else {
            1
        }
    }

    /// The distractor
    pub fn wrong_answer(&self) -> &Word {
        &self.options[1 - self.correct_index()]
    }

    /// Projection without embeddings, safe to send to clients
    pub fn to_response(&self) -> PuzzleResponse {
        PuzzleResponse::from(self)
    }
}

#[derive(Debug, Clone, Copy)]
struct Candidate<'a> {
    word: &'a Word,
    similarity: f64,
}

/// Builds puzzles from word pools
#[derive(Debug, Clone, Default)]
pub struct PuzzleGenerator {
    config: PuzzleConfig,
}

impl PuzzleGenerator {
    pub fn new(config: PuzzleConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    #[inline]
    pub fn config(&self) -> &PuzzleConfig {
        &self.config
    }

    /// Generate one puzzle from `pool`, drawing all randomness from `rng`.
    ///
    /// Words sharing a name are collapsed to their first occurrence before
    /// anything else happens.
    ///
    /// # Errors
    /// - `InsufficientWords` if fewer than `min_words` distinct words remain
    /// - `DimensionMismatch` if the pool mixes embedding dimensions
    pub fn generate<R>(&self, pool: &[Word], rng: &mut R) -> Result<Puzzle>
    where
        R: RandomSource + ?Sized,
    {
        let words = unique_by_name(pool);
        if words.len() < self.config.min_words {
            return Err(Error::InsufficientWords {
                required: self.config.min_words,
                available: words.len(),
            });
        }

        let starter_index = rng.next_index(words.len());
        let starter = words[starter_index];

        let mut ranked = Vec::with_capacity(words.len() - 1);
        for (index, &word) in words.iter().enumerate() {
            if index == starter_index {
                continue;
            }
            ranked.push(Candidate {
                word,
                similarity: word_similarity(starter, word)?,
            });
        }
        // stable: ties keep pool order
        ranked.sort_by(|a, b| b.similarity.total_cmp(&a.similarity));

        let top = self.config.top_k.min(ranked.len());
        let correct_rank = rng.next_index(top);
        let correct = ranked[correct_rank];

        let wrong = self.pick_distractor(&ranked, correct_rank, rng);

        let options = if rng.next_index(2) == 0 {
            [correct.word.clone(), wrong.word.clone()]
        } else {
            [wrong.word.clone(), correct.word.clone()]
        };

        let similarity_scores = SimilarityScores {
            option1: word_similarity(starter, &options[0])?,
            option2: word_similarity(starter, &options[1])?,
        };

        let puzzle = Puzzle {
            starter: starter.clone(),
            options,
            correct_answer: correct.word.clone(),
            similarity_scores,
        };
        debug_assert!(!puzzle.options[0].same_word(&puzzle.options[1]));
        debug_assert!(!puzzle.options.iter().any(|o| o.same_word(&puzzle.starter)));

        Ok(puzzle)
    }

    /// Distractor: clearly less similar than the correct answer but above the
    /// floor. Falls back to the lower half of the ranking when nothing
    /// qualifies.
    fn pick_distractor<'a, R>(
        &self,
        ranked: &[Candidate<'a>],
        correct_rank: usize,
        rng: &mut R,
    ) -> Candidate<'a>
    where
        R: RandomSource + ?Sized,
    {
        let ceiling = ranked[correct_rank].similarity - self.config.min_gap;
        let related: Vec<Candidate<'a>> = ranked
            .iter()
            .filter(|c| c.similarity < ceiling && c.similarity > self.config.min_similarity)
            .copied()
            .collect();
        if !related.is_empty() {
            return related[rng.next_index(related.len())];
        }

        let lower_half: Vec<Candidate<'a>> = ranked
            .iter()
            .enumerate()
            .skip(ranked.len() / 2)
            .filter(|(rank, _)| *rank != correct_rank)
            .map(|(_, c)| *c)
            .collect();
        if !lower_half.is_empty() {
            return lower_half[rng.next_index(lower_half.len())];
        }

        // only reachable with two candidates where the correct answer sits in
        // the lower half; the other one is then the only choice
        let rest: Vec<Candidate<'a>> = ranked
            .iter()
            .enumerate()
            .filter(|(rank, _)| *rank != correct_rank)
            .map(|(_, c)| *c)
            .collect();
        rest[rng.next_index(rest.len())]
    }
}

/// Generate a puzzle with the default tuning
pub fn generate_puzzle<R>(pool: &[Word], rng: &mut R) -> Result<Puzzle>
where
    R: RandomSource + ?Sized,
{
    PuzzleGenerator::default().generate(pool, rng)
}

/// Generate a puzzle with the default tuning and the thread-local generator
pub fn generate_random_puzzle(pool: &[Word]) -> Result<Puzzle> {
    generate_puzzle(pool, &mut ThreadRandom::new())
}

fn unique_by_name(pool: &[Word]) -> Vec<&Word> {
    let mut seen = AHashSet::with_capacity(pool.len());
    pool.iter()
        .filter(|word| seen.insert(word.name.as_str()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::{SeededRandom, SequenceRandom};
    use std::collections::HashMap;

    fn word(name: &str, embedding: &[f32]) -> Word {
        Word::new(name, embedding.to_vec())
    }

    fn abc_pool() -> Vec<Word> {
        vec![
            word("A", &[1.0, 0.0]),
            word("B", &[0.9, 0.1]),
            word("C", &[0.0, 1.0]),
        ]
    }

    /// Forces the starter index, then defers to a seeded generator
    struct ForcedStarter {
        starter: Option<usize>,
        inner: SeededRandom,
    }

    impl RandomSource for ForcedStarter {
        fn next_index(&mut self, n: usize) -> usize {
            match self.starter.take() {
                Some(index) => index,
                None => self.inner.next_index(n),
            }
        }
    }

    fn assert_valid(puzzle: &Puzzle) {
        let [first, second] = &puzzle.options;
        assert!(!first.same_word(second));
        assert!(!first.same_word(&puzzle.starter));
        assert!(!second.same_word(&puzzle.starter));

        let matches = puzzle
            .options
            .iter()
            .filter(|o| o.same_word(&puzzle.correct_answer))
            .count();
        assert_eq!(matches, 1);

        let expected1 = word_similarity(&puzzle.starter, first).unwrap();
        let expected2 = word_similarity(&puzzle.starter, second).unwrap();
        assert_eq!(puzzle.similarity_scores.option1, expected1);
        assert_eq!(puzzle.similarity_scores.option2, expected2);
    }

    fn sample_pool(n: usize, dim: usize, seed: u64) -> Vec<Word> {
        let mut rng = SeededRandom::new(seed);
        (0..n)
            .map(|i| {
                let embedding: Vec<f32> = (0..dim)
                    .map(|_| rng.next_index(2001) as f32 / 1000.0 - 1.0)
                    .collect();
                word(&format!("word{}", i), &embedding)
            })
            .collect()
    }

    #[test]
    fn test_two_words_is_insufficient() {
        let pool = vec![word("A", &[1.0, 0.0]), word("B", &[0.0, 1.0])];
        let err = generate_puzzle(&pool, &mut SeededRandom::new(1)).unwrap_err();
        assert_eq!(err, Error::InsufficientWords { required: 3, available: 2 });
        assert!(err.is_insufficient_words());
    }

    #[test]
    fn test_three_words_succeeds() {
        for seed in 0..50 {
            let puzzle = generate_puzzle(&abc_pool(), &mut SeededRandom::new(seed)).unwrap();
            assert_valid(&puzzle);
        }
    }

    #[test]
    fn test_concrete_scenario() {
        // starter A, top candidate B, fallback slot 0, correct answer first
        let mut rng = SequenceRandom::new(vec![0, 0, 0, 0]);
        let puzzle = generate_puzzle(&abc_pool(), &mut rng).unwrap();

        assert_eq!(puzzle.starter.name, "A");
        assert_eq!(puzzle.correct_answer.name, "B");
        assert_eq!(puzzle.wrong_answer().name, "C");
        assert_eq!(puzzle.options[0].name, "B");
        assert!((puzzle.similarity_scores.option1 - 0.99388).abs() < 1e-4);
        assert!(puzzle.similarity_scores.option2.abs() < 1e-9);
        assert_eq!(rng.draws(), 4);
    }

    #[test]
    fn test_scores_follow_shuffled_order() {
        // coin flip of 1 puts the correct answer in the second slot
        let mut rng = SequenceRandom::new(vec![0, 0, 0, 1]);
        let puzzle = generate_puzzle(&abc_pool(), &mut rng).unwrap();

        assert_eq!(puzzle.options[0].name, "C");
        assert_eq!(puzzle.options[1].name, "B");
        assert_eq!(puzzle.correct_index(), 1);
        assert!(puzzle.similarity_scores.option1.abs() < 1e-9);
        assert!((puzzle.similarity_scores.option2 - 0.99388).abs() < 1e-4);
        assert_valid(&puzzle);
    }

    #[test]
    fn test_correct_answer_in_lower_half_still_distinct() {
        // starter A picks C (rank 1) as correct; lower half is only C
        let mut rng = SequenceRandom::new(vec![0, 1, 0, 0]);
        let puzzle = generate_puzzle(&abc_pool(), &mut rng).unwrap();
        assert_eq!(puzzle.correct_answer.name, "C");
        assert_eq!(puzzle.wrong_answer().name, "B");
        assert_valid(&puzzle);
    }

    #[test]
    fn test_distractor_respects_gap_and_floor() {
        let pool = vec![
            word("sun", &[1.0, 0.0, 0.0]),
            word("star", &[0.98, 0.2, 0.0]),
            word("moon", &[0.7, 0.7, 0.0]),
            word("rock", &[0.1, 0.0, 1.0]),
            word("tax", &[0.0, 0.0, 1.0]),
        ];
        let generator = PuzzleGenerator::default();
        for seed in 0..200 {
            let mut rng = ForcedStarter {
                starter: Some(0),
                inner: SeededRandom::new(seed),
            };
            let puzzle = generator.generate(&pool, &mut rng).unwrap();
            assert_valid(&puzzle);
            if puzzle.correct_answer.name == "star" {
                // moon (~0.71) is the only word in (0.3, star - 0.1)
                assert_eq!(puzzle.wrong_answer().name, "moon");
            }
        }
    }

    #[test]
    fn test_distinctness_over_many_pools() {
        for seed in 0..100 {
            let pool = sample_pool(3 + (seed as usize % 20), 16, seed);
            let mut rng = SeededRandom::new(seed * 7 + 3);
            for _ in 0..10 {
                let puzzle = generate_puzzle(&pool, &mut rng).unwrap();
                assert_valid(&puzzle);
            }
        }
    }

    #[test]
    fn test_deterministic_for_fixed_seed() {
        let pool = sample_pool(30, 32, 9);
        let a = generate_puzzle(&pool, &mut SeededRandom::new(77)).unwrap();
        let b = generate_puzzle(&pool, &mut SeededRandom::new(77)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_identical_word_is_favoured() {
        let mut pool = vec![
            word("starter", &[1.0, 0.0, 0.0, 0.0]),
            word("twin", &[1.0, 0.0, 0.0, 0.0]),
        ];
        let others = [
            [0.5, 0.8, 0.1, 0.0],
            [0.4, 0.0, 0.9, 0.1],
            [0.3, 0.3, 0.3, 0.8],
            [0.1, 0.9, 0.2, 0.2],
            [0.0, 0.1, 0.2, 0.9],
            [0.2, 0.6, 0.6, 0.3],
        ];
        for (i, embedding) in others.iter().enumerate() {
            pool.push(word(&format!("other{}", i), embedding));
        }

        let generator = PuzzleGenerator::default();
        let trials = 3000;
        let mut counts: HashMap<String, usize> = HashMap::new();
        for seed in 0..trials {
            let mut rng = ForcedStarter {
                starter: Some(0),
                inner: SeededRandom::new(seed),
            };
            let puzzle = generator.generate(&pool, &mut rng).unwrap();
            *counts.entry(puzzle.correct_answer.name.clone()).or_default() += 1;
        }

        let twin = counts.get("twin").copied().unwrap_or(0);
        assert!(twin as f64 > trials as f64 * 0.25);
        // only the top three ever win
        assert_eq!(counts.len(), 3);
        for (name, &count) in &counts {
            if name != "twin" {
                assert!(twin as f64 >= count as f64 * 0.85, "{} won {} vs {}", name, count, twin);
            }
        }
    }

    #[test]
    fn test_dimension_mismatch_propagates() {
        let pool = vec![
            word("A", &[1.0, 0.0]),
            word("B", &[0.9, 0.1]),
            word("C", &[0.0, 1.0, 0.0]),
        ];
        let err = generate_puzzle(&pool, &mut SequenceRandom::new(vec![0])).unwrap_err();
        assert_eq!(err, Error::DimensionMismatch { left: 2, right: 3 });
    }

    #[test]
    fn test_duplicate_names_collapsed() {
        let pool = vec![
            word("A", &[1.0, 0.0]),
            word("A", &[1.0, 0.0]),
            word("B", &[0.0, 1.0]),
        ];
        let err = generate_puzzle(&pool, &mut SeededRandom::new(0)).unwrap_err();
        assert_eq!(err, Error::InsufficientWords { required: 3, available: 2 });

        let mut pool = pool;
        pool.push(word("C", &[0.7, 0.7]));
        for seed in 0..30 {
            let puzzle = generate_puzzle(&pool, &mut SeededRandom::new(seed)).unwrap();
            assert_valid(&puzzle);
        }
    }

    #[test]
    fn test_custom_config() {
        let config = PuzzleConfig {
            top_k: 1,
            ..PuzzleConfig::default()
        };
        let generator = PuzzleGenerator::new(config).unwrap();
        let mut rng = ForcedStarter {
            starter: Some(0),
            inner: SeededRandom::new(5),
        };
        let puzzle = generator.generate(&abc_pool(), &mut rng).unwrap();
        assert_eq!(puzzle.correct_answer.name, "B");
    }

    #[test]
    fn test_invalid_config() {
        let zero_top = PuzzleConfig {
            top_k: 0,
            ..PuzzleConfig::default()
        };
        assert!(matches!(PuzzleGenerator::new(zero_top), Err(Error::InvalidConfig(_))));

        let tiny_pool = PuzzleConfig {
            min_words: 2,
            ..PuzzleConfig::default()
        };
        assert!(matches!(PuzzleGenerator::new(tiny_pool), Err(Error::InvalidConfig(_))));

        let nan_floor = PuzzleConfig {
            min_similarity: f64::NAN,
            ..PuzzleConfig::default()
        };
        assert!(matches!(PuzzleGenerator::new(nan_floor), Err(Error::InvalidConfig(_))));

        let negative_gap = PuzzleConfig {
            min_gap: -0.5,
            ..PuzzleConfig::default()
        };
        assert!(matches!(PuzzleGenerator::new(negative_gap), Err(Error::InvalidConfig(_))));

        let zero_gap = PuzzleConfig {
            min_gap: 0.0,
            ..PuzzleConfig::default()
        };
        let generator = PuzzleGenerator::new(zero_gap).unwrap();
        let pool = vec![
            Word::new("A", vec![1.0, 0.0]),
            Word::new("B", vec![0.9, 0.1]),
            Word::new("C", vec![0.8, 0.3]),
        ];
        let puzzle = generator
            .generate(&pool, &mut SequenceRandom::new(vec![0, 0, 0, 0]))
            .unwrap();
        assert_eq!(puzzle.correct_answer.name, "B");
        assert_eq!(puzzle.wrong_answer().name, "C");
    }

    #[test]
    fn test_generate_random_puzzle() {
        let pool = sample_pool(30, 8, 3);
        let puzzle = generate_random_puzzle(&pool).unwrap();
        assert_valid(&puzzle);
    }
}
