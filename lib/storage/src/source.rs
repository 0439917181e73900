use embedquest_core::Word;
use rand::seq::index;

use crate::error::Result;
use crate::lmdb_storage::LmdbStorage;

/// Supplies word pools for puzzle generation
pub trait WordSource: Send + Sync {
    /// Up to `count` distinct words of `model_id`, in random order
    fn fetch_random_word_pool(&self, count: usize, model_id: &str) -> Result<Vec<Word>>;

    /// Number of words stored for `model_id`
    fn word_count(&self, model_id: &str) -> Result<usize>;

    /// Every word of `model_id`. Use sparingly.
    fn all_words(&self, model_id: &str) -> Result<Vec<Word>>;
}

impl WordSource for LmdbStorage {
    fn fetch_random_word_pool(&self, count: usize, model_id: &str) -> Result<Vec<Word>> {
        self.random_words(model_id, count)
    }

    fn word_count(&self, model_id: &str) -> Result<usize> {
        self.count_words(model_id)
    }

    fn all_words(&self, model_id: &str) -> Result<Vec<Word>> {
        LmdbStorage::all_words(self, model_id)
    }
}

/// Words held in memory for a single model, e.g. loaded from an embeddings file
#[derive(Debug, Clone)]
pub struct InMemoryWordSource {
    model_id: String,
    words: Vec<Word>,
}

impl InMemoryWordSource {
    pub fn new(model_id: impl Into<String>, words: Vec<Word>) -> Self {
        Self {
            model_id: model_id.into(),
            words,
        }
    }

    pub fn model_id(&self) -> &str {
        &self.model_id
    }

    fn words_for(&self, model_id: &str) -> &[Word] {
        if model_id == self.model_id {
            &self.words
        } else {
            &[]
        }
    }
}

impl WordSource for InMemoryWordSource {
    fn fetch_random_word_pool(&self, count: usize, model_id: &str) -> Result<Vec<Word>> {
        let words = self.words_for(model_id);
        let amount = count.min(words.len());
        let mut rng = rand::rng();
        Ok(index::sample(&mut rng, words.len(), amount)
            .into_iter()
            .map(|i| words[i].clone())
            .collect())
    }

    fn word_count(&self, model_id: &str) -> Result<usize> {
        Ok(self.words_for(model_id).len())
    }

    fn all_words(&self, model_id: &str) -> Result<Vec<Word>> {
        Ok(self.words_for(model_id).to_vec())
    }
}
