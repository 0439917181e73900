// LMDB-backed word and high score storage
use embedquest_core::{Vector, Word};
use heed::types::{Bytes, Str, U64};
use heed::{Database, Env, EnvOpenOptions, RoTxn};
use rand::seq::index;
use std::path::Path;
use std::sync::Arc;

use crate::codec::{decode_embedding, encode_embedding};
use crate::error::Result;

const DB_WORDS: &str = "words";
const DB_HIGH_SCORES: &str = "high_scores";

const MAP_SIZE: usize = 1024 * 1024 * 1024; // 1GB

// model id and word are joined with NUL so one model's keys form a prefix range
const KEY_SEPARATOR: char = '\0';

type WordsDb = Database<Str, Bytes>;
type HighScoresDb = Database<U64<heed::byteorder::BE>, Bytes>;

pub struct LmdbStorage {
    env: Arc<Env>,
    words_db: WordsDb,
    high_scores_db: HighScoresDb,
}

impl LmdbStorage {
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        std::fs::create_dir_all(&path)?;

        let env = Arc::new(unsafe {
            EnvOpenOptions::new()
                .map_size(MAP_SIZE)
                .max_dbs(4)
                .open(path)?
        });

        let mut wtxn = env.write_txn()?;
        let words_db = env.create_database(&mut wtxn, Some(DB_WORDS))?;
        let high_scores_db = env.create_database(&mut wtxn, Some(DB_HIGH_SCORES))?;
        wtxn.commit()?;

        Ok(Self {
            env,
            words_db,
            high_scores_db,
        })
    }

    fn word_key(model_id: &str, name: &str) -> String {
        format!("{}{}{}", model_id, KEY_SEPARATOR, name)
    }

    fn model_prefix(model_id: &str) -> String {
        format!("{}{}", model_id, KEY_SEPARATOR)
    }

    /// Store words for a model in a single transaction, replacing existing
    /// entries with the same name
    pub fn put_words(&self, model_id: &str, words: &[Word]) -> Result<usize> {
        let mut wtxn = self.env.write_txn()?;
        for word in words {
            let key = Self::word_key(model_id, &word.name);
            let blob = encode_embedding(word.embedding.as_slice());
            self.words_db.put(&mut wtxn, &key, &blob)?;
        }
        wtxn.commit()?;
        Ok(words.len())
    }

    pub fn get_word(&self, model_id: &str, name: &str) -> Result<Option<Word>> {
        let rtxn = self.env.read_txn()?;
        let key = Self::word_key(model_id, name);
        match self.words_db.get(&rtxn, &key)? {
            Some(blob) => Ok(Some(Word::new(name, decode_embedding(name, blob)?))),
            None => Ok(None),
        }
    }

    pub fn delete_word(&self, model_id: &str, name: &str) -> Result<bool> {
        let mut wtxn = self.env.write_txn()?;
        let key = Self::word_key(model_id, name);
        let existed = self.words_db.delete(&mut wtxn, &key)?;
        wtxn.commit()?;
        Ok(existed)
    }

    /// Raw `(name, blob)` entries of one model, in key order
    fn model_entries<'txn>(
        &self,
        rtxn: &'txn RoTxn,
        model_id: &str,
    ) -> Result<Vec<(&'txn str, &'txn [u8])>> {
        let prefix = Self::model_prefix(model_id);
        let mut entries = Vec::new();
        for result in self.words_db.prefix_iter(rtxn, &prefix)? {
            let (key, blob) = result?;
            entries.push((&key[prefix.len()..], blob));
        }
        Ok(entries)
    }

    pub fn count_words(&self, model_id: &str) -> Result<usize> {
        let rtxn = self.env.read_txn()?;
        let prefix = Self::model_prefix(model_id);
        let mut count = 0;
        for result in self.words_db.prefix_iter(&rtxn, &prefix)? {
            result?;
            count += 1;
        }
        Ok(count)
    }

    pub fn all_words(&self, model_id: &str) -> Result<Vec<Word>> {
        let rtxn = self.env.read_txn()?;
        let entries = self.model_entries(&rtxn, model_id)?;
        let words = entries
            .into_iter()
            .map(|(name, blob)| Ok(Word::new(name, decode_embedding(name, blob)?)))
            .collect::<Result<Vec<_>>>()?;
        Ok(words)
    }

    /// Up to `count` distinct words of one model, in random order
    pub fn random_words(&self, model_id: &str, count: usize) -> Result<Vec<Word>> {
        let rtxn = self.env.read_txn()?;
        let entries = self.model_entries(&rtxn, model_id)?;
        let amount = count.min(entries.len());

        let mut rng = rand::rng();
        let words = index::sample(&mut rng, entries.len(), amount)
            .into_iter()
            .map(|i| {
                let (name, blob) = entries[i];
                Ok(Word {
                    name: name.to_string(),
                    embedding: Vector::new(decode_embedding(name, blob)?),
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(words)
    }

    /// Distinct model ids present in the store
    pub fn list_models(&self) -> Result<Vec<String>> {
        let rtxn = self.env.read_txn()?;
        let mut models: Vec<String> = Vec::new();
        for result in self.words_db.iter(&rtxn)? {
            let (key, _) = result?;
            if let Some((model, _)) = key.split_once(KEY_SEPARATOR) {
                if models.last().map(String::as_str) != Some(model) {
                    models.push(model.to_string());
                }
            }
        }
        Ok(models)
    }

    pub fn put_high_score(&self, id: u64, data: &[u8]) -> Result<()> {
        let mut wtxn = self.env.write_txn()?;
        self.high_scores_db.put(&mut wtxn, &id, data)?;
        wtxn.commit()?;
        Ok(())
    }

    pub fn high_score_entries(&self) -> Result<Vec<(u64, Vec<u8>)>> {
        let rtxn = self.env.read_txn()?;
        let mut entries = Vec::new();
        for result in self.high_scores_db.iter(&rtxn)? {
            let (id, data) = result?;
            entries.push((id, data.to_vec()));
        }
        Ok(entries)
    }

    pub fn last_high_score_id(&self) -> Result<Option<u64>> {
        let rtxn = self.env.read_txn()?;
        let last = self.high_scores_db.last(&rtxn)?.map(|(id, _)| id);
        Ok(last)
    }
}
