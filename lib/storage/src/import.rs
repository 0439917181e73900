//! Loading precomputed embeddings from JSON files.
//!
//! The file format is `{ "words": [ { "name": "...", "embedding": [...] } ] }`,
//! as written by the embedding generation script.

use embedquest_core::{Error as CoreError, Word};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::{info, warn};

use crate::error::Result;
use crate::lmdb_storage::LmdbStorage;

#[derive(Debug, Serialize, Deserialize)]
pub struct EmbeddingsFile {
    pub words: Vec<Word>,
}

/// Read and validate an embeddings file.
///
/// Every embedding must have the dimension of the first one; a mixed file
/// is rejected with `DimensionMismatch` rather than padded or truncated.
pub fn load_embeddings_file<P: AsRef<Path>>(path: P) -> Result<Vec<Word>> {
    let reader = BufReader::new(File::open(path.as_ref())?);
    let file: EmbeddingsFile = serde_json::from_reader(reader)?;
    check_dimensions(&file.words)?;
    info!(
        "Loaded {} words from {:?}",
        file.words.len(),
        path.as_ref()
    );
    Ok(file.words)
}

/// Ensure all words share one embedding dimension
pub fn check_dimensions(words: &[Word]) -> Result<()> {
    if let Some(first) = words.first() {
        let expected = first.dim();
        if let Some(bad) = words.iter().find(|w| w.dim() != expected) {
            warn!("Word '{}' has dimension {}, expected {}", bad.name, bad.dim(), expected);
            return Err(CoreError::DimensionMismatch {
                left: expected,
                right: bad.dim(),
            }
            .into());
        }
    }
    Ok(())
}

/// Load `path` into `storage` under `model_id`, returning the number stored
pub fn import_embeddings_file<P: AsRef<Path>>(
    storage: &LmdbStorage,
    model_id: &str,
    path: P,
) -> Result<usize> {
    let words = load_embeddings_file(path)?;
    let stored = storage.put_words(model_id, &words)?;
    info!("Imported {} words for model {}", stored, model_id);
    Ok(stored)
}
