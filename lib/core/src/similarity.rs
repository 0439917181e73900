//! Cosine similarity between embeddings.
//!
//! All accumulation happens in `f64` so that long (384+ dimension) f32
//! embeddings do not lose precision in the dot product or the norms.

use crate::{Error, Result, Word};

/// Cosine similarity of two equal-length vectors.
///
/// Returns a value in [-1.0, 1.0]. A zero-norm input yields `0.0`.
///
/// # Errors
/// `Error::DimensionMismatch` when the slices differ in length.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> Result<f64> {
    if a.len() != b.len() {
        return Err(Error::DimensionMismatch {
            left: a.len(),
            right: b.len(),
        });
    }

    let mut dot = 0.0f64;
    let mut norm_a = 0.0f64;
    let mut norm_b = 0.0f64;

    for (&x, &y) in a.iter().zip(b.iter()) {
        let x = f64::from(x);
        let y = f64::from(y);
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }

    if norm_a == 0.0 || norm_b == 0.0 {
        return Ok(0.0);
    }

    let similarity = dot / (norm_a.sqrt() * norm_b.sqrt());
    // rounding can push identical vectors a hair past 1.0
    Ok(similarity.clamp(-1.0, 1.0))
}

/// Similarity between two words' embeddings
#[inline]
pub fn word_similarity(word1: &Word, word2: &Word) -> Result<f64> {
    word1.embedding.cosine_similarity(&word2.embedding)
}
