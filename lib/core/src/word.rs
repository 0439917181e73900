use serde::{Deserialize, Serialize};

use crate::Vector;

/// A word together with its embedding
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Word {
    pub name: String,
    pub embedding: Vector,
}

impl Word {
    #[inline]
    #[must_use]
    pub fn new(name: impl Into<String>, embedding: impl Into<Vector>) -> Self {
        Self {
            name: name.into(),
            embedding: embedding.into(),
        }
    }

    #[inline]
    #[must_use]
    pub fn dim(&self) -> usize {
        self.embedding.dim()
    }

    /// Name equality; words are identified by name only
    #[inline]
    #[must_use]
    pub fn same_word(&self, other: &Word) -> bool {
        self.name == other.name
    }
}
