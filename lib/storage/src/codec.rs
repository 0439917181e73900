//! Embedding blob codec: packed little-endian f32 values.

use bytes::{Buf, BufMut, BytesMut};

use crate::error::{Result, StorageError};

pub fn encode_embedding(embedding: &[f32]) -> Vec<u8> {
    let mut buf = BytesMut::with_capacity(embedding.len() * 4);
    for &value in embedding {
        buf.put_f32_le(value);
    }
    buf.to_vec()
}

pub fn decode_embedding(word: &str, mut blob: &[u8]) -> Result<Vec<f32>> {
    if blob.len() % 4 != 0 {
        return Err(StorageError::CorruptEmbedding {
            word: word.to_string(),
            len: blob.len(),
        });
    }
    let mut embedding = Vec::with_capacity(blob.len() / 4);
    while blob.has_remaining() {
        embedding.push(blob.get_f32_le());
    }
    Ok(embedding)
}
