//! Core data models shared by the chunker, scorer, and retriever.

use serde::Serialize;

/// A word-window slice of one document's normalized text.
///
/// `tokens` is computed once when the chunk is created and reused by every
/// query; it is never serialized.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Chunk {
    /// Owning document identifier (the file name it was loaded from).
    pub source: String,
    /// Zero-based position of this chunk within its document.
    pub chunk_id: usize,
    /// Normalized chunk text.
    pub text: String,
    #[serde(skip)]
    pub tokens: Vec<String>,
}

/// A retrieval result record handed to callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RetrievedChunk {
    pub source: String,
    pub chunk_id: usize,
    pub text: String,
}

impl From<&Chunk> for RetrievedChunk {
    fn from(chunk: &Chunk) -> Self {
        Self {
            source: chunk.source.clone(),
            chunk_id: chunk.chunk_id,
            text: chunk.text.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokens_not_serialized() {
        let chunk = Chunk {
            source: "a.json".to_string(),
            chunk_id: 0,
            text: "GST rate".to_string(),
            tokens: vec!["gst".to_string(), "rate".to_string()],
        };
        let value = serde_json::to_value(&chunk).unwrap();
        assert!(value.get("tokens").is_none());
        assert_eq!(value["chunk_id"], 0);
    }

    #[test]
    fn test_retrieved_from_chunk() {
        let chunk = Chunk {
            source: "b.json".to_string(),
            chunk_id: 3,
            text: "income tax".to_string(),
            tokens: vec!["income".to_string(), "tax".to_string()],
        };
        let r = RetrievedChunk::from(&chunk);
        assert_eq!(r.source, "b.json");
        assert_eq!(r.chunk_id, 3);
        assert_eq!(r.text, "income tax");
    }
}
