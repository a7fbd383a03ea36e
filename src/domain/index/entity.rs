//! Vector index entry and result types

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Metadata key under which the chunk text is stored in the index
pub const TEXT_METADATA_KEY: &str = "text";

/// An entry persisted in the vector index: chunk text, its embedding and
/// source metadata. Written once at ingestion, read-only afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexEntry {
    /// Unique identifier of the entry
    pub id: String,
    /// Embedding vector
    pub values: Vec<f32>,
    /// Chunk text
    pub text: String,
    /// Source metadata (originating file, page number, chunk index, ...)
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub metadata: HashMap<String, serde_json::Value>,
}

impl IndexEntry {
    /// Create a new index entry
    pub fn new(id: impl Into<String>, values: Vec<f32>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            values,
            text: text.into(),
            metadata: HashMap::new(),
        }
    }

    /// Add a metadata field
    pub fn with_metadata(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.metadata.insert(key.into(), value);
        self
    }
}

/// One match returned from a top-k similarity query
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredMatch {
    /// Identifier of the matched entry
    pub id: String,
    /// Similarity score as reported by the index (higher is more similar)
    pub score: f32,
    /// Chunk text of the matched entry
    pub text: String,
    /// Metadata of the matched entry
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub metadata: HashMap<String, serde_json::Value>,
}

impl ScoredMatch {
    /// Create a new scored match
    pub fn new(id: impl Into<String>, score: f32, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            score,
            text: text.into(),
            metadata: HashMap::new(),
        }
    }

    /// Set all metadata
    pub fn with_all_metadata(mut self, metadata: HashMap<String, serde_json::Value>) -> Self {
        self.metadata = metadata;
        self
    }
}

/// Summary statistics reported by the index
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IndexStats {
    /// Total number of vectors stored
    pub vector_count: usize,
    /// Dimensionality of stored vectors, when the index reports it
    pub dimension: Option<usize>,
}
