//! Retriever: fixed query policy over the vector index
//!
//! Embeds the query and fetches the top-k nearest chunk texts. Embedding
//! failures propagate — an empty context must stay distinguishable from
//! "nothing relevant found". Transient embedding-service conditions never
//! reach this layer; the embedding provider absorbs them with its fallback
//! vector.

use std::sync::Arc;

use tracing::debug;

use crate::domain::embedding::EmbeddingProvider;
use crate::domain::index::VectorIndex;
use crate::domain::DomainError;

/// Wraps the vector index with the query-side retrieval policy
#[derive(Debug, Clone)]
pub struct Retriever {
    embedder: Arc<dyn EmbeddingProvider>,
    index: Arc<dyn VectorIndex>,
}

impl Retriever {
    pub fn new(embedder: Arc<dyn EmbeddingProvider>, index: Arc<dyn VectorIndex>) -> Self {
        Self { embedder, index }
    }

    /// Top-k chunk texts by descending similarity to the query's embedding.
    ///
    /// Returns at most `top_k` texts, fewer when the index holds fewer
    /// entries. Ordering beyond the index's own similarity ranking is not
    /// guaranteed.
    pub async fn retrieve(&self, query: &str, top_k: u32) -> Result<Vec<String>, DomainError> {
        if top_k == 0 {
            return Err(DomainError::validation("top_k must be greater than 0"));
        }

        let vector = self.embedder.embed_one(query).await?;

        if vector.len() != self.embedder.dimensions() {
            return Err(DomainError::internal(format!(
                "embedding dimensionality mismatch: got {}, expected {}",
                vector.len(),
                self.embedder.dimensions()
            )));
        }

        let matches = self.index.query(&vector, top_k).await?;

        debug!(
            index = self.index.index_name(),
            requested = top_k,
            returned = matches.len(),
            "Retrieved context chunks"
        );

        Ok(matches.into_iter().map(|m| m.text).collect())
    }
}
