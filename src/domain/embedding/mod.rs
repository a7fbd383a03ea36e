//! Embedding provider seam
//!
//! Converts text into fixed-dimension vectors. Indexed vectors and query
//! vectors must share the provider's dimensionality or similarity search is
//! meaningless, so every implementation reports its dimensions up front.

use std::fmt::Debug;

use async_trait::async_trait;

use crate::domain::DomainError;

/// Trait for embedding providers
#[async_trait]
pub trait EmbeddingProvider: Send + Sync + Debug {
    /// Embed a single text. The returned vector always has exactly
    /// `dimensions()` components, including on any fallback path.
    async fn embed_one(&self, text: &str) -> Result<Vec<f32>, DomainError>;

    /// Embed a batch of texts, element-wise
    async fn embed_many(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, DomainError> {
        let mut vectors = Vec::with_capacity(texts.len());
        for text in texts {
            vectors.push(self.embed_one(text).await?);
        }
        Ok(vectors)
    }

    /// Dimensionality of every vector this provider produces
    fn dimensions(&self) -> usize;

    /// Model identifier behind this provider
    fn model_name(&self) -> &str;
}
