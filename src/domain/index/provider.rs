//! Vector index provider trait

use std::fmt::Debug;

use async_trait::async_trait;

use super::entity::{IndexEntry, IndexStats, ScoredMatch};
use crate::domain::error::DomainError;

/// Provider trait for the external vector index
///
/// Implementations speak to a specific backend and translate between this
/// interface and the backend's wire format. The index is populated once at
/// ingestion time and is read-only on the query path.
#[async_trait]
pub trait VectorIndex: Send + Sync + Debug {
    /// Name of the backing index
    fn index_name(&self) -> &str;

    /// Top-k nearest neighbors of `vector` under the index's own similarity
    /// metric. Returns at most `top_k` matches, fewer when the index holds
    /// fewer entries; an empty index yields an empty list, not an error.
    async fn query(&self, vector: &[f32], top_k: u32) -> Result<Vec<ScoredMatch>, DomainError>;

    /// Insert or overwrite entries; returns the number of entries written
    async fn upsert(&self, entries: Vec<IndexEntry>) -> Result<usize, DomainError>;

    /// Summary statistics for the index
    async fn describe(&self) -> Result<IndexStats, DomainError>;
}
