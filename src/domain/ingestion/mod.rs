//! Ingestion-time domain types: documents and chunking

mod chunker;
mod loader;

pub use chunker::{Chunk, Chunker, ChunkingConfig};
pub use loader::{Document, DocumentLoader};

#[cfg(test)]
pub use loader::mock;
