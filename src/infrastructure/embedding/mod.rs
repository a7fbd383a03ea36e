//! Embedding provider implementations

mod huggingface;

pub use huggingface::HuggingFaceEmbeddingProvider;
