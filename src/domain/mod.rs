//! Domain layer: the answer pipeline and its collaborator seams

pub mod embedding;
pub mod error;
pub mod index;
pub mod ingestion;
pub mod llm;
pub mod pipeline;
pub mod prompt;
pub mod retrieval;

pub use error::DomainError;
pub use pipeline::{AnswerPipeline, EmptyQueryPolicy, PipelineOptions, CONTEXT_DELIMITER};
pub use retrieval::Retriever;
