//! Answer pipeline: retrieve, assemble, generate
//!
//! One invocation per query, stateless, no retries. The only recovery in
//! the whole path is the embedding provider's single-shot fallback vector;
//! index and generator failures propagate to the caller.

use std::sync::Arc;

use serde::Deserialize;
use tracing::{debug, info};

use crate::domain::llm::{GenerationRequest, LlmProvider};
use crate::domain::prompt::PromptAssembler;
use crate::domain::retrieval::Retriever;
use crate::domain::DomainError;

/// Delimiter between retrieved chunks in the context block
pub const CONTEXT_DELIMITER: &str = "\n\n";

/// What to do with an empty (or whitespace-only) query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmptyQueryPolicy {
    /// Reject with a validation error
    #[default]
    Reject,
    /// Run the pipeline on the raw query as-is
    PassThrough,
}

/// Fixed per-deployment generation and retrieval parameters
#[derive(Debug, Clone)]
pub struct PipelineOptions {
    /// Generation model identifier
    pub model: String,
    /// Sampling temperature; low favors deterministic factual output
    pub temperature: f32,
    /// Maximum output length bound in tokens
    pub max_tokens: u32,
    /// Number of chunks to retrieve per query
    pub top_k: u32,
    /// Empty query handling
    pub empty_query: EmptyQueryPolicy,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            model: "llama-3.1-8b-instant".to_string(),
            temperature: 0.4,
            max_tokens: 500,
            top_k: 3,
            empty_query: EmptyQueryPolicy::Reject,
        }
    }
}

/// Orchestrates Retriever -> PromptAssembler -> Generator for one query
#[derive(Debug, Clone)]
pub struct AnswerPipeline {
    retriever: Retriever,
    assembler: PromptAssembler,
    generator: Arc<dyn LlmProvider>,
    options: PipelineOptions,
}

impl AnswerPipeline {
    pub fn new(
        retriever: Retriever,
        assembler: PromptAssembler,
        generator: Arc<dyn LlmProvider>,
        options: PipelineOptions,
    ) -> Self {
        Self {
            retriever,
            assembler,
            generator,
            options,
        }
    }

    /// Answer a query from the indexed corpus.
    ///
    /// Returns the generator's raw text output unmodified.
    pub async fn answer(&self, query: &str) -> Result<String, DomainError> {
        if query.trim().is_empty() && self.options.empty_query == EmptyQueryPolicy::Reject {
            return Err(DomainError::validation("Query must not be empty"));
        }

        let chunks = self.retriever.retrieve(query, self.options.top_k).await?;
        let context = chunks.join(CONTEXT_DELIMITER);

        debug!(
            chunks = chunks.len(),
            context_chars = context.len(),
            "Assembled retrieval context"
        );

        let prompt = self.assembler.build_prompt(&context, query)?;

        let request = GenerationRequest::builder()
            .system(prompt.system)
            .user(prompt.user)
            .temperature(self.options.temperature)
            .max_tokens(self.options.max_tokens)
            .build();

        let response = self
            .generator
            .complete(&self.options.model, request)
            .await?;

        info!(
            model = %self.options.model,
            provider = self.generator.provider_name(),
            finish_reason = ?response.finish_reason,
            "Generated answer"
        );

        Ok(response.content().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::embedding::mock::MockEmbeddingProvider;
    use crate::domain::index::mock::MockVectorIndex;
    use crate::domain::index::IndexEntry;
    use crate::domain::llm::mock::MockLlmProvider;

    const DIMS: usize = 4;

    struct Fixture {
        pipeline: AnswerPipeline,
        generator: Arc<MockLlmProvider>,
    }

    fn fixture(entries: Vec<IndexEntry>, options: PipelineOptions) -> Fixture {
        fixture_with_embedder(MockEmbeddingProvider::new(DIMS), entries, options)
    }

    fn fixture_with_embedder(
        embedder: MockEmbeddingProvider,
        entries: Vec<IndexEntry>,
        options: PipelineOptions,
    ) -> Fixture {
        let index = MockVectorIndex::new("medicalbot").with_entries(entries);
        let retriever = Retriever::new(Arc::new(embedder), Arc::new(index));
        let generator = Arc::new(MockLlmProvider::new("mock-llm").with_response("mock answer"));

        Fixture {
            pipeline: AnswerPipeline::new(
                retriever,
                PromptAssembler::with_default_template(),
                generator.clone(),
                options,
            ),
            generator,
        }
    }

    #[tokio::test]
    async fn test_answer_rejects_empty_query_by_default() {
        let f = fixture(vec![], PipelineOptions::default());

        let result = f.pipeline.answer("   ").await;
        assert!(matches!(result, Err(DomainError::Validation { .. })));
        assert!(f.generator.requests().is_empty());
    }

    #[tokio::test]
    async fn test_answer_passes_empty_query_when_configured() {
        let options = PipelineOptions {
            empty_query: EmptyQueryPolicy::PassThrough,
            ..PipelineOptions::default()
        };
        let f = fixture(vec![], options);

        let answer = f.pipeline.answer("").await.unwrap();
        assert_eq!(answer, "mock answer");
    }

    #[tokio::test]
    async fn test_answer_grounds_prompt_in_retrieved_context() {
        let embedder = MockEmbeddingProvider::new(DIMS)
            .with_vector("What is hypertension?", vec![1.0, 0.0, 0.0, 0.0]);

        let entries = vec![
            IndexEntry::new(
                "chunk-bp",
                vec![0.9, 0.1, 0.0, 0.0],
                "Hypertension is persistently elevated arterial blood pressure.",
            ),
            IndexEntry::new("chunk-other", vec![0.0, 0.0, 1.0, 0.0], "Aspirin reduces fever."),
        ];

        let f = fixture_with_embedder(embedder, entries, PipelineOptions::default());
        f.pipeline.answer("What is hypertension?").await.unwrap();

        let request = f.generator.last_request().unwrap();
        let system = request.system_content().unwrap();
        assert!(system.contains("persistently elevated arterial blood pressure"));
        assert_eq!(request.temperature, Some(0.4));
        assert_eq!(request.max_tokens, Some(500));
    }

    #[tokio::test]
    async fn test_answer_joins_chunks_with_blank_line() {
        let embedder =
            MockEmbeddingProvider::new(2).with_vector("q", vec![1.0, 0.0]);
        let entries = vec![
            IndexEntry::new("a", vec![1.0, 0.0], "first chunk"),
            IndexEntry::new("b", vec![0.9, 0.0], "second chunk"),
        ];

        let f = fixture_with_embedder(embedder, entries, PipelineOptions::default());
        f.pipeline.answer("q").await.unwrap();

        let system = f.generator.last_request().unwrap().system_content().unwrap().to_string();
        assert!(system.contains("first chunk\n\nsecond chunk"));
    }

    #[tokio::test]
    async fn test_answer_with_empty_index_still_calls_generator() {
        let f = fixture(vec![], PipelineOptions::default());

        let answer = f.pipeline.answer("What is hypertension?").await.unwrap();
        assert_eq!(answer, "mock answer");

        // Generator was invoked with an empty context block; the template's
        // non-knowledge instruction is what keeps the model honest here.
        let system = f.generator.last_request().unwrap().system_content().unwrap().to_string();
        assert!(system.ends_with("Context:\n"));
        assert!(system.contains("say \"I don't know\""));
    }

    #[tokio::test]
    async fn test_answer_propagates_index_failure() {
        let embedder = MockEmbeddingProvider::new(DIMS);
        let index = MockVectorIndex::new("medicalbot");
        index.set_should_fail(true).await;

        let retriever = Retriever::new(Arc::new(embedder), Arc::new(index));
        let generator = Arc::new(MockLlmProvider::new("mock-llm").with_response("unused"));
        let pipeline = AnswerPipeline::new(
            retriever,
            PromptAssembler::with_default_template(),
            generator.clone(),
            PipelineOptions::default(),
        );

        assert!(pipeline.answer("q").await.is_err());
        assert!(generator.requests().is_empty());
    }

    #[tokio::test]
    async fn test_answer_propagates_generator_failure() {
        let embedder = MockEmbeddingProvider::new(DIMS);
        let index = MockVectorIndex::new("medicalbot");
        let retriever = Retriever::new(Arc::new(embedder), Arc::new(index));
        let generator = Arc::new(MockLlmProvider::new("mock-llm").with_error("model overloaded"));

        let pipeline = AnswerPipeline::new(
            retriever,
            PromptAssembler::with_default_template(),
            generator,
            PipelineOptions::default(),
        );

        let result = pipeline.answer("q").await;
        assert!(matches!(result, Err(DomainError::Provider { .. })));
    }

    #[tokio::test]
    async fn test_answer_returns_generator_output_unmodified() {
        let embedder = MockEmbeddingProvider::new(DIMS);
        let index = MockVectorIndex::new("medicalbot");
        let retriever = Retriever::new(Arc::new(embedder), Arc::new(index));
        let generator = Arc::new(
            MockLlmProvider::new("mock-llm").with_response("  raw output, untouched \n"),
        );

        let pipeline = AnswerPipeline::new(
            retriever,
            PromptAssembler::with_default_template(),
            generator,
            PipelineOptions::default(),
        );

        let answer = pipeline.answer("q").await.unwrap();
        assert_eq!(answer, "  raw output, untouched \n");
    }

    #[tokio::test]
    async fn test_repeated_query_builds_identical_prompt() {
        let f = fixture(
            vec![IndexEntry::new("a", vec![1.0, 0.0, 0.0, 0.0], "stable chunk")],
            PipelineOptions::default(),
        );

        f.pipeline.answer("same query").await.unwrap();
        f.pipeline.answer("same query").await.unwrap();

        let requests = f.generator.requests();
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[0].messages, requests[1].messages);
    }
}
