//! Medbot
//!
//! Retrieval-augmented question answering over a medical document corpus:
//! queries are embedded, matched against a pre-built vector index, and the
//! retrieved passages ground a hosted LLM's answer.

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tracing::{info, warn};

use api::state::AppState;
use domain::embedding::EmbeddingProvider;
use domain::index::VectorIndex;
use domain::llm::LlmProvider;
use domain::prompt::PromptAssembler;
use domain::{AnswerPipeline, DomainError, PipelineOptions, Retriever};
use infrastructure::embedding::HuggingFaceEmbeddingProvider;
use infrastructure::index::PineconeVectorIndex;
use infrastructure::llm::GroqProvider;
use infrastructure::HttpClient;

/// Create the application state with all services initialized.
///
/// Provider handles are cheap stateless HTTP clients, so construction is
/// lazy by nature: no network traffic happens here unless
/// `startup.probe` asks for an eager index probe. Credentials are checked
/// up front either way so a missing key fails the boot, not the first query.
pub async fn create_app_state(config: &AppConfig) -> anyhow::Result<AppState> {
    let http = http_client(config);

    let embedder = create_embedder(config, http.clone())?;
    let index = create_index(config, http.clone())?;
    let generator = create_generator(config, http)?;

    if config.startup.probe {
        let stats = index
            .describe()
            .await
            .context("Startup probe of the vector index failed")?;
        info!(
            index = index.index_name(),
            vectors = stats.vector_count,
            "Vector index reachable"
        );
    }

    let assembler = match &config.pipeline.system_template {
        Some(template) => {
            if !template.contains("${var:context}") {
                warn!("Configured system template does not reference ${{var:context}}; answers will not be grounded");
            }
            PromptAssembler::new(template.clone())
        }
        None => PromptAssembler::with_default_template(),
    };

    let options = PipelineOptions {
        model: config.generation.model.clone(),
        temperature: config.generation.temperature,
        max_tokens: config.generation.max_tokens,
        top_k: config.pipeline.top_k,
        empty_query: config.pipeline.empty_query,
    };

    let retriever = Retriever::new(embedder, index.clone());
    let pipeline = AnswerPipeline::new(retriever, assembler, generator, options);

    Ok(AppState::new(Arc::new(pipeline), index))
}

pub(crate) fn http_client(config: &AppConfig) -> HttpClient {
    HttpClient::with_timeout(Duration::from_secs(config.http.timeout_secs))
}

pub(crate) fn create_embedder(
    config: &AppConfig,
    http: HttpClient,
) -> Result<Arc<dyn EmbeddingProvider>, DomainError> {
    let token = require_env("HF_TOKEN")?;
    let settings = &config.embedding;

    let provider = match &settings.base_url {
        Some(base_url) => HuggingFaceEmbeddingProvider::with_base_url(
            http,
            token,
            settings.model.as_str(),
            settings.dimensions,
            base_url.as_str(),
        ),
        None => HuggingFaceEmbeddingProvider::new(
            http,
            token,
            settings.model.as_str(),
            settings.dimensions,
        ),
    };

    info!(model = %settings.model, dimensions = settings.dimensions, "Using Hugging Face embedding provider");
    Ok(Arc::new(provider))
}

pub(crate) fn create_index(
    config: &AppConfig,
    http: HttpClient,
) -> Result<Arc<dyn VectorIndex>, DomainError> {
    let api_key = require_env("PINECONE_API_KEY")?;

    let host = config
        .index
        .host
        .clone()
        .filter(|h| !h.is_empty())
        .ok_or_else(|| {
            DomainError::configuration(
                "Vector index host is not configured (set index.host or APP__INDEX__HOST)",
            )
        })?;

    info!(index = %config.index.name, "Using Pinecone vector index");
    Ok(Arc::new(PineconeVectorIndex::new(
        http,
        api_key,
        host,
        config.index.name.as_str(),
    )))
}

pub(crate) fn create_generator(
    config: &AppConfig,
    http: HttpClient,
) -> Result<Arc<dyn LlmProvider>, DomainError> {
    let api_key = require_env("GROQ_API_KEY")?;

    let provider = match &config.generation.base_url {
        Some(base_url) => GroqProvider::with_base_url(http, api_key, base_url.as_str()),
        None => GroqProvider::new(http, api_key),
    };

    info!(model = %config.generation.model, "Using Groq generation provider");
    Ok(Arc::new(provider))
}

/// Read a required environment variable, failing fast with a clear error
fn require_env(name: &str) -> Result<String, DomainError> {
    std::env::var(name)
        .ok()
        .filter(|value| !value.is_empty())
        .ok_or_else(|| {
            DomainError::configuration(format!("{} environment variable is not set", name))
        })
}
