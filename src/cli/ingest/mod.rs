//! Ingest command - populate the vector index from a PDF corpus
//!
//! Load PDFs page by page, split into overlapping chunks, embed and upsert.
//! Re-running ingestion rebuilds entries for the same corpus; the index is
//! otherwise read-only.

use std::path::{Path, PathBuf};

use clap::Args;
use serde_json::json;
use tracing::info;
use uuid::Uuid;

use crate::config::AppConfig;
use crate::domain::embedding::EmbeddingProvider;
use crate::domain::index::{IndexEntry, VectorIndex};
use crate::domain::ingestion::{Chunk, Chunker, ChunkingConfig, Document, DocumentLoader};
use crate::domain::DomainError;
use crate::infrastructure::ingestion::PdfDirectoryLoader;
use crate::infrastructure::logging;

/// Arguments for the ingest command
#[derive(Args, Debug)]
pub struct IngestArgs {
    /// Directory of PDF files to ingest
    #[arg(long, default_value = "data")]
    pub data: PathBuf,

    /// Number of entries per embed/upsert batch
    #[arg(long, default_value_t = 100)]
    pub batch_size: usize,
}

/// Counters for one ingestion run
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct IngestReport {
    pub documents: usize,
    pub chunks: usize,
    pub upserted: usize,
}

/// Run the ingestion job
pub async fn run(args: IngestArgs) -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load().unwrap_or_default();
    logging::init_logging(&config.logging);

    let http = crate::http_client(&config);
    let embedder = crate::create_embedder(&config, http.clone())?;
    let index = crate::create_index(&config, http)?;

    let loader = PdfDirectoryLoader::new();
    let chunker = Chunker::new(ChunkingConfig::default());

    let report = ingest_directory(
        &args.data,
        &loader,
        &chunker,
        embedder.as_ref(),
        index.as_ref(),
        args.batch_size,
    )
    .await?;

    info!(
        documents = report.documents,
        chunks = report.chunks,
        upserted = report.upserted,
        "Ingestion complete"
    );

    Ok(())
}

/// Load, chunk, embed and upsert everything under `data_dir`
pub async fn ingest_directory(
    data_dir: &Path,
    loader: &dyn DocumentLoader,
    chunker: &Chunker,
    embedder: &dyn EmbeddingProvider,
    index: &dyn VectorIndex,
    batch_size: usize,
) -> Result<IngestReport, DomainError> {
    if batch_size == 0 {
        return Err(DomainError::validation("batch_size must be greater than 0"));
    }

    let documents = loader.load(data_dir)?;
    info!(documents = documents.len(), dir = %data_dir.display(), "Loaded source documents");

    let mut pending: Vec<(String, IndexEntry)> = Vec::new();
    let mut report = IngestReport {
        documents: documents.len(),
        ..IngestReport::default()
    };

    for document in &documents {
        for chunk in chunker.chunk(&document.text)? {
            pending.push((chunk.content.clone(), entry_for(document, &chunk)));
        }
    }

    report.chunks = pending.len();

    for batch in pending.chunks(batch_size) {
        let texts: Vec<String> = batch.iter().map(|(text, _)| text.clone()).collect();
        let vectors = embedder.embed_many(&texts).await?;

        let entries: Vec<IndexEntry> = batch
            .iter()
            .zip(vectors)
            .map(|((_, entry), vector)| {
                let mut entry = entry.clone();
                entry.values = vector;
                entry
            })
            .collect();

        report.upserted += index.upsert(entries).await?;
        info!(upserted = report.upserted, total = report.chunks, "Upsert progress");
    }

    Ok(report)
}

/// Build the index entry for one chunk; the embedding is filled in later
fn entry_for(document: &Document, chunk: &Chunk) -> IndexEntry {
    let mut entry = IndexEntry::new(Uuid::new_v4().to_string(), Vec::new(), &chunk.content)
        .with_metadata("source", json!(document.source))
        .with_metadata("chunk_index", json!(chunk.chunk_index))
        .with_metadata("ingested_at", json!(chrono::Utc::now().to_rfc3339()));

    if let Some(page) = document.page {
        entry = entry.with_metadata("page", json!(page));
    }

    entry
}
