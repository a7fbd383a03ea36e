//! Fixed-size text chunking with overlap
//!
//! Splits document text into bounded, overlapping segments so that context
//! survives across chunk boundaries. Word-boundary aware: a chunk never
//! starts or ends mid-word unless a single word exceeds the chunk size.

use serde::{Deserialize, Serialize};

use crate::domain::DomainError;

/// Configuration for chunking
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChunkingConfig {
    /// Target chunk size in characters
    pub chunk_size: usize,
    /// Overlap between consecutive chunks in characters
    pub chunk_overlap: usize,
    /// Chunks smaller than this are dropped
    pub min_chunk_size: usize,
}

impl ChunkingConfig {
    pub fn new(chunk_size: usize, chunk_overlap: usize) -> Self {
        Self {
            chunk_size,
            chunk_overlap,
            min_chunk_size: 20,
        }
    }

    pub fn with_min_chunk_size(mut self, min_size: usize) -> Self {
        self.min_chunk_size = min_size;
        self
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        if self.chunk_size == 0 {
            return Err(DomainError::validation("chunk_size must be greater than 0"));
        }

        if self.chunk_overlap >= self.chunk_size {
            return Err(DomainError::validation(
                "chunk_overlap must be less than chunk_size",
            ));
        }

        if self.min_chunk_size > self.chunk_size {
            return Err(DomainError::validation(
                "min_chunk_size must be less than or equal to chunk_size",
            ));
        }

        Ok(())
    }
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self {
            chunk_size: 500,
            chunk_overlap: 20,
            min_chunk_size: 20,
        }
    }
}

/// A chunk of text cut from a document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    /// Chunk content
    pub content: String,
    /// Position of this chunk within its document (0-based)
    pub chunk_index: usize,
    /// Character offset where this chunk starts in the source text
    pub char_start: usize,
    /// Character offset where this chunk ends in the source text
    pub char_end: usize,
}

/// Splits text into fixed-size overlapping chunks
#[derive(Debug, Clone)]
pub struct Chunker {
    config: ChunkingConfig,
}

impl Chunker {
    pub fn new(config: ChunkingConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ChunkingConfig {
        &self.config
    }

    /// Split `content` into an ordered sequence of chunks
    pub fn chunk(&self, content: &str) -> Result<Vec<Chunk>, DomainError> {
        self.config.validate()?;

        let content = content.trim();
        if content.is_empty() {
            return Ok(vec![]);
        }

        if content.len() <= self.config.chunk_size {
            return Ok(vec![Chunk {
                content: content.to_string(),
                chunk_index: 0,
                char_start: 0,
                char_end: content.len(),
            }]);
        }

        let mut chunks = Vec::new();
        let mut start = 0;
        let step = self.config.chunk_size - self.config.chunk_overlap;

        while start < content.len() {
            let target_end = (start + self.config.chunk_size).min(content.len());
            let end = self.find_chunk_end(content, start, target_end);

            let chunk_content = content[start..end].trim();

            if !chunk_content.is_empty() && chunk_content.len() >= self.config.min_chunk_size {
                chunks.push(Chunk {
                    content: chunk_content.to_string(),
                    chunk_index: chunks.len(),
                    char_start: start,
                    char_end: end,
                });
            }

            if end >= content.len() {
                break;
            }

            start += step;

            if start >= end {
                start = end;
            }
        }

        if chunks.is_empty() {
            chunks.push(Chunk {
                content: content.to_string(),
                chunk_index: 0,
                char_start: 0,
                char_end: content.len(),
            });
        }

        Ok(chunks)
    }

    fn find_chunk_end(&self, content: &str, start: usize, target_end: usize) -> usize {
        if target_end >= content.len() {
            return content.len();
        }

        let boundary = find_word_boundary_before(content, target_end);

        if boundary <= start {
            find_word_boundary_after(content, target_end)
        } else {
            boundary
        }
    }
}

impl Default for Chunker {
    fn default() -> Self {
        Self::new(ChunkingConfig::default())
    }
}

fn find_word_boundary_before(text: &str, pos: usize) -> usize {
    if pos >= text.len() {
        return text.len();
    }

    let bytes = text.as_bytes();
    let mut boundary = pos;

    while boundary > 0 && !bytes[boundary - 1].is_ascii_whitespace() {
        boundary -= 1;
    }

    if boundary == 0 { pos } else { boundary }
}

fn find_word_boundary_after(text: &str, pos: usize) -> usize {
    if pos >= text.len() {
        return text.len();
    }

    let bytes = text.as_bytes();
    let mut boundary = pos;

    while boundary < text.len() && !bytes[boundary].is_ascii_whitespace() {
        boundary += 1;
    }

    boundary
}
