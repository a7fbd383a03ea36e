//! Source document representation and the loader seam

use std::fmt::Debug;
use std::path::Path;

use crate::domain::DomainError;

/// A loaded source document: raw text plus source metadata.
///
/// Created during ingestion, immutable thereafter. Page-granular loaders
/// produce one document per page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    /// Raw extracted text
    pub text: String,
    /// Originating file name
    pub source: String,
    /// Page number within the source file (1-based), when applicable
    pub page: Option<u32>,
}

impl Document {
    pub fn new(text: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            source: source.into(),
            page: None,
        }
    }

    pub fn with_page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }
}

/// Trait for reading a directory of source files into documents
pub trait DocumentLoader: Send + Sync + Debug {
    /// Load every supported file under `dir` into documents
    fn load(&self, dir: &Path) -> Result<Vec<Document>, DomainError>;
}
