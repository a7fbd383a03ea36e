//! PDF directory loader
//!
//! Reads every `*.pdf` under a directory into page-level documents. Pages
//! that yield no extractable text (scanned images, empty pages) are skipped
//! with a warning rather than failing the whole ingestion run.

use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::domain::ingestion::{Document, DocumentLoader};
use crate::domain::DomainError;

/// Loads PDF files from a directory, one document per page
#[derive(Debug, Clone, Default)]
pub struct PdfDirectoryLoader;

impl PdfDirectoryLoader {
    pub fn new() -> Self {
        Self
    }

    fn load_file(&self, path: &Path) -> Result<Vec<Document>, DomainError> {
        let source = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        let pdf = lopdf::Document::load(path).map_err(|e| {
            DomainError::internal(format!("Failed to read PDF {}: {}", path.display(), e))
        })?;

        let mut documents = Vec::new();

        for (page_number, _) in pdf.get_pages() {
            match pdf.extract_text(&[page_number]) {
                Ok(text) if !text.trim().is_empty() => {
                    documents.push(Document::new(text, &source).with_page(page_number));
                }
                Ok(_) => {
                    debug!(file = %source, page = page_number, "Skipping empty page");
                }
                Err(e) => {
                    warn!(file = %source, page = page_number, error = %e, "Failed to extract page text");
                }
            }
        }

        Ok(documents)
    }
}

impl DocumentLoader for PdfDirectoryLoader {
    fn load(&self, dir: &Path) -> Result<Vec<Document>, DomainError> {
        let mut documents = Vec::new();

        for path in list_pdf_files(dir)? {
            let loaded = self.load_file(&path)?;
            debug!(file = %path.display(), pages = loaded.len(), "Loaded PDF");
            documents.extend(loaded);
        }

        Ok(documents)
    }
}

/// List `*.pdf` files directly under `dir`, sorted by name for a stable
/// ingestion order
pub fn list_pdf_files(dir: &Path) -> Result<Vec<PathBuf>, DomainError> {
    if !dir.is_dir() {
        return Err(DomainError::validation(format!(
            "Data directory does not exist: {}",
            dir.display()
        )));
    }

    let entries = std::fs::read_dir(dir).map_err(|e| {
        DomainError::internal(format!("Failed to read directory {}: {}", dir.display(), e))
    })?;

    let mut files: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| {
            path.is_file()
                && path
                    .extension()
                    .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"))
        })
        .collect();

    files.sort();
    Ok(files)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_list_pdf_files_filters_and_sorts() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("b.pdf"), b"").unwrap();
        fs::write(dir.path().join("a.PDF"), b"").unwrap();
        fs::write(dir.path().join("notes.txt"), b"").unwrap();

        let files = list_pdf_files(dir.path()).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();

        assert_eq!(names, vec!["a.PDF", "b.pdf"]);
    }

    #[test]
    fn test_list_pdf_files_missing_directory() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("no-such-dir");

        let result = list_pdf_files(&missing);
        assert!(matches!(result, Err(DomainError::Validation { .. })));
    }

    #[test]
    fn test_list_pdf_files_empty_directory() {
        let dir = TempDir::new().unwrap();
        assert!(list_pdf_files(dir.path()).unwrap().is_empty());
    }
}
