//! Ingestion-time infrastructure: source document loading

mod pdf;

pub use pdf::{list_pdf_files, PdfDirectoryLoader};
