//! Infrastructure layer: external service clients and process plumbing

pub mod embedding;
pub mod http_client;
pub mod index;
pub mod ingestion;
pub mod llm;
pub mod logging;

pub use http_client::{HttpClient, HttpClientTrait};
