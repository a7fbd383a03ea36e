//! Application state shared across request handlers

use std::sync::Arc;

use crate::domain::index::VectorIndex;
use crate::domain::AnswerPipeline;

/// Read-only handles shared by concurrent requests. Each pipeline
/// invocation is independent and stateless, so no locking is needed beyond
/// what the framework provides.
#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<AnswerPipeline>,
    pub index: Arc<dyn VectorIndex>,
}

impl AppState {
    pub fn new(pipeline: Arc<AnswerPipeline>, index: Arc<dyn VectorIndex>) -> Self {
        Self { pipeline, index }
    }
}
