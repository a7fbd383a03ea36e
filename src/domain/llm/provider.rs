use std::fmt::Debug;

use async_trait::async_trait;

use super::{GenerationRequest, GenerationResponse};
use crate::domain::DomainError;

/// Trait for hosted generation providers
///
/// A failed call propagates to the caller; the pipeline performs no retries.
#[async_trait]
pub trait LlmProvider: Send + Sync + Debug {
    /// Send a chat completion request
    async fn complete(
        &self,
        model: &str,
        request: GenerationRequest,
    ) -> Result<GenerationResponse, DomainError>;

    /// Get the provider name
    fn provider_name(&self) -> &'static str;
}
