//! Hugging Face hosted-inference embedding provider
//!
//! Calls the feature-extraction endpoint for a sentence-transformers model.
//! A cold-starting model answers with an error payload (or a 503) until it
//! is loaded; that case degrades to a deterministic all-zero vector of the
//! configured dimensionality instead of failing the query. A zero vector
//! still participates in similarity ranking, it just ranks last.

use async_trait::async_trait;
use tracing::warn;

use crate::domain::embedding::EmbeddingProvider;
use crate::domain::DomainError;
use crate::infrastructure::http_client::HttpClientTrait;

const DEFAULT_HF_BASE_URL: &str = "https://api-inference.huggingface.co";

/// Embedding provider backed by the Hugging Face inference API
#[derive(Debug)]
pub struct HuggingFaceEmbeddingProvider<C: HttpClientTrait> {
    client: C,
    auth_header: String,
    base_url: String,
    model: String,
    dimensions: usize,
}

impl<C: HttpClientTrait> HuggingFaceEmbeddingProvider<C> {
    pub fn new(
        client: C,
        api_token: impl Into<String>,
        model: impl Into<String>,
        dimensions: usize,
    ) -> Self {
        Self::with_base_url(client, api_token, model, dimensions, DEFAULT_HF_BASE_URL)
    }

    pub fn with_base_url(
        client: C,
        api_token: impl Into<String>,
        model: impl Into<String>,
        dimensions: usize,
        base_url: impl Into<String>,
    ) -> Self {
        Self {
            client,
            auth_header: format!("Bearer {}", api_token.into()),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            model: model.into(),
            dimensions,
        }
    }

    fn model_url(&self) -> String {
        format!("{}/models/{}", self.base_url, self.model)
    }

    fn headers(&self) -> Vec<(&str, &str)> {
        vec![
            ("Authorization", self.auth_header.as_str()),
            ("Content-Type", "application/json"),
        ]
    }

    fn fallback_vector(&self) -> Vec<f32> {
        vec![0.0; self.dimensions]
    }

    fn parse_vector(&self, json: serde_json::Value) -> Result<Option<Vec<f32>>, DomainError> {
        // A cold model answers 200 with an error object instead of a vector
        if json.get("error").is_some() {
            return Ok(None);
        }

        // The endpoint wraps single inputs as [[f32]]; accept a flat [f32]
        // as well since some model deployments return it unwrapped.
        let vector: Vec<f32> = serde_json::from_value::<Vec<Vec<f32>>>(json.clone())
            .map(|mut nested| {
                if nested.is_empty() {
                    Vec::new()
                } else {
                    nested.swap_remove(0)
                }
            })
            .or_else(|_| serde_json::from_value::<Vec<f32>>(json))
            .map_err(|e| {
                DomainError::provider(
                    "huggingface",
                    format!("Failed to parse embedding response: {}", e),
                )
            })?;

        if vector.len() != self.dimensions {
            return Err(DomainError::provider(
                "huggingface",
                format!(
                    "Embedding dimensionality mismatch: got {}, expected {}",
                    vector.len(),
                    self.dimensions
                ),
            ));
        }

        Ok(Some(vector))
    }
}

#[async_trait]
impl<C: HttpClientTrait> EmbeddingProvider for HuggingFaceEmbeddingProvider<C> {
    async fn embed_one(&self, text: &str) -> Result<Vec<f32>, DomainError> {
        let body = serde_json::json!({ "inputs": text });

        let response = match self
            .client
            .post_json(&self.model_url(), self.headers(), &body)
            .await
        {
            Ok(json) => json,
            Err(err) if err.is_transient() => {
                warn!(model = %self.model, error = %err, "Embedding service cold start, using fallback vector");
                return Ok(self.fallback_vector());
            }
            Err(err) => return Err(err),
        };

        match self.parse_vector(response)? {
            Some(vector) => Ok(vector),
            None => {
                warn!(model = %self.model, "Embedding service returned an error payload, using fallback vector");
                Ok(self.fallback_vector())
            }
        }
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
