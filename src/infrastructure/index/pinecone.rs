//! Pinecone data-plane client
//!
//! Speaks the REST API of a named, pre-existing serverless index. The
//! index's own similarity metric does the ranking; nothing is reimplemented
//! here. Chunk text rides in entry metadata under `"text"`.

use std::collections::HashMap;

use async_trait::async_trait;
use serde::Deserialize;

use crate::domain::index::{IndexEntry, IndexStats, ScoredMatch, VectorIndex, TEXT_METADATA_KEY};
use crate::domain::DomainError;
use crate::infrastructure::http_client::HttpClientTrait;

/// Vector index backed by a Pinecone serverless index
#[derive(Debug)]
pub struct PineconeVectorIndex<C: HttpClientTrait> {
    client: C,
    api_key: String,
    /// Data-plane host of the index, e.g. `https://medicalbot-abc123.svc.us-east-1.pinecone.io`
    host: String,
    name: String,
}

impl<C: HttpClientTrait> PineconeVectorIndex<C> {
    pub fn new(
        client: C,
        api_key: impl Into<String>,
        host: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            client,
            api_key: api_key.into(),
            host: host.into().trim_end_matches('/').to_string(),
            name: name.into(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.host, path)
    }

    fn headers(&self) -> Vec<(&str, &str)> {
        vec![
            ("Api-Key", self.api_key.as_str()),
            ("Content-Type", "application/json"),
        ]
    }

    fn parse_matches(&self, json: serde_json::Value) -> Result<Vec<ScoredMatch>, DomainError> {
        let response: QueryResponse = serde_json::from_value(json).map_err(|e| {
            DomainError::provider("pinecone", format!("Failed to parse query response: {}", e))
        })?;

        let matches = response
            .matches
            .into_iter()
            .map(|m| {
                let mut metadata = m.metadata.unwrap_or_default();
                let text = metadata
                    .remove(TEXT_METADATA_KEY)
                    .and_then(|v| v.as_str().map(str::to_string))
                    .unwrap_or_default();

                ScoredMatch::new(m.id, m.score, text).with_all_metadata(metadata)
            })
            .collect();

        Ok(matches)
    }
}

#[async_trait]
impl<C: HttpClientTrait> VectorIndex for PineconeVectorIndex<C> {
    fn index_name(&self) -> &str {
        &self.name
    }

    async fn query(&self, vector: &[f32], top_k: u32) -> Result<Vec<ScoredMatch>, DomainError> {
        let body = serde_json::json!({
            "vector": vector,
            "topK": top_k,
            "includeMetadata": true,
        });

        let response = self
            .client
            .post_json(&self.url("/query"), self.headers(), &body)
            .await?;

        self.parse_matches(response)
    }

    async fn upsert(&self, entries: Vec<IndexEntry>) -> Result<usize, DomainError> {
        let vectors: Vec<serde_json::Value> = entries
            .into_iter()
            .map(|entry| {
                let mut metadata = entry.metadata;
                metadata.insert(
                    TEXT_METADATA_KEY.to_string(),
                    serde_json::Value::String(entry.text),
                );

                serde_json::json!({
                    "id": entry.id,
                    "values": entry.values,
                    "metadata": metadata,
                })
            })
            .collect();

        let body = serde_json::json!({ "vectors": vectors });

        let response = self
            .client
            .post_json(&self.url("/vectors/upsert"), self.headers(), &body)
            .await?;

        let parsed: UpsertResponse = serde_json::from_value(response).map_err(|e| {
            DomainError::provider("pinecone", format!("Failed to parse upsert response: {}", e))
        })?;

        Ok(parsed.upserted_count)
    }

    async fn describe(&self) -> Result<IndexStats, DomainError> {
        let response = self
            .client
            .post_json(
                &self.url("/describe_index_stats"),
                self.headers(),
                &serde_json::json!({}),
            )
            .await?;

        let parsed: DescribeResponse = serde_json::from_value(response).map_err(|e| {
            DomainError::provider("pinecone", format!("Failed to parse index stats: {}", e))
        })?;

        Ok(IndexStats {
            vector_count: parsed.total_vector_count,
            dimension: parsed.dimension,
        })
    }
}

// Pinecone API types

#[derive(Debug, Deserialize)]
struct QueryResponse {
    #[serde(default)]
    matches: Vec<QueryMatch>,
}

#[derive(Debug, Deserialize)]
struct QueryMatch {
    id: String,
    score: f32,
    metadata: Option<HashMap<String, serde_json::Value>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UpsertResponse {
    upserted_count: usize,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DescribeResponse {
    #[serde(default)]
    total_vector_count: usize,
    dimension: Option<usize>,
}
