//! Groq generation provider
//!
//! Groq serves the OpenAI-compatible chat-completions API under
//! `/openai/v1`, so the wire types follow that contract.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::llm::{
    FinishReason, GenerationRequest, GenerationResponse, LlmProvider, Message, MessageRole, Usage,
};
use crate::domain::DomainError;
use crate::infrastructure::http_client::HttpClientTrait;

const DEFAULT_GROQ_BASE_URL: &str = "https://api.groq.com/openai";

/// Groq API provider
#[derive(Debug)]
pub struct GroqProvider<C: HttpClientTrait> {
    client: C,
    auth_header: String,
    base_url: String,
}

impl<C: HttpClientTrait> GroqProvider<C> {
    pub fn new(client: C, api_key: impl Into<String>) -> Self {
        Self::with_base_url(client, api_key, DEFAULT_GROQ_BASE_URL)
    }

    pub fn with_base_url(
        client: C,
        api_key: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Self {
        Self {
            client,
            auth_header: format!("Bearer {}", api_key.into()),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn chat_completions_url(&self) -> String {
        format!("{}/v1/chat/completions", self.base_url)
    }

    fn headers(&self) -> Vec<(&str, &str)> {
        vec![
            ("Authorization", self.auth_header.as_str()),
            ("Content-Type", "application/json"),
        ]
    }

    fn build_request(&self, model: &str, request: &GenerationRequest) -> serde_json::Value {
        let messages: Vec<GroqMessage> = request
            .messages
            .iter()
            .map(GroqMessage::from_domain)
            .collect();

        let mut body = serde_json::json!({
            "model": model,
            "messages": messages,
        });

        if let Some(temp) = request.temperature {
            body["temperature"] = serde_json::json!(temp);
        }

        if let Some(max_tokens) = request.max_tokens {
            body["max_tokens"] = serde_json::json!(max_tokens);
        }

        body
    }

    fn parse_response(&self, json: serde_json::Value) -> Result<GenerationResponse, DomainError> {
        let response: GroqResponse = serde_json::from_value(json).map_err(|e| {
            DomainError::provider("groq", format!("Failed to parse response: {}", e))
        })?;

        let choice = response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| DomainError::provider("groq", "No choices in response"))?;

        let message = Message::assistant(choice.message.content.unwrap_or_default());

        let mut generation = GenerationResponse::new(response.id, response.model, message);

        if let Some(reason) = choice.finish_reason {
            generation = generation.with_finish_reason(parse_finish_reason(&reason));
        }

        if let Some(usage) = response.usage {
            generation =
                generation.with_usage(Usage::new(usage.prompt_tokens, usage.completion_tokens));
        }

        Ok(generation)
    }
}

#[async_trait]
impl<C: HttpClientTrait> LlmProvider for GroqProvider<C> {
    async fn complete(
        &self,
        model: &str,
        request: GenerationRequest,
    ) -> Result<GenerationResponse, DomainError> {
        let url = self.chat_completions_url();
        let body = self.build_request(model, &request);

        let response = self.client.post_json(&url, self.headers(), &body).await?;

        self.parse_response(response)
    }

    fn provider_name(&self) -> &'static str {
        "groq"
    }
}

fn parse_finish_reason(reason: &str) -> FinishReason {
    match reason {
        "length" => FinishReason::Length,
        "content_filter" => FinishReason::ContentFilter,
        _ => FinishReason::Stop,
    }
}

// Groq API types

#[derive(Debug, Serialize)]
struct GroqMessage {
    role: String,
    content: String,
}

impl GroqMessage {
    fn from_domain(message: &Message) -> Self {
        let role = match message.role {
            MessageRole::System => "system",
            MessageRole::User => "user",
            MessageRole::Assistant => "assistant",
        };

        Self {
            role: role.to_string(),
            content: message.content.clone(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct GroqResponse {
    id: String,
    model: String,
    choices: Vec<GroqChoice>,
    usage: Option<GroqUsage>,
}

#[derive(Debug, Deserialize)]
struct GroqChoice {
    message: GroqResponseMessage,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GroqResponseMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GroqUsage {
    prompt_tokens: u32,
    completion_tokens: u32,
}
