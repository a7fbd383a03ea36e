use serde::{Deserialize, Serialize};

use super::Message;

/// Parameters for one generation call
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationRequest {
    pub messages: Vec<Message>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
}

impl GenerationRequest {
    pub fn new(messages: Vec<Message>) -> Self {
        Self {
            messages,
            temperature: None,
            max_tokens: None,
        }
    }

    pub fn builder() -> GenerationRequestBuilder {
        GenerationRequestBuilder::default()
    }

    /// Content of the system message, if one is present
    pub fn system_content(&self) -> Option<&str> {
        self.messages
            .iter()
            .find(|m| m.role == super::MessageRole::System)
            .map(|m| m.content.as_str())
    }
}

/// Builder for GenerationRequest
#[derive(Debug, Default)]
pub struct GenerationRequestBuilder {
    messages: Vec<Message>,
    temperature: Option<f32>,
    max_tokens: Option<u32>,
}

impl GenerationRequestBuilder {
    pub fn message(mut self, message: Message) -> Self {
        self.messages.push(message);
        self
    }

    pub fn system(self, content: impl Into<String>) -> Self {
        self.message(Message::system(content))
    }

    pub fn user(self, content: impl Into<String>) -> Self {
        self.message(Message::user(content))
    }

    pub fn temperature(mut self, temp: f32) -> Self {
        self.temperature = Some(temp);
        self
    }

    pub fn max_tokens(mut self, tokens: u32) -> Self {
        self.max_tokens = Some(tokens);
        self
    }

    pub fn build(self) -> GenerationRequest {
        GenerationRequest {
            messages: self.messages,
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_builder() {
        let request = GenerationRequest::builder()
            .system("Answer from context only.")
            .user("What is hypertension?")
            .temperature(0.4)
            .max_tokens(500)
            .build();

        assert_eq!(request.messages.len(), 2);
        assert_eq!(request.temperature, Some(0.4));
        assert_eq!(request.max_tokens, Some(500));
    }

    #[test]
    fn test_system_content() {
        let request = GenerationRequest::builder()
            .system("instruction")
            .user("query")
            .build();

        assert_eq!(request.system_content(), Some("instruction"));
    }

    #[test]
    fn test_system_content_absent() {
        let request = GenerationRequest::builder().user("query").build();
        assert_eq!(request.system_content(), None);
    }
}
