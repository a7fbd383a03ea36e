//! Chat endpoints: the static chat page and the answer route

use axum::{
    extract::State,
    response::{Html, IntoResponse, Response},
    Form,
};
use serde::Deserialize;
use tracing::info;

use super::error::ApiError;
use super::state::AppState;

/// GET / - the chat page
pub async fn chat_page() -> Html<&'static str> {
    Html(include_str!("../../assets/chat.html"))
}

/// Form payload for POST /get
#[derive(Debug, Deserialize)]
pub struct ChatForm {
    pub msg: Option<String>,
}

/// POST /get - answer one query, plain text response
pub async fn get_answer(
    State(state): State<AppState>,
    Form(form): Form<ChatForm>,
) -> Result<Response, ApiError> {
    let msg = form
        .msg
        .ok_or_else(|| ApiError::bad_request("Missing form field: msg").with_param("msg"))?;

    info!(chars = msg.len(), "Processing chat query");

    let answer = state.pipeline.answer(&msg).await?;

    Ok(answer.into_response())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use tower::util::ServiceExt;

    use super::super::router::create_router;
    use super::*;
    use crate::domain::embedding::mock::MockEmbeddingProvider;
    use crate::domain::index::mock::MockVectorIndex;
    use crate::domain::index::IndexEntry;
    use crate::domain::llm::mock::MockLlmProvider;
    use crate::domain::prompt::PromptAssembler;
    use crate::domain::{AnswerPipeline, PipelineOptions, Retriever};

    fn test_state(index: MockVectorIndex, generator: MockLlmProvider) -> AppState {
        let index = Arc::new(index);
        let retriever = Retriever::new(Arc::new(MockEmbeddingProvider::new(4)), index.clone());

        let pipeline = AnswerPipeline::new(
            retriever,
            PromptAssembler::with_default_template(),
            Arc::new(generator),
            PipelineOptions::default(),
        );

        AppState::new(Arc::new(pipeline), index)
    }

    fn default_state() -> AppState {
        test_state(
            MockVectorIndex::new("medicalbot").with_entries(vec![IndexEntry::new(
                "chunk-1",
                vec![0.1, 0.2, 0.3, 0.4],
                "Hypertension is high blood pressure.",
            )]),
            MockLlmProvider::new("mock-llm").with_response("Hypertension means high blood pressure."),
        )
    }

    fn form_request(body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/get")
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_chat_page_served_at_root() {
        let app = create_router(default_state());

        let response = app
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let html = String::from_utf8(body.to_vec()).unwrap();
        assert!(html.contains("<form"));
    }

    #[tokio::test]
    async fn test_get_answer_returns_plain_text() {
        let app = create_router(default_state());

        let response = app
            .oneshot(form_request("msg=What+is+hypertension%3F"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(
            String::from_utf8(body.to_vec()).unwrap(),
            "Hypertension means high blood pressure."
        );
    }

    #[tokio::test]
    async fn test_missing_msg_field_is_client_error() {
        let app = create_router(default_state());

        let response = app.oneshot(form_request("")).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"]["param"], serde_json::json!("msg"));
    }

    #[tokio::test]
    async fn test_empty_msg_is_client_error() {
        let app = create_router(default_state());

        let response = app.oneshot(form_request("msg=")).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_index_failure_maps_to_service_unavailable() {
        let index = MockVectorIndex::new("medicalbot");
        index.set_should_fail(true).await;

        let state = test_state(index, MockLlmProvider::new("mock-llm").with_response("unused"));
        let app = create_router(state);

        let response = app.oneshot(form_request("msg=anything")).await.unwrap();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn test_generator_failure_maps_to_service_unavailable() {
        let state = test_state(
            MockVectorIndex::new("medicalbot"),
            MockLlmProvider::new("mock-llm").with_error("model overloaded"),
        );
        let app = create_router(state);

        let response = app.oneshot(form_request("msg=anything")).await.unwrap();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn test_empty_index_still_answers() {
        let state = test_state(
            MockVectorIndex::new("medicalbot"),
            MockLlmProvider::new("mock-llm").with_response("I don't know."),
        );
        let app = create_router(state);

        let response = app.oneshot(form_request("msg=What+is+hypertension%3F")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(String::from_utf8(body.to_vec()).unwrap(), "I don't know.");
    }
}
