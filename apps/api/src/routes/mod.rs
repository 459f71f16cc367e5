pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::state::AppState;
use crate::tools::handlers;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route(
            "/api/career-recommendations",
            post(handlers::handle_career_recommendations),
        )
        .route(
            "/api/career-guidance",
            post(handlers::handle_career_guidance),
        )
        .route("/api/resource", post(handlers::handle_resource))
        .route("/api/tree-data", post(handlers::handle_tree_data))
        .route(
            "/api/counseling-chatbot",
            post(handlers::handle_counseling_chatbot),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;
    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::config::Config;
    use crate::llm_client::{GenerativeModel, LlmError};

    /// Returns canned output and remembers every prompt it was given.
    struct StubModel {
        json: Value,
        text: String,
        fail: bool,
        prompts: Mutex<Vec<String>>,
    }

    impl StubModel {
        fn new(json: Value) -> Arc<Self> {
            Arc::new(Self {
                json,
                text: "Consider a data analytics course.".to_string(),
                fail: false,
                prompts: Mutex::new(Vec::new()),
            })
        }

        fn failing() -> Arc<Self> {
            Arc::new(Self {
                json: Value::Null,
                text: String::new(),
                fail: true,
                prompts: Mutex::new(Vec::new()),
            })
        }

        fn prompts(&self) -> Vec<String> {
            self.prompts.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl GenerativeModel for StubModel {
        async fn generate_json(&self, prompt: &str, _schema: &Value) -> Result<Value, LlmError> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            if self.fail {
                return Err(LlmError::EmptyContent);
            }
            Ok(self.json.clone())
        }

        async fn generate_text(&self, prompt: &str) -> Result<String, LlmError> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            if self.fail {
                return Err(LlmError::EmptyContent);
            }
            Ok(self.text.clone())
        }
    }

    fn router(model: Arc<StubModel>) -> Router {
        build_router(AppState {
            llm: model,
            config: Config {
                gemini_api_key: "test-key".to_string(),
                port: 3000,
                rust_log: "debug".to_string(),
            },
        })
    }

    async fn post_json(app: Router, uri: &str, body: Value) -> (StatusCode, Value) {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_health_reports_ok() {
        let app = router(StubModel::new(Value::Null));
        let request = Request::builder()
            .uri("/health")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_recommendations_forwards_model_json_verbatim() {
        let payload = json!({
            "careerRecommendations": [
                {"careerTitle": "Data Scientist", "description": "...", "whyRecommended": "..."}
            ]
        });
        let model = StubModel::new(payload.clone());
        let (status, body) = post_json(
            router(model.clone()),
            "/api/career-recommendations",
            json!({"frontendinput": "machine learning"}),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, payload);
        assert!(model.prompts()[0].contains("interests: machine learning ,"));
    }

    #[tokio::test]
    async fn test_missing_frontendinput_is_rejected_without_model_call() {
        let model = StubModel::new(json!({}));
        let (status, body) = post_json(router(model.clone()), "/api/tree-data", json!({})).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
        assert!(model.prompts().is_empty());
    }

    #[tokio::test]
    async fn test_blank_frontendinput_is_rejected() {
        let model = StubModel::new(json!({}));
        let (status, _) = post_json(
            router(model.clone()),
            "/api/resource",
            json!({"frontendinput": "   "}),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(model.prompts().is_empty());
    }

    #[tokio::test]
    async fn test_model_failure_is_internal_server_error() {
        let (status, body) = post_json(
            router(StubModel::failing()),
            "/api/career-guidance",
            json!({"frontendinput": "doctor"}),
        )
        .await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"]["message"], "Internal Server Error");
    }

    #[tokio::test]
    async fn test_chat_wraps_reply_and_replays_history() {
        let model = StubModel::new(Value::Null);
        let (status, body) = post_json(
            router(model.clone()),
            "/api/counseling-chatbot",
            json!({"userInput": "What next?", "chatHistory": "user: I like maths"}),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["response"], "Consider a data analytics course.");
        let prompt = &model.prompts()[0];
        assert!(prompt.contains("user: I like maths"));
        assert!(prompt.contains("user: What next?"));
    }

    #[tokio::test]
    async fn test_chat_requires_user_input() {
        let model = StubModel::new(Value::Null);
        let (status, _) = post_json(
            router(model.clone()),
            "/api/counseling-chatbot",
            json!({"chatHistory": ""}),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(model.prompts().is_empty());
    }
}
