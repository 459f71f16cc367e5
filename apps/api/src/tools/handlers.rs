//! Axum route handlers for the tool endpoints.
//!
//! Each structured tool builds its prompt, asks the model for JSON matching the
//! tool's schema and forwards whatever came back without reshaping it.

use axum::{extract::State, Json};
use serde_json::Value;
use tracing::info;

use crate::errors::AppError;
use crate::models::chat::{ChatReply, ChatRequest};
use crate::models::request::ToolRequest;
use crate::state::AppState;
use crate::tools::prompts::{
    career_guidance_schema, career_recommendations_schema, chat_prompt, fill, resource_schema,
    roadmap_schema, CAREER_GUIDANCE_TEMPLATE, CAREER_RECOMMENDATIONS_TEMPLATE, RESOURCE_TEMPLATE,
    ROADMAP_SCHEMA_DEPTH, ROADMAP_TEMPLATE,
};

fn require_input(request: &ToolRequest) -> Result<&str, AppError> {
    let input = request.frontendinput.trim();
    if input.is_empty() {
        return Err(AppError::Validation("give frontend input".to_string()));
    }
    Ok(input)
}

async fn relay(
    state: &AppState,
    tool: &str,
    template: &str,
    schema: Value,
    request: &ToolRequest,
) -> Result<Json<Value>, AppError> {
    let input = require_input(request)?;
    info!(tool, input_len = input.len(), "relaying tool prompt");
    let result = state.llm.generate_json(&fill(template, input), &schema).await?;
    Ok(Json(result))
}

/// POST /api/career-recommendations
pub async fn handle_career_recommendations(
    State(state): State<AppState>,
    Json(request): Json<ToolRequest>,
) -> Result<Json<Value>, AppError> {
    relay(
        &state,
        "career-recommendations",
        CAREER_RECOMMENDATIONS_TEMPLATE,
        career_recommendations_schema(),
        &request,
    )
    .await
}

/// POST /api/career-guidance
pub async fn handle_career_guidance(
    State(state): State<AppState>,
    Json(request): Json<ToolRequest>,
) -> Result<Json<Value>, AppError> {
    relay(
        &state,
        "career-guidance",
        CAREER_GUIDANCE_TEMPLATE,
        career_guidance_schema(),
        &request,
    )
    .await
}

/// POST /api/resource
pub async fn handle_resource(
    State(state): State<AppState>,
    Json(request): Json<ToolRequest>,
) -> Result<Json<Value>, AppError> {
    relay(
        &state,
        "resource",
        RESOURCE_TEMPLATE,
        resource_schema(),
        &request,
    )
    .await
}

/// POST /api/tree-data
pub async fn handle_tree_data(
    State(state): State<AppState>,
    Json(request): Json<ToolRequest>,
) -> Result<Json<Value>, AppError> {
    relay(
        &state,
        "tree-data",
        ROADMAP_TEMPLATE,
        roadmap_schema(ROADMAP_SCHEMA_DEPTH),
        &request,
    )
    .await
}

/// POST /api/counseling-chatbot
///
/// Replays the transcript and the new message to the model and returns its reply as plain text.
pub async fn handle_counseling_chatbot(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatReply>, AppError> {
    let message = request.user_input.trim();
    if message.is_empty() {
        return Err(AppError::Validation("userInput cannot be empty".to_string()));
    }

    info!(
        message_len = message.len(),
        history_len = request.chat_history.len(),
        "relaying chat message"
    );
    let response = state
        .llm
        .generate_text(&chat_prompt(&request.chat_history, message))
        .await?;

    Ok(Json(ChatReply {
        response: response.trim().to_string(),
    }))
}
