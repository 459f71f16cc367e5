use serde::{Deserialize, Serialize};

/// Body of every single-prompt tool endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ToolRequest {
    #[serde(default)]
    pub frontendinput: String,
}

impl ToolRequest {
    pub fn new(input: impl Into<String>) -> Self {
        Self {
            frontendinput: input.into(),
        }
    }
}
