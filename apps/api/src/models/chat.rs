use serde::{Deserialize, Serialize};

/// Body of `/api/counseling-chatbot`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    #[serde(default)]
    pub user_input: String,
    /// Prior transcript, one `user: …` / `ai(you): …` line per message.
    #[serde(default)]
    pub chat_history: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatReply {
    pub response: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Ai,
}

impl Sender {
    /// Label used when replaying the transcript to the model.
    pub fn history_label(self) -> &'static str {
        match self {
            Sender::User => "user",
            Sender::Ai => "ai(you)",
        }
    }
}

/// One bubble of the chat transcript. `id` is the creation timestamp in
/// milliseconds since the Unix epoch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: i64,
    pub text: String,
    pub sender: Sender,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_request_uses_camel_case_keys() {
        let body = serde_json::to_value(ChatRequest {
            user_input: "hi".into(),
            chat_history: "user: hello".into(),
        })
        .unwrap();
        assert_eq!(body["userInput"], "hi");
        assert_eq!(body["chatHistory"], "user: hello");
    }

    #[test]
    fn test_sender_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Sender::Ai).unwrap(), r#""ai""#);
    }
}
