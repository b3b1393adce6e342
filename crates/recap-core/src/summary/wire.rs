//! Chat completions request and response bodies

use serde::{Deserialize, Serialize};

use crate::config::RecapConfig;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

/// Body posted to `/chat/completions`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
}

impl ChatRequest {
    /// System prompt first, then the user prefix followed by the digest
    pub fn for_digest(config: &RecapConfig, content: &str) -> Self {
        Self {
            model: config.model.as_str().to_string(),
            messages: vec![
                ChatMessage {
                    role: Role::System,
                    content: config.system_prompt.clone(),
                },
                ChatMessage {
                    role: Role::User,
                    content: format!("{}{}", config.user_prompt_prefix, content),
                },
            ],
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ChatResponse {
    #[serde(default)]
    pub choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
pub struct Choice {
    pub message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
pub struct ChoiceMessage {
    #[serde(default)]
    pub content: Option<String>,
}

/// `{"error": {"message": "..."}}` as returned on failures
#[derive(Debug, Deserialize)]
pub struct ErrorEnvelope {
    pub error: ErrorBody,
}

#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    pub message: String,
}
