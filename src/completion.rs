use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChatCompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatCompletionResponse {
    pub choices: Vec<Choice>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Choice {
    pub message: ChatMessage,
    pub finish_reason: Option<String>,
}

/// The OpenAI-compatible completion endpoint this gateway talks to,
/// together with the fixed sampling parameters for NPC generation.
#[derive(Debug, Clone)]
pub struct CompletionBackend {
    pub api_base: String,
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f32,
}

impl CompletionBackend {
    pub fn api_path(&self, api_path: &str) -> String {
        let base = self.api_base.trim_end_matches('/');
        if api_path.starts_with('/') {
            format!("{}{}", base, api_path)
        } else {
            format!("{}/{}", base, api_path)
        }
    }

    /// Wrap a prompt into a single-message chat request for this backend.
    pub fn chat_request(&self, prompt: String) -> ChatCompletionRequest {
        ChatCompletionRequest {
            model: self.model.clone(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: prompt,
            }],
            max_tokens: Some(self.max_tokens),
            temperature: Some(self.temperature),
        }
    }
}
