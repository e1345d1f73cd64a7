use crate::completion::{ChatCompletionResponse, CompletionBackend};

/// Text returned when the completion API answers with no choices.
pub const EMPTY_COMPLETION_FALLBACK: &str = "Failed to generate description.";

#[derive(Debug, Clone)]
pub struct GatewayConfig {
    pub host: String,
    pub port: u16,
    pub api_base: String,
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f32,
    pub timeout: u64,
    pub api_key: Option<String>,
}

#[derive(Debug, Clone)]
pub struct GatewayState {
    pub backend: CompletionBackend,
    pub api_key: Option<String>,
    pub client: reqwest::Client,
}

impl GatewayState {
    pub fn new(config: GatewayConfig) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout))
            .build()?;
        if config.model.is_empty() {
            anyhow::bail!("Model identifier must not be empty");
        }
        if !(0.0..=2.0).contains(&config.temperature) {
            anyhow::bail!("Temperature must be within 0.0..=2.0");
        }
        if config.api_key.is_none() {
            // Startup proceeds; generation requests will fail with 500.
            log::error!("Missing OPENAI_API_KEY environment variable");
        }
        Ok(Self {
            backend: CompletionBackend {
                api_base: config.api_base,
                model: config.model,
                max_tokens: config.max_tokens,
                temperature: config.temperature,
            },
            api_key: config.api_key,
            client,
        })
    }

    /// Submit a prompt to the completion API and return the trimmed
    /// completion text. Every failure is terminal for the request.
    pub async fn generate_description(&self, prompt: String) -> anyhow::Result<String> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| anyhow::anyhow!("No completion API key configured"))?;

        let request = self.backend.chat_request(prompt);
        let response = self
            .client
            .post(self.backend.api_path("/chat/completions"))
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            anyhow::bail!("Completion API returned {}: {}", status, body);
        }

        let completion: ChatCompletionResponse = response.json().await?;
        Ok(completion
            .choices
            .first()
            .map(|choice| choice.message.content.trim().to_string())
            .unwrap_or_else(|| EMPTY_COMPLETION_FALLBACK.to_string()))
    }
}
