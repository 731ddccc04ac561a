use async_trait::async_trait;
use ifcloc_config::translator::TranslatorConfig;
use serde::{Deserialize, Serialize};

use crate::{ChatMessage, ChatModel, ProviderMetadata, TranslateError};

/// OpenAI-compatible `/chat/completions` backend
#[derive(Clone)]
pub struct OpenAiChat {
    client: reqwest::Client,
    api_key: String,
    api_url: String,
    model: String,
}

impl OpenAiChat {
    pub fn new(api_key: String, api_url: String, model: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
            api_url,
            model,
        }
    }

    pub fn from_config(config: &TranslatorConfig) -> Self {
        Self::new(
            config.api_key.clone(),
            config.api_url.clone(),
            config.model.clone(),
        )
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.api_url.trim_end_matches('/'))
    }
}

#[derive(Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
}

#[derive(Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ReplyMessage,
}

#[derive(Deserialize)]
struct ReplyMessage {
    content: Option<String>,
}

#[async_trait]
impl ChatModel for OpenAiChat {
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String, TranslateError> {
        if self.api_key.is_empty() {
            return Err(TranslateError::AuthenticationError);
        }

        let request = CompletionRequest {
            model: &self.model,
            messages,
        };

        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();

        if status == 429 {
            return Err(TranslateError::RateLimitExceeded);
        }

        if status == 401 || status == 403 {
            return Err(TranslateError::AuthenticationError);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TranslateError::ApiError(format!("HTTP {status}: {body}")));
        }

        let completion: CompletionResponse = response.json().await.map_err(|e| {
            TranslateError::ApiError(format!("Failed to parse response: {}", e))
        })?;

        completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| TranslateError::ApiError("No completion in response".to_string()))
    }

    fn metadata(&self) -> ProviderMetadata {
        ProviderMetadata {
            name: "OpenAI".to_string(),
            model: self.model.clone(),
        }
    }
}
