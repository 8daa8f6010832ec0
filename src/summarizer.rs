use async_trait::async_trait;
use serde_json::{Value, json};

use crate::error::{ServiceError, SummaryFailure};

const CHAT_COMPLETIONS_URL: &str = "https://api.openai.com/v1/chat/completions";
const MODEL: &str = "gpt-4-1106-preview";

/// Text-generation collaborator: given a prompt, produce a summary or fail.
#[async_trait]
pub trait Summarizer {
    async fn complete(&self, prompt: &str) -> Result<String, ServiceError>;
}

/// Chat-completions client. One user message per request, fixed model.
#[derive(Debug, Clone)]
pub struct OpenAiClient {
    http: reqwest::Client,
    api_key: String,
    url: String,
}

impl OpenAiClient {
    pub fn new(api_key: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key,
            url: CHAT_COMPLETIONS_URL.into(),
        }
    }

    /// Point the client at a different completion endpoint, used by tests.
    pub fn with_url(mut self, url: String) -> Self {
        self.url = url;
        self
    }
}

#[async_trait]
impl Summarizer for OpenAiClient {
    async fn complete(&self, prompt: &str) -> Result<String, ServiceError> {
        let body = json!({
            "model": MODEL,
            "messages": [{ "role": "user", "content": prompt }],
        });

        let response = self
            .http
            .post(&self.url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|err| {
                ServiceError::SummaryGenerationFailed(SummaryFailure::Transport(err.to_string()))
            })?;

        let status = response.status();
        let payload: Value = response.json().await.map_err(|err| {
            ServiceError::SummaryGenerationFailed(SummaryFailure::Transport(err.to_string()))
        })?;

        if !status.is_success() {
            return Err(ServiceError::SummaryGenerationFailed(
                SummaryFailure::Transport(format!("completion endpoint returned {status}")),
            ));
        }

        // An empty choice list is a defined failure, never an empty summary.
        payload
            .pointer("/choices/0/message/content")
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or(ServiceError::SummaryGenerationFailed(
                SummaryFailure::EmptyResponse,
            ))
    }
}
