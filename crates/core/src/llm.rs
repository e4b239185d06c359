use crate::error::{ConfigurationError, PipelineError};
use crate::models::{is_supported_model, ChatMessage};
use crate::traits::ChatModel;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;
use url::Url;

pub const CREDENTIAL_ENV: &str = "DASHSCOPE_API_KEY";
pub const DEFAULT_BASE_URL: &str = "https://dashscope.aliyuncs.com/compatible-mode/v1";

#[derive(Debug, Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    choices: Vec<CompletionChoice>,
}

#[derive(Debug, Deserialize)]
struct CompletionChoice {
    message: CompletionMessage,
}

#[derive(Debug, Deserialize)]
struct CompletionMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

/// Chat-completions client for DashScope's OpenAI-compatible endpoint.
#[derive(Clone)]
pub struct DashScopeClient {
    model_id: String,
    api_key: String,
    endpoint: String,
    client: Client,
}

impl std::fmt::Debug for DashScopeClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DashScopeClient")
            .field("model_id", &self.model_id)
            .field("endpoint", &self.endpoint)
            .finish_non_exhaustive()
    }
}

impl DashScopeClient {
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

/// Builds a chat model handle. Performs no network I/O.
pub fn get_client(
    model_id: &str,
    credential: Option<&str>,
    base_url: &str,
) -> Result<DashScopeClient, ConfigurationError> {
    let api_key = credential
        .map(str::trim)
        .filter(|key| !key.is_empty())
        .ok_or_else(|| ConfigurationError::MissingCredential(CREDENTIAL_ENV.to_string()))?;

    if !is_supported_model(model_id) {
        return Err(ConfigurationError::UnknownModel(model_id.to_string()));
    }

    let base = Url::parse(base_url).map_err(|error| ConfigurationError::InvalidEndpoint {
        endpoint: base_url.to_string(),
        details: error.to_string(),
    })?;

    Ok(DashScopeClient {
        model_id: model_id.to_string(),
        api_key: api_key.to_string(),
        endpoint: format!("{}/chat/completions", base.as_str().trim_end_matches('/')),
        client: Client::new(),
    })
}

fn extract_completion(model_id: &str, payload: CompletionResponse) -> Result<String, PipelineError> {
    payload
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .map(|content| content.trim().to_string())
        .filter(|content| !content.is_empty())
        .ok_or_else(|| PipelineError::EmptyCompletion(model_id.to_string()))
}

fn describe_failure(body: &str) -> String {
    serde_json::from_str::<ErrorEnvelope>(body)
        .map(|envelope| envelope.error.message)
        .unwrap_or_else(|_| body.trim().to_string())
}

#[async_trait]
impl ChatModel for DashScopeClient {
    fn model_id(&self) -> &str {
        &self.model_id
    }

    async fn complete(&self, messages: &[ChatMessage]) -> Result<String, PipelineError> {
        debug!(model = %self.model_id, message_count = messages.len(), "chat completion");

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&CompletionRequest {
                model: &self.model_id,
                messages,
            })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(PipelineError::BackendResponse {
                backend: "dashscope".to_string(),
                status: status.as_u16(),
                details: describe_failure(&body),
            });
        }

        let payload: CompletionResponse = response.json().await?;
        extract_completion(&self.model_id, payload)
    }
}
