//! OpenRouter adapter implementing [`ModelClient`].

use super::types::{ApiErrorBody, ChatApiRequest, ChatApiResponse};
use async_trait::async_trait;
use council_application::{GatewayError, ModelClient};
use council_domain::{BackendId, ChatMessage, Completion};
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use std::time::Duration;
use tracing::debug;

/// Default chat-completions endpoint.
pub const DEFAULT_API_URL: &str = "https://openrouter.ai/api/v1/chat/completions";

/// Environment variable consulted when no key is configured.
pub const API_KEY_ENV: &str = "OPENROUTER_API_KEY";

/// Connection settings for [`OpenRouterClient`].
#[derive(Debug, Clone)]
pub struct OpenRouterSettings {
    /// Full chat-completions URL
    pub api_url: String,
    pub api_key: Option<String>,
    /// Keep-alive connections kept per host
    pub max_idle_connections: usize,
    pub connect_timeout: Duration,
}

impl Default for OpenRouterSettings {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            api_key: None,
            max_idle_connections: 20,
            connect_timeout: Duration::from_secs(10),
        }
    }
}

/// One pooled HTTP client for the whole process.
///
/// Performs exactly one request per [`ModelClient::complete`] call; retries
/// and the concurrency gate are applied by the caller.
#[derive(Debug, Clone)]
pub struct OpenRouterClient {
    http: reqwest::Client,
    api_url: String,
}

impl OpenRouterClient {
    /// Build the client; a missing or unusable API key is a configuration error.
    pub fn new(settings: OpenRouterSettings) -> Result<Self, GatewayError> {
        let api_key = settings
            .api_key
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| {
                GatewayError::Configuration(format!(
                    "no OpenRouter API key configured (set {} or openrouter.api_key)",
                    API_KEY_ENV
                ))
            })?;

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        let auth = HeaderValue::from_str(&format!("Bearer {}", api_key))
            .map_err(|_| GatewayError::Configuration("invalid API key format".into()))?;
        headers.insert(AUTHORIZATION, auth);

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .pool_max_idle_per_host(settings.max_idle_connections)
            .connect_timeout(settings.connect_timeout)
            .build()
            .map_err(|e| GatewayError::Configuration(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            api_url: settings.api_url,
        })
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    fn map_transport_error(e: reqwest::Error, timeout: Duration) -> GatewayError {
        if e.is_timeout() {
            GatewayError::Timeout(timeout)
        } else {
            GatewayError::ConnectionError(e.to_string())
        }
    }

    fn status_message(body: &str) -> String {
        serde_json::from_str::<ApiErrorBody>(body)
            .ok()
            .and_then(|b| b.error.message)
            .unwrap_or_else(|| body.chars().take(200).collect())
    }
}

#[async_trait]
impl ModelClient for OpenRouterClient {
    async fn complete(
        &self,
        backend: &BackendId,
        messages: &[ChatMessage],
        timeout: Duration,
    ) -> Result<Completion, GatewayError> {
        let request = ChatApiRequest {
            model: backend.as_str(),
            messages,
        };

        let response = self
            .http
            .post(&self.api_url)
            .timeout(timeout)
            .json(&request)
            .send()
            .await
            .map_err(|e| Self::map_transport_error(e, timeout))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| Self::map_transport_error(e, timeout))?;

        if !status.is_success() {
            debug!(model = %backend, status = status.as_u16(), "OpenRouter returned error status");
            return Err(GatewayError::Status {
                status: status.as_u16(),
                message: Self::status_message(&body),
            });
        }

        let parsed: ChatApiResponse = serde_json::from_str(&body)
            .map_err(|e| GatewayError::MalformedResponse(format!("invalid JSON: {}", e)))?;

        let choice = parsed
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| GatewayError::MalformedResponse("no choices in response".into()))?;

        Ok(Completion {
            content: choice.message.content.unwrap_or_default(),
            reasoning_details: choice.message.reasoning_details,
        })
    }
}
