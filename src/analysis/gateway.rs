use log::{info, warn};
use reqwest::{Client, StatusCode};

use std::time::Duration;

use super::data::*;
use crate::config::AppConfig;

#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("{0}")]
    BadRequest(String),
    #[error("AI service not configured")]
    NotConfigured,
    #[error("Rate limit exceeded. Please try again in a moment.")]
    RateLimited,
    #[error("AI credits exhausted. Please add credits to continue.")]
    QuotaExhausted,
    #[error("AI request failed: HTTP {status}")]
    Upstream { status: u16, body: String },
    #[error("AI response contained no content")]
    EmptyCompletion,
    #[error("AI request failed: {0}")]
    Http(#[from] reqwest::Error),
}

impl GatewayError {
    pub fn status_code(&self) -> u16 {
        match self {
            GatewayError::BadRequest(_) => 400,
            GatewayError::RateLimited => 429,
            GatewayError::QuotaExhausted => 402,
            GatewayError::NotConfigured
            | GatewayError::Upstream { .. }
            | GatewayError::EmptyCompletion
            | GatewayError::Http(_) => 500,
        }
    }
}

/// Chat-completion client for the AI gateway. Requests are never retried;
/// rate limits and exhausted credits are reported to the caller as is.
pub struct GatewayClient {
    client: Client,
    endpoint: String,
    model: String,
    api_key: Option<String>,
}

impl GatewayClient {
    pub fn new(config: &AppConfig) -> Result<Self, GatewayError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.ai_timeout_secs))
            .build()?;

        Ok(Self {
            client,
            endpoint: format!(
                "{}/chat/completions",
                config.ai_gateway_url.trim_end_matches('/')
            ),
            model: config.ai_model.clone(),
            api_key: config.ai_api_key.clone().filter(|key| !key.is_empty()),
        })
    }

    pub async fn complete(&self, system: &str, user: &str) -> Result<String, GatewayError> {
        let api_key = self.api_key.as_ref().ok_or_else(|| {
            warn!("AI gateway called without an API key");
            GatewayError::NotConfigured
        })?;

        let request = ChatCompletionRequest {
            model: self.model.clone(),
            messages: vec![ChatMessage::system(system), ChatMessage::user(user)],
        };

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("AI gateway error: {} {}", status, body);

            return Err(match status {
                StatusCode::TOO_MANY_REQUESTS => GatewayError::RateLimited,
                StatusCode::PAYMENT_REQUIRED => GatewayError::QuotaExhausted,
                _ => GatewayError::Upstream {
                    status: status.as_u16(),
                    body,
                },
            });
        }

        let completion: ChatCompletionResponse = response.json().await?;
        let content = completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.is_empty())
            .ok_or(GatewayError::EmptyCompletion)?;

        info!("AI gateway returned {} characters", content.len());

        Ok(content)
    }
}
