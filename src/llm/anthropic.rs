// ABOUTME: Anthropic messages-API provider implementation with x-api-key authentication.
// ABOUTME: Caps completions at 1024 tokens, the only backend with an explicit token limit.
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 NutriPlan Assistant

//! # Anthropic Provider
//!
//! Implementation of the [`LlmProvider`] trait for the Anthropic messages
//! API.
//!
//! ## Configuration
//!
//! Set `ANTHROPIC_API_KEY` with a key from the Anthropic console:
//! <https://console.anthropic.com/settings/keys>. `ANTHROPIC_MODEL`
//! overrides the default `claude-3-5-sonnet-20241022`.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tokio::sync::OnceCell;
use tracing::{debug, error, instrument};

use super::{full_prompt, LlmProvider, DEFAULT_TEMPERATURE};
use crate::config::ProviderConfig;
use crate::errors::{AppError, AppResult};

/// Base URL for the Anthropic API
const API_BASE_URL: &str = "https://api.anthropic.com/v1";

/// Required API version header value
const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Completion cap sent with every request
const MAX_TOKENS: u32 = 1024;

// ============================================================================
// API Request/Response Types
// ============================================================================

/// Anthropic messages request structure
#[derive(Debug, Serialize)]
struct AnthropicRequest {
    model: String,
    max_tokens: u32,
    temperature: f32,
    messages: Vec<AnthropicMessage>,
}

/// Message structure for the Anthropic API
#[derive(Debug, Serialize, Deserialize)]
struct AnthropicMessage {
    role: String,
    content: String,
}

/// Anthropic messages response structure
#[derive(Debug, Deserialize)]
struct AnthropicResponse {
    #[serde(default)]
    content: Vec<AnthropicContentBlock>,
}

/// One content block in a response
#[derive(Debug, Deserialize)]
struct AnthropicContentBlock {
    #[serde(default)]
    text: Option<String>,
}

/// Anthropic API error response
#[derive(Debug, Deserialize)]
struct AnthropicErrorResponse {
    error: AnthropicErrorDetail,
}

/// Error detail structure
#[derive(Debug, Deserialize)]
struct AnthropicErrorDetail {
    message: String,
}

// ============================================================================
// Provider Implementation
// ============================================================================

/// Anthropic chat-completion backend
pub struct AnthropicProvider {
    config: ProviderConfig,
    client: OnceCell<Client>,
}

impl AnthropicProvider {
    /// Create an Anthropic provider from its backend configuration
    #[must_use]
    pub const fn new(config: ProviderConfig) -> Self {
        Self {
            config,
            client: OnceCell::const_new(),
        }
    }

    /// Lazily build the HTTP handle; concurrent first calls share one build
    async fn http_client(&self) -> AppResult<&Client> {
        self.client
            .get_or_try_init(|| async {
                debug!("Initializing Anthropic HTTP client");
                Client::builder().build().map_err(|e| {
                    let message = format!("Erro ao processar com Anthropic: {e}");
                    AppError::provider_with_source(message, e)
                })
            })
            .await
    }

    /// Build the API URL for a given endpoint
    fn api_url(endpoint: &str) -> String {
        format!("{API_BASE_URL}/{endpoint}")
    }

    /// Parse error response from the Anthropic API
    fn parse_error_response(status: reqwest::StatusCode, body: &str) -> AppError {
        serde_json::from_str::<AnthropicErrorResponse>(body).map_or_else(
            |_| {
                AppError::provider(format!(
                    "Erro ao processar com Anthropic: API error ({}): {}",
                    status,
                    body.chars().take(200).collect::<String>()
                ))
            },
            |error_response| {
                AppError::provider(format!(
                    "Erro ao processar com Anthropic: {} - {}",
                    status.as_u16(),
                    error_response.error.message
                ))
            },
        )
    }
}

#[async_trait::async_trait]
impl LlmProvider for AnthropicProvider {
    fn name(&self) -> String {
        format!("Anthropic ({})", self.config.model)
    }

    fn is_available(&self) -> bool {
        !self.config.api_key.is_empty()
    }

    #[instrument(skip(self, system_prompt, user_message), fields(model = %self.config.model))]
    async fn chat(&self, system_prompt: &str, user_message: &str) -> AppResult<String> {
        debug!("Sending chat completion request to Anthropic");

        let request = AnthropicRequest {
            model: self.config.model.clone(),
            max_tokens: MAX_TOKENS,
            temperature: DEFAULT_TEMPERATURE,
            messages: vec![AnthropicMessage {
                role: "user".to_owned(),
                content: full_prompt(system_prompt, user_message),
            }],
        };

        let response = self
            .http_client()
            .await?
            .post(Self::api_url("messages"))
            .header("x-api-key", &self.config.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                error!("Failed to send request to Anthropic API: {}", e);
                let message = format!("Erro ao processar com Anthropic: {e}");
                AppError::provider_with_source(message, e)
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            error!("Failed to read Anthropic API response: {}", e);
            let message = format!("Erro ao processar com Anthropic: {e}");
            AppError::provider_with_source(message, e)
        })?;

        if !status.is_success() {
            return Err(Self::parse_error_response(status, &body));
        }

        let anthropic_response: AnthropicResponse = serde_json::from_str(&body).map_err(|e| {
            error!("Failed to parse Anthropic API response: {}", e);
            let message = format!("Erro ao processar com Anthropic: {e}");
            AppError::provider_with_source(message, e)
        })?;

        let text = anthropic_response
            .content
            .into_iter()
            .next()
            .and_then(|block| block.text)
            .filter(|text| !text.is_empty())
            .ok_or_else(|| {
                AppError::provider("Erro ao processar com Anthropic: resposta sem conteúdo")
            })?;

        debug!("Received response from Anthropic: {} chars", text.len());

        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config(api_key: &str) -> ProviderConfig {
        ProviderConfig {
            api_key: api_key.to_owned(),
            model: "claude-3-5-sonnet-20241022".to_owned(),
            base_url: None,
        }
    }

    #[test]
    fn test_availability_follows_api_key() {
        assert!(AnthropicProvider::new(test_config("sk-ant")).is_available());
        assert!(!AnthropicProvider::new(test_config("")).is_available());
    }

    #[test]
    fn test_name_includes_model() {
        let provider = AnthropicProvider::new(test_config("sk-ant"));
        assert_eq!(provider.name(), "Anthropic (claude-3-5-sonnet-20241022)");
    }

    #[test]
    fn test_request_carries_token_cap() {
        let request = AnthropicRequest {
            model: "claude-3-5-sonnet-20241022".to_owned(),
            max_tokens: MAX_TOKENS,
            temperature: 0.7,
            messages: vec![AnthropicMessage {
                role: "user".to_owned(),
                content: "olá".to_owned(),
            }],
        };

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["max_tokens"], 1024);
        assert_eq!(json["messages"][0]["role"], "user");
    }

    #[test]
    fn test_error_body_parsing() {
        let error = AnthropicProvider::parse_error_response(
            reqwest::StatusCode::UNAUTHORIZED,
            r#"{"type":"error","error":{"type":"authentication_error","message":"invalid x-api-key"}}"#,
        );
        assert!(error.message.contains("Erro ao processar com Anthropic"));
        assert!(error.message.contains("invalid x-api-key"));
    }
}
