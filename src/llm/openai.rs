// ABOUTME: OpenAI chat-completions provider implementation with bearer authentication.
// ABOUTME: Sends one merged user message per request, temperature fixed at 0.7.
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 NutriPlan Assistant

//! # OpenAI Provider
//!
//! Implementation of the [`LlmProvider`] trait for the OpenAI chat
//! completions API.
//!
//! ## Configuration
//!
//! Set `OPENAI_API_KEY` with a key from the OpenAI platform:
//! <https://platform.openai.com/api-keys>. `OPENAI_MODEL` overrides the
//! default `gpt-4o-mini`.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tokio::sync::OnceCell;
use tracing::{debug, error, instrument};

use super::{full_prompt, LlmProvider, DEFAULT_TEMPERATURE};
use crate::config::ProviderConfig;
use crate::errors::{AppError, AppResult};

/// Base URL for the OpenAI API
const API_BASE_URL: &str = "https://api.openai.com/v1";

// ============================================================================
// API Request/Response Types
// ============================================================================

/// OpenAI chat completion request structure
#[derive(Debug, Serialize)]
struct OpenAiRequest {
    model: String,
    messages: Vec<OpenAiMessage>,
    temperature: f32,
}

/// Message structure for the OpenAI API
#[derive(Debug, Serialize, Deserialize)]
struct OpenAiMessage {
    role: String,
    content: String,
}

/// OpenAI chat completion response structure
#[derive(Debug, Deserialize)]
struct OpenAiResponse {
    #[serde(default)]
    choices: Vec<OpenAiChoice>,
}

/// Choice in an OpenAI response
#[derive(Debug, Deserialize)]
struct OpenAiChoice {
    message: OpenAiResponseMessage,
}

/// Message in an OpenAI response
#[derive(Debug, Deserialize)]
struct OpenAiResponseMessage {
    content: Option<String>,
}

/// OpenAI API error response
#[derive(Debug, Deserialize)]
struct OpenAiErrorResponse {
    error: OpenAiErrorDetail,
}

/// Error detail structure
#[derive(Debug, Deserialize)]
struct OpenAiErrorDetail {
    message: String,
}

// ============================================================================
// Provider Implementation
// ============================================================================

/// OpenAI chat-completion backend
pub struct OpenAiProvider {
    config: ProviderConfig,
    client: OnceCell<Client>,
}

impl OpenAiProvider {
    /// Create an OpenAI provider from its backend configuration
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
                debug!("Initializing OpenAI HTTP client");
                Client::builder().build().map_err(|e| {
                    let message = format!("Erro ao processar com OpenAI: {e}");
                    AppError::provider_with_source(message, e)
                })
            })
            .await
    }

    /// Build the API URL for a given endpoint
    fn api_url(endpoint: &str) -> String {
        format!("{API_BASE_URL}/{endpoint}")
    }

    /// Parse error response from the OpenAI API
    fn parse_error_response(status: reqwest::StatusCode, body: &str) -> AppError {
        serde_json::from_str::<OpenAiErrorResponse>(body).map_or_else(
            |_| {
                AppError::provider(format!(
                    "Erro ao processar com OpenAI: API error ({}): {}",
                    status,
                    body.chars().take(200).collect::<String>()
                ))
            },
            |error_response| {
                AppError::provider(format!(
                    "Erro ao processar com OpenAI: {} - {}",
                    status.as_u16(),
                    error_response.error.message
                ))
            },
        )
    }
}

#[async_trait::async_trait]
impl LlmProvider for OpenAiProvider {
    fn name(&self) -> String {
        format!("OpenAI ({})", self.config.model)
    }

    fn is_available(&self) -> bool {
        !self.config.api_key.is_empty()
    }

    #[instrument(skip(self, system_prompt, user_message), fields(model = %self.config.model))]
    async fn chat(&self, system_prompt: &str, user_message: &str) -> AppResult<String> {
        debug!("Sending chat completion request to OpenAI");

        let request = OpenAiRequest {
            model: self.config.model.clone(),
            messages: vec![OpenAiMessage {
                role: "user".to_owned(),
                content: full_prompt(system_prompt, user_message),
            }],
            temperature: DEFAULT_TEMPERATURE,
        };

        let response = self
            .http_client()
            .await?
            .post(Self::api_url("chat/completions"))
            .header("Authorization", format!("Bearer {}", self.config.api_key))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                error!("Failed to send request to OpenAI API: {}", e);
                let message = format!("Erro ao processar com OpenAI: {e}");
                AppError::provider_with_source(message, e)
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            error!("Failed to read OpenAI API response: {}", e);
            let message = format!("Erro ao processar com OpenAI: {e}");
            AppError::provider_with_source(message, e)
        })?;

        if !status.is_success() {
            return Err(Self::parse_error_response(status, &body));
        }

        let openai_response: OpenAiResponse = serde_json::from_str(&body).map_err(|e| {
            error!("Failed to parse OpenAI API response: {}", e);
            let message = format!("Erro ao processar com OpenAI: {e}");
            AppError::provider_with_source(message, e)
        })?;

        let text = openai_response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.is_empty())
            .ok_or_else(|| {
                AppError::provider("Erro ao processar com OpenAI: resposta sem conteúdo")
            })?;

        debug!("Received response from OpenAI: {} chars", text.len());

        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config(api_key: &str) -> ProviderConfig {
        ProviderConfig {
            api_key: api_key.to_owned(),
            model: "gpt-4o-mini".to_owned(),
            base_url: None,
        }
    }

    #[test]
    fn test_availability_follows_api_key() {
        assert!(OpenAiProvider::new(test_config("sk-test")).is_available());
        assert!(!OpenAiProvider::new(test_config("")).is_available());
    }

    #[test]
    fn test_name_includes_model() {
        let provider = OpenAiProvider::new(test_config("sk-test"));
        assert_eq!(provider.name(), "OpenAI (gpt-4o-mini)");
    }

    #[test]
    fn test_request_serialization_shape() {
        let request = OpenAiRequest {
            model: "gpt-4o-mini".to_owned(),
            messages: vec![OpenAiMessage {
                role: "user".to_owned(),
                content: "olá".to_owned(),
            }],
            temperature: 0.7,
        };

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["model"], "gpt-4o-mini");
        assert_eq!(json["messages"][0]["role"], "user");
        assert_eq!(json["messages"][0]["content"], "olá");
    }

    #[test]
    fn test_error_body_parsing() {
        let error = OpenAiProvider::parse_error_response(
            reqwest::StatusCode::UNAUTHORIZED,
            r#"{"error":{"message":"Incorrect API key provided","type":"invalid_request_error"}}"#,
        );
        assert!(error.message.contains("Erro ao processar com OpenAI"));
        assert!(error.message.contains("Incorrect API key provided"));
    }
}
