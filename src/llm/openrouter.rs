// ABOUTME: OpenRouter provider implementation over the aggregation gateway's chat endpoint.
// ABOUTME: Builds the body with json! and walks the reply manually; no typed wire structs.
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 NutriPlan Assistant

//! # OpenRouter Provider
//!
//! Implementation of the [`LlmProvider`] trait for OpenRouter, the last
//! entry in the fallback chain.
//!
//! Unlike the other backends this one sends a real `system` message next to
//! the `user` message, carries no temperature, and marshals JSON by hand.
//!
//! ## Configuration
//!
//! Set `OPENROUTER_API_KEY` with a key from <https://openrouter.ai/keys>.
//! `OPENROUTER_MODEL` overrides the default `anthropic/claude-3.5-sonnet`;
//! `OPENROUTER_BASE_URL` points the client at a different gateway.

use reqwest::Client;
use serde_json::json;
use tokio::sync::OnceCell;
use tracing::{debug, error, instrument};

use super::LlmProvider;
use crate::config::{ProviderConfig, DEFAULT_OPENROUTER_BASE_URL};
use crate::errors::{AppError, AppResult};

// Attribution headers OpenRouter reads for its dashboard rankings
const REFERER_HEADER_VALUE: &str = "http://localhost:8081";
const TITLE_HEADER_VALUE: &str = "GitHub Assistant";

/// OpenRouter chat-completion backend
pub struct OpenRouterProvider {
    config: ProviderConfig,
    base_url: String,
    client: OnceCell<Client>,
}

impl OpenRouterProvider {
    /// Create an OpenRouter provider from its backend configuration
    #[must_use]
    pub fn new(config: ProviderConfig) -> Self {
        let base_url = config
            .base_url
            .clone()
            .unwrap_or_else(|| DEFAULT_OPENROUTER_BASE_URL.to_owned());

        Self {
            config,
            base_url,
            client: OnceCell::const_new(),
        }
    }

    /// Lazily build the HTTP handle; concurrent first calls share one build
    async fn http_client(&self) -> AppResult<&Client> {
        self.client
            .get_or_try_init(|| async {
                debug!("Initializing OpenRouter HTTP client");
                Client::builder().build().map_err(|e| {
                    let message = format!("Erro ao processar com OpenRouter: {e}");
                    AppError::provider_with_source(message, e)
                })
            })
            .await
    }
}

#[async_trait::async_trait]
impl LlmProvider for OpenRouterProvider {
    fn name(&self) -> String {
        format!("OpenRouter ({})", self.config.model)
    }

    fn is_available(&self) -> bool {
        !self.config.api_key.is_empty()
    }

    #[instrument(skip(self, system_prompt, user_message), fields(model = %self.config.model))]
    async fn chat(&self, system_prompt: &str, user_message: &str) -> AppResult<String> {
        debug!("Sending chat completion request to OpenRouter");

        let request = json!({
            "model": self.config.model,
            "messages": [
                {"role": "system", "content": system_prompt},
                {"role": "user", "content": user_message},
            ],
        });

        let response = self
            .http_client()
            .await?
            .post(format!("{}/chat/completions", self.base_url))
            .header("Authorization", format!("Bearer {}", self.config.api_key))
            .header("Content-Type", "application/json")
            .header("HTTP-Referer", REFERER_HEADER_VALUE)
            .header("X-Title", TITLE_HEADER_VALUE)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                error!("Failed to send request to OpenRouter API: {}", e);
                let message = format!("Erro ao processar com OpenRouter: {e}");
                AppError::provider_with_source(message, e)
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            error!("Failed to read OpenRouter API response: {}", e);
            let message = format!("Erro ao processar com OpenRouter: {e}");
            AppError::provider_with_source(message, e)
        })?;

        if !status.is_success() {
            return Err(AppError::provider(format!(
                "Erro ao processar com OpenRouter: API error ({}): {}",
                status,
                body.chars().take(200).collect::<String>()
            )));
        }

        if body.trim().is_empty() {
            return Err(AppError::provider(
                "Erro ao processar com OpenRouter: Resposta vazia do OpenRouter",
            ));
        }

        let payload: serde_json::Value = serde_json::from_str(&body).map_err(|e| {
            error!("Failed to parse OpenRouter API response: {}", e);
            let message = format!("Erro ao processar com OpenRouter: {e}");
            AppError::provider_with_source(message, e)
        })?;

        let text = payload
            .get("choices")
            .and_then(serde_json::Value::as_array)
            .and_then(|choices| choices.first())
            .and_then(|choice| choice.pointer("/message/content"))
            .and_then(serde_json::Value::as_str)
            .filter(|content| !content.is_empty())
            .ok_or_else(|| {
                AppError::provider("Erro ao processar com OpenRouter: Nenhuma resposta retornada")
            })?;

        debug!("Received response from OpenRouter: {} chars", text.len());

        Ok(text.to_owned())
    }
}
