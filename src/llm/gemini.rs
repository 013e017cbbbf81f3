// ABOUTME: Google Gemini provider implementation over the generateContent REST API.
// ABOUTME: Single-turn text completion; the API key travels as a URL query parameter.
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 NutriPlan Assistant

//! # Gemini Provider
//!
//! Implementation of the [`LlmProvider`] trait for Google Gemini, the
//! assistant's default backend.
//!
//! ## Configuration
//!
//! Set `GEMINI_API_KEY` with a key from Google AI Studio:
//! <https://aistudio.google.com/apikey>. `GEMINI_MODEL` overrides the
//! default `gemini-1.5-flash`.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tokio::sync::OnceCell;
use tracing::{debug, error, instrument};

use super::{full_prompt, LlmProvider, DEFAULT_TEMPERATURE};
use crate::config::ProviderConfig;
use crate::errors::{AppError, AppResult};

/// Base URL for the Gemini API
const API_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

// ============================================================================
// API Request/Response Types
// ============================================================================

/// Gemini generateContent request structure
#[derive(Debug, Serialize)]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

/// A content block: the parts of one conversation turn
#[derive(Debug, Serialize, Deserialize)]
struct GeminiContent {
    parts: Vec<GeminiPart>,
}

/// One text part inside a content block
#[derive(Debug, Serialize, Deserialize)]
struct GeminiPart {
    text: String,
}

/// Generation tuning parameters
#[derive(Debug, Serialize)]
struct GenerationConfig {
    temperature: f32,
}

/// Gemini generateContent response structure
#[derive(Debug, Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
}

/// One candidate completion
#[derive(Debug, Deserialize)]
struct GeminiCandidate {
    content: GeminiContent,
}

/// Gemini API error response
#[derive(Debug, Deserialize)]
struct GeminiErrorResponse {
    error: GeminiErrorDetail,
}

/// Error detail structure
#[derive(Debug, Deserialize)]
struct GeminiErrorDetail {
    message: String,
}

// ============================================================================
// Provider Implementation
// ============================================================================

/// Google Gemini chat-completion backend
pub struct GeminiProvider {
    config: ProviderConfig,
    client: OnceCell<Client>,
}

impl GeminiProvider {
    /// Create a Gemini provider from its backend configuration
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
                debug!("Initializing Gemini HTTP client");
                Client::builder().build().map_err(|e| {
                    let message = format!("Erro ao processar com Gemini: {e}");
                    AppError::provider_with_source(message, e)
                })
            })
            .await
    }

    /// Build the generateContent URL; carries the API key, never log it
    fn api_url(&self) -> String {
        format!(
            "{API_BASE_URL}/models/{}:generateContent?key={}",
            self.config.model, self.config.api_key
        )
    }

    /// Parse error response from the Gemini API
    fn parse_error_response(status: reqwest::StatusCode, body: &str) -> AppError {
        serde_json::from_str::<GeminiErrorResponse>(body).map_or_else(
            |_| {
                AppError::provider(format!(
                    "Erro ao processar com Gemini: API error ({}): {}",
                    status,
                    body.chars().take(200).collect::<String>()
                ))
            },
            |error_response| {
                AppError::provider(format!(
                    "Erro ao processar com Gemini: {} - {}",
                    status.as_u16(),
                    error_response.error.message
                ))
            },
        )
    }
}

#[async_trait::async_trait]
impl LlmProvider for GeminiProvider {
    fn name(&self) -> String {
        format!("Gemini ({})", self.config.model)
    }

    fn is_available(&self) -> bool {
        !self.config.api_key.is_empty()
    }

    #[instrument(skip(self, system_prompt, user_message), fields(model = %self.config.model))]
    async fn chat(&self, system_prompt: &str, user_message: &str) -> AppResult<String> {
        debug!("Sending chat completion request to Gemini");

        let request = GeminiRequest {
            contents: vec![GeminiContent {
                parts: vec![GeminiPart {
                    text: full_prompt(system_prompt, user_message),
                }],
            }],
            generation_config: GenerationConfig {
                temperature: DEFAULT_TEMPERATURE,
            },
        };

        let response = self
            .http_client()
            .await?
            .post(self.api_url())
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                error!("Failed to send request to Gemini API: {}", e);
                let message = format!("Erro ao processar com Gemini: {e}");
                AppError::provider_with_source(message, e)
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            error!("Failed to read Gemini API response: {}", e);
            let message = format!("Erro ao processar com Gemini: {e}");
            AppError::provider_with_source(message, e)
        })?;

        if !status.is_success() {
            return Err(Self::parse_error_response(status, &body));
        }

        let gemini_response: GeminiResponse = serde_json::from_str(&body).map_err(|e| {
            error!("Failed to parse Gemini API response: {}", e);
            let message = format!("Erro ao processar com Gemini: {e}");
            AppError::provider_with_source(message, e)
        })?;

        let text = gemini_response
            .candidates
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content.parts.into_iter().next())
            .map(|part| part.text)
            .filter(|text| !text.is_empty())
            .ok_or_else(|| {
                AppError::provider("Erro ao processar com Gemini: resposta sem conteúdo")
            })?;

        debug!("Received response from Gemini: {} chars", text.len());

        Ok(text)
    }
}
