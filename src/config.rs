// ABOUTME: Environment-driven configuration for provider selection and backend credentials.
// ABOUTME: Loaded once at startup into an immutable LlmConfig consumed by the selector.
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 NutriPlan Assistant

//! # LLM Configuration
//!
//! Environment-only configuration, read once at process start:
//!
//! | Variable | Default |
//! |----------|---------|
//! | `LLM_PROVIDER` | `gemini` |
//! | `LLM_ENABLE_FALLBACK` | `false` (truthy: `true` / `1`) |
//! | `GEMINI_API_KEY` / `GEMINI_MODEL` | — / `gemini-1.5-flash` |
//! | `OPENAI_API_KEY` / `OPENAI_MODEL` | — / `gpt-4o-mini` |
//! | `ANTHROPIC_API_KEY` / `ANTHROPIC_MODEL` | — / `claude-3-5-sonnet-20241022` |
//! | `OPENROUTER_API_KEY` / `OPENROUTER_MODEL` | — / `anthropic/claude-3.5-sonnet` |
//! | `OPENROUTER_BASE_URL` | `https://openrouter.ai/api/v1` |
//!
//! A missing API key loads as the empty string; availability checks treat
//! empty keys as "not configured". Credentials are not re-read after startup.

use serde::{Deserialize, Serialize};
use std::env;
use std::fmt::{Display, Formatter, Result as FmtResult};

/// Default OpenRouter API base URL
pub const DEFAULT_OPENROUTER_BASE_URL: &str = "https://openrouter.ai/api/v1";

/// The four chat-completion backends, in fixed fallback priority order
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LlmProviderKind {
    /// Google Gemini (default backend)
    #[default]
    Gemini,
    /// OpenAI chat completions
    OpenAi,
    /// Anthropic messages API
    Anthropic,
    /// OpenRouter aggregation gateway
    OpenRouter,
}

impl LlmProviderKind {
    /// Fallback priority order: first available wins
    pub const FALLBACK_ORDER: [Self; 4] =
        [Self::Gemini, Self::OpenAi, Self::Anthropic, Self::OpenRouter];

    /// Parse a configured provider name; `None` for anything unrecognized
    #[must_use]
    pub fn from_name(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "gemini" => Some(Self::Gemini),
            "openai" => Some(Self::OpenAi),
            "anthropic" => Some(Self::Anthropic),
            "openrouter" => Some(Self::OpenRouter),
            _ => None,
        }
    }

    /// Parse from string with fallback to the default backend
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        Self::from_name(s).unwrap_or_default()
    }

    /// Environment variable holding this backend's API key
    #[must_use]
    pub const fn api_key_env(self) -> &'static str {
        match self {
            Self::Gemini => "GEMINI_API_KEY",
            Self::OpenAi => "OPENAI_API_KEY",
            Self::Anthropic => "ANTHROPIC_API_KEY",
            Self::OpenRouter => "OPENROUTER_API_KEY",
        }
    }

    /// Environment variable overriding this backend's model
    #[must_use]
    pub const fn model_env(self) -> &'static str {
        match self {
            Self::Gemini => "GEMINI_MODEL",
            Self::OpenAi => "OPENAI_MODEL",
            Self::Anthropic => "ANTHROPIC_MODEL",
            Self::OpenRouter => "OPENROUTER_MODEL",
        }
    }

    /// Model used when the override variable is unset
    #[must_use]
    pub const fn default_model(self) -> &'static str {
        match self {
            Self::Gemini => "gemini-1.5-flash",
            Self::OpenAi => "gpt-4o-mini",
            Self::Anthropic => "claude-3-5-sonnet-20241022",
            Self::OpenRouter => "anthropic/claude-3.5-sonnet",
        }
    }
}

impl Display for LlmProviderKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::Gemini => write!(f, "gemini"),
            Self::OpenAi => write!(f, "openai"),
            Self::Anthropic => write!(f, "anthropic"),
            Self::OpenRouter => write!(f, "openrouter"),
        }
    }
}

/// Static configuration for one backend
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// API key; empty when the backend is not configured
    pub api_key: String,
    /// Resolved model name
    pub model: String,
    /// API base URL override (only OpenRouter carries one)
    pub base_url: Option<String>,
}

/// Process-wide LLM configuration, loaded once and read-only thereafter
#[derive(Debug, Clone)]
pub struct LlmConfig {
    /// Configured provider name, kept raw for the unknown-name warning
    pub provider: String,
    /// Walk the fallback chain when the configured backend is unavailable
    pub enable_fallback: bool,
    /// Gemini backend settings
    pub gemini: ProviderConfig,
    /// OpenAI backend settings
    pub openai: ProviderConfig,
    /// Anthropic backend settings
    pub anthropic: ProviderConfig,
    /// OpenRouter backend settings
    pub openrouter: ProviderConfig,
}

impl LlmConfig {
    /// Environment variable for provider selection
    pub const PROVIDER_ENV_VAR: &'static str = "LLM_PROVIDER";

    /// Environment variable for enabling the fallback chain
    pub const FALLBACK_ENV_VAR: &'static str = "LLM_ENABLE_FALLBACK";

    /// Environment variable for the OpenRouter base URL
    pub const OPENROUTER_BASE_URL_ENV_VAR: &'static str = "OPENROUTER_BASE_URL";

    /// Load the full configuration from the environment
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            provider: env::var(Self::PROVIDER_ENV_VAR)
                .unwrap_or_else(|_| LlmProviderKind::default().to_string()),
            enable_fallback: Self::fallback_enabled_from_env(),
            gemini: Self::backend_from_env(LlmProviderKind::Gemini),
            openai: Self::backend_from_env(LlmProviderKind::OpenAi),
            anthropic: Self::backend_from_env(LlmProviderKind::Anthropic),
            openrouter: Self::backend_from_env(LlmProviderKind::OpenRouter),
        }
    }

    /// Settings for one backend
    #[must_use]
    pub const fn backend(&self, kind: LlmProviderKind) -> &ProviderConfig {
        match kind {
            LlmProviderKind::Gemini => &self.gemini,
            LlmProviderKind::OpenAi => &self.openai,
            LlmProviderKind::Anthropic => &self.anthropic,
            LlmProviderKind::OpenRouter => &self.openrouter,
        }
    }

    fn fallback_enabled_from_env() -> bool {
        env::var(Self::FALLBACK_ENV_VAR)
            .map(|value| matches!(value.to_lowercase().as_str(), "true" | "1"))
            .unwrap_or(false)
    }

    fn backend_from_env(kind: LlmProviderKind) -> ProviderConfig {
        let base_url = matches!(kind, LlmProviderKind::OpenRouter).then(|| {
            env::var(Self::OPENROUTER_BASE_URL_ENV_VAR)
                .unwrap_or_else(|_| DEFAULT_OPENROUTER_BASE_URL.to_owned())
        });

        ProviderConfig {
            api_key: env::var(kind.api_key_env()).unwrap_or_default(),
            model: env::var(kind.model_env()).unwrap_or_else(|_| kind.default_model().to_owned()),
            base_url,
        }
    }
}
