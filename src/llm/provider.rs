// ABOUTME: Provider selection: resolves exactly one active backend at startup.
// ABOUTME: Wraps the four clients in one enum and walks the fixed fallback chain.
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 NutriPlan Assistant

//! # LLM Provider Selector
//!
//! Resolves which backend serves the process, exactly once during startup.
//!
//! ## Selection rules
//!
//! 1. `LLM_PROVIDER` names the backend; unknown names fall back to Gemini
//!    with a warning.
//! 2. The named backend is used when its API key is configured.
//! 3. Otherwise, with `LLM_ENABLE_FALLBACK` on, the chain
//!    Gemini → OpenAI → Anthropic → OpenRouter is walked and the first
//!    configured backend wins.
//! 4. No configured backend anywhere is a configuration error: the server
//!    refuses to start rather than serve requests that can only fail.
//!
//! Credentials are not re-read after startup; the resolved provider is
//! shared for the process lifetime.
//!
//! ## Example
//!
//! ```rust,no_run
//! use nutriplan_server::config::LlmConfig;
//! use nutriplan_server::llm::{select_provider, LlmProvider};
//!
//! # fn main() -> nutriplan_server::errors::AppResult<()> {
//! let config = LlmConfig::from_env();
//! let provider = select_provider(&config)?;
//! println!("active: {}", provider.name());
//! # Ok(())
//! # }
//! ```

use std::fmt;

use tracing::{info, warn};

use super::{
    AnthropicProvider, GeminiProvider, LlmProvider, OpenAiProvider, OpenRouterProvider,
};
use crate::config::{LlmConfig, LlmProviderKind};
use crate::errors::{AppError, AppResult};

/// The one backend selected for this process
///
/// The enum gives a concrete type to hold in shared state while the
/// [`LlmProvider`] impl keeps it interchangeable with test doubles.
pub enum ActiveProvider {
    /// Google Gemini backend
    Gemini(GeminiProvider),
    /// OpenAI backend
    OpenAi(OpenAiProvider),
    /// Anthropic backend
    Anthropic(AnthropicProvider),
    /// OpenRouter backend
    OpenRouter(OpenRouterProvider),
}

impl ActiveProvider {
    /// Build the client for one backend from its configured settings
    #[must_use]
    pub fn build(kind: LlmProviderKind, config: &LlmConfig) -> Self {
        let backend = config.backend(kind).clone();
        match kind {
            LlmProviderKind::Gemini => Self::Gemini(GeminiProvider::new(backend)),
            LlmProviderKind::OpenAi => Self::OpenAi(OpenAiProvider::new(backend)),
            LlmProviderKind::Anthropic => Self::Anthropic(AnthropicProvider::new(backend)),
            LlmProviderKind::OpenRouter => Self::OpenRouter(OpenRouterProvider::new(backend)),
        }
    }

    /// Which backend this provider wraps
    #[must_use]
    pub const fn kind(&self) -> LlmProviderKind {
        match self {
            Self::Gemini(_) => LlmProviderKind::Gemini,
            Self::OpenAi(_) => LlmProviderKind::OpenAi,
            Self::Anthropic(_) => LlmProviderKind::Anthropic,
            Self::OpenRouter(_) => LlmProviderKind::OpenRouter,
        }
    }
}

// Delegate the provider contract to the wrapped client
#[async_trait::async_trait]
impl LlmProvider for ActiveProvider {
    fn name(&self) -> String {
        match self {
            Self::Gemini(p) => p.name(),
            Self::OpenAi(p) => p.name(),
            Self::Anthropic(p) => p.name(),
            Self::OpenRouter(p) => p.name(),
        }
    }

    fn is_available(&self) -> bool {
        match self {
            Self::Gemini(p) => p.is_available(),
            Self::OpenAi(p) => p.is_available(),
            Self::Anthropic(p) => p.is_available(),
            Self::OpenRouter(p) => p.is_available(),
        }
    }

    async fn chat(&self, system_prompt: &str, user_message: &str) -> AppResult<String> {
        match self {
            Self::Gemini(p) => p.chat(system_prompt, user_message).await,
            Self::OpenAi(p) => p.chat(system_prompt, user_message).await,
            Self::Anthropic(p) => p.chat(system_prompt, user_message).await,
            Self::OpenRouter(p) => p.chat(system_prompt, user_message).await,
        }
    }
}

impl fmt::Debug for ActiveProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Gemini(_) => f.debug_tuple("ActiveProvider::Gemini").finish(),
            Self::OpenAi(_) => f.debug_tuple("ActiveProvider::OpenAi").finish(),
            Self::Anthropic(_) => f.debug_tuple("ActiveProvider::Anthropic").finish(),
            Self::OpenRouter(_) => f.debug_tuple("ActiveProvider::OpenRouter").finish(),
        }
    }
}

/// Resolve the active provider for this process.
///
/// Runs once at startup; the result is shared across all requests.
///
/// # Errors
///
/// Returns `ConfigError` when the configured backend is unavailable and
/// fallback is off, or when fallback is on but no backend has a key.
pub fn select_provider(config: &LlmConfig) -> AppResult<ActiveProvider> {
    let configured = config.provider.to_lowercase();
    let kind = LlmProviderKind::from_name(&configured).unwrap_or_else(|| {
        warn!(
            "Unknown LLM provider '{}', using {}",
            configured,
            LlmProviderKind::default()
        );
        LlmProviderKind::default()
    });

    info!("Configuring LLM provider: {}", kind);

    let selected = ActiveProvider::build(kind, config);
    if selected.is_available() {
        info!("Active provider: {}", selected.name());
        return Ok(selected);
    }

    if !config.enable_fallback {
        return Err(AppError::config(format!(
            "Provider {configured} não está configurado corretamente"
        )));
    }

    warn!("Provider {} unavailable, trying fallback chain", kind);
    fallback_provider(config)
}

/// Walk the fixed priority order and take the first configured backend
fn fallback_provider(config: &LlmConfig) -> AppResult<ActiveProvider> {
    for kind in LlmProviderKind::FALLBACK_ORDER {
        let candidate = ActiveProvider::build(kind, config);
        if candidate.is_available() {
            info!("Fallback: {}", candidate.name());
            return Ok(candidate);
        }
    }

    Err(AppError::config("Nenhum provider LLM disponível!"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ProviderConfig;
    use crate::errors::ErrorCode;

    fn backend(api_key: &str, model: &str) -> ProviderConfig {
        ProviderConfig {
            api_key: api_key.to_owned(),
            model: model.to_owned(),
            base_url: None,
        }
    }

    fn config_with_keys(
        provider: &str,
        enable_fallback: bool,
        keys: [&str; 4],
    ) -> LlmConfig {
        LlmConfig {
            provider: provider.to_owned(),
            enable_fallback,
            gemini: backend(keys[0], "gemini-1.5-flash"),
            openai: backend(keys[1], "gpt-4o-mini"),
            anthropic: backend(keys[2], "claude-3-5-sonnet-20241022"),
            openrouter: backend(keys[3], "anthropic/claude-3.5-sonnet"),
        }
    }

    #[test]
    fn test_configured_available_provider_wins() {
        let config = config_with_keys("anthropic", false, ["", "", "a-key", ""]);
        let provider = select_provider(&config).unwrap();
        assert_eq!(provider.kind(), LlmProviderKind::Anthropic);
        assert_eq!(provider.name(), "Anthropic (claude-3-5-sonnet-20241022)");
    }

    #[test]
    fn test_unavailable_without_fallback_is_config_error() {
        let config = config_with_keys("openai", false, ["g-key", "", "", ""]);
        let error = select_provider(&config).unwrap_err();
        assert_eq!(error.code, ErrorCode::ConfigError);
        assert!(error.message.contains("openai"));
    }

    #[test]
    fn test_fallback_takes_first_available_in_priority_order() {
        // configured=openai unavailable; chain must pick OpenRouter, the
        // only backend with a key, even though it is last in priority
        let config = config_with_keys("openai", true, ["", "", "", "or-key"]);
        let provider = select_provider(&config).unwrap();
        assert_eq!(provider.kind(), LlmProviderKind::OpenRouter);
    }

    #[test]
    fn test_fallback_priority_prefers_gemini() {
        let config = config_with_keys("anthropic", true, ["g-key", "o-key", "", "or-key"]);
        let provider = select_provider(&config).unwrap();
        assert_eq!(provider.kind(), LlmProviderKind::Gemini);
    }

    #[test]
    fn test_no_backend_available_fails_regardless_of_flag() {
        for enable_fallback in [false, true] {
            let config = config_with_keys("gemini", enable_fallback, ["", "", "", ""]);
            let error = select_provider(&config).unwrap_err();
            assert_eq!(error.code, ErrorCode::ConfigError);
        }
    }

    #[test]
    fn test_unknown_provider_name_folds_to_gemini() {
        let config = config_with_keys("mistral", false, ["g-key", "", "", ""]);
        let provider = select_provider(&config).unwrap();
        assert_eq!(provider.kind(), LlmProviderKind::Gemini);
    }

    #[test]
    fn test_provider_name_is_case_insensitive() {
        let config = config_with_keys("OpenAI", false, ["", "o-key", "", ""]);
        let provider = select_provider(&config).unwrap();
        assert_eq!(provider.kind(), LlmProviderKind::OpenAi);
    }
}
