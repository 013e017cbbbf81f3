// ABOUTME: LLM provider abstraction for pluggable chat-completion backends.
// ABOUTME: Defines the text-only chat contract shared by Gemini, OpenAI, Anthropic, OpenRouter.
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 NutriPlan Assistant

//! # LLM Provider Service Provider Interface
//!
//! This module defines the contract that chat backends implement to plug
//! into the nutrition assistant. The contract is deliberately narrow:
//! single-turn text in, text out.
//!
//! ## Key Concepts
//!
//! - **[`LlmProvider`]**: async trait with `chat` / `is_available` / `name`
//! - **[`FunctionDeclaration`]**: one tool catalog entry (name, description,
//!   JSON-schema parameters)
//! - **[`FunctionCall`]**: a tool invocation parsed from an assistant reply
//!
//! Tool calling is prompt-mediated here: providers only move text, and the
//! orchestrator in `services::assistant` recognizes tool-call JSON in the
//! replies. None of the backends' native function-calling wire formats are
//! used.
//!
//! ## Example: Using a Provider
//!
//! ```rust,no_run
//! use nutriplan_server::llm::LlmProvider;
//!
//! async fn example(provider: &dyn LlmProvider) {
//!     if provider.is_available() {
//!         let reply = provider
//!             .chat("Você é um assistente de nutrição.", "Qual é minha TMB?")
//!             .await;
//!     }
//! }
//! ```

mod anthropic;
mod gemini;
mod openai;
mod openrouter;
pub mod prompts;
mod provider;

pub use anthropic::AnthropicProvider;
pub use gemini::GeminiProvider;
pub use openai::OpenAiProvider;
pub use openrouter::OpenRouterProvider;
pub use prompts::nutritional_system_prompt;
pub use provider::{select_provider, ActiveProvider};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::errors::AppResult;

/// Sampling temperature sent by the Gemini, OpenAI and Anthropic backends
pub const DEFAULT_TEMPERATURE: f32 = 0.7;

/// Merge the system instruction and user message into one user-role prompt.
///
/// Gemini, OpenAI and Anthropic all receive a single user message in this
/// shape; only OpenRouter gets a distinct system message.
#[must_use]
pub fn full_prompt(system_prompt: &str, user_message: &str) -> String {
    format!("{system_prompt}\n\nUsuário: {user_message}")
}

// ============================================================================
// Tool Catalog Types
// ============================================================================

/// A tool invocation parsed from an assistant reply
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionCall {
    /// Name of the tool to call
    pub name: String,
    /// Arguments for the tool as a JSON object
    pub args: serde_json::Value,
}

/// Declaration of one callable tool
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FunctionDeclaration {
    /// Name of the tool
    pub name: String,
    /// Description of what the tool does
    pub description: String,
    /// Parameters schema (JSON Schema format)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameters: Option<serde_json::Value>,
}

// ============================================================================
// Provider Trait
// ============================================================================

/// Chat-completion backend contract.
///
/// Implementations wrap one external service. `chat` performs exactly one
/// completion round trip; there is no retry, timeout or streaming here.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Display name including the resolved model, e.g. `"Gemini (gemini-1.5-flash)"`
    fn name(&self) -> String;

    /// Whether the backend has a non-empty API key configured. Never touches
    /// the network.
    fn is_available(&self) -> bool;

    /// Perform a single-turn completion.
    ///
    /// # Errors
    ///
    /// Returns `ProviderError` on transport failure, non-success status,
    /// malformed body, or an empty completion.
    async fn chat(&self, system_prompt: &str, user_message: &str) -> AppResult<String>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_prompt_concatenation() {
        let prompt = full_prompt("Você é um assistente.", "Olá!");
        assert_eq!(prompt, "Você é um assistente.\n\nUsuário: Olá!");
    }

    #[test]
    fn test_function_declaration_omits_missing_parameters() {
        let declaration = FunctionDeclaration {
            name: "calcular_tmb".to_owned(),
            description: "Calcula a TMB".to_owned(),
            parameters: None,
        };

        let json = serde_json::to_value(&declaration).unwrap();
        assert!(json.get("parameters").is_none());
    }

    #[test]
    fn test_function_call_round_trip() {
        let call: FunctionCall =
            serde_json::from_str(r#"{"name":"calcular_tmb","args":{"idade":30,"peso":80.0}}"#)
                .unwrap();

        assert_eq!(call.name, "calcular_tmb");
        assert_eq!(call.args["idade"], 30);
    }
}
