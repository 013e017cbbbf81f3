// ABOUTME: System prompts for LLM interactions loaded at compile time
// ABOUTME: Provides the nutritional assistant system prompt in Portuguese
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 NutriPlan Assistant

//! # System Prompts
//!
//! This module provides system prompts for LLM interactions.
//! Prompts are loaded at compile time from markdown files for easy maintenance.

/// Nutritional Plan Assistant system prompt
///
/// Contains instructions for the AI assistant including:
/// - Identity and capabilities
/// - Rules for when to use the calculation tools
/// - Response format and interaction examples
/// - Required data collection and safety notices
pub const NUTRITIONAL_SYSTEM_PROMPT: &str = include_str!("nutritional_system.md");

/// Get the system prompt for the nutritional assistant
///
/// This is the base instruction; the orchestrator extends it with the
/// rendered tool catalog before every conversation.
#[must_use]
pub const fn nutritional_system_prompt() -> &'static str {
    NUTRITIONAL_SYSTEM_PROMPT
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_is_loaded_and_portuguese() {
        assert!(NUTRITIONAL_SYSTEM_PROMPT.contains("Nutritional Plan Assistant"));
        assert!(NUTRITIONAL_SYSTEM_PROMPT.contains("========== IDENTIDADE =========="));
        assert!(NUTRITIONAL_SYSTEM_PROMPT.contains("emagrecimento/ganho_massa/manutencao"));
        assert!(NUTRITIONAL_SYSTEM_PROMPT.contains("⚠️ Importante"));
    }
}
