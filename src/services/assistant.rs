// ABOUTME: Conversation orchestrator running the prompt-mediated tool-calling loop.
// ABOUTME: Renders the tool catalog into the system prompt and folds tool results back in.
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 NutriPlan Assistant

//! # Conversation Orchestrator
//!
//! Drives one assistant conversation over a text-only provider. Tool calling
//! is prompt-mediated: the system prompt teaches the model to answer with a
//! bare JSON object `{"tool": "...", "args": {...}}` whenever it wants a
//! calculation, the orchestrator executes the call through the
//! [`ToolDispatcher`] and appends the result to the conversation as
//! `[Tool Result for <name>]: ...`, then asks the model again.
//!
//! The loop is bounded by [`MAX_TOOL_ITERATIONS`]; a well-behaved exchange
//! uses one or two rounds. The first non-tool-call reply is the final answer.

use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, info, instrument, warn};

use crate::errors::AppResult;
use crate::llm::{nutritional_system_prompt, FunctionCall, FunctionDeclaration, LlmProvider};
use crate::tools::ToolDispatcher;

/// Upper bound on tool-execution rounds within one conversation
pub const MAX_TOOL_ITERATIONS: usize = 10;

/// Orchestrates the tool-calling conversation over one provider
pub struct ConversationOrchestrator {
    provider: Arc<dyn LlmProvider>,
    dispatcher: ToolDispatcher,
    system_prompt: String,
}

impl ConversationOrchestrator {
    /// Build an orchestrator over the given provider.
    ///
    /// The system prompt is assembled once: base instructions, the rendered
    /// tool catalog, and the JSON invocation protocol.
    #[must_use]
    pub fn new(provider: Arc<dyn LlmProvider>) -> Self {
        let system_prompt = build_system_prompt(&ToolDispatcher::catalog());
        Self {
            provider,
            dispatcher: ToolDispatcher::new(),
            system_prompt,
        }
    }

    /// Run one conversation to completion.
    ///
    /// # Errors
    ///
    /// Returns `ProviderError` when the underlying provider fails; tool
    /// validation problems never surface here, they flow back to the model
    /// as `❌` result text.
    #[instrument(skip(self, user_message), fields(provider = %self.provider.name()))]
    pub async fn chat(&self, user_message: &str) -> AppResult<String> {
        let mut conversation = user_message.to_owned();
        let mut last_reply = String::new();

        for round in 0..MAX_TOOL_ITERATIONS {
            let reply = self.provider.chat(&self.system_prompt, &conversation).await?;

            let Some(call) = parse_tool_call(&reply) else {
                debug!("Final answer after {} tool round(s)", round);
                return Ok(reply);
            };

            info!("Round {}: model requested tool {}", round + 1, call.name);
            let result = self.dispatcher.dispatch(&call);
            conversation.push_str("\n\n[Tool Result for ");
            conversation.push_str(&call.name);
            conversation.push_str("]: ");
            conversation.push_str(&result);
            last_reply = reply;
        }

        warn!(
            "Tool iteration cap ({}) reached, returning last reply",
            MAX_TOOL_ITERATIONS
        );
        Ok(last_reply)
    }
}

/// Assemble the full system prompt: base instructions + tool protocol
fn build_system_prompt(catalog: &[FunctionDeclaration]) -> String {
    let mut prompt = nutritional_system_prompt().to_owned();

    prompt.push_str("\n========== FERRAMENTAS DISPONÍVEIS ==========\n\n");
    for declaration in catalog {
        prompt.push_str("• ");
        prompt.push_str(&declaration.name);
        prompt.push_str(": ");
        prompt.push_str(&declaration.description);
        prompt.push('\n');
        if let Some(parameters) = &declaration.parameters {
            prompt.push_str("  Parâmetros: ");
            prompt.push_str(&parameters.to_string());
            prompt.push('\n');
        }
    }

    prompt.push_str(
        "\n========== PROTOCOLO DE INVOCAÇÃO ==========\n\
         \n\
         Para executar uma ferramenta, responda APENAS com um objeto JSON:\n\
         {\"tool\": \"nome_da_ferramenta\", \"args\": {\"parametro\": valor}}\n\
         \n\
         Nenhum texto antes ou depois do JSON. O resultado chegará em uma\n\
         mensagem [Tool Result for nome]. Quando não precisar de ferramenta,\n\
         responda normalmente ao usuário.\n",
    );

    prompt
}

/// Recognize a tool invocation in an assistant reply.
///
/// Accepts the bare JSON object and the common fenced variants the models
/// produce despite the protocol asking for bare JSON. Anything that is not
/// a JSON object with a string `tool` field is treated as a final answer.
#[must_use]
pub fn parse_tool_call(reply: &str) -> Option<FunctionCall> {
    let text = strip_code_fence(reply.trim());
    if !text.starts_with('{') {
        return None;
    }

    let value: Value = serde_json::from_str(text).ok()?;
    let name = value.get("tool")?.as_str()?.to_owned();
    let args = value
        .get("args")
        .cloned()
        .unwrap_or_else(|| Value::Object(serde_json::Map::new()));

    Some(FunctionCall { name, args })
}

fn strip_code_fence(text: &str) -> &str {
    let Some(inner) = text.strip_prefix("```") else {
        return text;
    };
    let inner = inner.strip_prefix("json").unwrap_or(inner);
    inner
        .strip_suffix("```")
        .map_or(text, |body| body.trim())
}
