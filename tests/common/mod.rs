// ABOUTME: Shared test fixtures: a scripted mock LLM provider.
// ABOUTME: Replays canned replies and records the conversations it received.
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 NutriPlan Assistant

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs, dead_code)]

use std::sync::Mutex;

use async_trait::async_trait;

use nutriplan_server::errors::{AppError, AppResult};
use nutriplan_server::llm::LlmProvider;

/// Provider double that replays a fixed script of replies.
///
/// Each `chat` call pops the next scripted reply and records the user
/// message it was given; when the script runs dry the call fails like a
/// real provider outage.
pub struct ScriptedProvider {
    replies: Mutex<Vec<String>>,
    pub received: Mutex<Vec<String>>,
}

impl ScriptedProvider {
    pub fn new(replies: &[&str]) -> Self {
        let mut script: Vec<String> = replies.iter().map(|&r| r.to_owned()).collect();
        script.reverse();
        Self {
            replies: Mutex::new(script),
            received: Mutex::new(Vec::new()),
        }
    }

    /// Provider whose every call fails with a transport-style error
    pub fn failing() -> Self {
        Self::new(&[])
    }

    pub fn received_messages(&self) -> Vec<String> {
        self.received.lock().unwrap().clone()
    }
}

#[async_trait]
impl LlmProvider for ScriptedProvider {
    fn name(&self) -> String {
        "Scripted (test)".to_owned()
    }

    fn is_available(&self) -> bool {
        true
    }

    async fn chat(&self, _system_prompt: &str, user_message: &str) -> AppResult<String> {
        self.received
            .lock()
            .unwrap()
            .push(user_message.to_owned());
        self.replies
            .lock()
            .unwrap()
            .pop()
            .ok_or_else(|| AppError::provider("Scripted provider exhausted"))
    }
}
