// ABOUTME: Service layer between HTTP handlers and the LLM/tool plumbing.
// ABOUTME: Currently hosts the conversation orchestrator.
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 NutriPlan Assistant

//! # Services
//!
//! Application services sitting between the REST handlers and the lower
//! layers. Handlers stay thin; the tool-calling conversation loop lives in
//! [`assistant`].

pub mod assistant;

pub use assistant::{ConversationOrchestrator, MAX_TOOL_ITERATIONS};
