// ABOUTME: Crate root of the nutritional plan assistant server.
// ABOUTME: Wires the REST surface, the LLM provider gateway and the deterministic calculation engine.
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 NutriPlan Assistant

//! # NutriPlan Server
//!
//! A chat-based nutritional planning assistant. An LLM provider handles the
//! conversation; every number comes from the deterministic calculation
//! engine, invoked through prompt-mediated tool calls.
//!
//! ## Architecture
//!
//! - [`routes`]: the `/api/v1/plano` REST surface (chat, calcular, health)
//! - [`services`]: the conversation orchestrator and its tool-calling loop
//! - [`llm`]: provider gateway over Gemini, OpenAI, Anthropic and OpenRouter
//! - [`tools`]: tool catalog and dispatcher bridging the LLM to the engine
//! - [`intelligence`]: pure BMR/TEE/calorie/macro formulas and narratives
//! - [`config`] / [`errors`] / [`logging`] / [`models`]: ambient plumbing

#![deny(unsafe_code)]
#![warn(missing_docs)]

/// Environment-driven configuration
pub mod config;
/// Error types and the application result alias
pub mod errors;
/// Nutrition calculation engine and narrative tables
pub mod intelligence;
/// LLM provider gateway
pub mod llm;
/// Tracing subscriber setup
pub mod logging;
/// Request/response wire models
pub mod models;
/// HTTP routes and handlers
pub mod routes;
/// Application services
pub mod services;
/// Tool catalog and dispatcher
pub mod tools;

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
