// ABOUTME: HTTP surface of the assistant: router assembly, shared state, CORS policy.
// ABOUTME: All endpoints live under /api/v1/plano; handlers are in plan.rs.
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 NutriPlan Assistant

//! # HTTP Routes
//!
//! Assembles the axum router for the `/api/v1/plano` surface and the CORS
//! policy the browser frontends depend on. Origins are restricted to
//! localhost on any port; credentials are allowed so the dev frontends can
//! send auth headers.

pub mod plan;

use std::sync::Arc;
use std::time::Duration;

use axum::http::{header, HeaderName, HeaderValue, Method};
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::services::ConversationOrchestrator;

/// Shared state handed to every handler
#[derive(Clone)]
pub struct AppState {
    /// The conversation orchestrator over the active provider
    pub orchestrator: Arc<ConversationOrchestrator>,
}

impl AppState {
    /// Wrap an orchestrator for sharing across handlers
    #[must_use]
    pub fn new(orchestrator: ConversationOrchestrator) -> Self {
        Self {
            orchestrator: Arc::new(orchestrator),
        }
    }
}

/// Build the application router with CORS and request tracing
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/v1/plano/chat", post(plan::chat))
        .route("/api/v1/plano/calcular", post(plan::calcular))
        .route("/api/v1/plano/health", get(plan::health))
        .layer(cors_layer())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// CORS policy: any localhost port, the headers the frontends send, one hour
/// of preflight caching
fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::predicate(|origin: &HeaderValue, _| {
            is_localhost_origin(origin)
        }))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            header::AUTHORIZATION,
            header::CONTENT_TYPE,
            header::ACCEPT,
            header::CACHE_CONTROL,
            HeaderName::from_static("x-requested-with"),
            HeaderName::from_static("x-api-key"),
        ])
        .expose_headers([
            header::AUTHORIZATION,
            HeaderName::from_static("x-plan-version"),
            HeaderName::from_static("x-calculation-time"),
            HeaderName::from_static("x-total-plans"),
        ])
        .allow_credentials(true)
        .max_age(Duration::from_secs(3600))
}

fn is_localhost_origin(origin: &HeaderValue) -> bool {
    let Ok(origin) = origin.to_str() else {
        return false;
    };
    let Some(rest) = origin
        .strip_prefix("http://")
        .or_else(|| origin.strip_prefix("https://"))
    else {
        return false;
    };
    let host = rest.split(':').next().unwrap_or(rest);
    host == "localhost" || host == "127.0.0.1"
}

#[cfg(test)]
mod tests {
    use super::*;

    fn origin(value: &str) -> HeaderValue {
        HeaderValue::from_str(value).unwrap()
    }

    #[test]
    fn test_localhost_origins_any_port_allowed() {
        assert!(is_localhost_origin(&origin("http://localhost")));
        assert!(is_localhost_origin(&origin("http://localhost:3000")));
        assert!(is_localhost_origin(&origin("https://localhost:8443")));
        assert!(is_localhost_origin(&origin("http://127.0.0.1:5173")));
    }

    #[test]
    fn test_external_origins_rejected() {
        assert!(!is_localhost_origin(&origin("https://example.com")));
        assert!(!is_localhost_origin(&origin("http://localhost.evil.com")));
        assert!(!is_localhost_origin(&origin("ftp://localhost")));
    }
}
