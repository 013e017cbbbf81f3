// ABOUTME: Handlers for the /api/v1/plano endpoints: chat, calcular, health.
// ABOUTME: Validates requests, runs the orchestrator and wraps everything in the assistant envelope.
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 NutriPlan Assistant

//! # Plan Handlers
//!
//! Thin handlers over the `ConversationOrchestrator`. Every response body
//! on `/chat` and `/calcular` is an [`AssistantResponse`] envelope, success
//! or failure; the status code carries the HTTP meaning (400 for rejected
//! input, 502 when the provider fails, 500 otherwise). `/health` answers
//! with a plain-text body the existing frontends string-match on.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use tracing::{error, info};

use crate::errors::AppError;
use crate::models::{AssistantResponse, CreatePlanoRequest, NutritionalChatRequest};
use crate::routes::AppState;

/// Envelope label for a rejected or failed `/calcular` request
const CALCULAR_ERROR_LABEL: &str = "Calcular plano";
/// Envelope label for a successful `/calcular` request
const CALCULAR_SUCCESS_LABEL: &str = "Calcular plano nutricional";

/// POST /api/v1/plano/chat
///
/// Free-form conversation with the assistant. The envelope echoes the
/// user's message as the `question`.
pub async fn chat(
    State(state): State<AppState>,
    Json(request): Json<NutritionalChatRequest>,
) -> (StatusCode, Json<AssistantResponse>) {
    if !request.is_valid() {
        return (
            StatusCode::BAD_REQUEST,
            Json(AssistantResponse::error(
                request.message,
                "Mensagem não pode ser vazia",
            )),
        );
    }

    info!("Chat request received");
    let message = request.message;
    run_conversation(&state, message.clone(), message.clone(), message).await
}

/// POST /api/v1/plano/calcular
///
/// Direct plan calculation: the structured request is rendered into a fixed
/// prompt and sent through the same conversation loop as `/chat`. The
/// envelope carries fixed operation labels, not the rendered prompt.
pub async fn calcular(
    State(state): State<AppState>,
    Json(request): Json<CreatePlanoRequest>,
) -> (StatusCode, Json<AssistantResponse>) {
    if !request.is_valid() {
        return (
            StatusCode::BAD_REQUEST,
            Json(AssistantResponse::error(
                CALCULAR_ERROR_LABEL,
                "Dados inválidos. Verifique os campos obrigatórios.",
            )),
        );
    }

    info!("Plan calculation requested for {}", request.nome);
    run_conversation(
        &state,
        request.as_prompt(),
        CALCULAR_SUCCESS_LABEL.to_owned(),
        CALCULAR_ERROR_LABEL.to_owned(),
    )
    .await
}

/// GET /api/v1/plano/health
///
/// Plain-text liveness probe; the body is the exact string the frontends
/// check for.
pub async fn health() -> &'static str {
    "✅ Nutritional Plan Assistant Online"
}

async fn run_conversation(
    state: &AppState,
    prompt: String,
    success_question: String,
    error_question: String,
) -> (StatusCode, Json<AssistantResponse>) {
    match state.orchestrator.chat(&prompt).await {
        Ok(answer) => (
            StatusCode::OK,
            Json(AssistantResponse::success(success_question, answer)),
        ),
        Err(e) => {
            error!("Conversation failed: {}", e);
            (
                error_status(&e),
                Json(AssistantResponse::error(
                    error_question,
                    format!("Erro ao processar requisição: {}", e.message),
                )),
            )
        }
    }
}

fn error_status(error: &AppError) -> StatusCode {
    StatusCode::from_u16(error.http_status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
}
