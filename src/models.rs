// ABOUTME: Request DTOs and the assistant response envelope for the REST surface.
// ABOUTME: Boundary validation lives here; the core only ever sees validated data.
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 NutriPlan Assistant

//! # Request and Response Models
//!
//! The wire types of the `/api/v1/plano` surface. Field names stay in
//! Portuguese (`nome`, `idade`, `peso_atual`, ...) because they are the
//! contract the existing frontends speak.
//!
//! Validation is boundary-only: a [`CreatePlanoRequest`] that passes
//! `is_valid()` can always be turned into a `PatientProfile`; handlers
//! reject everything else with a 400 envelope before the core runs.

use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Name the envelope reports for every response
pub const ASSISTANT_NAME: &str = "NutritionalPlanAssistant";

/// Free-form chat request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NutritionalChatRequest {
    /// Natural-language message for the assistant
    pub message: String,
}

impl NutritionalChatRequest {
    /// Whether the message is non-empty after trimming
    #[must_use]
    pub fn is_valid(&self) -> bool {
        !self.message.trim().is_empty()
    }
}

/// Direct plan calculation request (no free-form chat)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePlanoRequest {
    /// Patient name
    pub nome: String,
    /// Age in years
    pub idade: u32,
    /// Current body weight in kilograms
    #[serde(rename = "peso_atual")]
    pub peso_atual: f64,
    /// Objective string (`emagrecimento`, `ganho_massa`, `manutencao`)
    pub objetivo: String,
    /// Exercise intensity string (`sedentario` ... `muito_intenso`)
    #[serde(rename = "intensidade_exercicio")]
    pub intensidade_exercicio: String,
}

impl CreatePlanoRequest {
    /// Validate all required fields and numeric ranges
    #[must_use]
    pub fn is_valid(&self) -> bool {
        !self.nome.trim().is_empty()
            && self.idade > 0
            && self.idade < 150
            && self.peso_atual > 0.0
            && self.peso_atual < 500.0
            && !self.objetivo.trim().is_empty()
            && !self.intensidade_exercicio.trim().is_empty()
    }

    /// Render the fixed prompt the orchestrator receives for this request
    #[must_use]
    pub fn as_prompt(&self) -> String {
        format!(
            "Calcule um plano nutricional completo para {}, {} anos, {:.1}kg, \
             objetivo {}, exercícios {}",
            self.nome, self.idade, self.peso_atual, self.objetivo, self.intensidade_exercicio
        )
    }
}

/// Generic response envelope of the assistant API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssistantResponse {
    /// Whether the operation succeeded
    pub success: bool,
    /// Assistant identity, always [`ASSISTANT_NAME`]
    pub assistant: String,
    /// Response type: `"chat"` on success, `"error"` on failure
    #[serde(rename = "type")]
    pub response_type: String,
    /// The original question or operation label
    pub question: String,
    /// Assistant text on success, null on failure
    pub data: Option<String>,
    /// Error message on failure, null on success
    pub error: Option<String>,
    /// RFC 3339 timestamp of when the envelope was built
    pub timestamp: String,
}

impl AssistantResponse {
    /// Build a success envelope around the assistant's answer
    #[must_use]
    pub fn success(question: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            success: true,
            assistant: ASSISTANT_NAME.to_owned(),
            response_type: "chat".to_owned(),
            question: question.into(),
            data: Some(data.into()),
            error: None,
            timestamp: Utc::now().to_rfc3339(),
        }
    }

    /// Build an error envelope with a descriptive message
    #[must_use]
    pub fn error(question: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            success: false,
            assistant: ASSISTANT_NAME.to_owned(),
            response_type: "error".to_owned(),
            question: question.into(),
            data: None,
            error: Some(error.into()),
            timestamp: Utc::now().to_rfc3339(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_request_validation() {
        let valid = NutritionalChatRequest {
            message: "Qual é minha TMB?".to_owned(),
        };
        assert!(valid.is_valid());

        let blank = NutritionalChatRequest {
            message: "   ".to_owned(),
        };
        assert!(!blank.is_valid());
    }

    fn plano_request() -> CreatePlanoRequest {
        CreatePlanoRequest {
            nome: "João Silva".to_owned(),
            idade: 30,
            peso_atual: 80.5,
            objetivo: "emagrecimento".to_owned(),
            intensidade_exercicio: "moderado".to_owned(),
        }
    }

    #[test]
    fn test_plano_request_validation() {
        assert!(plano_request().is_valid());

        let mut request = plano_request();
        request.nome = " ".to_owned();
        assert!(!request.is_valid());

        let mut request = plano_request();
        request.idade = 150;
        assert!(!request.is_valid());

        let mut request = plano_request();
        request.peso_atual = 500.0;
        assert!(!request.is_valid());

        let mut request = plano_request();
        request.objetivo = String::new();
        assert!(!request.is_valid());

        let mut request = plano_request();
        request.intensidade_exercicio = String::new();
        assert!(!request.is_valid());
    }

    #[test]
    fn test_plano_request_prompt_format() {
        assert_eq!(
            plano_request().as_prompt(),
            "Calcule um plano nutricional completo para João Silva, 30 anos, 80.5kg, \
             objetivo emagrecimento, exercícios moderado"
        );
    }

    #[test]
    fn test_plano_request_field_names() {
        let json = serde_json::to_value(plano_request()).unwrap();
        assert!(json.get("peso_atual").is_some());
        assert!(json.get("intensidade_exercicio").is_some());
    }

    #[test]
    fn test_success_envelope_shape() {
        let envelope = AssistantResponse::success("pergunta", "resposta");
        let json = serde_json::to_value(&envelope).unwrap();

        assert_eq!(json["success"], true);
        assert_eq!(json["assistant"], ASSISTANT_NAME);
        assert_eq!(json["type"], "chat");
        assert_eq!(json["question"], "pergunta");
        assert_eq!(json["data"], "resposta");
        assert!(json["error"].is_null());
        assert!(json["timestamp"].is_string());
    }

    #[test]
    fn test_error_envelope_shape() {
        let envelope = AssistantResponse::error("pergunta", "Mensagem não pode ser vazia");
        let json = serde_json::to_value(&envelope).unwrap();

        assert_eq!(json["success"], false);
        assert_eq!(json["type"], "error");
        assert!(json["data"].is_null());
        assert_eq!(json["error"], "Mensagem não pode ser vazia");
    }
}
