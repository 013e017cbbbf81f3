// ABOUTME: Tool dispatcher bridging the LLM layer to the calculation engine.
// ABOUTME: Declares the six-tool catalog and turns parsed tool calls into formatted text.
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 NutriPlan Assistant

//! # Tool Dispatcher
//!
//! The bridge between the conversation loop and the deterministic engine.
//! [`ToolDispatcher::catalog`] declares the six operations the model may
//! invoke; [`ToolDispatcher::dispatch`] parses the arguments of one call,
//! runs the engine and renders the fixed Portuguese template for the result.
//!
//! Dispatch never fails at the transport level: validation problems come
//! back as `❌ ...` message strings the model can read and relay, exactly
//! like a successful calculation comes back as a `✅ ...` block. The tool
//! names and parameter schemas are a stable contract; renaming a tool or a
//! parameter breaks every prompt that teaches the model to call it.

pub mod responses;

use serde_json::{json, Value};
use tracing::{info, warn};

use crate::intelligence::{
    activity_factor, basal_metabolic_rate, calorie_target, full_plan, intensity_description,
    macro_split, macro_tips, objective_description, objective_factor, objective_tip,
    protein_per_kg, recommendations,
    types::{Intensity, Objective, PatientProfile},
    total_energy_expenditure,
};
use crate::llm::{FunctionCall, FunctionDeclaration};

/// Dispatcher over the fixed tool catalog
///
/// Stateless; one instance serves the whole process.
#[derive(Debug, Clone, Copy, Default)]
pub struct ToolDispatcher;

impl ToolDispatcher {
    /// Create a dispatcher
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// The six tool declarations exposed to the model
    #[must_use]
    pub fn catalog() -> Vec<FunctionDeclaration> {
        vec![
            FunctionDeclaration {
                name: "calcular_tmb".to_owned(),
                description: "Calcula a Taxa Metabólica Basal (TMB) de uma pessoa. A TMB é a \
                              quantidade mínima de energia que o corpo precisa em repouso."
                    .to_owned(),
                parameters: Some(json!({
                    "type": "object",
                    "properties": {
                        "idade": {"type": "integer", "description": "Idade em anos"},
                        "peso": {"type": "number", "description": "Peso atual em kg"}
                    },
                    "required": ["idade", "peso"]
                })),
            },
            FunctionDeclaration {
                name: "calcular_get".to_owned(),
                description: "Calcula o Gasto Energético Total (GET) baseado na TMB e \
                              intensidade de exercício. O GET é o total de calorias gastas por dia."
                    .to_owned(),
                parameters: Some(json!({
                    "type": "object",
                    "properties": {
                        "tmb": {"type": "number", "description": "Taxa Metabólica Basal em kcal/dia"},
                        "intensidade_exercicio": {
                            "type": "string",
                            "description": "sedentario, leve, moderado, intenso ou muito_intenso"
                        }
                    },
                    "required": ["tmb", "intensidade_exercicio"]
                })),
            },
            FunctionDeclaration {
                name: "calcular_calorias_objetivo".to_owned(),
                description: "Calcula as calorias diárias recomendadas baseadas no GET e \
                              objetivo (emagrecimento, ganho de massa ou manutenção)."
                    .to_owned(),
                parameters: Some(json!({
                    "type": "object",
                    "properties": {
                        "get": {"type": "number", "description": "Gasto Energético Total em kcal/dia"},
                        "objetivo": {
                            "type": "string",
                            "description": "emagrecimento, ganho_massa ou manutencao"
                        }
                    },
                    "required": ["get", "objetivo"]
                })),
            },
            FunctionDeclaration {
                name: "calcular_macronutrientes".to_owned(),
                description: "Calcula a distribuição de macronutrientes (proteínas, \
                              carboidratos e gorduras) em gramas baseada nas calorias e objetivo."
                    .to_owned(),
                parameters: Some(json!({
                    "type": "object",
                    "properties": {
                        "calorias": {"type": "integer", "description": "Calorias diárias em kcal"},
                        "peso": {"type": "number", "description": "Peso atual em kg"},
                        "objetivo": {
                            "type": "string",
                            "description": "emagrecimento, ganho_massa ou manutencao"
                        }
                    },
                    "required": ["calorias", "peso", "objetivo"]
                })),
            },
            FunctionDeclaration {
                name: "gerar_recomendacoes".to_owned(),
                description: "Gera recomendações personalizadas de nutrição e treino baseadas \
                              no objetivo do usuário."
                    .to_owned(),
                parameters: Some(json!({
                    "type": "object",
                    "properties": {
                        "objetivo": {
                            "type": "string",
                            "description": "emagrecimento, ganho_massa ou manutencao"
                        },
                        "intensidade_exercicio": {
                            "type": "string",
                            "description": "sedentario, leve, moderado, intenso ou muito_intenso"
                        }
                    },
                    "required": ["objetivo", "intensidade_exercicio"]
                })),
            },
            FunctionDeclaration {
                name: "calcular_plano_completo".to_owned(),
                description: "Calcula um plano nutricional completo incluindo TMB, GET, \
                              calorias, macros e recomendações."
                    .to_owned(),
                parameters: Some(json!({
                    "type": "object",
                    "properties": {
                        "nome": {"type": "string", "description": "Nome da pessoa"},
                        "idade": {"type": "integer", "description": "Idade em anos"},
                        "peso": {"type": "number", "description": "Peso atual em kg"},
                        "objetivo": {
                            "type": "string",
                            "description": "emagrecimento, ganho_massa ou manutencao"
                        },
                        "intensidade_exercicio": {
                            "type": "string",
                            "description": "sedentario, leve, moderado, intenso ou muito_intenso"
                        }
                    },
                    "required": ["nome", "idade", "peso", "objetivo", "intensidade_exercicio"]
                })),
            },
        ]
    }

    /// Execute one parsed tool call and render its template.
    ///
    /// Argument or range problems come back as `❌` message strings, never
    /// as transport errors; the model relays them to the user.
    #[must_use]
    pub fn dispatch(&self, call: &FunctionCall) -> String {
        info!("Executing tool: {}", call.name);

        match call.name.as_str() {
            "calcular_tmb" => Self::run_tmb(&call.args),
            "calcular_get" => Self::run_get(&call.args),
            "calcular_calorias_objetivo" => Self::run_calories(&call.args),
            "calcular_macronutrientes" => Self::run_macros(&call.args),
            "gerar_recomendacoes" => Self::run_recommendations(&call.args),
            "calcular_plano_completo" => Self::run_full_plan(&call.args),
            unknown => {
                warn!("Unknown tool requested: {}", unknown);
                format!("❌ Ferramenta desconhecida: {unknown}")
            }
        }
    }

    fn run_tmb(args: &Value) -> String {
        let Some(age) = arg_u32(args, "idade") else {
            return "❌ Idade inválida. Deve estar entre 1 e 150 anos.".to_owned();
        };
        let Some(weight) = arg_f64(args, "peso") else {
            return "❌ Peso inválido. Deve estar entre 1 e 500 kg.".to_owned();
        };

        match basal_metabolic_rate(age, weight) {
            Ok(tmb) => responses::tmb_response(tmb),
            Err(e) => format!("❌ {}", e.message),
        }
    }

    fn run_get(args: &Value) -> String {
        let Some(tmb) = arg_f64(args, "tmb") else {
            return "❌ TMB inválida. Calcule a TMB primeiro.".to_owned();
        };
        let Some(intensity_input) = arg_str(args, "intensidade_exercicio") else {
            return "❌ Intensidade de exercício não informada.".to_owned();
        };
        if intensity_input.trim().is_empty() {
            return "❌ Intensidade de exercício não informada.".to_owned();
        }

        let intensity = Intensity::from_input(intensity_input);
        match total_energy_expenditure(tmb, intensity) {
            Ok(get) => responses::get_response(
                get,
                tmb,
                activity_factor(intensity),
                intensity_input,
                intensity_description(intensity),
            ),
            Err(e) => format!("❌ {}", e.message),
        }
    }

    fn run_calories(args: &Value) -> String {
        let Some(get) = arg_f64(args, "get") else {
            return "❌ GET inválido. Calcule o GET primeiro.".to_owned();
        };
        let Some(objective_input) = arg_str(args, "objetivo") else {
            return "❌ Objetivo não informado.".to_owned();
        };
        if objective_input.trim().is_empty() {
            return "❌ Objetivo não informado.".to_owned();
        }

        let objective = Objective::from_input(objective_input);
        match calorie_target(get, objective) {
            Ok(calories) => responses::calories_response(
                calories,
                get,
                objective_input,
                objective_factor(objective),
                objective_description(objective),
                objective_tip(objective),
            ),
            Err(e) => format!("❌ {}", e.message),
        }
    }

    fn run_macros(args: &Value) -> String {
        let Some(calories) = arg_i64(args, "calorias") else {
            return "❌ Calorias inválidas.".to_owned();
        };
        let Some(weight) = arg_f64(args, "peso") else {
            return "❌ Peso inválido.".to_owned();
        };
        let Some(objective_input) = arg_str(args, "objetivo") else {
            return "❌ Objetivo não informado.".to_owned();
        };
        if objective_input.trim().is_empty() {
            return "❌ Objetivo não informado.".to_owned();
        }

        let objective = Objective::from_input(objective_input);
        match macro_split(calories, weight, objective) {
            Ok(split) => responses::macros_response(
                &split,
                calories,
                protein_per_kg(objective),
                macro_tips(objective),
            ),
            Err(e) => format!("❌ {}", e.message),
        }
    }

    fn run_recommendations(args: &Value) -> String {
        let Some(objective_input) = arg_str(args, "objetivo") else {
            return "❌ Objetivo não informado.".to_owned();
        };
        if objective_input.trim().is_empty() {
            return "❌ Objetivo não informado.".to_owned();
        }
        let intensity_input = arg_str(args, "intensidade_exercicio").unwrap_or_default();

        recommendations(
            Objective::from_input(objective_input),
            Intensity::from_input(intensity_input),
        )
    }

    fn run_full_plan(args: &Value) -> String {
        let Some(name) = arg_str(args, "nome") else {
            return "❌ Nome não informado.".to_owned();
        };
        let Some(age) = arg_u32(args, "idade") else {
            return "❌ Idade inválida. Deve estar entre 1 e 150 anos.".to_owned();
        };
        let Some(weight) = arg_f64(args, "peso") else {
            return "❌ Peso inválido. Deve estar entre 1 e 500 kg.".to_owned();
        };
        let objective_input = arg_str(args, "objetivo").unwrap_or_default();
        let intensity_input = arg_str(args, "intensidade_exercicio").unwrap_or_default();

        let profile =
            match PatientProfile::new(name, age, weight, objective_input, intensity_input) {
                Ok(profile) => profile,
                Err(e) => return format!("❌ {}", e.message),
            };

        match full_plan(&profile) {
            Ok(plan) => responses::full_plan_response(
                &profile.name,
                profile.age,
                profile.weight_kg,
                objective_input,
                intensity_input,
                &plan,
            ),
            Err(e) => format!("❌ {}", e.message),
        }
    }
}

fn arg_str<'a>(args: &'a Value, key: &str) -> Option<&'a str> {
    args.get(key).and_then(Value::as_str)
}

fn arg_f64(args: &Value, key: &str) -> Option<f64> {
    args.get(key).and_then(Value::as_f64)
}

fn arg_u32(args: &Value, key: &str) -> Option<u32> {
    args.get(key)
        .and_then(Value::as_u64)
        .and_then(|v| u32::try_from(v).ok())
}

fn arg_i64(args: &Value, key: &str) -> Option<i64> {
    args.get(key).and_then(Value::as_i64)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn call(name: &str, args: Value) -> FunctionCall {
        FunctionCall {
            name: name.to_owned(),
            args,
        }
    }

    #[test]
    fn test_catalog_is_the_stable_six_tool_contract() {
        let catalog = ToolDispatcher::catalog();
        let names: Vec<&str> = catalog.iter().map(|d| d.name.as_str()).collect();

        assert_eq!(
            names,
            [
                "calcular_tmb",
                "calcular_get",
                "calcular_calorias_objetivo",
                "calcular_macronutrientes",
                "gerar_recomendacoes",
                "calcular_plano_completo",
            ]
        );

        for declaration in &catalog {
            let parameters = declaration.parameters.as_ref().unwrap();
            assert_eq!(parameters["type"], "object");
            assert!(parameters["properties"].is_object());
            assert!(!declaration.description.is_empty());
        }
    }

    #[test]
    fn test_dispatch_tmb_success_and_validation() {
        let dispatcher = ToolDispatcher::new();

        let text = dispatcher.dispatch(&call("calcular_tmb", json!({"idade": 30, "peso": 80.0})));
        assert!(text.starts_with("✅ TMB Calculada com Sucesso!"));
        assert!(text.contains("1814.33 kcal/dia"));

        let invalid = dispatcher.dispatch(&call("calcular_tmb", json!({"idade": 200, "peso": 80.0})));
        assert_eq!(invalid, "❌ Idade inválida. Deve estar entre 1 e 150 anos.");

        let missing = dispatcher.dispatch(&call("calcular_tmb", json!({"peso": 80.0})));
        assert_eq!(missing, "❌ Idade inválida. Deve estar entre 1 e 150 anos.");
    }

    #[test]
    fn test_dispatch_get_folds_unknown_intensity() {
        let dispatcher = ToolDispatcher::new();

        let text = dispatcher.dispatch(&call(
            "calcular_get",
            json!({"tmb": 1000.0, "intensidade_exercicio": "nadando"}),
        ));
        // unknown folds to moderate (1.55)
        assert!(text.contains("🔢 Valor: 1550.00 kcal/dia"));
        assert!(text.contains("• Fator de Atividade: 1.55 (nadando)"));

        let missing = dispatcher.dispatch(&call("calcular_get", json!({"tmb": 1000.0})));
        assert_eq!(missing, "❌ Intensidade de exercício não informada.");

        let bad_tmb = dispatcher.dispatch(&call(
            "calcular_get",
            json!({"tmb": -1.0, "intensidade_exercicio": "leve"}),
        ));
        assert_eq!(bad_tmb, "❌ TMB inválida. Calcule a TMB primeiro.");
    }

    #[test]
    fn test_dispatch_calories_objective() {
        let dispatcher = ToolDispatcher::new();

        let text = dispatcher.dispatch(&call(
            "calcular_calorias_objetivo",
            json!({"get": 2000.0, "objetivo": "emagrecimento"}),
        ));
        assert!(text.contains("🔢 Valor: 1700 kcal/dia"));
        assert!(text.contains("• Ajuste: -300 kcal/dia (-15%)"));

        let missing = dispatcher.dispatch(&call(
            "calcular_calorias_objetivo",
            json!({"get": 2000.0, "objetivo": "  "}),
        ));
        assert_eq!(missing, "❌ Objetivo não informado.");
    }

    #[test]
    fn test_dispatch_macros() {
        let dispatcher = ToolDispatcher::new();

        let text = dispatcher.dispatch(&call(
            "calcular_macronutrientes",
            json!({"calorias": 2364, "peso": 80.0, "objetivo": "emagrecimento"}),
        ));
        assert!(text.contains("🥩 PROTEÍNAS: 160 gramas/dia"));
        assert!(text.contains("📊 Total: 2364 kcal/dia"));

        let invalid = dispatcher.dispatch(&call(
            "calcular_macronutrientes",
            json!({"calorias": 0, "peso": 80.0, "objetivo": "emagrecimento"}),
        ));
        assert_eq!(invalid, "❌ Calorias inválidas.");
    }

    #[test]
    fn test_dispatch_recommendations() {
        let dispatcher = ToolDispatcher::new();

        let text = dispatcher.dispatch(&call(
            "gerar_recomendacoes",
            json!({"objetivo": "ganho_massa", "intensidade_exercicio": "intenso"}),
        ));
        assert!(text.starts_with("💡 Recomendações Personalizadas:"));
        assert!(text.contains("🎯 FOCO: Hipertrofia Muscular"));
        assert!(text.contains("• Atenção ao overtraining!"));
    }

    #[test]
    fn test_dispatch_full_plan() {
        let dispatcher = ToolDispatcher::new();

        let text = dispatcher.dispatch(&call(
            "calcular_plano_completo",
            json!({
                "nome": "João",
                "idade": 30,
                "peso": 80.0,
                "objetivo": "emagrecimento",
                "intensidade_exercicio": "moderado"
            }),
        ));
        assert!(text.starts_with("✅ PLANO NUTRICIONAL COMPLETO"));
        assert!(text.contains("• Nome: João"));
        assert!(text.contains("• 🥩 Proteínas: 160 g/dia"));

        let missing = dispatcher.dispatch(&call(
            "calcular_plano_completo",
            json!({"idade": 30, "peso": 80.0, "objetivo": "x", "intensidade_exercicio": "y"}),
        ));
        assert_eq!(missing, "❌ Nome não informado.");
    }

    #[test]
    fn test_dispatch_unknown_tool() {
        let dispatcher = ToolDispatcher::new();
        let text = dispatcher.dispatch(&call("apagar_banco", json!({})));
        assert_eq!(text, "❌ Ferramenta desconhecida: apagar_banco");
    }
}
