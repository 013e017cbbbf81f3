// ABOUTME: Narrative recommendation text for the assistant, keyed by objective and intensity.
// ABOUTME: Exhaustive Portuguese lookup tables; the only composition is header + two blocks.
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 NutriPlan Assistant

//! # Recommendation Tables
//!
//! Two-axis narrative lookup: one detailed block per [`Objective`]
//! (diet, training, timing, supplementation) plus an adjustment block per
//! [`Intensity`]. All text is fixed Portuguese; the functions are pure
//! lookups over the closed enums, so every input has a block and there is
//! no failure mode.

use super::types::{Intensity, Objective};

/// Human-readable description of one intensity bucket
#[must_use]
pub const fn intensity_description(intensity: Intensity) -> &'static str {
    match intensity {
        Intensity::Sedentary => "Sedentário - Pouca ou nenhuma atividade física",
        Intensity::Light => "Leve - Exercícios leves 1-3x por semana",
        Intensity::Moderate => "Moderado - Exercícios moderados 3-5x por semana",
        Intensity::Intense => "Intenso - Exercícios intensos 6-7x por semana",
        Intensity::VeryIntense => {
            "Muito Intenso - Exercícios intensos 2x por dia ou trabalho físico pesado"
        }
    }
}

/// Human-readable description of one objective
#[must_use]
pub const fn objective_description(objective: Objective) -> &'static str {
    match objective {
        Objective::Cut => "Emagrecimento - Perda de gordura com déficit calórico de 15%",
        Objective::Bulk => "Ganho de Massa - Hipertrofia muscular com superávit de 15%",
        Objective::Maintain => "Manutenção - Manter peso e composição corporal atual",
    }
}

/// One-line motivational tip per objective
#[must_use]
pub const fn objective_tip(objective: Objective) -> &'static str {
    match objective {
        Objective::Cut => "Combine déficit calórico com treino de força para preservar músculos!",
        Objective::Bulk => "Superávit moderado + treino pesado = ganhos de qualidade!",
        Objective::Maintain => "Consistência é a chave para manter seus resultados!",
    }
}

/// Macro consumption tips per objective, one bullet list per variant
#[must_use]
pub const fn macro_tips(objective: Objective) -> &'static str {
    match objective {
        Objective::Cut => {
            "• Proteína em todas as refeições (saciedade)\n\
             • Carboidratos antes do treino (energia)\n\
             • Gorduras boas (azeite, abacate, castanhas)\n\
             • Fibras para saciedade (vegetais)\n"
        }
        Objective::Bulk => {
            "• Proteína distribuída ao longo do dia\n\
             • Carboidratos antes e depois do treino\n\
             • Não tenha medo de gorduras boas\n\
             • Coma de 3 em 3 horas\n"
        }
        Objective::Maintain => {
            "• Dieta balanceada e variada\n\
             • Foque em alimentos naturais\n\
             • Flexibilidade: 80/20 rule\n\
             • Escute seu corpo\n"
        }
    }
}

/// Detailed recommendation block per objective (diet, training, timing, supplements)
#[must_use]
pub const fn objective_recommendations(objective: Objective) -> &'static str {
    match objective {
        Objective::Cut => {
            "🎯 FOCO: Perda de Gordura com Preservação Muscular\n\
             \n\
             🍽️ ALIMENTAÇÃO:\n\
             • Mantenha déficit calórico de 15-20%\n\
             • Priorize proteínas em todas as refeições\n\
             • Escolha carboidratos de baixo índice glicêmico\n\
             • Aumente consumo de vegetais (fibras)\n\
             • Beba 2-3 litros de água por dia\n\
             • Evite alimentos ultraprocessados\n\
             \n\
             🏋️ TREINO:\n\
             • Combine treino de força com cardio\n\
             • Treino de força: 3-4x por semana\n\
             • Cardio moderado: 2-3x por semana\n\
             • HIIT: 1-2x por semana (opcional)\n\
             \n\
             ⏰ TIMING:\n\
             • Coma a cada 3-4 horas\n\
             • Não pule o café da manhã\n\
             • Jantar mais leve\n\
             • Evite carboidratos à noite\n\
             \n\
             💊 SUPLEMENTAÇÃO (OPCIONAL):\n\
             • Whey Protein (se não atingir proteína na dieta)\n\
             • Multivitamínico\n\
             • Ômega 3\n\
             • Cafeína pré-treino\n"
        }
        Objective::Bulk => {
            "🎯 FOCO: Hipertrofia Muscular\n\
             \n\
             🍽️ ALIMENTAÇÃO:\n\
             • Mantenha superávit calórico de 10-15%\n\
             • Consuma 2-2.5g de proteína por kg\n\
             • Carboidratos são seus aliados (60% das calorias)\n\
             • Não tenha medo de gorduras boas\n\
             • Beba 3-4 litros de água por dia\n\
             • Faça 5-6 refeições por dia\n\
             \n\
             🏋️ TREINO:\n\
             • Treino de força: 4-6x por semana\n\
             • Foco em exercícios compostos\n\
             • Progressive overload é essencial\n\
             • Cardio leve: 1-2x por semana\n\
             • Descanso adequado: 7-9h de sono\n\
             \n\
             ⏰ TIMING:\n\
             • Refeição pré-treino: 1-2h antes\n\
             • Refeição pós-treino: até 1h após\n\
             • Carboidratos antes e depois do treino\n\
             • Proteína antes de dormir (caseína)\n\
             \n\
             💊 SUPLEMENTAÇÃO (OPCIONAL):\n\
             • Whey Protein\n\
             • Creatina (5g/dia)\n\
             • Maltodextrina (pós-treino)\n\
             • BCAA (durante treino)\n\
             • Hipercalórico (se dificuldade em comer)\n"
        }
        Objective::Maintain => {
            "🎯 FOCO: Manter Peso e Composição Corporal\n\
             \n\
             🍽️ ALIMENTAÇÃO:\n\
             • Mantenha calorias de manutenção\n\
             • Dieta balanceada e variada\n\
             • 40% carboidratos, 30% proteínas, 30% gorduras\n\
             • Foque em alimentos naturais\n\
             • Flexibilidade: 80/20 (80% saudável)\n\
             • Hidratação adequada\n\
             \n\
             🏋️ TREINO:\n\
             • Treino de força: 3-4x por semana\n\
             • Cardio: 2-3x por semana\n\
             • Variedade de exercícios\n\
             • Mantenha consistência\n\
             \n\
             ⏰ TIMING:\n\
             • Flexível, adapte à sua rotina\n\
             • O mais importante é a consistência\n\
             • Não pule refeições\n\
             \n\
             💊 SUPLEMENTAÇÃO (OPCIONAL):\n\
             • Multivitamínico\n\
             • Ômega 3\n\
             • Vitamina D\n"
        }
    }
}

/// Training adjustment block per intensity bucket
#[must_use]
pub const fn intensity_adjustments(intensity: Intensity) -> &'static str {
    match intensity {
        Intensity::Sedentary => {
            "• Comece devagar, aumente intensidade gradualmente\n\
             • Caminhe 30min por dia para começar\n\
             • Foco em criar o hábito primeiro\n"
        }
        Intensity::Light => {
            "• Aumente frequência gradualmente\n\
             • Adicione 1 dia de treino por mês\n\
             • Varie os tipos de exercício\n"
        }
        Intensity::Moderate => {
            "• Excelente frequência! Mantenha consistência\n\
             • Varie intensidade durante a semana\n\
             • 1-2 dias de descanso ativo\n"
        }
        Intensity::Intense => {
            "• Atenção ao overtraining!\n\
             • Pelo menos 1 dia de descanso completo\n\
             • Sono de 8-9h é essencial\n\
             • Considere periodização\n"
        }
        Intensity::VeryIntense => {
            "• CUIDADO: Risco alto de overtraining!\n\
             • Monitore sinais de fadiga\n\
             • Sono de 9h+ é obrigatório\n\
             • Considere acompanhamento profissional\n\
             • Periodização é essencial\n"
        }
    }
}

/// Assemble the full recommendation text: header, objective block, intensity block
#[must_use]
pub fn recommendations(objective: Objective, intensity: Intensity) -> String {
    format!(
        "💡 Recomendações Personalizadas:\n\
         ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n\
         \n\
         {}\n\
         📊 AJUSTES POR INTENSIDADE:\n\
         {}",
        objective_recommendations(objective),
        intensity_adjustments(intensity)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_objective_has_a_block() {
        for objective in [Objective::Cut, Objective::Bulk, Objective::Maintain] {
            let block = objective_recommendations(objective);
            assert!(block.starts_with("🎯 FOCO:"), "{objective:?}");
            assert!(block.contains("🍽️ ALIMENTAÇÃO:"));
            assert!(block.contains("🏋️ TREINO:"));
            assert!(block.contains("⏰ TIMING:"));
            assert!(block.contains("💊 SUPLEMENTAÇÃO (OPCIONAL):"));
            assert!(block.ends_with('\n'));
        }
    }

    #[test]
    fn test_every_intensity_has_an_adjustment() {
        for intensity in Intensity::ALL {
            let block = intensity_adjustments(intensity);
            assert!(block.starts_with('•'), "{intensity:?}");
            assert!(block.ends_with('\n'));
        }
    }

    #[test]
    fn test_recommendations_layout() {
        let text = recommendations(Objective::Cut, Intensity::Sedentary);

        assert!(text.starts_with("💡 Recomendações Personalizadas:\n"));
        assert!(text.contains("🎯 FOCO: Perda de Gordura com Preservação Muscular"));
        assert!(text.contains("\n📊 AJUSTES POR INTENSIDADE:\n"));
        assert!(text.contains("• Caminhe 30min por dia para começar"));

        let header_end = text.find("🎯").unwrap();
        let adjustments = text.find("📊 AJUSTES").unwrap();
        assert!(header_end < adjustments, "objective block before adjustments");
    }

    #[test]
    fn test_descriptions_and_tips() {
        assert_eq!(
            intensity_description(Intensity::Moderate),
            "Moderado - Exercícios moderados 3-5x por semana"
        );
        assert_eq!(
            objective_description(Objective::Cut),
            "Emagrecimento - Perda de gordura com déficit calórico de 15%"
        );
        assert!(objective_tip(Objective::Bulk).contains("ganhos de qualidade"));
        assert!(macro_tips(Objective::Maintain).contains("80/20 rule"));
    }

    #[test]
    fn test_folded_unknown_strings_reach_the_default_blocks() {
        let objective = Objective::from_input("qualquer coisa");
        let intensity = Intensity::from_input("nenhuma");

        assert_eq!(
            objective_recommendations(objective),
            objective_recommendations(Objective::Maintain)
        );
        assert_eq!(
            intensity_adjustments(intensity),
            intensity_adjustments(Intensity::Moderate)
        );
    }
}
