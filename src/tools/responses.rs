// ABOUTME: Formatted Portuguese response templates for every calculation tool.
// ABOUTME: Pure text rendering over engine results; raw user strings are echoed where the UI expects them.
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 NutriPlan Assistant

//! # Tool Response Templates
//!
//! Every tool reply is one of these fixed blocks, emoji section markers and
//! all. The templates echo the raw objective/intensity strings where the
//! original UI showed user input, and print the derived lines (calculation
//! breakdowns, percentage shares, signed differences) from engine results.

use crate::intelligence::types::{FullPlan, MacroSplit};

/// Render the TMB calculation block
#[must_use]
pub fn tmb_response(tmb: f64) -> String {
    format!(
        "✅ TMB Calculada com Sucesso!\n\
         \n\
         📊 Taxa Metabólica Basal (TMB):\n\
         ━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n\
         \n\
         🔢 Valor: {tmb:.2} kcal/dia\n\
         \n\
         📝 O que é TMB?\n\
         A Taxa Metabólica Basal é a quantidade mínima de energia\n\
         (calorias) que seu corpo precisa em repouso absoluto para\n\
         manter funções vitais como:\n\
         • Respiração\n\
         • Circulação sanguínea\n\
         • Regulação de temperatura\n\
         • Funções celulares\n\
         \n\
         💡 Importante:\n\
         A TMB representa apenas o gasto em repouso. Para calcular\n\
         o gasto total diário, é necessário considerar o nível de\n\
         atividade física (GET - Gasto Energético Total).\n"
    )
}

/// Render the GET calculation block with its breakdown
#[must_use]
pub fn get_response(
    get: f64,
    tmb: f64,
    factor: f64,
    intensity_input: &str,
    intensity_description: &str,
) -> String {
    format!(
        "✅ GET Calculado com Sucesso!\n\
         \n\
         🏃 Gasto Energético Total (GET):\n\
         ━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n\
         \n\
         🔢 Valor: {get:.2} kcal/dia\n\
         \n\
         📊 Cálculo:\n\
         • TMB: {tmb:.2} kcal/dia\n\
         • Fator de Atividade: {factor:.2} ({intensity_input})\n\
         • GET = TMB × Fator = {get:.2} kcal/dia\n\
         \n\
         📝 O que é GET?\n\
         O Gasto Energético Total é a soma de:\n\
         • TMB (gasto em repouso)\n\
         • Atividade física\n\
         • Efeito térmico dos alimentos\n\
         • Termogênese não relacionada a exercício\n\
         \n\
         💡 Seu nível de atividade:\n\
         {intensity_description}\n"
    )
}

/// Render the calorie target block with the signed adjustment line
#[must_use]
pub fn calories_response(
    calories: i64,
    get: f64,
    objective_input: &str,
    objective_factor: f64,
    objective_description: &str,
    objective_tip: &str,
) -> String {
    let difference = calories - get.round() as i64;
    let sign = if difference >= 0 { "+" } else { "" };
    let percent = (objective_factor - 1.0) * 100.0;

    format!(
        "✅ Calorias Calculadas com Sucesso!\n\
         \n\
         🎯 Calorias Recomendadas:\n\
         ━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n\
         \n\
         🔢 Valor: {calories} kcal/dia\n\
         \n\
         📊 Cálculo:\n\
         • GET (manutenção): {get:.0} kcal/dia\n\
         • Objetivo: {objective_input}\n\
         • Ajuste: {sign}{difference} kcal/dia ({percent:.0}%)\n\
         • Total: {calories} kcal/dia\n\
         \n\
         📝 Seu Objetivo:\n\
         {objective_description}\n\
         \n\
         💡 Dica:\n\
         {objective_tip}\n"
    )
}

/// Render the macronutrient distribution block with percentage shares
#[must_use]
pub fn macros_response(
    split: &MacroSplit,
    calories: i64,
    protein_per_kg: f64,
    macro_tips: &str,
) -> String {
    let calories_f = calories as f64;
    let protein_share = (split.protein_kcal * 100) as f64 / calories_f;
    let carbs_share = (split.carbs_kcal * 100) as f64 / calories_f;
    let fat_share = (split.fat_kcal * 100) as f64 / calories_f;

    format!(
        "✅ Macronutrientes Calculados!\n\
         \n\
         🍽️ Distribuição de Macronutrientes:\n\
         ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n\
         \n\
         🥩 PROTEÍNAS: {protein_g} gramas/dia\n\
         \x20  • {protein_per_kg:.1}g por kg de peso corporal\n\
         \x20  • {protein_kcal} kcal ({protein_share:.1}% das calorias)\n\
         \x20  • Função: Construção e reparação muscular\n\
         \n\
         🍞 CARBOIDRATOS: {carbs_g} gramas/dia\n\
         \x20  • {carbs_kcal} kcal ({carbs_share:.1}% das calorias)\n\
         \x20  • Função: Energia principal para treinos\n\
         \n\
         🥑 GORDURAS: {fat_g} gramas/dia\n\
         \x20  • {fat_kcal} kcal ({fat_share:.1}% das calorias)\n\
         \x20  • Função: Hormônios e absorção de vitaminas\n\
         \n\
         📊 Total: {calories} kcal/dia\n\
         \n\
         💡 Dicas de Consumo:\n\
         {macro_tips}",
        protein_g = split.protein_g,
        protein_kcal = split.protein_kcal,
        carbs_g = split.carbs_g,
        carbs_kcal = split.carbs_kcal,
        fat_g = split.fat_g,
        fat_kcal = split.fat_kcal,
    )
}

/// Render the full nutritional plan report
#[must_use]
pub fn full_plan_response(
    name: &str,
    age: u32,
    weight_kg: f64,
    objective_input: &str,
    intensity_input: &str,
    plan: &FullPlan,
) -> String {
    format!(
        "✅ PLANO NUTRICIONAL COMPLETO\n\
         ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n\
         \n\
         👤 DADOS PESSOAIS:\n\
         • Nome: {name}\n\
         • Idade: {age} anos\n\
         • Peso: {weight_kg:.1} kg\n\
         • Objetivo: {objective_input}\n\
         • Intensidade: {intensity_input}\n\
         \n\
         📊 CÁLCULOS ENERGÉTICOS:\n\
         • TMB (Taxa Metabólica Basal): {tmb:.0} kcal/dia\n\
         • GET (Gasto Energético Total): {get:.0} kcal/dia\n\
         • Calorias Recomendadas: {calories} kcal/dia\n\
         \n\
         🍽️ MACRONUTRIENTES:\n\
         • 🥩 Proteínas: {protein_g} g/dia ({protein_kcal} kcal)\n\
         • 🍞 Carboidratos: {carbs_g} g/dia ({carbs_kcal} kcal)\n\
         • 🥑 Gorduras: {fat_g} g/dia ({fat_kcal} kcal)\n\
         \n\
         💡 PRÓXIMOS PASSOS:\n\
         1. Siga as calorias e macros recomendados\n\
         2. Faça 4-6 refeições por dia\n\
         3. Beba bastante água (2-4L/dia)\n\
         4. Durma bem (7-9h por noite)\n\
         5. Seja consistente!\n\
         \n\
         📝 Peça recomendações detalhadas para seu objetivo!\n",
        tmb = plan.energy.bmr,
        get = plan.energy.tee,
        calories = plan.energy.calorie_target,
        protein_g = plan.macros.protein_g,
        protein_kcal = plan.macros.protein_kcal,
        carbs_g = plan.macros.carbs_g,
        carbs_kcal = plan.macros.carbs_kcal,
        fat_g = plan.macros.fat_g,
        fat_kcal = plan.macros.fat_kcal,
    )
}
