// ABOUTME: Nutrition intelligence module: domain types, calculation core, narrative tables.
// ABOUTME: Everything here is pure and synchronous; I/O lives in llm/ and routes/.
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 NutriPlan Assistant

//! # Nutrition Intelligence
//!
//! Deterministic core of the assistant. The LLM layer never computes
//! anything itself; it calls into this module through the tool dispatcher.

/// Deterministic BMR/TEE/calorie/macro formulas
pub mod nutrition_calculator;
/// Narrative recommendation and description lookups
pub mod recommendations;
/// Domain types and boundary synonym folding
pub mod types;

pub use nutrition_calculator::{
    activity_factor, basal_metabolic_rate, calorie_target, full_plan, macro_split,
    objective_factor, protein_per_kg, total_energy_expenditure,
};
pub use recommendations::{
    intensity_adjustments, intensity_description, macro_tips, objective_description,
    objective_recommendations, objective_tip, recommendations,
};
pub use types::{EnergyProfile, FullPlan, Intensity, MacroSplit, Objective, PatientProfile};
