// ABOUTME: Domain types for nutrition planning: Objective, Intensity, profiles and results.
// ABOUTME: Folds raw Portuguese synonym strings into closed enums once, at the boundary.
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 NutriPlan Assistant

//! # Nutrition Domain Types
//!
//! The calculation engine works over two closed enums, [`Objective`] and
//! [`Intensity`]. Raw strings arrive from the LLM tool arguments and the
//! REST boundary in Portuguese (`"emagrecimento"`, `"muito intenso"`, ...)
//! and are folded into variants exactly once via `from_input`. Unrecognized
//! strings are not errors: they fall back to `Maintain` / `Moderate`, which
//! keeps the assistant permissive about free-form LLM output.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result as FmtResult};

use crate::errors::{AppError, AppResult};

/// Body-composition goal driving calorie and protein targets
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Objective {
    /// Fat loss on a caloric deficit (`"emagrecimento"`)
    Cut,
    /// Muscle gain on a caloric surplus (`"ganho_massa"` / `"ganho de massa"`)
    Bulk,
    /// Hold current weight and composition (`"manutencao"` / `"manutenção"`)
    #[default]
    Maintain,
}

impl Objective {
    /// Fold a raw objective string into a variant.
    ///
    /// Case insensitive; unrecognized input defaults to [`Self::Maintain`].
    #[must_use]
    pub fn from_input(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "emagrecimento" => Self::Cut,
            "ganho_massa" | "ganho de massa" => Self::Bulk,
            _ => Self::Maintain, // including "manutencao" | "manutenção"
        }
    }
}

impl Display for Objective {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::Cut => write!(f, "emagrecimento"),
            Self::Bulk => write!(f, "ganho_massa"),
            Self::Maintain => write!(f, "manutencao"),
        }
    }
}

/// Weekly exercise volume bucket driving the activity factor
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Intensity {
    /// Little or no exercise (`"sedentario"` / `"sedentário"`)
    Sedentary,
    /// Light exercise 1-3x/week (`"leve"`)
    Light,
    /// Moderate exercise 3-5x/week (`"moderado"`)
    #[default]
    Moderate,
    /// Intense exercise 6-7x/week (`"intenso"`)
    Intense,
    /// Twice daily or heavy physical work (`"muito_intenso"` / `"muito intenso"`)
    VeryIntense,
}

impl Intensity {
    /// All variants in ascending activity order
    pub const ALL: [Self; 5] = [
        Self::Sedentary,
        Self::Light,
        Self::Moderate,
        Self::Intense,
        Self::VeryIntense,
    ];

    /// Fold a raw intensity string into a variant.
    ///
    /// Case insensitive; unrecognized input defaults to [`Self::Moderate`].
    #[must_use]
    pub fn from_input(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "sedentario" | "sedentário" => Self::Sedentary,
            "leve" => Self::Light,
            "intenso" => Self::Intense,
            "muito_intenso" | "muito intenso" => Self::VeryIntense,
            _ => Self::Moderate, // including "moderado"
        }
    }
}

impl Display for Intensity {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::Sedentary => write!(f, "sedentario"),
            Self::Light => write!(f, "leve"),
            Self::Moderate => write!(f, "moderado"),
            Self::Intense => write!(f, "intenso"),
            Self::VeryIntense => write!(f, "muito_intenso"),
        }
    }
}

/// One patient's validated input data, immutable once constructed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatientProfile {
    /// Patient name used to personalize the plan
    pub name: String,
    /// Age in years, 1-149
    pub age: u32,
    /// Body weight in kilograms, 0 < w < 500
    pub weight_kg: f64,
    /// Body-composition goal
    pub objective: Objective,
    /// Exercise intensity bucket
    pub intensity: Intensity,
}

impl PatientProfile {
    /// Validate and build a profile from boundary input.
    ///
    /// Objective and intensity strings are folded with their silent
    /// defaults; name, age and weight are rejected when out of range.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for an empty name, age outside `(0, 150)` or
    /// weight outside `(0, 500)`.
    pub fn new(
        name: &str,
        age: u32,
        weight_kg: f64,
        objective: &str,
        intensity: &str,
    ) -> AppResult<Self> {
        if name.trim().is_empty() {
            return Err(AppError::invalid_input("Nome não informado."));
        }
        if !(1..=149).contains(&age) {
            return Err(AppError::invalid_input(
                "Idade inválida. Deve estar entre 1 e 150 anos.",
            ));
        }
        if weight_kg <= 0.0 || weight_kg >= 500.0 {
            return Err(AppError::invalid_input(
                "Peso inválido. Deve estar entre 1 e 500 kg.",
            ));
        }

        Ok(Self {
            name: name.trim().to_owned(),
            age,
            weight_kg,
            objective: Objective::from_input(objective),
            intensity: Intensity::from_input(intensity),
        })
    }
}

/// Derived energy figures for one profile, never persisted
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct EnergyProfile {
    /// Basal metabolic rate in kcal/day
    pub bmr: f64,
    /// Total energy expenditure in kcal/day
    pub tee: f64,
    /// Daily calorie target after the objective adjustment
    pub calorie_target: i64,
}

/// Macronutrient gram allocation from a calorie target.
///
/// The kcal components are kept as computed during the split (fat from the
/// fixed share, carbs as the unclamped remainder) because the report
/// templates print them; they are not re-derived from the floored grams.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct MacroSplit {
    /// Protein grams per day
    pub protein_g: i64,
    /// Carbohydrate grams per day (may go negative for pathological targets)
    pub carbs_g: i64,
    /// Fat grams per day
    pub fat_g: i64,
    /// Calories allocated to protein
    pub protein_kcal: i64,
    /// Calories left for carbohydrates
    pub carbs_kcal: i64,
    /// Calories allocated to fat
    pub fat_kcal: i64,
}

/// Complete computed plan: energy figures plus the macro allocation
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct FullPlan {
    /// BMR, TEE and calorie target
    pub energy: EnergyProfile,
    /// Macronutrient split for the calorie target
    pub macros: MacroSplit,
}
