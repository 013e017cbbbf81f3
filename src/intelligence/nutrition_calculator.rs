// ABOUTME: Deterministic nutrition formulas: BMR, TEE, calorie target and macro split.
// ABOUTME: Pure functions with no I/O; all lookups are exhaustive matches over closed enums.
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 NutriPlan Assistant

//! # Nutrition Calculator
//!
//! Pure calculation core behind the assistant's tools. Every function here is
//! deterministic and side-effect free; the only failure mode is `InvalidInput`
//! for out-of-range arguments.
//!
//! # Scientific References
//!
//! - Harris, J.A., & Benedict, F.G. (1918). A biometric study of human basal
//!   metabolism. *PNAS*, 4(12), 370-373.
//!   <https://doi.org/10.1073/pnas.4.12.370>
//!
//! The Harris-Benedict variant used here takes no height input: height is
//! fixed at 170 cm, matching the data the assistant collects. Callers must
//! not assume anthropometric accuracy from the estimate.

use crate::errors::{AppError, AppResult};

use super::types::{EnergyProfile, FullPlan, Intensity, MacroSplit, Objective, PatientProfile};

// Harris-Benedict coefficients (male variant)
const BMR_BASE: f64 = 66.47;
const BMR_WEIGHT_COEF: f64 = 13.75;
const BMR_HEIGHT_COEF: f64 = 5.003;
const BMR_AGE_COEF: f64 = 6.755;

/// Height is not collected anywhere; the formula runs on this fixed estimate.
const ESTIMATED_HEIGHT_CM: f64 = 170.0;

// Activity factors per intensity bucket
const FACTOR_SEDENTARY: f64 = 1.2;
const FACTOR_LIGHT: f64 = 1.375;
const FACTOR_MODERATE: f64 = 1.55;
const FACTOR_INTENSE: f64 = 1.725;
const FACTOR_VERY_INTENSE: f64 = 1.9;

// Calorie adjustment per objective
const DEFICIT_CUT: f64 = 0.85; // -15%
const SURPLUS_BULK: f64 = 1.15; // +15%
const FACTOR_MAINTAIN: f64 = 1.0;

/// Share of the calorie target allocated to fat before carbs absorb the rest
const FAT_CALORIE_SHARE: f64 = 0.27;

/// Metabolizable energy per gram
const KCAL_PER_G_PROTEIN: i64 = 4;
const KCAL_PER_G_CARBS: i64 = 4;
const KCAL_PER_G_FAT: i64 = 9;

/// Calculate Basal Metabolic Rate with the fixed-height Harris-Benedict variant
///
/// Formula: `BMR = 66.47 + 13.75 x weight_kg + 5.003 x 170.0 - 6.755 x age`
///
/// # Arguments
/// * `age` - Age in years, valid range 1-149
/// * `weight_kg` - Body weight in kilograms, valid range (0, 500) exclusive
///
/// # Errors
///
/// Returns `InvalidInput` when age or weight is outside the valid range
pub fn basal_metabolic_rate(age: u32, weight_kg: f64) -> AppResult<f64> {
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

    Ok(BMR_BASE + BMR_WEIGHT_COEF * weight_kg + BMR_HEIGHT_COEF * ESTIMATED_HEIGHT_CM
        - BMR_AGE_COEF * f64::from(age))
}

/// Activity multiplier for one intensity bucket
#[must_use]
pub const fn activity_factor(intensity: Intensity) -> f64 {
    match intensity {
        Intensity::Sedentary => FACTOR_SEDENTARY,
        Intensity::Light => FACTOR_LIGHT,
        Intensity::Moderate => FACTOR_MODERATE,
        Intensity::Intense => FACTOR_INTENSE,
        Intensity::VeryIntense => FACTOR_VERY_INTENSE,
    }
}

/// Calorie multiplier for one objective
#[must_use]
pub const fn objective_factor(objective: Objective) -> f64 {
    match objective {
        Objective::Cut => DEFICIT_CUT,
        Objective::Bulk => SURPLUS_BULK,
        Objective::Maintain => FACTOR_MAINTAIN,
    }
}

/// Daily protein allocation in grams per kilogram of body weight
#[must_use]
pub const fn protein_per_kg(objective: Objective) -> f64 {
    match objective {
        Objective::Cut => 2.0,      // higher protein to preserve muscle
        Objective::Bulk => 2.2,     // high protein to build
        Objective::Maintain => 1.6, // moderate protein
    }
}

/// Calculate Total Energy Expenditure: `TEE = BMR x activity factor`
///
/// # Errors
///
/// Returns `InvalidInput` when `bmr` is not positive
pub fn total_energy_expenditure(bmr: f64, intensity: Intensity) -> AppResult<f64> {
    if bmr <= 0.0 {
        return Err(AppError::invalid_input(
            "TMB inválida. Calcule a TMB primeiro.",
        ));
    }

    Ok(bmr * activity_factor(intensity))
}

/// Calculate the daily calorie target: `round(tee x objective factor)`
///
/// Rounding is to the nearest integer with ties away from zero.
///
/// # Errors
///
/// Returns `InvalidInput` when `tee` is not positive
pub fn calorie_target(tee: f64, objective: Objective) -> AppResult<i64> {
    if tee <= 0.0 {
        return Err(AppError::invalid_input(
            "GET inválido. Calcule o GET primeiro.",
        ));
    }

    Ok((tee * objective_factor(objective)).round() as i64)
}

/// Split a calorie target into protein, fat and carbohydrate grams.
///
/// The order is the policy: protein is fixed first from body weight, fat
/// takes a fixed share of the target, and carbohydrates absorb whatever
/// remains. The remainder is deliberately not clamped, so a tiny calorie
/// target combined with the protein and fat allocations can drive the
/// carbohydrate figures negative.
///
/// # Errors
///
/// Returns `InvalidInput` when the calorie target or weight is not positive
pub fn macro_split(calorie_target: i64, weight_kg: f64, objective: Objective) -> AppResult<MacroSplit> {
    if calorie_target <= 0 {
        return Err(AppError::invalid_input("Calorias inválidas."));
    }
    if weight_kg <= 0.0 {
        return Err(AppError::invalid_input("Peso inválido."));
    }

    let protein_g = (weight_kg * protein_per_kg(objective)).round() as i64;
    let protein_kcal = protein_g * KCAL_PER_G_PROTEIN;

    let fat_kcal = (calorie_target as f64 * FAT_CALORIE_SHARE).round() as i64;
    let fat_g = fat_kcal.div_euclid(KCAL_PER_G_FAT);

    let carbs_kcal = calorie_target - protein_kcal - fat_kcal;
    let carbs_g = carbs_kcal.div_euclid(KCAL_PER_G_CARBS);

    Ok(MacroSplit {
        protein_g,
        carbs_g,
        fat_g,
        protein_kcal,
        carbs_kcal,
        fat_kcal,
    })
}

/// Compute the complete plan for one validated profile.
///
/// Convenience aggregate over the four calculations; no new logic.
///
/// # Errors
///
/// Propagates `InvalidInput` from the underlying calculations
pub fn full_plan(profile: &PatientProfile) -> AppResult<FullPlan> {
    let bmr = basal_metabolic_rate(profile.age, profile.weight_kg)?;
    let tee = total_energy_expenditure(bmr, profile.intensity)?;
    let target = calorie_target(tee, profile.objective)?;
    let macros = macro_split(target, profile.weight_kg, profile.objective)?;

    Ok(FullPlan {
        energy: EnergyProfile {
            bmr,
            tee,
            calorie_target: target,
        },
        macros,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    #[test]
    fn test_bmr_formula_exact_value() {
        // 66.47 + 13.75*80 + 5.003*170 - 6.755*30 = 1814.33
        let bmr = basal_metabolic_rate(30, 80.0).unwrap();
        assert!((bmr - 1814.33).abs() < 0.005, "bmr = {bmr}");
    }

    #[test]
    fn test_bmr_rejects_out_of_range() {
        assert!(basal_metabolic_rate(0, 80.0).is_err());
        assert!(basal_metabolic_rate(150, 80.0).is_err());
        assert!(basal_metabolic_rate(30, 0.0).is_err());
        assert!(basal_metabolic_rate(30, -5.0).is_err());
        assert!(basal_metabolic_rate(30, 500.0).is_err());
    }

    #[test]
    fn test_bmr_accepts_domain_edges() {
        assert!(basal_metabolic_rate(1, 0.5).is_ok());
        assert!(basal_metabolic_rate(149, 499.5).is_ok());
    }

    #[test]
    fn test_tee_uses_intensity_factor() {
        let tee = total_energy_expenditure(1000.0, Intensity::Moderate).unwrap();
        assert!((tee - 1550.0).abs() < EPSILON);

        assert!(total_energy_expenditure(0.0, Intensity::Moderate).is_err());
        assert!(total_energy_expenditure(-10.0, Intensity::Light).is_err());
    }

    #[test]
    fn test_activity_factors_strictly_increasing() {
        let factors: Vec<f64> = Intensity::ALL.iter().map(|i| activity_factor(*i)).collect();
        for pair in factors.windows(2) {
            assert!(pair[0] < pair[1], "factors not increasing: {factors:?}");
        }
        assert!((factors[0] - 1.2).abs() < EPSILON);
        assert!((factors[4] - 1.9).abs() < EPSILON);
    }

    #[test]
    fn test_calorie_target_objective_ordering() {
        let tee = 2500.0;
        let cut = calorie_target(tee, Objective::Cut).unwrap();
        let maintain = calorie_target(tee, Objective::Maintain).unwrap();
        let bulk = calorie_target(tee, Objective::Bulk).unwrap();

        assert!(cut < maintain);
        assert!(maintain < bulk);
        assert_eq!(maintain, 2500);
    }

    #[test]
    fn test_calorie_target_rounds_ties_away_from_zero() {
        // 2501 * 1.0 = 2501; engineered half case: tee=2.5 with Maintain
        assert_eq!(calorie_target(2.5, Objective::Maintain).unwrap(), 3);
        assert_eq!(calorie_target(3.5, Objective::Maintain).unwrap(), 4);
        assert!(calorie_target(0.0, Objective::Maintain).is_err());
    }

    #[test]
    fn test_bmr_monotonic_in_weight_and_age() {
        let mut previous = basal_metabolic_rate(40, 1.0).unwrap();
        for tenth_kg in 2..50 {
            let weight = f64::from(tenth_kg) * 10.0;
            let bmr = basal_metabolic_rate(40, weight - 1.0).unwrap();
            assert!(bmr > previous, "bmr not increasing at weight {weight}");
            previous = bmr;
        }

        let mut previous = basal_metabolic_rate(1, 80.0).unwrap();
        for age in 2..150 {
            let bmr = basal_metabolic_rate(age, 80.0).unwrap();
            assert!(bmr < previous, "bmr not decreasing at age {age}");
            previous = bmr;
        }
    }

    #[test]
    fn test_macro_split_protein_first_policy() {
        let split = macro_split(2364, 80.0, Objective::Cut).unwrap();

        // protein: round(80 * 2.0) = 160 g -> 640 kcal
        assert_eq!(split.protein_g, 160);
        assert_eq!(split.protein_kcal, 640);

        // fat: round(2364 * 0.27) = 638 kcal -> floor(638/9) = 70 g
        assert_eq!(split.fat_kcal, 638);
        assert_eq!(split.fat_g, 70);

        // carbs: 2364 - 640 - 638 = 1086 kcal -> floor(1086/4) = 271 g
        assert_eq!(split.carbs_kcal, 1086);
        assert_eq!(split.carbs_g, 271);
    }

    #[test]
    fn test_macro_split_round_trip_within_tolerance() {
        for objective in [Objective::Cut, Objective::Bulk, Objective::Maintain] {
            for (tee, weight) in [(2000.0, 60.0), (2755.3, 80.0), (3500.9, 102.5)] {
                let target = calorie_target(tee, objective).unwrap();
                let split = macro_split(target, weight, objective).unwrap();

                let rebuilt = split.protein_g * 4 + split.carbs_g * 4 + split.fat_g * 9;
                let drift = (rebuilt - target).abs();
                assert!(drift <= 8, "drift {drift} kcal for {objective:?} target {target}");
            }
        }
    }

    #[test]
    fn test_macro_split_negative_carbs_not_clamped() {
        // 100 kcal target with 80 kg of body weight: protein alone is 640 kcal
        let split = macro_split(100, 80.0, Objective::Cut).unwrap();

        assert!(split.carbs_kcal < 0);
        assert!(split.carbs_g < 0);
        // true floor on the negative side: -567 kcal -> floor(-141.75) = -142 g
        assert_eq!(split.carbs_kcal, 100 - 640 - 27);
        assert_eq!(split.carbs_g, (-567_i64).div_euclid(4));
    }

    #[test]
    fn test_macro_split_rejects_non_positive_inputs() {
        assert!(macro_split(0, 80.0, Objective::Cut).is_err());
        assert!(macro_split(-100, 80.0, Objective::Cut).is_err());
        assert!(macro_split(2000, 0.0, Objective::Cut).is_err());
    }

    #[test]
    fn test_unknown_objective_string_behaves_like_maintain() {
        let folded = Objective::from_input("xyz");

        assert!((objective_factor(folded) - objective_factor(Objective::Maintain)).abs() < EPSILON);
        assert!((protein_per_kg(folded) - protein_per_kg(Objective::Maintain)).abs() < EPSILON);

        let target_folded = calorie_target(2500.0, folded).unwrap();
        let target_maintain = calorie_target(2500.0, Objective::Maintain).unwrap();
        assert_eq!(target_folded, target_maintain);

        let split_folded = macro_split(2500, 70.0, folded).unwrap();
        let split_maintain = macro_split(2500, 70.0, Objective::Maintain).unwrap();
        assert_eq!(split_folded.protein_g, split_maintain.protein_g);
        assert_eq!(split_folded.carbs_g, split_maintain.carbs_g);
        assert_eq!(split_folded.fat_g, split_maintain.fat_g);
    }

    #[test]
    fn test_full_plan_composes_the_four_calculations() {
        let profile = PatientProfile::new("João", 30, 80.0, "emagrecimento", "moderado").unwrap();
        let plan = full_plan(&profile).unwrap();

        let bmr = basal_metabolic_rate(30, 80.0).unwrap();
        assert!((plan.energy.bmr - bmr).abs() < EPSILON);
        assert!((plan.energy.tee - bmr * 1.55).abs() < EPSILON);
        assert_eq!(plan.energy.calorie_target, (bmr * 1.55 * 0.85).round() as i64);
        assert_eq!(plan.macros.protein_g, 160);
    }

    #[test]
    fn test_full_plan_propagates_invalid_age() {
        let profile = PatientProfile {
            name: "X".to_owned(),
            age: 200,
            weight_kg: 80.0,
            objective: Objective::Maintain,
            intensity: Intensity::Moderate,
        };
        assert!(full_plan(&profile).is_err());
    }
}
