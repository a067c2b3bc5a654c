use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::nutrition::requirements::{requirements, RequirementThresholds};
use crate::nutrition::table::{NutrientTable, NutrientVector};

/// Grams applied when a selection carries a non-positive or non-finite
/// amount. Mirrors the client-side defaulting; kept here so every caller
/// gets identical behavior.
pub const DEFAULT_GRAMS: f64 = 100.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AdequacyStatus {
    Adequate,
    Deficient,
}

/// Outcome of one adequacy evaluation. Immutable once computed; no rounding
/// is applied here, display rounding is the client's concern.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionRecord {
    pub status: AdequacyStatus,
    pub totals: NutrientVector,
    pub requirements: RequirementThresholds,
    pub deficits: BTreeMap<String, f64>,
}

/// Scale each selected food's per-100g vector by grams/100, sum the totals,
/// and compare against the weight-derived thresholds. Adequate only when
/// every tracked nutrient meets its threshold.
///
/// Pure and stateless: identical inputs yield bit-identical output, and the
/// BTreeMap input fixes the summation order so totals are invariant to how
/// the caller assembled the selection.
pub fn evaluate(
    table: &NutrientTable,
    weight_kg: f64,
    food_grams: &BTreeMap<String, f64>,
) -> Result<PredictionRecord, ApiError> {
    if food_grams.is_empty() {
        return Err(ApiError::Validation("food_grams must not be empty".into()));
    }

    let requirements = requirements(weight_kg)?;

    let mut totals = NutrientVector::default();
    for (name, &grams) in food_grams {
        let per_100g = table
            .get(name)
            .ok_or_else(|| ApiError::UnknownFood(name.clone()))?;
        let grams = normalize_grams(grams);
        totals = totals + *per_100g * (grams / 100.0);
    }

    let tracked = [
        ("protein_g", totals.protein_g, requirements.protein_g),
        ("iron_mg", totals.iron_mg, requirements.iron_mg),
        ("b12_mcg", totals.b12_mcg, requirements.b12_mcg),
        ("omega3_g", totals.omega3_g, requirements.omega3_g),
    ];

    let mut deficits = BTreeMap::new();
    for (nutrient, total, required) in tracked {
        if total < required {
            deficits.insert(nutrient.to_string(), required - total);
        }
    }

    let status = if deficits.is_empty() {
        AdequacyStatus::Adequate
    } else {
        AdequacyStatus::Deficient
    };

    Ok(PredictionRecord {
        status,
        totals,
        requirements,
        deficits,
    })
}

fn normalize_grams(grams: f64) -> f64 {
    if !grams.is_finite() || grams <= 0.0 {
        DEFAULT_GRAMS
    } else {
        grams
    }
}
