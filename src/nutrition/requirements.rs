use serde::{Deserialize, Serialize};

use crate::error::ApiError;

// Daily requirement coefficients from the reference dataset: protein, iron
// and B12 scale per kilogram of body weight, omega-3 is a fixed threshold.
// Calories carry no adequacy threshold.
const PROTEIN_G_PER_KG: f64 = 1.32;
const IRON_MG_PER_KG: f64 = 0.094;
const B12_MCG_PER_KG: f64 = 0.028;
const OMEGA3_G_FIXED: f64 = 1.1;

/// Minimum daily requirements for the tracked nutrients at a given body weight.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RequirementThresholds {
    pub protein_g: f64,
    pub iron_mg: f64,
    pub b12_mcg: f64,
    pub omega3_g: f64,
}

/// Compute the per-nutrient thresholds for `weight_kg`. Linear in weight,
/// extrapolates outside the conventional 30-150 kg client range.
pub fn requirements(weight_kg: f64) -> Result<RequirementThresholds, ApiError> {
    if !weight_kg.is_finite() || weight_kg <= 0.0 {
        return Err(ApiError::Validation(format!(
            "weight must be a finite positive number, got {weight_kg}"
        )));
    }
    Ok(RequirementThresholds {
        protein_g: weight_kg * PROTEIN_G_PER_KG,
        iron_mg: weight_kg * IRON_MG_PER_KG,
        b12_mcg: weight_kg * B12_MCG_PER_KG,
        omega3_g: OMEGA3_G_FIXED,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thresholds_at_60_kg() {
        let reqs = requirements(60.0).expect("valid weight");
        assert_eq!(reqs.protein_g, 79.2);
        assert_eq!(reqs.iron_mg, 5.64);
        assert!((reqs.b12_mcg - 1.68).abs() < 1e-12);
        assert_eq!(reqs.omega3_g, 1.1);
    }

    #[test]
    fn extrapolates_outside_client_range() {
        let reqs = requirements(200.0).expect("valid weight");
        assert_eq!(reqs.protein_g, 264.0);
        assert_eq!(reqs.omega3_g, 1.1);
    }

    #[test]
    fn rejects_non_positive_weight() {
        assert!(requirements(0.0).is_err());
        assert!(requirements(-5.0).is_err());
    }

    #[test]
    fn rejects_non_finite_weight() {
        assert!(requirements(f64::NAN).is_err());
        assert!(requirements(f64::INFINITY).is_err());
        assert!(requirements(f64::NEG_INFINITY).is_err());
    }

    #[test]
    fn deterministic() {
        let a = requirements(72.5).unwrap();
        let b = requirements(72.5).unwrap();
        assert_eq!(a, b);
    }
}
