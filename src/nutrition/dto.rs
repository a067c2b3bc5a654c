use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::nutrition::requirements::RequirementThresholds;
use crate::nutrition::services::AdequacyStatus;
use crate::nutrition::table::NutrientVector;

#[derive(Debug, Serialize)]
pub struct FoodsResponse {
    pub foods: Vec<String>,
}

/// Body for POST /predict.
#[derive(Debug, Deserialize)]
pub struct PredictRequest {
    pub weight: f64,
    pub food_grams: BTreeMap<String, f64>,
}

/// Body for the legacy POST /calculate route. When `food_grams` is absent
/// every listed food defaults to 100 g.
#[derive(Debug, Deserialize)]
pub struct CalculateRequest {
    pub weight: f64,
    #[serde(default)]
    pub foods: Vec<String>,
    #[serde(default)]
    pub food_grams: Option<BTreeMap<String, f64>>,
}

#[derive(Debug, Serialize)]
pub struct PredictResponse {
    pub weight: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected_foods: Option<Vec<String>>,
    pub food_grams: BTreeMap<String, f64>,
    pub totals: NutrientVector,
    pub requirements: RequirementThresholds,
    pub deficits: BTreeMap<String, f64>,
    pub status: AdequacyStatus,
}
