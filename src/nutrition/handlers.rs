use std::collections::BTreeMap;

use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use tracing::{info, instrument};

use crate::error::ApiError;
use crate::nutrition::dto::{CalculateRequest, FoodsResponse, PredictRequest, PredictResponse};
use crate::nutrition::services::{evaluate, DEFAULT_GRAMS};
use crate::state::AppState;

pub fn read_routes() -> Router<AppState> {
    Router::new().route("/foods", get(list_foods))
}

pub fn predict_routes() -> Router<AppState> {
    Router::new()
        .route("/predict", post(predict))
        .route("/calculate", post(calculate))
}

#[instrument(skip(state))]
pub async fn list_foods(State(state): State<AppState>) -> Json<FoodsResponse> {
    Json(FoodsResponse {
        foods: state.foods.food_names(),
    })
}

#[instrument(skip(state, payload))]
pub async fn predict(
    State(state): State<AppState>,
    Json(payload): Json<PredictRequest>,
) -> Result<Json<PredictResponse>, ApiError> {
    let record = evaluate(&state.foods, payload.weight, &payload.food_grams)?;
    info!(weight = payload.weight, foods = payload.food_grams.len(), status = ?record.status, "prediction computed");
    Ok(Json(PredictResponse {
        weight: payload.weight,
        selected_foods: None,
        food_grams: payload.food_grams,
        totals: record.totals,
        requirements: record.requirements,
        deficits: record.deficits,
        status: record.status,
    }))
}

/// Compatibility shim for the older /calculate route: same evaluator, with
/// bare food lists defaulting each selection to 100 g.
#[instrument(skip(state, payload))]
pub async fn calculate(
    State(state): State<AppState>,
    Json(payload): Json<CalculateRequest>,
) -> Result<Json<PredictResponse>, ApiError> {
    let food_grams: BTreeMap<String, f64> = match payload.food_grams {
        Some(grams) => grams,
        None => payload
            .foods
            .iter()
            .map(|f| (f.clone(), DEFAULT_GRAMS))
            .collect(),
    };

    let record = evaluate(&state.foods, payload.weight, &food_grams)?;
    info!(weight = payload.weight, foods = food_grams.len(), status = ?record.status, "prediction computed (legacy route)");
    Ok(Json(PredictResponse {
        weight: payload.weight,
        selected_foods: Some(payload.foods),
        food_grams,
        totals: record.totals,
        requirements: record.requirements,
        deficits: record.deficits,
        status: record.status,
    }))
}
