use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::history::repo_types::HistoryItem;
use crate::nutrition::services::AdequacyStatus;
use crate::nutrition::table::NutrientVector;

/// Body for POST /history. Tagged by `kind` so each payload's fields are
/// statically checked instead of accepting an open-ended blob.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", content = "payload", rename_all = "lowercase")]
pub enum HistoryEntry {
    Search(SearchPayload),
    Predict(PredictionPayload),
}

impl HistoryEntry {
    pub fn kind(&self) -> &'static str {
        match self {
            HistoryEntry::Search(_) => "search",
            HistoryEntry::Predict(_) => "predict",
        }
    }

    pub fn payload_json(&self) -> serde_json::Result<serde_json::Value> {
        match self {
            HistoryEntry::Search(p) => serde_json::to_value(p),
            HistoryEntry::Predict(p) => serde_json::to_value(p),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchPayload {
    pub query: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionPayload {
    pub weight: f64,
    pub food_grams: BTreeMap<String, f64>,
    pub status: AdequacyStatus,
    pub totals: NutrientVector,
    #[serde(default)]
    pub deficits: BTreeMap<String, f64>,
}

/// Filter for GET /history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HistoryKind {
    Search,
    Predict,
}

impl HistoryKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            HistoryKind::Search => "search",
            HistoryKind::Predict => "predict",
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    #[serde(default = "default_limit")]
    pub limit: i64,
    #[serde(default)]
    pub kind: Option<HistoryKind>,
}

fn default_limit() -> i64 {
    50
}

#[derive(Debug, Serialize)]
pub struct HistoryListResponse {
    pub items: Vec<HistoryItem>,
}
