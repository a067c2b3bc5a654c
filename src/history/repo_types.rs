use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

/// One history record as stored. Append-only: rows are never updated.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct HistoryItem {
    pub id: Uuid,
    #[serde(skip_serializing)]
    pub user_id: Uuid,
    pub kind: String,
    pub payload: serde_json::Value,
    pub created_at: OffsetDateTime,
}
