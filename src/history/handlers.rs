use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use tracing::{info, instrument};

use crate::auth::services::AuthUser;
use crate::error::ApiError;
use crate::history::dto::{HistoryEntry, HistoryListResponse, HistoryQuery};
use crate::history::repo;
use crate::history::repo_types::HistoryItem;
use crate::state::AppState;

pub fn history_routes() -> Router<AppState> {
    Router::new().route("/history", get(list_history).post(create_history))
}

#[instrument(skip(state, entry))]
pub async fn create_history(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(entry): Json<HistoryEntry>,
) -> Result<Json<HistoryItem>, ApiError> {
    let payload = entry
        .payload_json()
        .map_err(|e| ApiError::Validation(format!("invalid payload: {e}")))?;
    let item = repo::append(&state.db, user_id, entry.kind(), &payload).await?;
    info!(user_id = %user_id, kind = entry.kind(), item_id = %item.id, "history item appended");
    Ok(Json(item))
}

#[instrument(skip(state))]
pub async fn list_history(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Query(query): Query<HistoryQuery>,
) -> Result<Json<HistoryListResponse>, ApiError> {
    let kind = query.kind.map(|k| k.as_str());
    let items = repo::list_by_user(&state.db, user_id, kind, query.limit).await?;
    Ok(Json(HistoryListResponse { items }))
}
