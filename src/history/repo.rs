use sqlx::PgPool;
use uuid::Uuid;

use crate::history::repo_types::HistoryItem;

const MAX_LIMIT: i64 = 200;

/// Append one item for `user_id` with a server-assigned timestamp.
pub async fn append(
    db: &PgPool,
    user_id: Uuid,
    kind: &str,
    payload: &serde_json::Value,
) -> Result<HistoryItem, sqlx::Error> {
    let item = sqlx::query_as::<_, HistoryItem>(
        r#"
        INSERT INTO history (user_id, kind, payload)
        VALUES ($1, $2, $3)
        RETURNING id, user_id, kind, payload, created_at
        "#,
    )
    .bind(user_id)
    .bind(kind)
    .bind(payload)
    .fetch_one(db)
    .await?;
    Ok(item)
}

/// List items owned by `user_id`, newest first. The owner filter lives in
/// the SQL itself; there is no unscoped variant of this query.
pub async fn list_by_user(
    db: &PgPool,
    user_id: Uuid,
    kind: Option<&str>,
    limit: i64,
) -> Result<Vec<HistoryItem>, sqlx::Error> {
    let limit = limit.clamp(1, MAX_LIMIT);
    let items = sqlx::query_as::<_, HistoryItem>(
        r#"
        SELECT id, user_id, kind, payload, created_at
        FROM history
        WHERE user_id = $1
          AND ($2::text IS NULL OR kind = $2)
        ORDER BY created_at DESC
        LIMIT $3
        "#,
    )
    .bind(user_id)
    .bind(kind)
    .bind(limit)
    .fetch_all(db)
    .await?;
    Ok(items)
}
