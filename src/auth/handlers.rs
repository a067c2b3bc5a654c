use axum::{extract::{FromRef, State}, routing::post, Json, Router};
use tracing::{error, info, instrument, warn};

use crate::{
    auth::{
        dto::{AuthResponse, LoginRequest, PublicUser, RegisterRequest},
        repo_types::User,
        services::{check_credentials, hash_password, is_valid_email, JwtKeys},
    },
    error::ApiError,
    state::AppState,
};

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
}

/// A unique-violation from the insert means a concurrent registration won
/// the race for this email; report it as a duplicate, not a storage failure.
pub fn map_create_error(e: sqlx::Error) -> ApiError {
    match e {
        sqlx::Error::Database(db) if db.code().as_deref() == Some("23505") => {
            ApiError::DuplicateEmail
        }
        other => ApiError::Storage(other),
    }
}

#[instrument(skip(state, payload))]
pub async fn register(
    State(state): State<AppState>,
    Json(mut payload): Json<RegisterRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    payload.email = payload.email.trim().to_lowercase();

    if !is_valid_email(&payload.email) {
        warn!(email = %payload.email, "invalid email");
        return Err(ApiError::Validation("Invalid email".into()));
    }

    if payload.password.len() < 8 {
        warn!("password too short");
        return Err(ApiError::Validation("Password too short".into()));
    }

    // Ensure email is not taken; second registration never touches the
    // stored credential
    if User::find_by_email(&state.db, &payload.email).await?.is_some() {
        warn!(email = %payload.email, "email already registered");
        return Err(ApiError::DuplicateEmail);
    }

    let hash = hash_password(&payload.password).map_err(|e| {
        error!(error = %e, "hash_password failed");
        ApiError::Internal(e)
    })?;

    let user = User::create(&state.db, &payload.email, &hash)
        .await
        .map_err(map_create_error)?;

    let keys = JwtKeys::from_ref(&state);
    let token = keys.sign(user.id, &user.email).map_err(|e| {
        error!(error = %e, "jwt sign failed");
        ApiError::Internal(e)
    })?;

    info!(user_id = %user.id, email = %user.email, "user registered");
    Ok(Json(AuthResponse {
        token,
        user: PublicUser {
            id: user.id,
            email: user.email,
        },
    }))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    Json(mut payload): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    payload.email = payload.email.trim().to_lowercase();

    let user = User::find_by_email(&state.db, &payload.email).await?;
    let user = match check_credentials(user, &payload.password) {
        Ok(u) => u,
        Err(e) => {
            if matches!(e, ApiError::InvalidCredentials) {
                warn!(email = %payload.email, "login rejected");
            }
            return Err(e);
        }
    };

    let keys = JwtKeys::from_ref(&state);
    let token = keys.sign(user.id, &user.email).map_err(|e| {
        error!(error = %e, "jwt sign failed");
        ApiError::Internal(e)
    })?;

    info!(user_id = %user.id, email = %user.email, "user logged in");
    Ok(Json(AuthResponse {
        token,
        user: PublicUser {
            id: user.id,
            email: user.email,
        },
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn public_user_serialization() {
        let response = PublicUser {
            id: uuid::Uuid::new_v4(),
            email: "test@example.com".to_string(),
        };

        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("test@example.com"));
        assert!(json.contains("id"));
    }

    #[test]
    fn auth_response_exposes_single_token() {
        let response = AuthResponse {
            token: "abc".into(),
            user: PublicUser {
                id: uuid::Uuid::new_v4(),
                email: "test@example.com".into(),
            },
        };
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["token"], "abc");
        assert_eq!(value["user"]["email"], "test@example.com");
        assert!(value.get("password").is_none());
    }

    #[test]
    fn non_database_errors_stay_storage_errors() {
        let err = map_create_error(sqlx::Error::PoolClosed);
        assert!(matches!(err, ApiError::Storage(_)));
    }
}
