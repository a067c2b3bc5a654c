mod dto;
pub mod handlers;
pub mod requirements;
pub mod services;
pub mod table;

use crate::state::AppState;
use axum::Router;

pub fn router() -> Router<AppState> {
    Router::new()
        .merge(handlers::read_routes())
        .merge(handlers::predict_routes())
}
