use axum::{extract::State, routing::post, Json, Router};
use serde::Deserialize;
use tracing::{info, instrument, warn};

use crate::{dto::MessageResponse, error::ApiError, state::AppState};

/// Credited to the balance on every mining action.
const MINING_REWARD: i64 = 10;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct StartMiningRequest {
    pub user_id: Option<i64>,
}

pub fn mining_routes() -> Router<AppState> {
    Router::new().route("/start", post(start_mining))
}

#[instrument(skip(state, payload))]
pub async fn start_mining(
    State(state): State<AppState>,
    Json(payload): Json<StartMiningRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    let Some(user_id) = payload.user_id else {
        warn!("mining request with missing user_id");
        return Err(ApiError::MissingFields("User ID is required!"));
    };

    sqlx::query("UPDATE users SET balance = balance + $1 WHERE id = $2")
        .bind(MINING_REWARD)
        .bind(user_id)
        .execute(&state.db)
        .await?;

    info!(user_id, reward = MINING_REWARD, "balance credited");
    Ok(Json(MessageResponse {
        message: "Mining started, balance updated!".into(),
    }))
}
