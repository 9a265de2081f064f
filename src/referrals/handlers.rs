use axum::{extract::State, routing::post, Json, Router};
use serde::Deserialize;
use tracing::{info, instrument, warn};

use crate::{dto::MessageResponse, error::ApiError, state::AppState};

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct AddReferralRequest {
    pub user_id: Option<i64>,
    pub referred_id: Option<i64>,
}

pub fn referral_routes() -> Router<AppState> {
    Router::new().route("/add", post(add_referral))
}

#[instrument(skip(state, payload))]
pub async fn add_referral(
    State(state): State<AppState>,
    Json(payload): Json<AddReferralRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    let (Some(user_id), Some(referred_id)) = (payload.user_id, payload.referred_id) else {
        warn!("referral insert with missing fields");
        return Err(ApiError::MissingFields(
            "User ID and Referred ID are required!",
        ));
    };

    sqlx::query("INSERT INTO referrals (user_id, referred_id) VALUES ($1, $2)")
        .bind(user_id)
        .bind(referred_id)
        .execute(&state.db)
        .await?;

    info!(user_id, referred_id, "referral added");
    Ok(Json(MessageResponse {
        message: "Referral added successfully!".into(),
    }))
}
