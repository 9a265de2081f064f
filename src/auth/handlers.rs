use axum::{extract::State, routing::post, Json, Router};
use tracing::{info, instrument, warn};

use crate::{
    auth::{
        dto::{LoginRequest, LoginResponse, PublicUser, RegisterRequest},
        password::{hash_password, verify_password},
        repo::User,
    },
    dto::{required, MessageResponse},
    error::ApiError,
    state::AppState,
};

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
}

#[instrument(skip(state, payload))]
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    let (Some(email), Some(username), Some(password)) = (
        required(payload.email.as_ref()),
        required(payload.username.as_ref()),
        required(payload.password.as_ref()),
    ) else {
        warn!("registration with missing fields");
        return Err(ApiError::MissingFields(
            "Email, Username, and Password are required!",
        ));
    };

    // Application-level duplicate check; the unique indexes still back it up
    // against a concurrent identical registration.
    if User::find_by_email_or_username(&state.db, email, username)
        .await?
        .is_some()
    {
        warn!(%email, %username, "email or username already registered");
        return Err(ApiError::DuplicateUser);
    }

    let hash = hash_password(password)?;
    let user = User::create(&state.db, username, email, &hash).await?;

    info!(user_id = user.id, username = %user.username, "user registered");
    Ok(Json(MessageResponse {
        message: format!("User {} registered successfully!", user.username),
    }))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let (Some(email), Some(password)) = (
        required(payload.email.as_ref()),
        required(payload.password.as_ref()),
    ) else {
        warn!("login with missing fields");
        return Err(ApiError::MissingFields("Email and Password are required!"));
    };

    let user = User::find_by_email(&state.db, email)
        .await?
        .ok_or(ApiError::UserNotFound)?;

    if !verify_password(password, &user.password_hash)? {
        warn!(user_id = user.id, "login with incorrect password");
        return Err(ApiError::IncorrectPassword);
    }

    info!(user_id = user.id, username = %user.username, "user logged in");
    Ok(Json(LoginResponse {
        message: "Login successful!".into(),
        user: PublicUser {
            id: user.id,
            username: user.username,
            email: user.email,
            balance: user.balance,
            streak: user.streak,
        },
    }))
}
