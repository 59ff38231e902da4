//! Authentication endpoints - register, login, logout.

use crate::{
    api::{AppState, bearer_token, users::UserResponse},
    core::{allocation::AllocationConfig, auth, user},
    errors::Result,
};
use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Body of `POST /auth/register`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    /// Login email, unique
    pub email: String,
    /// Human-readable display name
    pub display_name: String,
    /// Plaintext password, hashed before storage
    pub password: String,
    /// Monthly salary; defaults to 0 until set in settings
    #[serde(default)]
    pub salary: f64,
    /// Optional starting allocation; the configured default applies when absent
    pub budget_ratio: Option<AllocationConfig>,
}

/// Body of `POST /auth/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    /// Registered email
    pub email: String,
    /// Plaintext password
    pub password: String,
}

/// Body returned by `POST /auth/login`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    /// Opaque bearer token for subsequent requests
    pub access_token: String,
}

/// `POST /auth/register`
pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<UserResponse>)> {
    info!("POST /auth/register - email: {}", request.email);

    let allocation = request.budget_ratio.unwrap_or(state.default_allocation);
    let user = user::create_user(
        &state.db,
        request.email,
        request.display_name,
        &request.password,
        request.salary,
        allocation,
    )
    .await?;

    Ok((StatusCode::CREATED, Json(UserResponse::from(user))))
}

/// `POST /auth/login`
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<LoginResponse>> {
    info!("POST /auth/login - email: {}", request.email);

    let session = auth::login(&state.db, &request.email, &request.password).await?;
    Ok(Json(LoginResponse {
        access_token: session.token,
    }))
}

/// `POST /auth/logout`
pub async fn logout(State(state): State<AppState>, headers: HeaderMap) -> Result<StatusCode> {
    let token = bearer_token(&headers)?;
    auth::logout(&state.db, token).await?;
    info!("POST /auth/logout - session revoked");
    Ok(StatusCode::NO_CONTENT)
}
