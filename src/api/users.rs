//! User profile and settings endpoints.

use crate::{
    api::{AppState, require_user},
    core::{allocation::AllocationConfig, user},
    errors::Result,
};
use axum::{extract::State, http::HeaderMap, response::Json};
use serde::{Deserialize, Serialize};
use tracing::info;

/// A user's budget settings as exposed over the API.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsResponse {
    /// Percentage split of salary across the five buckets
    pub budget_ratio: AllocationConfig,
}

/// User profile returned by `/users/me` and after settings updates.
///
/// The password hash never leaves the entity layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    /// User id
    pub id: i64,
    /// Login email
    pub email: String,
    /// Display name
    pub display_name: String,
    /// Monthly salary
    pub salary: f64,
    /// Budget settings
    pub settings: SettingsResponse,
}

impl From<crate::entities::user::Model> for UserResponse {
    fn from(user: crate::entities::user::Model) -> Self {
        let budget_ratio = AllocationConfig::from_user(&user);
        Self {
            id: user.id,
            email: user.email,
            display_name: user.display_name,
            salary: user.salary,
            settings: SettingsResponse { budget_ratio },
        }
    }
}

/// Body of `PUT /users/settings`: `{ "settings": { ... } }`, matching the
/// shape the original client submits.
#[derive(Debug, Deserialize)]
pub struct UpdateSettingsRequest {
    /// The replacement settings
    pub settings: SettingsPayload,
}

/// Settings payload: the allocation is mandatory and replaced wholesale;
/// salary is optional and unchanged when absent.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsPayload {
    /// New allocation, must sum to 100
    pub budget_ratio: AllocationConfig,
    /// New monthly salary, if changing
    pub salary: Option<f64>,
}

/// `GET /users/me`
pub async fn me(State(state): State<AppState>, headers: HeaderMap) -> Result<Json<UserResponse>> {
    let user = require_user(&state, &headers).await?;
    info!("GET /users/me - user: {}", user.id);
    Ok(Json(UserResponse::from(user)))
}

/// `PUT /users/settings`
pub async fn update_settings(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<UpdateSettingsRequest>,
) -> Result<Json<UserResponse>> {
    let user = require_user(&state, &headers).await?;
    info!("PUT /users/settings - user: {}", user.id);

    let updated = user::update_settings(
        &state.db,
        user.id,
        request.settings.salary,
        request.settings.budget_ratio,
    )
    .await?;

    Ok(Json(UserResponse::from(updated)))
}
