//! REST API surface - axum router, shared state, and error mapping.
//!
//! Handlers return `Result<_, Error>` and rely on the [`IntoResponse`]
//! implementation below to turn domain errors into HTTP statuses: validation
//! failures map to 400, credential failures to 401, missing users to 404, and
//! everything operational to 500. Every route under `/users`, `/expenses`,
//! and `/summary` requires a bearer token issued by `/auth/login`.

pub mod auth;
pub mod expenses;
pub mod summary;
pub mod users;

use crate::{
    core::allocation::AllocationConfig,
    entities::user,
    errors::{Error, Result},
};
use axum::{
    Router,
    http::{HeaderMap, Method, StatusCode, header},
    response::{IntoResponse, Json, Response},
    routing::{get, post, put},
};
use sea_orm::DatabaseConnection;
use serde::Serialize;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

/// Shared application state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: DatabaseConnection,
    /// Allocation new accounts are seeded with when registration omits one
    pub default_allocation: AllocationConfig,
}

impl AppState {
    /// Creates application state over an initialized database.
    #[must_use]
    pub const fn new(db: DatabaseConnection, default_allocation: AllocationConfig) -> Self {
        Self {
            db,
            default_allocation,
        }
    }
}

/// JSON error body returned for every failed request.
#[derive(Debug, Serialize)]
struct ErrorBody {
    message: String,
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::InvalidAllocation { .. }
            | Self::InvalidSalary { .. }
            | Self::UnknownCategory { .. }
            | Self::InvalidAmount { .. }
            | Self::EmptyNote
            | Self::InvalidMonth { .. } => StatusCode::BAD_REQUEST,
            Self::DuplicateEmail { .. } => StatusCode::CONFLICT,
            Self::InvalidCredentials | Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::UserNotFound { .. } => StatusCode::NOT_FOUND,
            Self::PasswordHash { .. }
            | Self::Config { .. }
            | Self::Database(_)
            | Self::Io(_)
            | Self::EnvVar(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status.is_server_error() {
            tracing::error!("Request failed: {self}");
        }

        let body = ErrorBody {
            message: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

/// Extracts the bearer token from the `Authorization` header.
pub(crate) fn bearer_token(headers: &HeaderMap) -> Result<&str> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .filter(|token| !token.is_empty())
        .ok_or(Error::Unauthorized)
}

/// Resolves the request's bearer token to a user, or fails with 401.
pub(crate) async fn require_user(state: &AppState, headers: &HeaderMap) -> Result<user::Model> {
    let token = bearer_token(headers)?;
    crate::core::auth::authenticate(&state.db, token).await
}

/// Builds the full application router.
#[must_use]
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(Any);

    Router::new()
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .route("/auth/logout", post(auth::logout))
        .route("/users/me", get(users::me))
        .route("/users/settings", put(users::update_settings))
        .route("/expenses", get(expenses::list).post(expenses::create))
        .route("/summary", get(summary::monthly))
        .route("/summary/chart", get(summary::chart))
        .layer(cors)
        .with_state(state)
}

/// Binds the listener and serves the API until the process is stopped.
pub async fn serve(bind_addr: &str, state: AppState) -> Result<()> {
    let app = router(state);
    let listener = tokio::net::TcpListener::bind(bind_addr).await?;
    info!("Listening on {bind_addr}");
    axum::serve(listener, app).await?;
    Ok(())
}
