//! Shared test utilities.
//!
//! Common helpers for setting up in-memory test databases and creating test
//! users, expenses, and logged-in API states with sensible defaults.

use crate::{
    api::AppState,
    core::{
        allocation::AllocationConfig,
        auth,
        category::Category,
        expense::{self, NewExpense},
        user,
    },
    entities,
    errors::Result,
};
use axum::http::{HeaderMap, header};
use chrono::NaiveDate;
use sea_orm::DatabaseConnection;

/// Password used by every test account.
pub const TEST_PASSWORD: &str = "password123";

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Creates a test user with sensible defaults.
///
/// # Defaults
/// * `display_name`: "Test User"
/// * `password`: [`TEST_PASSWORD`]
/// * `salary`: 60000.0
/// * allocation: the 50/20/20/5/5 default
pub async fn create_test_user(
    db: &DatabaseConnection,
    email: &str,
) -> Result<entities::user::Model> {
    user::create_user(
        db,
        email.to_string(),
        "Test User".to_string(),
        TEST_PASSWORD,
        60000.0,
        AllocationConfig::default(),
    )
    .await
}

/// Sets up a database with one user (`test@example.com`).
/// Returns (db, user) for common test scenarios.
pub async fn setup_with_user() -> Result<(DatabaseConnection, entities::user::Model)> {
    let db = setup_test_db().await?;
    let user = create_test_user(&db, "test@example.com").await?;
    Ok((db, user))
}

/// Creates a persisted expense dated in June 2024 on the given day.
pub async fn create_test_expense(
    db: &DatabaseConnection,
    user_id: i64,
    amount: f64,
    category: Category,
    day: u32,
) -> Result<entities::expense::Model> {
    expense::create_expense(
        db,
        user_id,
        NewExpense {
            amount,
            category,
            note: "Test expense".to_string(),
            date: NaiveDate::from_ymd_opt(2024, 6, day).expect("valid test date"),
        },
    )
    .await
}

/// Builds an unpersisted expense row for pure engine tests.
///
/// The category is passed as a raw string so tests can also exercise the
/// unknown-category path.
#[must_use]
pub fn make_expense(
    amount: f64,
    category: &str,
    year: i32,
    month: u32,
    day: u32,
) -> entities::expense::Model {
    entities::expense::Model {
        id: 0,
        user_id: 1,
        amount,
        category: category.to_string(),
        note: "test".to_string(),
        date: NaiveDate::from_ymd_opt(year, month, day).expect("valid test date"),
    }
}

/// Creates API state over a fresh in-memory database.
pub async fn setup_test_state() -> Result<AppState> {
    let db = setup_test_db().await?;
    Ok(AppState::new(db, AllocationConfig::default()))
}

/// Sets up API state with one registered, logged-in user.
/// Returns (state, user, bearer token).
pub async fn setup_logged_in() -> Result<(AppState, entities::user::Model, String)> {
    let state = setup_test_state().await?;
    let user = create_test_user(&state.db, "test@example.com").await?;
    let session = auth::login(&state.db, "test@example.com", TEST_PASSWORD).await?;
    Ok((state, user, session.token))
}

/// Builds request headers carrying a bearer token.
#[must_use]
pub fn auth_headers(token: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(
        header::AUTHORIZATION,
        format!("Bearer {token}").parse().expect("valid header"),
    );
    headers
}
