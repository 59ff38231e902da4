//! Expense endpoints - month-scoped listing and batch creation.

use crate::{
    api::{AppState, require_user},
    core::{
        aggregate::YearMonth,
        category::Category,
        expense::{self, NewExpense},
    },
    entities::expense::Model as ExpenseModel,
    errors::Result,
};
use axum::{
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    response::Json,
};
use chrono::{Datelike, NaiveDate, Utc};
use serde::Deserialize;
use tracing::info;

/// Query parameters shared by the expense and summary endpoints.
#[derive(Debug, Deserialize)]
pub struct MonthQuery {
    /// Target month as `YYYY-MM`; defaults to the current month
    pub month: Option<String>,
}

impl MonthQuery {
    /// Resolves the query to a concrete month, defaulting to today's.
    pub fn resolve(&self) -> Result<YearMonth> {
        match &self.month {
            Some(raw) => raw.parse(),
            None => {
                let today = Utc::now().date_naive();
                Ok(YearMonth {
                    year: today.year(),
                    month: today.month(),
                })
            }
        }
    }
}

/// One expense record as submitted by the client.
#[derive(Debug, Deserialize)]
pub struct ExpenseSubmission {
    /// Amount in currency units, strictly positive
    pub amount: f64,
    /// Category tag; out-of-domain values fail deserialization
    pub category: Category,
    /// Free-text note, non-empty
    pub note: String,
    /// Calendar date of the expense
    pub date: NaiveDate,
}

impl From<ExpenseSubmission> for NewExpense {
    fn from(submission: ExpenseSubmission) -> Self {
        Self {
            amount: submission.amount,
            category: submission.category,
            note: submission.note,
            date: submission.date,
        }
    }
}

/// `GET /expenses?month=YYYY-MM`
pub async fn list(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<MonthQuery>,
) -> Result<Json<Vec<ExpenseModel>>> {
    let user = require_user(&state, &headers).await?;
    let month = query.resolve()?;
    info!("GET /expenses - user: {}, month: {month}", user.id);

    let expenses = expense::expenses_for_month(&state.db, user.id, month).await?;
    Ok(Json(expenses))
}

/// `POST /expenses` - accepts an array of records, inserted atomically.
pub async fn create(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(submissions): Json<Vec<ExpenseSubmission>>,
) -> Result<(StatusCode, Json<Vec<ExpenseModel>>)> {
    let user = require_user(&state, &headers).await?;
    info!("POST /expenses - user: {}, count: {}", user.id, submissions.len());

    let new_expenses = submissions.into_iter().map(Into::into).collect();
    let created = expense::create_expenses(&state.db, user.id, new_expenses).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::errors::Error;
    use crate::test_utils::*;
    use axum::response::IntoResponse;

    fn submission(amount: f64, category: Category, day: u32) -> ExpenseSubmission {
        ExpenseSubmission {
            amount,
            category,
            note: "test".to_string(),
            date: NaiveDate::from_ymd_opt(2024, 6, day).unwrap(),
        }
    }

    #[test]
    fn test_month_query_parses_explicit_month() {
        let query = MonthQuery {
            month: Some("2024-06".to_string()),
        };
        assert_eq!(query.resolve().unwrap(), YearMonth { year: 2024, month: 6 });
    }

    #[test]
    fn test_month_query_defaults_to_current_month() {
        let query = MonthQuery { month: None };
        let resolved = query.resolve().unwrap();
        let today = Utc::now().date_naive();
        assert_eq!(resolved.year, today.year());
        assert_eq!(resolved.month, today.month());
    }

    #[test]
    fn test_month_query_rejects_garbage() {
        let query = MonthQuery {
            month: Some("June".to_string()),
        };
        assert!(matches!(
            query.resolve().unwrap_err(),
            Error::InvalidMonth { .. }
        ));
    }

    #[test]
    fn test_submission_rejects_unknown_category_at_deserialization() {
        let result: std::result::Result<ExpenseSubmission, _> = serde_json::from_str(
            r#"{"amount": 10.0, "category": "rent", "note": "x", "date": "2024-06-01"}"#,
        );
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_create_then_list_round_trip() -> Result<()> {
        let (state, _user, token) = setup_logged_in().await?;

        let (status, Json(created)) = create(
            State(state.clone()),
            auth_headers(&token),
            Json(vec![
                submission(100.0, Category::Food, 3),
                submission(50.0, Category::Transport, 3),
            ]),
        )
        .await?;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created.len(), 2);

        let Json(listed) = list(
            State(state),
            auth_headers(&token),
            Query(MonthQuery {
                month: Some("2024-06".to_string()),
            }),
        )
        .await?;
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].category, "food");

        Ok(())
    }

    #[tokio::test]
    async fn test_list_scoped_to_requesting_user() -> Result<()> {
        let (state, _user, token) = setup_logged_in().await?;

        // Another user with their own expense
        let other = create_test_user(&state.db, "other@example.com").await?;
        crate::core::expense::create_expense(
            &state.db,
            other.id,
            NewExpense {
                amount: 999.0,
                category: Category::Shopping,
                note: "not mine".to_string(),
                date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            },
        )
        .await?;

        let Json(listed) = list(
            State(state),
            auth_headers(&token),
            Query(MonthQuery {
                month: Some("2024-06".to_string()),
            }),
        )
        .await?;
        assert!(listed.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn test_create_requires_token() -> Result<()> {
        let state = setup_test_state().await?;

        let result = create(
            State(state),
            HeaderMap::new(),
            Json(vec![submission(10.0, Category::Food, 1)]),
        )
        .await;
        let err = result.unwrap_err();
        assert_eq!(err.into_response().status(), StatusCode::UNAUTHORIZED);

        Ok(())
    }

    #[tokio::test]
    async fn test_create_invalid_amount_bad_request() -> Result<()> {
        let (state, _user, token) = setup_logged_in().await?;

        let result = create(
            State(state),
            auth_headers(&token),
            Json(vec![submission(-5.0, Category::Food, 1)]),
        )
        .await;
        let err = result.unwrap_err();
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);

        Ok(())
    }
}
