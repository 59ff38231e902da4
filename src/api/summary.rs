//! Summary endpoints - the monthly variance report and the daily series.
//!
//! Both endpoints take a consistent snapshot before computing: the user row
//! (salary + allocation) and the month's expenses are fetched first, then
//! handed to the pure engine, so a concurrent settings update can never
//! interleave with a partially read ledger.

use crate::{
    api::{AppState, require_user},
    core::{
        aggregate::DailySpend,
        allocation::AllocationConfig,
        expense,
        summary::{self, MonthlySummary},
    },
    errors::Result,
};
use axum::{
    extract::{Query, State},
    http::HeaderMap,
    response::Json,
};
use tracing::info;

use super::expenses::MonthQuery;

/// `GET /summary?month=YYYY-MM`
pub async fn monthly(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<MonthQuery>,
) -> Result<Json<MonthlySummary>> {
    let user = require_user(&state, &headers).await?;
    let month = query.resolve()?;
    info!("GET /summary - user: {}, month: {month}", user.id);

    let expenses = expense::expenses_for_month(&state.db, user.id, month).await?;
    let allocation = AllocationConfig::from_user(&user);
    let report = summary::compute_summary(user.salary, &allocation, &expenses)?;
    Ok(Json(report))
}

/// `GET /summary/chart?month=YYYY-MM`
pub async fn chart(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<MonthQuery>,
) -> Result<Json<Vec<DailySpend>>> {
    let user = require_user(&state, &headers).await?;
    let month = query.resolve()?;
    info!("GET /summary/chart - user: {}, month: {month}", user.id);

    let expenses = expense::expenses_for_month(&state.db, user.id, month).await?;
    Ok(Json(summary::compute_daily_series(&expenses)))
}
