//! Monthly summary computation - recommended vs. actual vs. difference per
//! bucket, plus total balance.
//!
//! [`compute_summary`] is a pure function of (salary, allocation, expenses):
//! no I/O, no mutation of inputs, identical output for identical inputs. It
//! refuses to compute against an invalid allocation or salary rather than
//! producing a misleading report, and returns no partial results on failure.
//!
//! Rounding policy: every monetary output is rounded half-away-from-zero to
//! two decimal places. `total_spent` is the sum of the already rounded
//! per-bucket actuals, so the actuals always add up to it exactly.

use crate::{
    core::{
        aggregate::{self, DailySpend},
        allocation::{AllocationConfig, Bucket},
    },
    entities::expense,
    errors::{Error, Result},
};
use serde::{Deserialize, Serialize};

/// Rounds a currency amount half-away-from-zero to two decimal places.
///
/// Operates on the binary double as stored: a literal like 1.005 sits just
/// below the true tie (1.00499...), so it rounds down, not up.
#[must_use]
pub fn round_currency(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

/// Recommended, actual, and difference amounts for one bucket.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BucketVariance {
    /// Salary share this bucket should receive: salary x percentage / 100
    pub recommended: f64,
    /// Sum of mapped expenses in this bucket for the month
    pub actual: f64,
    /// Recommended minus actual; negative means overspent
    pub difference: f64,
}

/// Derived monthly report, recomputed on demand and never persisted.
///
/// The wire shape matches what the dashboard reads: bucket variances and
/// `totalSpent` nested under an `actual` object keyed `<bucket>Balance`, with
/// `totalBalance` at the top level.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(into = "SummaryWire", from = "SummaryWire")]
pub struct MonthlySummary {
    /// Variance for the needs bucket
    pub needs: BucketVariance,
    /// Variance for the wants bucket
    pub wants: BucketVariance,
    /// Variance for the savings bucket
    pub savings: BucketVariance,
    /// Variance for the investments bucket
    pub investments: BucketVariance,
    /// Variance for the emergency bucket
    pub emergency: BucketVariance,
    /// Sum of all expense amounts in the month
    pub total_spent: f64,
    /// Salary minus total spent
    pub total_balance: f64,
}

impl MonthlySummary {
    /// Returns the variance entry for a bucket.
    #[must_use]
    pub const fn bucket(&self, bucket: Bucket) -> &BucketVariance {
        match bucket {
            Bucket::Needs => &self.needs,
            Bucket::Wants => &self.wants,
            Bucket::Savings => &self.savings,
            Bucket::Investments => &self.investments,
            Bucket::Emergency => &self.emergency,
        }
    }
}

/// JSON form of [`MonthlySummary`].
#[derive(Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SummaryWire {
    actual: ActualWire,
    total_balance: f64,
}

/// The `actual` object of the wire shape.
#[derive(Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ActualWire {
    needs_balance: BucketVariance,
    wants_balance: BucketVariance,
    savings_balance: BucketVariance,
    investments_balance: BucketVariance,
    emergency_balance: BucketVariance,
    total_spent: f64,
}

impl From<MonthlySummary> for SummaryWire {
    fn from(summary: MonthlySummary) -> Self {
        Self {
            actual: ActualWire {
                needs_balance: summary.needs,
                wants_balance: summary.wants,
                savings_balance: summary.savings,
                investments_balance: summary.investments,
                emergency_balance: summary.emergency,
                total_spent: summary.total_spent,
            },
            total_balance: summary.total_balance,
        }
    }
}

impl From<SummaryWire> for MonthlySummary {
    fn from(wire: SummaryWire) -> Self {
        Self {
            needs: wire.actual.needs_balance,
            wants: wire.actual.wants_balance,
            savings: wire.actual.savings_balance,
            investments: wire.actual.investments_balance,
            emergency: wire.actual.emergency_balance,
            total_spent: wire.actual.total_spent,
            total_balance: wire.total_balance,
        }
    }
}

/// Computes the monthly summary from salary, allocation, and the month's
/// expense ledger.
///
/// The caller pre-filters expenses to the target month (see
/// [`aggregate::select_month`]).
///
/// # Errors
/// * [`Error::InvalidSalary`] - salary is negative or not finite
/// * [`Error::InvalidAllocation`] - allocation does not sum to 100
/// * [`Error::UnknownCategory`] - an expense carries an out-of-domain category
pub fn compute_summary(
    salary: f64,
    allocation: &AllocationConfig,
    expenses: &[expense::Model],
) -> Result<MonthlySummary> {
    if salary < 0.0 || !salary.is_finite() {
        return Err(Error::InvalidSalary { salary });
    }
    allocation.validate()?;

    let totals = aggregate::aggregate_by_bucket(expenses)?;

    let variance = |bucket: Bucket| {
        let recommended =
            round_currency(salary * f64::from(allocation.percentage(bucket)) / 100.0);
        let actual = round_currency(totals.get(bucket));
        BucketVariance {
            recommended,
            actual,
            difference: round_currency(recommended - actual),
        }
    };

    let needs = variance(Bucket::Needs);
    let wants = variance(Bucket::Wants);
    let savings = variance(Bucket::Savings);
    let investments = variance(Bucket::Investments);
    let emergency = variance(Bucket::Emergency);

    // Summing the rounded actuals keeps sum(actual) == total_spent exact.
    let total_spent = round_currency(
        needs.actual + wants.actual + savings.actual + investments.actual + emergency.actual,
    );
    let total_balance = round_currency(salary - total_spent);

    Ok(MonthlySummary {
        needs,
        wants,
        savings,
        investments,
        emergency,
        total_spent,
        total_balance,
    })
}

/// Computes the daily spending series for the month's expense ledger.
///
/// Thin re-export seam so callers of the reporter get both halves of the
/// dashboard (summary and chart) from one module.
#[must_use]
pub fn compute_daily_series(expenses: &[expense::Model]) -> Vec<DailySpend> {
    aggregate::aggregate_by_day(expenses)
}
