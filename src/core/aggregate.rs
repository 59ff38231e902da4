//! Expense aggregation - the fold from a month's ledger into per-bucket and
//! per-day sums.
//!
//! Everything here is pure and synchronous: the functions take an immutable
//! slice of expense rows and return freshly built values, so they are safe to
//! call concurrently with no locking. The calling layer is responsible for
//! handing in a consistent snapshot (a single user's expenses for a single
//! month).

use crate::{
    core::{
        allocation::Bucket,
        category::Category,
    },
    entities::expense,
    errors::{Error, Result},
};
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::str::FromStr;

/// A calendar month, parsed from the `YYYY-MM` form the API uses.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct YearMonth {
    /// Calendar year
    pub year: i32,
    /// Month of year, 1-12
    pub month: u32,
}

impl YearMonth {
    /// Returns true iff the date falls inside this calendar month.
    ///
    /// Month membership is by year/month equality, which is calendar-correct
    /// for every month length without computing last days.
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }

    /// First day of the month.
    #[must_use]
    pub fn first_day(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
    }

    /// Last day of the month (28, 29, 30, or 31 depending on the calendar).
    #[must_use]
    pub fn last_day(&self) -> Option<NaiveDate> {
        let (next_year, next_month) = if self.month == 12 {
            (self.year + 1, 1)
        } else {
            (self.year, self.month + 1)
        };
        NaiveDate::from_ymd_opt(next_year, next_month, 1)?.pred_opt()
    }
}

impl FromStr for YearMonth {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || Error::InvalidMonth {
            input: s.to_string(),
        };

        let (year_str, month_str) = s.split_once('-').ok_or_else(invalid)?;
        let year: i32 = year_str.parse().map_err(|_| invalid())?;
        let month: u32 = month_str.parse().map_err(|_| invalid())?;

        if !(1..=12).contains(&month) {
            return Err(invalid());
        }

        Ok(Self { year, month })
    }
}

impl std::fmt::Display for YearMonth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

/// Sum of expense amounts per bucket.
///
/// All five buckets are always present; buckets with no matching expenses hold
/// zero rather than being absent. Callers depend on that.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct BucketTotals {
    /// Total spent against the needs bucket
    pub needs: f64,
    /// Total spent against the wants bucket
    pub wants: f64,
    /// Total spent against the savings bucket (always zero in practice, see
    /// [`Category::bucket`])
    pub savings: f64,
    /// Total spent against the investments bucket
    pub investments: f64,
    /// Total spent against the emergency bucket
    pub emergency: f64,
}

impl BucketTotals {
    /// Returns the total for a bucket.
    #[must_use]
    pub const fn get(&self, bucket: Bucket) -> f64 {
        match bucket {
            Bucket::Needs => self.needs,
            Bucket::Wants => self.wants,
            Bucket::Savings => self.savings,
            Bucket::Investments => self.investments,
            Bucket::Emergency => self.emergency,
        }
    }

    fn add(&mut self, bucket: Bucket, amount: f64) {
        match bucket {
            Bucket::Needs => self.needs += amount,
            Bucket::Wants => self.wants += amount,
            Bucket::Savings => self.savings += amount,
            Bucket::Investments => self.investments += amount,
            Bucket::Emergency => self.emergency += amount,
        }
    }
}

/// One point of the daily spending series: total spent on one day of the month.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DailySpend {
    /// Day of month, 1-31
    pub day: u32,
    /// Total amount spent that day, across all categories
    pub total: f64,
}

/// Groups expenses by their allocation bucket and sums amounts per bucket.
///
/// Fails with [`Error::UnknownCategory`] if a row carries a category string
/// outside the fixed enumeration - a data integrity bug upstream, since
/// categories are validated at write time.
pub fn aggregate_by_bucket(expenses: &[expense::Model]) -> Result<BucketTotals> {
    let mut totals = BucketTotals::default();
    for expense in expenses {
        let category: Category = expense.category.parse()?;
        totals.add(category.bucket(), expense.amount);
    }
    Ok(totals)
}

/// Groups expenses by calendar day-of-month and sums amounts per day.
///
/// Emits only days with at least one expense (sparse series - consumers treat
/// missing days as zero), sorted ascending by day with no duplicates.
#[must_use]
pub fn aggregate_by_day(expenses: &[expense::Model]) -> Vec<DailySpend> {
    let mut per_day: BTreeMap<u32, f64> = BTreeMap::new();
    for expense in expenses {
        *per_day.entry(expense.date.day()).or_insert(0.0) += expense.amount;
    }

    per_day
        .into_iter()
        .map(|(day, total)| DailySpend {
            day,
            total: crate::core::summary::round_currency(total),
        })
        .collect()
}

/// Returns the subsequence of expenses dated within the given calendar month.
///
/// The boundary every other computation depends on: inclusive of the first and
/// last day of the month, respecting variable month lengths.
#[must_use]
pub fn select_month(expenses: Vec<expense::Model>, month: YearMonth) -> Vec<expense::Model> {
    expenses
        .into_iter()
        .filter(|expense| month.contains(expense.date))
        .collect()
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::test_utils::make_expense;

    #[test]
    fn test_year_month_parse() {
        let ym: YearMonth = "2024-06".parse().unwrap();
        assert_eq!(ym, YearMonth { year: 2024, month: 6 });
        assert_eq!(ym.to_string(), "2024-06");
    }

    #[test]
    fn test_year_month_parse_rejects_garbage() {
        for input in ["", "2024", "2024-13", "2024-00", "June 2024", "2024-6x"] {
            let result = input.parse::<YearMonth>();
            assert!(result.is_err(), "expected {input:?} to fail");
        }
    }

    #[test]
    fn test_year_month_last_day_variable_lengths() {
        let cases = [
            ("2023-02", 28), // non-leap February
            ("2024-02", 29), // leap February
            ("2024-04", 30),
            ("2024-01", 31),
        ];
        for (input, expected_day) in cases {
            let ym: YearMonth = input.parse().unwrap();
            assert_eq!(ym.last_day().unwrap().day(), expected_day);
            assert_eq!(ym.first_day().unwrap().day(), 1);
        }
    }

    #[test]
    fn test_aggregate_by_bucket_empty_is_all_zero() {
        let totals = aggregate_by_bucket(&[]).unwrap();
        for bucket in Bucket::ALL {
            assert_eq!(totals.get(bucket), 0.0);
        }
    }

    #[test]
    fn test_aggregate_by_bucket_groups_and_sums() {
        let expenses = vec![
            make_expense(100.0, "food", 2024, 6, 3),
            make_expense(50.0, "transport", 2024, 6, 3),
            make_expense(25.0, "shopping", 2024, 6, 5),
            make_expense(200.0, "investments", 2024, 6, 10),
        ];

        let totals = aggregate_by_bucket(&expenses).unwrap();
        assert_eq!(totals.get(Bucket::Needs), 150.0); // food + transport
        assert_eq!(totals.get(Bucket::Wants), 25.0);
        assert_eq!(totals.get(Bucket::Savings), 0.0);
        assert_eq!(totals.get(Bucket::Investments), 200.0);
        assert_eq!(totals.get(Bucket::Emergency), 0.0);
    }

    #[test]
    fn test_aggregate_by_bucket_rejects_unknown_category() {
        // A row written outside the validated boundary
        let expenses = vec![make_expense(10.0, "rent", 2024, 6, 1)];
        let err = aggregate_by_bucket(&expenses).unwrap_err();
        assert!(matches!(err, Error::UnknownCategory { category } if category == "rent"));
    }

    #[test]
    fn test_aggregate_by_day_empty() {
        assert!(aggregate_by_day(&[]).is_empty());
    }

    #[test]
    fn test_aggregate_by_day_sums_and_sorts() {
        // Deliberately out of order
        let expenses = vec![
            make_expense(200.0, "investments", 2024, 6, 10),
            make_expense(100.0, "food", 2024, 6, 3),
            make_expense(50.0, "transport", 2024, 6, 3),
        ];

        let series = aggregate_by_day(&expenses);
        assert_eq!(
            series,
            vec![
                DailySpend { day: 3, total: 150.0 },
                DailySpend { day: 10, total: 200.0 },
            ]
        );
    }

    #[test]
    fn test_aggregate_by_day_strictly_ascending_no_duplicates() {
        let expenses: Vec<_> = (1..=28)
            .flat_map(|day| {
                vec![
                    make_expense(1.0, "food", 2024, 2, day),
                    make_expense(2.0, "bills", 2024, 2, day),
                ]
            })
            .collect();

        let series = aggregate_by_day(&expenses);
        assert_eq!(series.len(), 28);
        for window in series.windows(2) {
            assert!(window[0].day < window[1].day);
        }
        assert!(series.iter().all(|point| point.total == 3.0));
    }

    #[test]
    fn test_select_month_includes_first_and_last_day() {
        let june: YearMonth = "2024-06".parse().unwrap();
        let expenses = vec![
            make_expense(1.0, "food", 2024, 5, 31), // previous month
            make_expense(2.0, "food", 2024, 6, 1),  // first day, in
            make_expense(3.0, "food", 2024, 6, 30), // last day (30-day month), in
            make_expense(4.0, "food", 2024, 7, 1),  // next month
        ];

        let selected = select_month(expenses, june);
        let amounts: Vec<f64> = selected.iter().map(|e| e.amount).collect();
        assert_eq!(amounts, vec![2.0, 3.0]);
    }

    #[test]
    fn test_select_month_leap_february_boundary() {
        let february: YearMonth = "2024-02".parse().unwrap();
        let expenses = vec![
            make_expense(1.0, "bills", 2024, 2, 29), // leap day, in
            make_expense(2.0, "bills", 2024, 3, 1),  // out
        ];

        let selected = select_month(expenses, february);
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].amount, 1.0);
    }

    #[test]
    fn test_select_month_empty_input() {
        let june: YearMonth = "2024-06".parse().unwrap();
        assert!(select_month(Vec::new(), june).is_empty());
    }
}
