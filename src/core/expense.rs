//! Expense business logic - creation and month-scoped retrieval.
//!
//! Creation is the validated boundary of the system: amounts must be positive
//! and finite, notes non-empty, and categories arrive already typed as
//! [`Category`], so rows never carry an out-of-domain category string.
//! Expenses are immutable once created; there are no edit or delete
//! operations.

use crate::{
    core::{aggregate::YearMonth, category::Category},
    entities::{Expense, expense},
    errors::{Error, Result},
};
use chrono::NaiveDate;
use sea_orm::{QueryOrder, Set, TransactionTrait, prelude::*};

/// A validated expense submission, before it has an id.
#[derive(Clone, Debug)]
pub struct NewExpense {
    /// Amount in currency units, strictly positive
    pub amount: f64,
    /// Category tag, already parsed into the closed enumeration
    pub category: Category,
    /// Free-text note, non-empty after trimming
    pub note: String,
    /// Calendar date of the expense
    pub date: NaiveDate,
}

impl NewExpense {
    fn validate(&self) -> Result<()> {
        if self.amount <= 0.0 || !self.amount.is_finite() {
            return Err(Error::InvalidAmount {
                amount: self.amount,
            });
        }
        if self.note.trim().is_empty() {
            return Err(Error::EmptyNote);
        }
        Ok(())
    }
}

/// Creates a single expense record for a user.
pub async fn create_expense(
    db: &DatabaseConnection,
    user_id: i64,
    new_expense: NewExpense,
) -> Result<expense::Model> {
    new_expense.validate()?;

    let model = expense::ActiveModel {
        user_id: Set(user_id),
        amount: Set(new_expense.amount),
        category: Set(new_expense.category.as_str().to_string()),
        note: Set(new_expense.note.trim().to_string()),
        date: Set(new_expense.date),
        ..Default::default()
    };

    model.insert(db).await.map_err(Into::into)
}

/// Creates a batch of expenses atomically - all rows insert or none do.
///
/// The submission API accepts an array of expense records, so a malformed
/// entry anywhere in the batch rejects the whole batch.
pub async fn create_expenses(
    db: &DatabaseConnection,
    user_id: i64,
    new_expenses: Vec<NewExpense>,
) -> Result<Vec<expense::Model>> {
    for new_expense in &new_expenses {
        new_expense.validate()?;
    }

    let txn = db.begin().await?;

    let mut created = Vec::with_capacity(new_expenses.len());
    for new_expense in new_expenses {
        let model = expense::ActiveModel {
            user_id: Set(user_id),
            amount: Set(new_expense.amount),
            category: Set(new_expense.category.as_str().to_string()),
            note: Set(new_expense.note.trim().to_string()),
            date: Set(new_expense.date),
            ..Default::default()
        };
        created.push(model.insert(&txn).await?);
    }

    txn.commit().await?;
    Ok(created)
}

/// Retrieves a user's expenses for one calendar month, ordered by date
/// ascending.
///
/// The month window is calendar-correct: first through last day inclusive,
/// respecting 28/29/30/31-day months. This is the feed the summary engine
/// consumes.
pub async fn expenses_for_month(
    db: &DatabaseConnection,
    user_id: i64,
    month: YearMonth,
) -> Result<Vec<expense::Model>> {
    let (Some(first), Some(last)) = (month.first_day(), month.last_day()) else {
        return Err(Error::InvalidMonth {
            input: month.to_string(),
        });
    };

    Expense::find()
        .filter(expense::Column::UserId.eq(user_id))
        .filter(expense::Column::Date.between(first, last))
        .order_by_asc(expense::Column::Date)
        .order_by_asc(expense::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}
