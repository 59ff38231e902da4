//! Expense entity - Represents a single dated, categorized spending record.
//!
//! The category column holds one of the 8 values of [`crate::core::Category`];
//! it is validated at creation time so rows never carry an out-of-domain string.
//! Expenses are immutable once created and belong to exactly one calendar month,
//! determined by their date.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Expense database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "expenses")]
pub struct Model {
    /// Unique identifier for the expense
    #[sea_orm(primary_key)]
    pub id: i64,
    /// ID of the user who logged this expense
    pub user_id: i64,
    /// Expense amount in currency units, strictly positive
    pub amount: f64,
    /// Expense category, one of the fixed 8-value enumeration
    pub category: String,
    /// Free-text note describing the expense, non-empty
    pub note: String,
    /// Calendar date of the expense (time of day is irrelevant)
    pub date: Date,
}

/// Defines relationships between Expense and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each expense belongs to one user
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id"
    )]
    User,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
