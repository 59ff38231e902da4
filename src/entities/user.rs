//! User entity - Represents a registered account.
//!
//! Each user owns a monthly salary and a budget allocation: five integer
//! percentage columns (needs/wants/savings/investments/emergency) that must sum
//! to 100. The allocation is replaced wholesale on settings updates, never
//! partially patched.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// User database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    /// Unique identifier for the user
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Login email, unique across users
    #[sea_orm(unique)]
    pub email: String,
    /// Human-readable display name
    pub display_name: String,
    /// Argon2 password hash (PHC string format)
    pub password_hash: String,
    /// Monthly salary in currency units, non-negative
    pub salary: f64,
    /// Percentage of salary allocated to the needs bucket
    pub needs_pct: i32,
    /// Percentage of salary allocated to the wants bucket
    pub wants_pct: i32,
    /// Percentage of salary allocated to the savings bucket
    pub savings_pct: i32,
    /// Percentage of salary allocated to the investments bucket
    pub investments_pct: i32,
    /// Percentage of salary allocated to the emergency bucket
    pub emergency_pct: i32,
}

/// Defines relationships between User and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One user has many expenses
    #[sea_orm(has_many = "super::expense::Entity")]
    Expenses,
    /// One user has many active sessions
    #[sea_orm(has_many = "super::session::Entity")]
    Sessions,
}

impl Related<super::expense::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Expenses.def()
    }
}

impl Related<super::session::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Sessions.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
