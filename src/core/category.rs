//! Expense categories and the category-to-bucket mapping.
//!
//! Categories are a closed enumeration validated at the system boundary
//! (expense creation and JSON deserialization). Once an expense is past
//! ingestion its category string is guaranteed to parse, so the
//! `UnknownCategory` failure is only reachable for rows written outside this
//! crate - treated as a data integrity bug, never retried.
//!
//! The needs/wants split follows the settings form's own bucket descriptions:
//! essentials (food, transport, bills) map to needs, discretionary spending
//! (entertainment, shopping, others) maps to wants. The savings bucket is
//! contribution-only and receives no expense category.

use crate::{
    core::allocation::Bucket,
    errors::{Error, Result},
};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// One of the 8 fine-grained tags attached to each expense record.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Stocks, bonds, retirement contributions
    Investments,
    /// Deposits into the emergency fund
    Emergency,
    /// Commuting, fuel, public transport
    Transport,
    /// Rent, utilities, recurring bills
    Bills,
    /// Groceries and eating out
    Food,
    /// Movies, games, subscriptions
    Entertainment,
    /// Clothing and other retail purchases
    Shopping,
    /// Anything that fits nowhere else
    Others,
}

impl Category {
    /// All 8 categories, in the order the original expense form lists them.
    pub const ALL: [Self; 8] = [
        Self::Investments,
        Self::Emergency,
        Self::Transport,
        Self::Bills,
        Self::Food,
        Self::Entertainment,
        Self::Shopping,
        Self::Others,
    ];

    /// Returns the lowercase name stored in the database and used in JSON.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Investments => "investments",
            Self::Emergency => "emergency",
            Self::Transport => "transport",
            Self::Bills => "bills",
            Self::Food => "food",
            Self::Entertainment => "entertainment",
            Self::Shopping => "shopping",
            Self::Others => "others",
        }
    }

    /// Maps this category to the allocation bucket its spending counts against.
    ///
    /// Total over the full 8-category domain; deterministic.
    #[must_use]
    pub const fn bucket(self) -> Bucket {
        match self {
            Self::Food | Self::Transport | Self::Bills => Bucket::Needs,
            Self::Entertainment | Self::Shopping | Self::Others => Bucket::Wants,
            Self::Investments => Bucket::Investments,
            Self::Emergency => Bucket::Emergency,
        }
    }
}

impl FromStr for Category {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "investments" => Ok(Self::Investments),
            "emergency" => Ok(Self::Emergency),
            "transport" => Ok(Self::Transport),
            "bills" => Ok(Self::Bills),
            "food" => Ok(Self::Food),
            "entertainment" => Ok(Self::Entertainment),
            "shopping" => Ok(Self::Shopping),
            "others" => Ok(Self::Others),
            other => Err(Error::UnknownCategory {
                category: other.to_string(),
            }),
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
