//! Budget allocation configuration - buckets and percentage validation.
//!
//! Salary is split across five named buckets. An allocation is a set of integer
//! percentages, one per bucket, and is valid iff the percentages sum to exactly
//! 100. Validation is pure and uses integer arithmetic, so there is no floating
//! point tolerance to reason about. Percentages are stored as unsigned integers,
//! which makes a per-bucket 0-100 bound check redundant: non-negative integers
//! that sum to 100 are each at most 100.

use crate::{
    entities::user,
    errors::{Error, Result},
};
use serde::{Deserialize, Serialize};

/// One of the five budget buckets salary is allocated across.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Bucket {
    /// Essential expenses: rent, food, utilities
    Needs,
    /// Discretionary spending: entertainment, shopping
    Wants,
    /// Regular savings contributions
    Savings,
    /// Stocks, bonds, retirement funds
    Investments,
    /// Emergency fund buffer
    Emergency,
}

impl Bucket {
    /// All five buckets, in display order.
    pub const ALL: [Self; 5] = [
        Self::Needs,
        Self::Wants,
        Self::Savings,
        Self::Investments,
        Self::Emergency,
    ];

    /// Returns the lowercase name used in JSON payloads and logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Needs => "needs",
            Self::Wants => "wants",
            Self::Savings => "savings",
            Self::Investments => "investments",
            Self::Emergency => "emergency",
        }
    }
}

impl std::fmt::Display for Bucket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Percentage split of salary across the five buckets.
///
/// All five fields are required; deserializing a payload with a missing bucket
/// fails, so presence never needs a runtime check. The struct is `Copy` and is
/// replaced wholesale on settings updates.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllocationConfig {
    /// Percentage for the needs bucket
    pub needs: u32,
    /// Percentage for the wants bucket
    pub wants: u32,
    /// Percentage for the savings bucket
    pub savings: u32,
    /// Percentage for the investments bucket
    pub investments: u32,
    /// Percentage for the emergency bucket
    pub emergency: u32,
}

impl Default for AllocationConfig {
    /// The 50/20/20/5/5 split the original settings form starts from.
    fn default() -> Self {
        Self {
            needs: 50,
            wants: 20,
            savings: 20,
            investments: 5,
            emergency: 5,
        }
    }
}

impl AllocationConfig {
    /// Returns the percentage assigned to a bucket.
    #[must_use]
    pub const fn percentage(&self, bucket: Bucket) -> u32 {
        match bucket {
            Bucket::Needs => self.needs,
            Bucket::Wants => self.wants,
            Bucket::Savings => self.savings,
            Bucket::Investments => self.investments,
            Bucket::Emergency => self.emergency,
        }
    }

    /// Sum of all five percentages.
    #[must_use]
    pub const fn total(&self) -> u32 {
        self.needs + self.wants + self.savings + self.investments + self.emergency
    }

    /// Returns true iff the percentages sum to exactly 100.
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        self.total() == 100
    }

    /// Fails with [`Error::InvalidAllocation`] unless the percentages sum to 100.
    ///
    /// This is the gate that must pass before a settings update is persisted and
    /// before a summary is computed against the allocation.
    pub fn validate(&self) -> Result<()> {
        let total = self.total();
        if total == 100 {
            Ok(())
        } else {
            Err(Error::InvalidAllocation { total })
        }
    }

    /// Reads the allocation stored on a user row.
    ///
    /// The columns are written through [`crate::core::user`], which validates
    /// before persisting, so a stored allocation is expected to be valid. The
    /// engine still re-validates at compute time rather than trusting the store.
    #[must_use]
    pub fn from_user(user: &user::Model) -> Self {
        Self {
            needs: u32::try_from(user.needs_pct).unwrap_or(0),
            wants: u32::try_from(user.wants_pct).unwrap_or(0),
            savings: u32::try_from(user.savings_pct).unwrap_or(0),
            investments: u32::try_from(user.investments_pct).unwrap_or(0),
            emergency: u32::try_from(user.emergency_pct).unwrap_or(0),
        }
    }
}
