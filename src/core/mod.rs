//! Core business logic - the budget allocation engine plus the store-facing
//! operations built on it. Everything under `core` is framework-agnostic:
//! the engine modules (`allocation`, `category`, `aggregate`, `summary`) are
//! pure computation, and the store modules (`user`, `expense`, `auth`) are
//! async functions over a `DatabaseConnection`.

pub mod aggregate;
pub mod allocation;
pub mod auth;
pub mod category;
pub mod expense;
pub mod summary;
pub mod user;

pub use aggregate::{BucketTotals, DailySpend, YearMonth};
pub use allocation::{AllocationConfig, Bucket};
pub use category::Category;
pub use summary::{BucketVariance, MonthlySummary};
