//! Unified error types and result handling for the budget tracker.
//!
//! All fallible operations in the crate return [`Result`], backed by the single
//! [`Error`] enum below. Engine failures (`InvalidAllocation`, `InvalidSalary`,
//! `UnknownCategory`) are deterministic input errors: retrying the same call with
//! the same input yields the same failure, so callers fix the input instead.

use thiserror::Error;

/// Unified error type for all budget tracker operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Allocation percentages do not sum to exactly 100.
    #[error("Invalid allocation: percentages sum to {total}, expected 100")]
    InvalidAllocation {
        /// The sum the percentages actually produced
        total: u32,
    },

    /// Salary is negative or not a finite number.
    #[error("Invalid salary: {salary}")]
    InvalidSalary {
        /// The offending salary value
        salary: f64,
    },

    /// Expense category outside the fixed 8-value enumeration.
    #[error("Unknown expense category: {category}")]
    UnknownCategory {
        /// The unrecognized category string
        category: String,
    },

    /// Expense amount is zero, negative, or not finite.
    #[error("Invalid expense amount: {amount}")]
    InvalidAmount {
        /// The offending amount
        amount: f64,
    },

    /// Expense note is empty or whitespace-only.
    #[error("Expense note cannot be empty")]
    EmptyNote,

    /// Month string is not of the form YYYY-MM or names an impossible month.
    #[error("Invalid month: {input}")]
    InvalidMonth {
        /// The unparseable input
        input: String,
    },

    /// No user exists for the given identifier.
    #[error("User not found: {identifier}")]
    UserNotFound {
        /// Email or user id used for the lookup
        identifier: String,
    },

    /// A user with this email already exists.
    #[error("Email already registered: {email}")]
    DuplicateEmail {
        /// The conflicting email address
        email: String,
    },

    /// Email/password pair did not match a user.
    #[error("Invalid email or password")]
    InvalidCredentials,

    /// Missing, malformed, or expired bearer token.
    #[error("Unauthorized")]
    Unauthorized,

    /// Password hashing or verification failed for an operational reason.
    #[error("Password hash error: {message}")]
    PasswordHash {
        /// Underlying hasher failure
        message: String,
    },

    /// Configuration file or environment problem.
    #[error("Configuration error: {message}")]
    Config {
        /// What went wrong while loading configuration
        message: String,
    },

    /// Database error from `SeaORM`.
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Environment variable error.
    #[error("Environment variable error: {0}")]
    EnvVar(#[from] std::env::VarError),
}

/// Convenience `Result` type used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
