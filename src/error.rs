//! # Error Types
//!
//! This module defines the error type shared by the whole crate. It provides
//! specific variants for the failure scenarios of loading data, configuring a
//! search and running it.
//!
//! ## Examples
//!
//! Using the `Result` type:
//!
//! ```rust
//! use sourcing::error::{Result, SourcingError};
//!
//! fn check_runs(runs: usize) -> Result<()> {
//!     if runs == 0 {
//!         return Err(SourcingError::InvalidConfiguration(
//!             "At least one run is required".to_string(),
//!         ));
//!     }
//!     Ok(())
//! }
//!
//! assert!(check_runs(0).is_err());
//! ```
//!
//! Using the `ResultExt` trait to add context to foreign errors:
//!
//! ```rust
//! use sourcing::error::{Result, ResultExt};
//! use std::fs::File;
//!
//! fn open_cart(path: &str) -> Result<File> {
//!     File::open(path).context("Failed to open cart file")
//! }
//! ```
//!
//! Using the `OptionExt` trait to convert `Option` to `Result`:
//!
//! ```rust
//! use sourcing::error::{OptionExt, SourcingError};
//!
//! fn cheapest(prices: &[f64]) -> sourcing::error::Result<f64> {
//!     prices
//!         .iter()
//!         .copied()
//!         .min_by(f64::total_cmp)
//!         .ok_or_else_sourcing(|| SourcingError::EmptyCart)
//! }
//! ```

use std::error::Error as StdError;
use std::fmt;
use thiserror::Error;

/// Represents errors that can occur while loading data or optimizing a cart.
#[derive(Error, Debug)]
pub enum SourcingError {
    /// A cart line names a product that no supplier carries.
    #[error("Unknown product: no supplier carries '{0}'")]
    UnknownProduct(String),

    /// The optimizer options are unusable for the given cart.
    #[error("Configuration error: {0}")]
    InvalidConfiguration(String),

    /// A supplier record violates its invariants.
    #[error("Invalid supplier: {0}")]
    InvalidSupplier(String),

    /// A cart line violates its invariants.
    #[error("Invalid cart line: {0}")]
    InvalidCartLine(String),

    /// Optimization was requested for a cart without lines.
    #[error("Empty cart: there is nothing to source")]
    EmptyCart,

    /// Error that occurs when an empty population is encountered.
    #[error("Empty population error: Cannot operate on an empty population")]
    EmptyPopulation,

    /// Error that occurs when a fitness calculation fails.
    #[error("Fitness calculation error: {0}")]
    FitnessCalculation(String),

    /// A record in an input file could not be interpreted.
    #[error("Parse error on line {line}: {message}")]
    Parse { line: u64, message: String },

    /// Error raised by the delimited-file reader or writer.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Error that occurs when an I/O operation fails.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A generic error with a custom message.
    #[error("{0}")]
    Other(String),
}

/// A specialized Result type for sourcing operations.
pub type Result<T> = std::result::Result<T, SourcingError>;

/// Extension trait for Result to add context to errors.
///
/// ## Examples
///
/// ```rust
/// use sourcing::error::ResultExt;
/// use std::fs::File;
///
/// fn read_file(path: &str) -> sourcing::error::Result<()> {
///     File::open(path).context("Failed to open file")?;
///     Ok(())
/// }
/// ```
pub trait ResultExt<T, E> {
    /// Converts the error into a `SourcingError::Other` prefixed with `context`.
    fn context<C>(self, context: C) -> Result<T>
    where
        C: fmt::Display + Send + Sync + 'static;
}

impl<T, E> ResultExt<T, E> for std::result::Result<T, E>
where
    E: StdError + Send + Sync + 'static,
{
    fn context<C>(self, context: C) -> Result<T>
    where
        C: fmt::Display + Send + Sync + 'static,
    {
        self.map_err(|e| SourcingError::Other(format!("{}: {}", context, e)))
    }
}

/// Extension trait for Option to convert to Result with a custom error.
pub trait OptionExt<T> {
    /// Converts an `Option<T>` to a `Result<T>` using a closure to generate the error.
    fn ok_or_else_sourcing<F>(self, err_fn: F) -> Result<T>
    where
        F: FnOnce() -> SourcingError;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_else_sourcing<F>(self, err_fn: F) -> Result<T>
    where
        F: FnOnce() -> SourcingError,
    {
        self.ok_or_else(err_fn)
    }
}
