//! Error types for the dividend ledger.

use crate::account::AccountId;
use crate::host::HostError;
use thiserror::Error;

/// Result type alias for ledger operations
pub type Result<T> = std::result::Result<T, LedgerError>;

/// Errors that can occur during ledger operation.
///
/// Every ledger rejection leaves balances, allowances and dividend state
/// exactly as they were before the call.
#[derive(Error, Debug)]
pub enum LedgerError {
    /// Zero value supplied where a positive value is required
    #[error("Amount must be greater than zero")]
    InvalidAmount,

    /// Dividend recorded while nothing is in circulation
    #[error("Cannot record a dividend while total supply is zero")]
    NoSupply,

    /// Balance too low for a burn, transfer or delegated transfer
    #[error("Insufficient balance: need {needed}, have {available}")]
    InsufficientBalance { needed: u128, available: u128 },

    /// Delegated transfer exceeds the spender's limit
    #[error("Allowance exceeded: need {needed}, allowed {allowed}")]
    AllowanceExceeded { needed: u128, allowed: u128 },

    /// Value attached to an operation that does not take any
    #[error("Operation does not accept attached value (got {0})")]
    UnexpectedValue(u128),

    /// Integer width exhausted
    #[error("Arithmetic overflow in {0}")]
    Overflow(&'static str),

    /// The host refused to release value; ledger state was restored
    #[error("Release of value to {destination} failed: {source}")]
    ReleaseFailed {
        destination: AccountId,
        #[source]
        source: HostError,
    },

    /// Failed to open or read the input file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV parsing error
    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    /// Invalid operation record
    #[error("Invalid operation at row {row}: {message}")]
    InvalidRecord { row: usize, message: String },

    /// Missing input file argument
    #[error("Missing input file argument. Usage: dividend-ledger <operations.csv>")]
    MissingArgument,
}
