//! Error types for the ATM terminal.

use thiserror::Error;

/// Result type alias for terminal operations
pub type Result<T> = std::result::Result<T, AtmError>;

/// Errors that can occur during a terminal session.
///
/// All domain variants are recoverable, user-facing conditions. The session
/// controller renders them as display text and keeps looping.
#[derive(Error, Debug)]
pub enum AtmError {
    /// Withdrawal or deposit amount was zero or negative
    #[error("Amount must be positive.")]
    InvalidAmount,

    /// Withdrawal amount exceeds the current balance
    #[error("Insufficient funds.")]
    InsufficientFunds,

    /// Deposit would push the balance past the representable maximum
    #[error("Amount exceeds the maximum supported balance.")]
    BalanceOverflow,

    /// Supplied PIN does not match the account's stored PIN
    #[error("Incorrect current PIN.")]
    AuthenticationFailed,

    /// New PIN is not exactly 4 decimal digits
    #[error("New PIN must be a 4-digit number.")]
    InvalidPinFormat,

    /// Free-text amount input could not be parsed as a number
    #[error("Invalid input. Please enter a numeric value.")]
    MalformedNumericInput,

    /// Failed to read from or write to the console
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Bad startup argument
    #[error("Invalid argument: {0}. Usage: atm-terminal [initial-balance] [pin]")]
    InvalidArgument(String),
}
