//! Error types for the wallet engine
//!
//! This module defines all error types that can occur while processing
//! wallet operations. Errors are designed to be descriptive and map
//! cleanly onto caller-facing failure signals.
//!
//! # Error Categories
//!
//! - **Input Errors**: empty user id, non-positive amount
//! - **Domain Errors**: unknown account, insufficient balance
//! - **Arithmetic Errors**: overflow in balance calculations
//! - **Infrastructure Errors**: severed executor channel, file I/O, CSV parsing

use rust_decimal::Decimal;
use thiserror::Error;

/// Main error type for the wallet engine
///
/// Every failure is reported to the caller that submitted the operation.
/// A failed operation never blocks or corrupts the per-key queue it ran on,
/// and the engine performs no automatic retries; all domain failures here
/// are semantic rather than transient.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum WalletError {
    /// User identifier was empty
    ///
    /// The transport layer normally rejects this before the engine is
    /// reached, but the engine re-validates at its own boundary.
    #[error("User id must not be empty")]
    InvalidUserId,

    /// Amount was zero or negative
    ///
    /// Credits and debits both require a strictly positive amount.
    #[error("Amount must be positive, got {amount}")]
    InvalidAmount {
        /// The rejected amount
        amount: Decimal,
    },

    /// Debit attempted against an account that has never been credited
    ///
    /// The account is not created by the failed debit.
    #[error("Account not found for user '{user_id}'")]
    AccountNotFound {
        /// User id with no account record
        user_id: String,
    },

    /// Debit amount exceeds the current balance
    ///
    /// The account state is left unchanged; no partial debit is committed.
    #[error("Insufficient balance for user '{user_id}': balance {balance}, requested {requested}")]
    InsufficientBalance {
        /// User id
        user_id: String,
        /// Current balance
        balance: Decimal,
        /// Requested debit amount
        requested: Decimal,
    },

    /// Arithmetic overflow would occur
    ///
    /// The credit is rejected to maintain account integrity.
    #[error("Arithmetic overflow crediting user '{user_id}'")]
    ArithmeticOverflow {
        /// User id
        user_id: String,
    },

    /// The executor's worker channel for a key was severed
    ///
    /// Does not occur in normal operation; it indicates the worker task for
    /// the key terminated abnormally while operations were still queued.
    #[error("Executor unavailable for key '{key}'")]
    ExecutorUnavailable {
        /// The affected executor key
        key: String,
    },

    /// I/O error occurred while reading or writing files
    ///
    /// Fatal for the CLI driver (file permissions, disk full, etc.).
    #[error("I/O error: {message}")]
    Io {
        /// Description of the I/O error
        message: String,
    },

    /// CSV parsing error occurred
    ///
    /// Recoverable for the CLI driver: the malformed record is skipped
    /// and processing continues with the next record.
    #[error("CSV parse error{}: {message}", line.map(|l| format!(" at line {}", l)).unwrap_or_default())]
    Parse {
        /// Line number where the error occurred (if available)
        line: Option<u64>,
        /// Description of the parsing error
        message: String,
    },
}

impl From<std::io::Error> for WalletError {
    fn from(error: std::io::Error) -> Self {
        WalletError::Io {
            message: error.to_string(),
        }
    }
}

impl From<csv::Error> for WalletError {
    fn from(error: csv::Error) -> Self {
        let line = error.position().map(|pos| pos.line());

        WalletError::Parse {
            line,
            message: error.to_string(),
        }
    }
}

// Helper functions for creating common errors

impl WalletError {
    /// Create an InvalidAmount error
    pub fn invalid_amount(amount: Decimal) -> Self {
        WalletError::InvalidAmount { amount }
    }

    /// Create an AccountNotFound error
    pub fn account_not_found(user_id: &str) -> Self {
        WalletError::AccountNotFound {
            user_id: user_id.to_string(),
        }
    }

    /// Create an InsufficientBalance error
    pub fn insufficient_balance(user_id: &str, balance: Decimal, requested: Decimal) -> Self {
        WalletError::InsufficientBalance {
            user_id: user_id.to_string(),
            balance,
            requested,
        }
    }

    /// Create an ArithmeticOverflow error
    pub fn arithmetic_overflow(user_id: &str) -> Self {
        WalletError::ArithmeticOverflow {
            user_id: user_id.to_string(),
        }
    }

    /// Create an ExecutorUnavailable error
    pub fn executor_unavailable(key: &str) -> Self {
        WalletError::ExecutorUnavailable {
            key: key.to_string(),
        }
    }
}
