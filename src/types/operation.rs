//! Operation types for the wallet engine
//!
//! This module defines the wallet operations accepted from callers and the
//! record shape used by the CSV workload driver.

use super::account::UserId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Operation types supported by the wallet engine
///
/// Each variant mutates the balance of exactly one account, so operations
/// never need to hold more than one key's exclusive slot at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OperationType {
    /// Credit funds to an account
    ///
    /// Increases the balance by the operation amount. Creates the account
    /// with a zero starting balance if it does not exist yet.
    Credit,

    /// Debit funds from an account
    ///
    /// Decreases the balance by the operation amount. Requires an existing
    /// account with sufficient balance to succeed.
    Debit,
}

/// Input operation record from the workload CSV
///
/// Represents a single balance mutation as read from the input file.
#[derive(Debug, Clone, PartialEq)]
pub struct OperationRecord {
    /// The type of operation (credit or debit)
    pub op: OperationType,

    /// The user id this operation applies to
    pub user: UserId,

    /// Operation amount; must be strictly positive to be accepted
    pub amount: Decimal,
}
