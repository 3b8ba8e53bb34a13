//! Account-related types for the wallet engine
//!
//! This module defines the Account structure and related functionality
//! for tracking per-user balance state.

use rust_decimal::Decimal;

/// User identifier
///
/// An opaque, non-empty string key. Emptiness is rejected at the engine
/// boundary before any account is touched.
pub type UserId = String;

/// Wallet account state
///
/// Represents the current state of a single user's wallet. An account is
/// created implicitly by the first successful credit and is never deleted.
#[derive(Debug, Clone, PartialEq)]
pub struct Account {
    /// The user id that owns this account
    pub user_id: UserId,

    /// Current balance in exact decimal representation
    ///
    /// Holds `balance >= 0` at every observable point. An operation may
    /// compute a lower value internally, but it rejects before committing
    /// anything negative.
    pub balance: Decimal,
}

impl Account {
    /// Create a new account with a zero balance
    pub fn new(user_id: impl Into<UserId>) -> Self {
        Account {
            user_id: user_id.into(),
            balance: Decimal::ZERO,
        }
    }
}
