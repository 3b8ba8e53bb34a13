//! Ledger storage for the wallet engine
//!
//! This module provides the `LedgerStore` struct, the authoritative mapping
//! from user id to account balance.
//!
//! # Mutation contract
//!
//! The store holds shared mutable state, but it enforces no per-account
//! ordering of its own beyond map-level consistency. The only legal mutator
//! is code running inside the [`KeyedExecutor`]'s exclusive section for the
//! corresponding key; the engine is the sole gateway that upholds this.
//!
//! [`KeyedExecutor`]: crate::core::executor::KeyedExecutor

use crate::types::{Account, UserId, WalletError};
use dashmap::DashMap;
use rust_decimal::Decimal;

/// Authoritative map from user id to account state
///
/// The store is an explicitly owned object with the engine's lifecycle,
/// not a process-wide singleton, so parallel test cases can each hold an
/// isolated instance.
#[derive(Debug, Default)]
pub struct LedgerStore {
    /// Account states by user id
    ///
    /// DashMap keeps concurrent inserts for distinct users safe; per-user
    /// update ordering comes from the executor above this store.
    accounts: DashMap<UserId, Account>,
}

impl LedgerStore {
    /// Create a new store with no accounts
    pub fn new() -> Self {
        Self {
            accounts: DashMap::new(),
        }
    }

    /// Current balance for a user
    ///
    /// Returns zero for a user with no account record; the lookup never
    /// creates one.
    pub fn balance(&self, user_id: &str) -> Decimal {
        self.accounts
            .get(user_id)
            .map(|account| account.balance)
            .unwrap_or(Decimal::ZERO)
    }

    /// Credit an account, creating it at zero balance if absent
    ///
    /// # Arguments
    ///
    /// * `user_id` - The user to credit
    /// * `amount` - The amount to add; the engine has already validated it
    ///   as strictly positive
    ///
    /// # Returns
    ///
    /// * `Ok(new_balance)` - The balance after the credit committed
    /// * `Err(WalletError::ArithmeticOverflow)` - The addition would
    ///   overflow; the account is left unchanged
    pub fn credit(&self, user_id: &str, amount: Decimal) -> Result<Decimal, WalletError> {
        let mut entry = self
            .accounts
            .entry(user_id.to_string())
            .or_insert_with(|| Account::new(user_id));
        let account = entry.value_mut();

        let new_balance = account
            .balance
            .checked_add(amount)
            .ok_or_else(|| WalletError::arithmetic_overflow(user_id))?;

        account.balance = new_balance;
        Ok(new_balance)
    }

    /// Debit an account, all-or-nothing
    ///
    /// # Arguments
    ///
    /// * `user_id` - The user to debit
    /// * `amount` - The amount to subtract; the engine has already validated
    ///   it as strictly positive
    ///
    /// # Returns
    ///
    /// * `Ok(new_balance)` - The balance after the debit committed
    /// * `Err(WalletError::AccountNotFound)` - No account exists for the
    ///   user; none is created
    /// * `Err(WalletError::InsufficientBalance)` - The amount exceeds the
    ///   balance; the account is left unchanged
    pub fn debit(&self, user_id: &str, amount: Decimal) -> Result<Decimal, WalletError> {
        let mut account = self
            .accounts
            .get_mut(user_id)
            .ok_or_else(|| WalletError::account_not_found(user_id))?;

        if account.balance < amount {
            return Err(WalletError::insufficient_balance(
                user_id,
                account.balance,
                amount,
            ));
        }

        // The guard above keeps the committed balance non-negative.
        account.balance -= amount;
        Ok(account.balance)
    }

    /// Get all accounts sorted by user id
    ///
    /// Sorting gives deterministic output for CSV generation.
    pub fn accounts(&self) -> Vec<Account> {
        let mut accounts: Vec<Account> = self
            .accounts
            .iter()
            .map(|entry| entry.value().clone())
            .collect();
        accounts.sort_by(|a, b| a.user_id.cmp(&b.user_id));
        accounts
    }

    /// Number of tracked accounts
    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    /// Whether the store tracks no accounts
    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }
}
