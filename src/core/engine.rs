//! Wallet operation orchestration
//!
//! This module provides the `WalletEngine` struct, the public surface for
//! balance reads, credits, and debits. The engine validates inputs at its
//! own boundary, then routes every operation through the per-key executor
//! so that mutations of one user's balance can never interleave.
//!
//! # Architecture
//!
//! ```text
//! caller ──▶ WalletEngine (validation)
//!                │
//!                ├── KeyedExecutor (single-flight, FIFO per user id)
//!                │        │
//!                │        ▼
//!                └── Arc<LedgerStore> (balances, mutated only in-slot)
//! ```
//!
//! # Consistency
//!
//! Balance reads also go through the executor, so a read queued after a
//! mutation for the same user observes its effect. Reads of other users
//! proceed in parallel and never wait behind an unrelated queue.

use std::sync::Arc;

use rust_decimal::Decimal;

use crate::core::executor::KeyedExecutor;
use crate::core::ledger_store::LedgerStore;
use crate::types::{Account, WalletError};

/// Engine coordinating validation, per-key serialization, and the ledger
///
/// Each engine owns its store and executor, so independent instances are
/// fully isolated; tests can run many engines in parallel.
#[derive(Debug)]
pub struct WalletEngine {
    /// Balance storage, shared with worker tasks via Arc
    store: Arc<LedgerStore>,

    /// Per-user-id exclusive execution queue
    executor: KeyedExecutor,
}

impl WalletEngine {
    /// Create an engine with an empty ledger
    pub fn new() -> Self {
        Self {
            store: Arc::new(LedgerStore::new()),
            executor: KeyedExecutor::new(),
        }
    }

    /// Current balance for a user
    ///
    /// Returns zero for an unknown user without creating an account.
    ///
    /// # Errors
    ///
    /// * `WalletError::InvalidUserId` - empty user id
    pub async fn get_balance(&self, user_id: &str) -> Result<Decimal, WalletError> {
        if user_id.is_empty() {
            return Err(WalletError::InvalidUserId);
        }

        let store = Arc::clone(&self.store);
        let user = user_id.to_string();
        self.executor
            .submit(user_id, move || store.balance(&user))
            .await
    }

    /// Credit a user's wallet, creating the account on first use
    ///
    /// # Errors
    ///
    /// * `WalletError::InvalidUserId` - empty user id
    /// * `WalletError::InvalidAmount` - amount is zero or negative
    /// * `WalletError::ArithmeticOverflow` - the credit would overflow
    pub async fn credit(&self, user_id: &str, amount: Decimal) -> Result<Decimal, WalletError> {
        Self::validate(user_id, amount)?;

        let store = Arc::clone(&self.store);
        let user = user_id.to_string();
        let result = self
            .executor
            .submit(user_id, move || store.credit(&user, amount))
            .await?;

        match &result {
            Ok(balance) => {
                tracing::debug!(user = %user_id, %amount, %balance, "credit applied")
            }
            Err(error) => tracing::debug!(user = %user_id, %amount, %error, "credit rejected"),
        }
        result
    }

    /// Debit a user's wallet if it holds sufficient balance
    ///
    /// The debit is all-or-nothing: on any failure the balance is left
    /// exactly as it was.
    ///
    /// # Errors
    ///
    /// * `WalletError::InvalidUserId` - empty user id
    /// * `WalletError::InvalidAmount` - amount is zero or negative
    /// * `WalletError::AccountNotFound` - the user has never been credited
    /// * `WalletError::InsufficientBalance` - amount exceeds the balance
    pub async fn debit(&self, user_id: &str, amount: Decimal) -> Result<Decimal, WalletError> {
        Self::validate(user_id, amount)?;

        let store = Arc::clone(&self.store);
        let user = user_id.to_string();
        let result = self
            .executor
            .submit(user_id, move || store.debit(&user, amount))
            .await?;

        match &result {
            Ok(balance) => {
                tracing::debug!(user = %user_id, %amount, %balance, "debit applied")
            }
            Err(error) => tracing::debug!(user = %user_id, %amount, %error, "debit rejected"),
        }
        result
    }

    /// Snapshot of all accounts, sorted by user id
    pub fn accounts(&self) -> Vec<Account> {
        self.store.accounts()
    }

    /// Reject requests the transport layer should already have filtered
    ///
    /// Validation happens before the operation enters the executor, so
    /// malformed requests never occupy a slot.
    fn validate(user_id: &str, amount: Decimal) -> Result<(), WalletError> {
        if user_id.is_empty() {
            return Err(WalletError::InvalidUserId);
        }
        if amount <= Decimal::ZERO {
            return Err(WalletError::invalid_amount(amount));
        }
        Ok(())
    }
}

impl Default for WalletEngine {
    fn default() -> Self {
        Self::new()
    }
}
