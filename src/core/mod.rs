//! Core business logic module
//!
//! This module contains the core wallet components:
//! - `executor` - Per-key exclusive execution (single-flight, FIFO per key)
//! - `ledger_store` - Balance storage, mutated only through the executor
//! - `engine` - Validation and orchestration of wallet operations

pub mod engine;
pub mod executor;
pub mod ledger_store;

pub use engine::WalletEngine;
pub use executor::KeyedExecutor;
pub use ledger_store::LedgerStore;
