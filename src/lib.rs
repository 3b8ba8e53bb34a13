//! Wallet Engine Library
//! # Overview
//!
//! This library maintains per-user monetary balances that can be credited
//! and debited concurrently by many independent callers. Operations on the
//! same account never interleave; operations on different accounts run
//! fully in parallel.
//!
//! # Architecture
//!
//! The system is organized into several key components:
//!
//! - [`types`] - Core data types (Account, OperationRecord, WalletError)
//! - [`cli`] - CLI argument parsing
//! - [`core`] - Business logic components:
//!   - [`core::executor`] - Per-key exclusive execution queue
//!   - [`core::ledger_store`] - Balance storage
//!   - [`core::engine`] - Validation and operation orchestration
//! - [`io`] - Workload CSV parsing and balance output
//! - [`runner`] - File-to-file workload processing pipeline
//!
//! # Operations
//!
//! The engine supports three operations:
//!
//! - **Credit**: Add funds to an account, creating it on first use
//! - **Debit**: Remove funds from an account (requires sufficient balance)
//! - **Get balance**: Read the current balance (zero for unknown users)
//!
//! # Concurrency Model
//!
//! Each active user id owns a dedicated worker task consuming an ordered
//! queue of operations, so per-user execution is single-flight and FIFO by
//! construction. Worker tasks and their queue slots are reclaimed as soon
//! as a user's queue drains, so long-idle keys hold no resources.
//!
//! # Invariants
//!
//! - Every tracked balance is non-negative at every observable point
//! - A debit either commits in full or leaves the account unchanged
//! - A failed operation is reported only to its own submitter and never
//!   blocks the rest of its key's queue

// Module declarations
pub mod cli;
pub mod core;
pub mod io;
pub mod runner;
pub mod types;

pub use crate::core::{KeyedExecutor, LedgerStore, WalletEngine};
pub use crate::io::{write_balances_csv, OperationReader};
pub use crate::runner::process_workload;
pub use crate::types::{Account, OperationRecord, OperationType, UserId, WalletError};
