//! Types module
//!
//! Contains core data structures used throughout the application.
//! This module organizes types into logical submodules:
//! - `account`: Account state and user identifiers
//! - `operation`: Wallet operations and workload records
//! - `error`: Error types for the wallet engine

pub mod account;
pub mod error;
pub mod operation;

pub use account::{Account, UserId};
pub use error::WalletError;
pub use operation::{OperationRecord, OperationType};
