//! I/O module
//!
//! Handles CSV parsing and output.
//!
//! # Components
//!
//! - `csv_format` - CSV format handling (record conversion, streaming
//!   reader, balance output serialization)

pub mod csv_format;

pub use csv_format::{convert_csv_record, write_balances_csv, CsvRecord, OperationReader};
