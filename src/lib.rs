// sqladapter - parameterized statement executor over a relational driver
// Stored command templates, placeholder-aware binding, row shaping

// Clippy configuration
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::option_if_let_else)]
#![allow(clippy::multiple_crate_versions)]

// Core types (values, rows, parameters, errors, command slots)
pub mod core;

// Placeholder scanner and parameter literal parser
pub mod parser;

// Driver seam and the SQLite implementation
pub mod driver;

// Statement executor (connection lifecycle, binding, result shaping)
pub mod executor;

// Layered configuration
pub mod config;

// Interactive shell support
pub mod shell;

// Re-export commonly used types for convenience
pub use config::{AdapterConfig, OutputFormat};
pub use core::{AdapterError, CommandKind, ParamKey, Params, Result, Row, Value};
pub use driver::{ConnectParams, Driver, DriverError, Session, SqliteDriver, Statement};
pub use executor::{ExecutionResult, StatementExecutor};
