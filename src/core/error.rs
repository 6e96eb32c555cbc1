use thiserror::Error;

use super::command::CommandKind;
use crate::driver::DriverError;

#[derive(Error, Debug)]
pub enum AdapterError {
    #[error("Could not connect to database '{database}' on '{host}': {source}")]
    Connection {
        host: String,
        database: String,
        #[source]
        source: DriverError,
    },
    #[error("Failed to prepare statement: {message}")]
    Prepare { sql: String, message: String },
    #[error("Statement execution failed: {message}")]
    Execution { sql: String, message: String },
    #[error("Executor is not connected")]
    NotConnected,
    #[error("No {0} command has been set")]
    CommandNotSet(CommandKind),
    #[error("No row has been inserted on this connection")]
    NoInsertId,
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Invalid parameter list: {0}")]
    InvalidParams(String),
}

impl AdapterError {
    pub(crate) fn prepare(sql: &str, message: impl Into<String>) -> Self {
        Self::Prepare {
            sql: sql.to_string(),
            message: message.into(),
        }
    }

    pub(crate) fn execution(sql: &str, message: impl Into<String>) -> Self {
        Self::Execution {
            sql: sql.to_string(),
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, AdapterError>;
