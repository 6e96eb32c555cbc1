// Driver seam - the database capabilities the executor consumes

pub mod sqlite;

#[cfg(test)]
pub(crate) mod testing;

use std::fmt;

use serde::Deserialize;
use thiserror::Error;

use crate::core::{Row, Value};

pub use sqlite::{SqliteDriver, SqliteSession};

/// Diagnostic reported by the underlying driver, kept verbatim.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct DriverError {
    pub message: String,
}

impl DriverError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Connection inputs, handed to the driver verbatim.
#[derive(Clone, Default, Deserialize, PartialEq, Eq)]
pub struct ConnectParams {
    pub host: String,
    pub database: String,
    pub user: String,
    pub password: String,
}

impl ConnectParams {
    pub fn new(
        host: impl Into<String>,
        database: impl Into<String>,
        user: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            host: host.into(),
            database: database.into(),
            user: user.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for ConnectParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectParams")
            .field("host", &self.host)
            .field("database", &self.database)
            .field("user", &self.user)
            .field("password", &"********")
            .finish()
    }
}

/// Opens sessions.
pub trait Driver {
    type Session: Session;

    fn connect(&self, params: &ConnectParams) -> Result<Self::Session, DriverError>;
}

/// An open database session.
pub trait Session {
    type Statement<'a>: Statement
    where
        Self: 'a;

    /// Parses `sql` into a statement ready for binding.
    fn prepare(&self, sql: &str) -> Result<Self::Statement<'_>, DriverError>;

    /// Id generated by the most recent insert on this session, if any.
    fn last_insert_id(&self) -> Option<i64>;

    fn close(self) -> Result<(), DriverError>
    where
        Self: Sized;
}

/// A prepared statement.
///
/// `execute` and `fetch_all` both run the statement to completion; the
/// former discards whatever rows it produced.
pub trait Statement {
    /// Binds `value` to the 1-based positional placeholder `index`.
    fn bind_position(&mut self, index: usize, value: &Value) -> Result<(), DriverError>;

    /// Binds `value` to the named placeholder `name` (prefix included).
    fn bind_name(&mut self, name: &str, value: &Value) -> Result<(), DriverError>;

    fn execute(&mut self) -> Result<(), DriverError>;

    fn fetch_all(&mut self) -> Result<Vec<Row>, DriverError>;
}
