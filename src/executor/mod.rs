/// Statement executor - stores command templates and runs them against one
/// driver session.
///
/// Structure:
/// - binding: parameter/template consistency checks and bind dispatch
/// - `StatementExecutor`: connection lifecycle, command slots, `execute`

mod binding;

use tracing::{debug, info, warn};

use crate::core::{AdapterError, CommandKind, CommandSet, Params, Result, Row};
use crate::driver::{ConnectParams, Driver, Session, SqliteDriver, SqliteSession, Statement};
use crate::parser::{self, PlaceholderStyle};

/// Outcome of `execute`.
#[derive(Debug, Clone, PartialEq)]
pub enum ExecutionResult {
    /// Rows of a query, in the order the database returned them.
    Rows(Vec<Row>),
    /// A write ran to completion.
    Success,
}

impl ExecutionResult {
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }

    pub fn into_rows(self) -> Option<Vec<Row>> {
        match self {
            Self::Rows(rows) => Some(rows),
            Self::Success => None,
        }
    }
}

enum State<S> {
    Connected(S),
    Closed,
}

/// Runs stored or ad-hoc SQL templates over an exclusively owned session.
///
/// The executor is either connected or closed. Closing happens once, through
/// [`close`](Self::close) or on drop; every other operation on a closed
/// executor fails with [`AdapterError::NotConnected`] without touching the
/// driver.
pub struct StatementExecutor<S: Session = SqliteSession> {
    state: State<S>,
    commands: CommandSet,
    host: String,
    database: String,
}

impl StatementExecutor<SqliteSession> {
    /// Opens a SQLite-backed executor.
    pub fn open(
        host: impl Into<String>,
        database: impl Into<String>,
        user: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<Self> {
        Self::connect(&SqliteDriver, &ConnectParams::new(host, database, user, password))
    }
}

impl<S: Session> StatementExecutor<S> {
    pub fn connect<D>(driver: &D, params: &ConnectParams) -> Result<Self>
    where
        D: Driver<Session = S>,
    {
        let session = driver.connect(params).map_err(|source| AdapterError::Connection {
            host: params.host.clone(),
            database: params.database.clone(),
            source,
        })?;
        info!(host = %params.host, database = %params.database, "connected");

        Ok(Self {
            state: State::Connected(session),
            commands: CommandSet::new(),
            host: params.host.clone(),
            database: params.database.clone(),
        })
    }

    /// Connects, hands the executor to `f` and closes it afterwards, whether
    /// `f` succeeded or not. A close failure only surfaces when `f` succeeded.
    pub fn scoped<D, T, F>(driver: &D, params: &ConnectParams, f: F) -> Result<T>
    where
        D: Driver<Session = S>,
        F: FnOnce(&mut Self) -> Result<T>,
    {
        let mut executor = Self::connect(driver, params)?;
        let outcome = f(&mut executor);
        let closed = executor.close();
        let value = outcome?;
        closed?;
        Ok(value)
    }

    pub fn is_connected(&self) -> bool {
        matches!(self.state, State::Connected(_))
    }

    /// The driver session, while connected.
    pub fn session(&self) -> Result<&S> {
        match &self.state {
            State::Connected(session) => Ok(session),
            State::Closed => Err(AdapterError::NotConnected),
        }
    }

    /// Releases the session. Closing a closed executor does nothing.
    pub fn close(&mut self) -> Result<()> {
        match std::mem::replace(&mut self.state, State::Closed) {
            State::Connected(session) => {
                session.close().map_err(|source| AdapterError::Connection {
                    host: self.host.clone(),
                    database: self.database.clone(),
                    source,
                })?;
                info!(database = %self.database, "connection closed");
                Ok(())
            }
            State::Closed => Ok(()),
        }
    }

    pub fn set_select_command(&mut self, sql: impl Into<String>) -> Result<()> {
        self.set_command(CommandKind::Select, sql)
    }

    pub fn set_insert_command(&mut self, sql: impl Into<String>) -> Result<()> {
        self.set_command(CommandKind::Insert, sql)
    }

    pub fn set_update_command(&mut self, sql: impl Into<String>) -> Result<()> {
        self.set_command(CommandKind::Update, sql)
    }

    pub fn set_delete_command(&mut self, sql: impl Into<String>) -> Result<()> {
        self.set_command(CommandKind::Delete, sql)
    }

    pub fn set_command(&mut self, kind: CommandKind, sql: impl Into<String>) -> Result<()> {
        self.session()?;
        self.commands.set(kind, sql.into());
        Ok(())
    }

    /// The template stored for `kind`, if any.
    pub fn command(&self, kind: CommandKind) -> Result<Option<&str>> {
        self.session()?;
        Ok(self.commands.get(kind))
    }

    pub fn commands(&self) -> Result<&CommandSet> {
        self.session()?;
        Ok(&self.commands)
    }

    /// Id generated by the most recent insert on this connection.
    pub fn get_last_insert_id(&self) -> Result<i64> {
        self.session()?.last_insert_id().ok_or(AdapterError::NoInsertId)
    }

    pub fn select(&mut self, params: impl Into<Params>) -> Result<Vec<Row>> {
        let rows = self.run_command(CommandKind::Select, params.into())?;
        Ok(rows.into_rows().unwrap_or_default())
    }

    pub fn insert(&mut self, params: impl Into<Params>) -> Result<bool> {
        self.run_command(CommandKind::Insert, params.into())
            .map(|r| r.is_success())
    }

    pub fn update(&mut self, params: impl Into<Params>) -> Result<bool> {
        self.run_command(CommandKind::Update, params.into())
            .map(|r| r.is_success())
    }

    pub fn delete(&mut self, params: impl Into<Params>) -> Result<bool> {
        self.run_command(CommandKind::Delete, params.into())
            .map(|r| r.is_success())
    }

    fn run_command(&mut self, kind: CommandKind, params: Params) -> Result<ExecutionResult> {
        self.session()?;
        let sql = self
            .commands
            .get(kind)
            .filter(|sql| !sql.trim().is_empty())
            .ok_or(AdapterError::CommandNotSet(kind))?
            .to_string();
        self.execute(&sql, params, kind.is_query())
    }

    /// Prepares `sql`, binds `params` and runs it.
    ///
    /// With `is_query` every result row is fetched and returned; otherwise the
    /// statement runs to completion, any rows it yields are dropped, and the
    /// result is [`ExecutionResult::Success`]. Statements are prepared afresh
    /// on every call.
    pub fn execute(
        &mut self,
        sql: &str,
        params: impl Into<Params>,
        is_query: bool,
    ) -> Result<ExecutionResult> {
        let params = params.into();
        let session = self.session()?;

        if sql.trim().is_empty() {
            return Err(AdapterError::prepare(sql, "empty statement"));
        }
        let style = parser::analyze(sql).map_err(|e| AdapterError::prepare(sql, e.to_string()))?;

        let mut stmt = session
            .prepare(sql)
            .map_err(|e| AdapterError::prepare(sql, e.message))?;
        debug!(sql, binding = params.mode(), count = params.len(), "prepared statement");

        binding::bind_params(&mut stmt, sql, &style, &params)?;

        if is_query {
            let rows = stmt
                .fetch_all()
                .map_err(|e| AdapterError::execution(sql, e.message))?;
            debug!(rows = rows.len(), "query returned rows");
            Ok(ExecutionResult::Rows(rows))
        } else {
            stmt.execute()
                .map_err(|e| AdapterError::execution(sql, e.message))?;
            Ok(ExecutionResult::Success)
        }
    }

    /// Placeholder layout of the stored template for `kind`.
    pub fn placeholders(&self, kind: CommandKind) -> Result<Option<PlaceholderStyle>> {
        self.command(kind)?
            .map(|sql| parser::analyze(sql).map_err(|e| AdapterError::prepare(sql, e.to_string())))
            .transpose()
    }
}

impl<S: Session> Drop for StatementExecutor<S> {
    fn drop(&mut self) {
        if let Err(e) = self.close() {
            warn!(error = %e, "failed to close connection on drop");
        }
    }
}

impl<S: Session> std::fmt::Debug for StatementExecutor<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StatementExecutor")
            .field("connected", &self.is_connected())
            .field("host", &self.host)
            .field("database", &self.database)
            .field("commands", &self.commands)
            .finish()
    }
}
