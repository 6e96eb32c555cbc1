use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use rusqlite::hooks::Action;
use rusqlite::types::{ToSql, ToSqlOutput, Value as SqlValue, ValueRef};

use super::{ConnectParams, Driver, DriverError, Session, Statement};
use crate::core::{Row, Value};

impl From<rusqlite::Error> for DriverError {
    fn from(err: rusqlite::Error) -> Self {
        Self::new(err.to_string())
    }
}

/// SQLite driver. `database` is the file path (`:memory:` for a private
/// in-memory database); host and credentials have no meaning for SQLite
/// and are ignored.
#[derive(Debug, Clone, Copy, Default)]
pub struct SqliteDriver;

impl Driver for SqliteDriver {
    type Session = SqliteSession;

    fn connect(&self, params: &ConnectParams) -> Result<SqliteSession, DriverError> {
        let conn = if params.database.is_empty() || params.database == ":memory:" {
            rusqlite::Connection::open_in_memory()?
        } else {
            rusqlite::Connection::open(&params.database)?
        };

        // `last_insert_rowid` is 0 both before any insert and after inserting
        // rowid 0, so inserts are tracked through the update hook instead.
        let inserted = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&inserted);
        conn.update_hook(Some(move |action: Action, _db: &str, _table: &str, _rowid: i64| {
            if matches!(action, Action::SQLITE_INSERT) {
                flag.store(true, Ordering::Relaxed);
            }
        }));

        Ok(SqliteSession { conn, inserted })
    }
}

#[derive(Debug)]
pub struct SqliteSession {
    conn: rusqlite::Connection,
    inserted: Arc<AtomicBool>,
}

impl Session for SqliteSession {
    type Statement<'a> = SqliteStatement<'a>;

    fn prepare(&self, sql: &str) -> Result<SqliteStatement<'_>, DriverError> {
        let stmt = self.conn.prepare(sql)?;
        let columns: Vec<String> = stmt.column_names().into_iter().map(str::to_string).collect();
        Ok(SqliteStatement { stmt, columns })
    }

    fn last_insert_id(&self) -> Option<i64> {
        self.inserted
            .load(Ordering::Relaxed)
            .then(|| self.conn.last_insert_rowid())
    }

    fn close(self) -> Result<(), DriverError> {
        self.conn.close().map_err(|(_, err)| err.into())
    }
}

pub struct SqliteStatement<'conn> {
    stmt: rusqlite::Statement<'conn>,
    columns: Vec<String>,
}

impl Statement for SqliteStatement<'_> {
    fn bind_position(&mut self, index: usize, value: &Value) -> Result<(), DriverError> {
        self.stmt.raw_bind_parameter(index, value)?;
        Ok(())
    }

    fn bind_name(&mut self, name: &str, value: &Value) -> Result<(), DriverError> {
        let index = self
            .stmt
            .parameter_index(name)?
            .ok_or_else(|| DriverError::new(format!("Invalid parameter name: {name}")))?;
        self.stmt.raw_bind_parameter(index, value)?;
        Ok(())
    }

    fn execute(&mut self) -> Result<(), DriverError> {
        let mut rows = self.stmt.raw_query();
        while rows.next()?.is_some() {}
        Ok(())
    }

    fn fetch_all(&mut self) -> Result<Vec<Row>, DriverError> {
        let width = self.columns.len();
        let mut rows = self.stmt.raw_query();
        let mut out = Vec::new();
        while let Some(row) = rows.next()? {
            let values = (0..width)
                .map(|idx| row.get_ref(idx).map(from_sql))
                .collect::<rusqlite::Result<Vec<_>>>()?;
            out.push(Row::new(self.columns.clone(), values));
        }
        Ok(out)
    }
}

fn from_sql(value: ValueRef<'_>) -> Value {
    match value {
        ValueRef::Null => Value::Null,
        ValueRef::Integer(i) => Value::Integer(i),
        ValueRef::Real(r) => Value::Real(r),
        ValueRef::Text(t) => Value::Text(String::from_utf8_lossy(t).into_owned()),
        ValueRef::Blob(b) => Value::Bytea(b.to_vec()),
    }
}

impl ToSql for Value {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(match self {
            Self::Null => ToSqlOutput::Owned(SqlValue::Null),
            Self::Integer(i) => ToSqlOutput::Owned(SqlValue::Integer(*i)),
            Self::Real(r) => ToSqlOutput::Owned(SqlValue::Real(*r)),
            Self::Boolean(b) => ToSqlOutput::Owned(SqlValue::Integer(i64::from(*b))),
            Self::Text(s) | Self::Json(s) => ToSqlOutput::Borrowed(ValueRef::Text(s.as_bytes())),
            Self::Bytea(b) => ToSqlOutput::Borrowed(ValueRef::Blob(b)),
            // SQLite has no native type for these; store their text form.
            Self::Numeric(_)
            | Self::Date(_)
            | Self::Timestamp(_)
            | Self::TimestampTz(_)
            | Self::Uuid(_) => ToSqlOutput::Owned(SqlValue::Text(self.to_string())),
        })
    }
}
