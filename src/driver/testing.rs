// Recording driver for executor tests

use std::cell::RefCell;
use std::rc::Rc;

use super::{ConnectParams, Driver, DriverError, Session, Statement};
use crate::core::{Row, Value};

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Connect(String),
    Prepare(String),
    BindPosition(usize, Value),
    BindName(String, Value),
    Execute,
    FetchAll,
    LastInsertId,
    Close,
}

/// Driver that logs every call and answers queries with canned rows.
#[derive(Clone, Default)]
pub struct RecordingDriver {
    pub calls: Rc<RefCell<Vec<Call>>>,
    pub rows: Vec<Row>,
    pub fail_connect: Option<String>,
    pub fail_prepare: Option<String>,
    pub fail_execute: Option<String>,
    pub last_insert_id: Option<i64>,
}

impl RecordingDriver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    pub fn clear(&self) {
        self.calls.borrow_mut().clear();
    }
}

impl Driver for RecordingDriver {
    type Session = RecordingSession;

    fn connect(&self, params: &ConnectParams) -> Result<RecordingSession, DriverError> {
        self.calls.borrow_mut().push(Call::Connect(params.database.clone()));
        if let Some(msg) = &self.fail_connect {
            return Err(DriverError::new(msg.clone()));
        }
        Ok(RecordingSession {
            driver: self.clone(),
        })
    }
}

pub struct RecordingSession {
    driver: RecordingDriver,
}

impl RecordingSession {
    fn record(&self, call: Call) {
        self.driver.calls.borrow_mut().push(call);
    }
}

impl Session for RecordingSession {
    type Statement<'a> = RecordingStatement<'a>;

    fn prepare(&self, sql: &str) -> Result<RecordingStatement<'_>, DriverError> {
        self.record(Call::Prepare(sql.to_string()));
        if let Some(msg) = &self.driver.fail_prepare {
            return Err(DriverError::new(msg.clone()));
        }
        Ok(RecordingStatement { session: self })
    }

    fn last_insert_id(&self) -> Option<i64> {
        self.record(Call::LastInsertId);
        self.driver.last_insert_id
    }

    fn close(self) -> Result<(), DriverError> {
        self.record(Call::Close);
        Ok(())
    }
}

pub struct RecordingStatement<'a> {
    session: &'a RecordingSession,
}

impl Statement for RecordingStatement<'_> {
    fn bind_position(&mut self, index: usize, value: &Value) -> Result<(), DriverError> {
        self.session.record(Call::BindPosition(index, value.clone()));
        Ok(())
    }

    fn bind_name(&mut self, name: &str, value: &Value) -> Result<(), DriverError> {
        self.session.record(Call::BindName(name.to_string(), value.clone()));
        Ok(())
    }

    fn execute(&mut self) -> Result<(), DriverError> {
        self.session.record(Call::Execute);
        match &self.session.driver.fail_execute {
            Some(msg) => Err(DriverError::new(msg.clone())),
            None => Ok(()),
        }
    }

    fn fetch_all(&mut self) -> Result<Vec<Row>, DriverError> {
        self.session.record(Call::FetchAll);
        match &self.session.driver.fail_execute {
            Some(msg) => Err(DriverError::new(msg.clone())),
            None => Ok(self.session.driver.rows.clone()),
        }
    }
}
