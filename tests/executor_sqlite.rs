// End-to-end runs of the executor against a real SQLite database
use sqladapter::{AdapterError, CommandKind, ConnectParams, ExecutionResult, Params, SqliteDriver, StatementExecutor, Value};
use tempfile::TempDir;

const SCHEMA: &str = "CREATE TABLE users (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    email TEXT NOT NULL UNIQUE,
    pw TEXT
)";

fn users_db() -> StatementExecutor {
    let mut exec = StatementExecutor::open("localhost", ":memory:", "", "").unwrap();
    exec.execute(SCHEMA, (), false).unwrap();
    exec
}

#[test]
fn test_named_insert_then_select_by_id() {
    let mut exec = users_db();
    exec.set_insert_command("INSERT INTO users (email, pw) VALUES (:email, :pw)").unwrap();
    exec.set_select_command("SELECT * FROM users WHERE id = ?").unwrap();

    assert!(exec.insert(Params::named([("email", "a@b.com"), ("pw", "h")])).unwrap());
    let id = exec.get_last_insert_id().unwrap();
    assert!(id > 0);

    let rows = exec.select(id).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].get("email"), Some(&Value::from("a@b.com")));
    assert_eq!(rows[0].get("id"), Some(&Value::Integer(id)));
    assert_eq!(rows[0].columns(), ["id", "email", "pw"]);
}

#[test]
fn test_scalar_and_single_element_list_agree() {
    let mut exec = users_db();
    exec.set_insert_command("INSERT INTO users (email) VALUES (?)").unwrap();
    for email in ["one@x.io", "two@x.io", "three@x.io"] {
        exec.insert(email).unwrap();
    }
    exec.set_select_command("SELECT * FROM users WHERE id = ?").unwrap();

    let scalar = exec.select(3).unwrap();
    let list = exec.select(vec![3]).unwrap();
    assert_eq!(scalar, list);
    assert_eq!(scalar[0].get("email"), Some(&Value::from("three@x.io")));
}

#[test]
fn test_positional_update_and_delete() {
    let mut exec = users_db();
    exec.set_insert_command("INSERT INTO users (email) VALUES (?)").unwrap();
    exec.set_update_command("UPDATE users SET email = ? WHERE id = ?").unwrap();
    exec.set_delete_command("DELETE FROM users WHERE id = :id").unwrap();
    exec.set_select_command("SELECT email FROM users ORDER BY id").unwrap();

    exec.insert("old@example.com").unwrap();
    let id = exec.get_last_insert_id().unwrap();

    assert!(exec.update(Params::positional([Value::from("new@example.com"), Value::Integer(id)])).unwrap());
    let rows = exec.select(()).unwrap();
    assert_eq!(rows[0].get("email"), Some(&Value::from("new@example.com")));

    assert!(exec.delete(Params::named([("id", id)])).unwrap());
    assert!(exec.select(()).unwrap().is_empty());
}

#[test]
fn test_select_with_no_matches_is_empty() {
    let mut exec = users_db();
    exec.set_select_command("SELECT * FROM users WHERE id = ?").unwrap();
    assert!(exec.select(42).unwrap().is_empty());
}

#[test]
fn test_unknown_column_is_a_prepare_error() {
    let mut exec = users_db();
    exec.set_select_command("SELECT nope FROM users").unwrap();
    let err = exec.select(()).unwrap_err();
    assert!(matches!(err, AdapterError::Prepare { ref message, .. } if message.contains("nope")));
}

#[test]
fn test_unique_violation_is_an_execution_error() {
    let mut exec = users_db();
    exec.set_insert_command("INSERT INTO users (email) VALUES (?)").unwrap();
    exec.insert("dup@example.com").unwrap();
    let err = exec.insert("dup@example.com").unwrap_err();
    assert!(matches!(err, AdapterError::Execution { ref message, .. } if message.contains("UNIQUE")));
}

#[test]
fn test_returning_in_write_mode_is_success() {
    let mut exec = users_db();
    let result = exec
        .execute("INSERT INTO users (email) VALUES (?) RETURNING id", "r@example.com", false)
        .unwrap();
    assert_eq!(result, ExecutionResult::Success);
    assert_eq!(exec.get_last_insert_id().unwrap(), 1);
}

#[test]
fn test_direct_query_returns_rows_in_order() {
    let mut exec = users_db();
    for email in ["b@x.io", "a@x.io"] {
        exec.execute("INSERT INTO users (email) VALUES (:email)", Params::named([("email", email)]), false)
            .unwrap();
    }
    let rows = exec
        .execute("SELECT email FROM users ORDER BY email", (), true)
        .unwrap()
        .into_rows()
        .unwrap();
    let emails: Vec<_> = rows.iter().filter_map(|r| r.get("email")).cloned().collect();
    assert_eq!(emails, vec![Value::from("a@x.io"), Value::from("b@x.io")]);
}

#[test]
fn test_repeated_and_sparse_numbered_placeholders() {
    let mut exec = users_db();
    exec.execute("INSERT INTO users (email, pw) VALUES (?1, ?1)", "same@x.io", false)
        .unwrap();
    let rows = exec
        .execute("SELECT id FROM users WHERE email = ?1 AND pw = ?1", "same@x.io", true)
        .unwrap()
        .into_rows()
        .unwrap();
    assert_eq!(rows.len(), 1);

    let err = exec.execute("SELECT ?3 AS v", 7, true).unwrap_err();
    assert!(matches!(err, AdapterError::Execution { .. }));
}

#[test]
fn test_at_and_dollar_placeholders() {
    let mut exec = users_db();
    exec.execute("INSERT INTO users (email) VALUES (@email)", Params::named([("@email", "at@x.io")]), false)
        .unwrap();

    let unbound = exec.execute("DELETE FROM users WHERE email = @email", (), false);
    assert!(matches!(unbound, Err(AdapterError::Execution { .. })));

    let rows = exec
        .execute("SELECT email FROM users WHERE id = $id", Params::named([("$id", 1)]), true)
        .unwrap()
        .into_rows()
        .unwrap();
    assert_eq!(rows[0].get("email"), Some(&Value::from("at@x.io")));
}

#[test]
fn test_last_insert_id_of_rowid_zero() {
    let mut exec = users_db();
    exec.execute("INSERT INTO users (id, email) VALUES (0, 'zero@x.io')", (), false)
        .unwrap();
    assert_eq!(exec.get_last_insert_id().unwrap(), 0);
}

#[test]
fn test_last_insert_id_before_any_insert() {
    let exec = users_db();
    assert!(matches!(exec.get_last_insert_id(), Err(AdapterError::NoInsertId)));
}

#[test]
fn test_closed_executor_rejects_everything() {
    let mut exec = users_db();
    exec.set_select_command("SELECT * FROM users").unwrap();
    exec.close().unwrap();
    exec.close().unwrap();

    assert!(!exec.is_connected());
    assert!(matches!(exec.select(()), Err(AdapterError::NotConnected)));
    assert!(matches!(exec.execute("SELECT 1", (), true), Err(AdapterError::NotConnected)));
    assert!(matches!(exec.command(CommandKind::Select), Err(AdapterError::NotConnected)));
}

#[test]
fn test_connection_failure() {
    let err = StatementExecutor::open("localhost", "/nonexistent/dir/app.db", "", "").unwrap_err();
    assert!(matches!(err, AdapterError::Connection { ref database, .. } if database == "/nonexistent/dir/app.db"));
}

#[test]
fn test_data_persists_across_scoped_sessions() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("app.db");
    let params = ConnectParams::new("localhost", path.to_string_lossy(), "", "");

    StatementExecutor::scoped(&SqliteDriver, &params, |exec| {
        exec.execute(SCHEMA, (), false)?;
        exec.set_insert_command("INSERT INTO users (email, pw) VALUES (:email, :pw)")?;
        exec.insert(Params::named([("email", "kept@example.com"), ("pw", "x")]))?;
        Ok(())
    })
    .unwrap();

    {
        // Dropped without an explicit close
        let mut exec = StatementExecutor::connect(&SqliteDriver, &params).unwrap();
        exec.execute("INSERT INTO users (email) VALUES ('second@example.com')", (), false)
            .unwrap();
    }

    let mut exec = StatementExecutor::connect(&SqliteDriver, &params).unwrap();
    let rows = exec
        .execute("SELECT email FROM users ORDER BY id", (), true)
        .unwrap()
        .into_rows()
        .unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].get("email"), Some(&Value::from("kept@example.com")));
}
