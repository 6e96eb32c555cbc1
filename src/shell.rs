// Interactive shell: meta-command parsing and result rendering

use comfy_table::{Cell, Table as ComfyTable, presets::UTF8_FULL};

use crate::config::OutputFormat;
use crate::core::{AdapterError, CommandKind, Params, Result, Row};
use crate::driver::Session;
use crate::executor::{ExecutionResult, StatementExecutor};
use crate::parser::parse_params;

/// One line of shell input.
#[derive(Debug, Clone, PartialEq)]
pub enum ShellCommand {
    /// `\set <kind> <sql>`
    SetCommand(CommandKind, String),
    /// `\select [params]`, `\insert ...`, `\update ...`, `\delete ...`
    Run(CommandKind, Params),
    /// `\bind [params]` - parameters for the next raw statement
    Bind(Params),
    /// `\lastid`
    LastInsertId,
    /// `\commands`
    ListCommands,
    /// `\?`
    Help,
    /// `\q`
    Quit,
    /// Anything not starting with a backslash
    Sql(String),
}

pub const HELP: &str = "\
Meta-commands:
  \\set <select|insert|update|delete> <sql>   - Store a command template
  \\select [params]                           - Run the stored select command
  \\insert [params]                           - Run the stored insert command
  \\update [params]                           - Run the stored update command
  \\delete [params]                           - Run the stored delete command
  \\bind [params]                             - Parameters for the next SQL line
  \\lastid                                    - Show the last insert id
  \\commands                                  - List stored command templates
  \\?                                         - Show this help
  \\q                                         - Quit

Params: comma-separated literals, optionally named:
  3
  'new@example.com', 42
  :email = 'a@b.com', :pw = 'h'
Any other input is executed as SQL.";

impl ShellCommand {
    pub fn parse(line: &str) -> Result<Self> {
        let line = line.trim();
        let Some(meta) = line.strip_prefix('\\') else {
            return Ok(Self::Sql(line.to_string()));
        };

        let (word, rest) = meta
            .split_once(char::is_whitespace)
            .map_or((meta, ""), |(w, r)| (w, r.trim()));

        match word {
            "q" | "quit" => Ok(Self::Quit),
            "?" | "h" | "help" => Ok(Self::Help),
            "lastid" => Ok(Self::LastInsertId),
            "commands" => Ok(Self::ListCommands),
            "bind" => Ok(Self::Bind(parse_params(rest)?)),
            "set" => {
                let (kind, sql) = rest.split_once(char::is_whitespace).ok_or_else(|| {
                    AdapterError::InvalidParams("usage: \\set <select|insert|update|delete> <sql>".to_string())
                })?;
                let kind = kind.parse::<CommandKind>().map_err(AdapterError::InvalidParams)?;
                Ok(Self::SetCommand(kind, sql.trim().to_string()))
            }
            other => match other.parse::<CommandKind>() {
                Ok(kind) => Ok(Self::Run(kind, parse_params(rest)?)),
                Err(_) => Err(AdapterError::InvalidParams(format!(
                    "unknown meta-command \\{other}, use \\? for help"
                ))),
            },
        }
    }
}

/// Whether a raw SQL line should be fetched as a query.
pub fn is_query_sql(sql: &str) -> bool {
    let keyword = sql
        .trim_start_matches(|c: char| c.is_whitespace() || c == '(')
        .split(|c: char| !c.is_ascii_alphabetic())
        .next()
        .unwrap_or_default()
        .to_ascii_uppercase();
    matches!(keyword.as_str(), "SELECT" | "WITH" | "PRAGMA" | "VALUES" | "EXPLAIN")
}

/// Shell session state on top of an executor.
pub struct Shell<S: Session> {
    executor: StatementExecutor<S>,
    format: OutputFormat,
    pending: Params,
}

/// What the loop should do after a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Print(String),
    Quit,
}

impl<S: Session> Shell<S> {
    pub fn new(executor: StatementExecutor<S>, format: OutputFormat) -> Self {
        Self {
            executor,
            format,
            pending: Params::None,
        }
    }

    pub const fn executor(&self) -> &StatementExecutor<S> {
        &self.executor
    }

    pub fn handle_line(&mut self, line: &str) -> Result<Outcome> {
        if line.trim().is_empty() {
            return Ok(Outcome::Print(String::new()));
        }
        self.handle(ShellCommand::parse(line)?)
    }

    pub fn handle(&mut self, command: ShellCommand) -> Result<Outcome> {
        let text = match command {
            ShellCommand::Quit => {
                self.executor.close()?;
                return Ok(Outcome::Quit);
            }
            ShellCommand::Help => HELP.to_string(),
            ShellCommand::SetCommand(kind, sql) => {
                self.executor.set_command(kind, sql)?;
                format!("{kind} command set")
            }
            ShellCommand::Bind(params) => {
                let count = params.len();
                self.pending = params;
                format!("{count} parameter(s) bound for the next statement")
            }
            ShellCommand::LastInsertId => self.executor.get_last_insert_id()?.to_string(),
            ShellCommand::ListCommands => self
                .executor
                .commands()?
                .iter()
                .map(|(kind, sql)| format!("{kind:<6} | {}", sql.unwrap_or("(not set)")))
                .collect::<Vec<_>>()
                .join("\n"),
            ShellCommand::Run(kind, params) => match kind {
                CommandKind::Select => render_rows(&self.executor.select(params)?, self.format),
                CommandKind::Insert => render_success(self.executor.insert(params)?),
                CommandKind::Update => render_success(self.executor.update(params)?),
                CommandKind::Delete => render_success(self.executor.delete(params)?),
            },
            ShellCommand::Sql(sql) => {
                let params = std::mem::take(&mut self.pending);
                match self.executor.execute(&sql, params, is_query_sql(&sql))? {
                    ExecutionResult::Rows(rows) => render_rows(&rows, self.format),
                    ExecutionResult::Success => render_success(true),
                }
            }
        };
        Ok(Outcome::Print(text))
    }
}

fn render_success(ok: bool) -> String {
    if ok { "OK".to_string() } else { "FAILED".to_string() }
}

/// Renders rows as a table with a row count, or as a JSON array.
pub fn render_rows(rows: &[Row], format: OutputFormat) -> String {
    match format {
        OutputFormat::Json => serde_json::to_string_pretty(rows).unwrap_or_else(|e| format!("JSON error: {e}")),
        OutputFormat::Table => {
            let Some(first) = rows.first() else {
                return "(0 rows)".to_string();
            };
            let mut table = ComfyTable::new();
            table.load_preset(UTF8_FULL);

            // Add header
            table.set_header(first.columns().iter().map(Cell::new));

            // Add rows
            for row in rows {
                table.add_row(row.values().iter().map(|v| Cell::new(v.to_string())));
            }

            format!("{}\n({} rows)", table, rows.len())
        }
    }
}
