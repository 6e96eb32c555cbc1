use std::path::PathBuf;

use clap::Parser;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use tracing_subscriber::EnvFilter;

use sqladapter::config::{AdapterConfig, OutputFormat, Overrides};
use sqladapter::shell::{Outcome, Shell};
use sqladapter::{SqliteDriver, StatementExecutor};

/// sqladapter interactive shell
#[derive(Parser, Debug)]
#[command(name = "sqladapter")]
#[command(about = "Run stored and ad-hoc parameterized SQL statements", long_about = None)]
struct Args {
    /// Database host
    #[arg(short = 'H', long)]
    host: Option<String>,

    /// Database name (a file path or :memory: for SQLite)
    #[arg(short = 'd', long)]
    database: Option<String>,

    /// Database user
    #[arg(short = 'U', long)]
    user: Option<String>,

    /// Database password
    #[arg(short = 'W', long)]
    password: Option<String>,

    /// Config file (defaults to ./sqladapter.toml when present)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output format for query results
    #[arg(long, value_enum)]
    format: Option<OutputFormat>,

    /// Run a single line and exit
    #[arg(short = 'c', long)]
    command: Option<String>,
}

impl Args {
    fn overrides(&self) -> Overrides {
        Overrides {
            host: self.host.clone(),
            database: self.database.clone(),
            user: self.user.clone(),
            password: self.password.clone(),
            format: self.format,
        }
    }
}

fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let config = AdapterConfig::load(args.config.as_deref(), &args.overrides())?;
    init_logging(&config.log_level);

    let executor = StatementExecutor::connect(&SqliteDriver, &config.connect_params())?;
    let mut shell = Shell::new(executor, config.format);

    // One-shot mode
    if let Some(line) = &args.command {
        if let Outcome::Print(text) = shell.handle_line(line)? {
            println!("{text}");
        }
        return Ok(());
    }

    println!("sqladapter {} - connected to {}", env!("CARGO_PKG_VERSION"), config.database);
    println!("Type \\? for help, \\q to quit.\n");

    let mut rl = DefaultEditor::new()?;

    let history_file = dirs::home_dir().map(|mut p| {
        p.push(".sqladapter_history");
        p
    });

    if let Some(ref path) = history_file {
        let _ = rl.load_history(path); // Ignore error if file doesn't exist
    }

    loop {
        match rl.readline("sqladapter> ") {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(line);

                match shell.handle_line(line) {
                    Ok(Outcome::Print(text)) => println!("{text}"),
                    Ok(Outcome::Quit) => break,
                    Err(e) => eprintln!("ERROR: {e}"),
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("^C");
                break;
            }
            Err(ReadlineError::Eof) => {
                println!("\\q");
                break;
            }
            Err(err) => {
                eprintln!("Error: {err:?}");
                return Err(err.into());
            }
        }
    }

    if let Some(ref path) = history_file {
        let _ = rl.save_history(path);
    }

    Ok(())
}
