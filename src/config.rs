// Layered configuration: defaults < config file < SQLADAPTER_* env < CLI flags

use std::collections::HashMap;
use std::path::Path;

use config::{Config, Environment, File};
use serde::Deserialize;

use crate::core::Result;
use crate::driver::ConnectParams;

pub const ENV_PREFIX: &str = "SQLADAPTER";
pub const DEFAULT_CONFIG_FILE: &str = "./sqladapter.toml";

/// How the shell prints query results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AdapterConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_database")]
    pub database: String,
    #[serde(default)]
    pub user: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub format: OutputFormat,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_host() -> String {
    "localhost".to_string()
}

fn default_database() -> String {
    ":memory:".to_string()
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for AdapterConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            database: default_database(),
            user: String::new(),
            password: String::new(),
            format: OutputFormat::default(),
            log_level: default_log_level(),
        }
    }
}

/// Values given on the command line; `None` leaves the lower layers alone.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub host: Option<String>,
    pub database: Option<String>,
    pub user: Option<String>,
    pub password: Option<String>,
    pub format: Option<OutputFormat>,
}

impl AdapterConfig {
    /// Loads from `path` (required when given), else from
    /// [`DEFAULT_CONFIG_FILE`] if it exists, then the process environment.
    pub fn load(path: Option<&Path>, overrides: &Overrides) -> Result<Self> {
        Self::load_from(path, None, overrides)
    }

    /// Like [`load`](Self::load), reading environment variables from `env`
    /// instead of the process when it is given.
    pub fn load_from(
        path: Option<&Path>,
        env: Option<HashMap<String, String>>,
        overrides: &Overrides,
    ) -> Result<Self> {
        let mut builder = Config::builder();

        builder = match path {
            Some(path) => builder.add_source(File::from(path).required(true)),
            None => builder.add_source(File::with_name(DEFAULT_CONFIG_FILE).required(false)),
        };

        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .source(env),
        );

        let mut config: Self = builder.build()?.try_deserialize()?;
        config.apply(overrides);
        Ok(config)
    }

    fn apply(&mut self, overrides: &Overrides) {
        if let Some(host) = &overrides.host {
            self.host.clone_from(host);
        }
        if let Some(database) = &overrides.database {
            self.database.clone_from(database);
        }
        if let Some(user) = &overrides.user {
            self.user.clone_from(user);
        }
        if let Some(password) = &overrides.password {
            self.password.clone_from(password);
        }
        if let Some(format) = overrides.format {
            self.format = format;
        }
    }

    pub fn connect_params(&self) -> ConnectParams {
        ConnectParams::new(&self.host, &self.database, &self.user, &self.password)
    }
}
