use crate::error::ConfigError;
use serde::Deserialize;
use std::path::PathBuf;

/// The root configuration structure for the entire application.
///
/// Every section is optional in the TOML file; missing values fall back to the
/// defaults below.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub database: DatabaseSettings,
    pub ingest: IngestSettings,
    pub summary: SummarySettings,
    pub logging: LoggingSettings,
}

/// Where the SQLite store lives and how long to wait for its connection.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DatabaseSettings {
    /// A sqlx SQLite URL, e.g. `sqlite://inventory.db`. The file is created if missing.
    pub url: String,
    pub acquire_timeout_secs: u64,
}

/// Controls the bulk CSV load.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct IngestSettings {
    /// Directory scanned (non-recursively) for `*.csv` files.
    pub data_dir: PathBuf,
    /// Stop at the first file that fails instead of loading the rest.
    pub fail_fast: bool,
    pub show_progress: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SummarySettings {
    /// Name of the table the enriched summary is written to.
    pub table_name: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Directory holding the per-command log files. Created if missing.
    pub directory: PathBuf,
    /// Default filter directive; `RUST_LOG` takes precedence when set.
    pub level: String,
    /// Also log to the console.
    pub console: bool,
}

// --- Default Implementations ---

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            url: "sqlite://inventory.db".to_string(),
            acquire_timeout_secs: 5,
        }
    }
}

impl Default for IngestSettings {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            fail_fast: false,
            show_progress: true,
        }
    }
}

impl Default for SummarySettings {
    fn default() -> Self {
        Self {
            table_name: "vendor_sales_summary".to_string(),
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("logs"),
            level: "info".to_string(),
            console: true,
        }
    }
}

/// Command-line values that take precedence over the file and environment.
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "clap", derive(clap::Args))]
pub struct CliOverrides {
    /// SQLite database URL (e.g. "sqlite://inventory.db").
    #[cfg_attr(feature = "clap", arg(long, global = true))]
    pub database_url: Option<String>,

    /// Directory containing the CSV files to load.
    #[cfg_attr(feature = "clap", arg(long, global = true))]
    pub data_dir: Option<PathBuf>,

    /// Name of the output summary table.
    #[cfg_attr(feature = "clap", arg(long, global = true))]
    pub summary_table: Option<String>,

    /// Directory for log files.
    #[cfg_attr(feature = "clap", arg(long, global = true))]
    pub log_dir: Option<PathBuf>,
}

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

impl Settings {
    /// Applies command-line overrides on top of the loaded values.
    pub fn apply_overrides(&mut self, overrides: &CliOverrides) {
        if let Some(url) = &overrides.database_url {
            self.database.url = url.clone();
        }
        if let Some(dir) = &overrides.data_dir {
            self.ingest.data_dir = dir.clone();
        }
        if let Some(name) = &overrides.summary_table {
            self.summary.table_name = name.clone();
        }
        if let Some(dir) = &overrides.log_dir {
            self.logging.directory = dir.clone();
        }
    }

    /// Checks the values that would otherwise only fail deep inside a run.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.database.url.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "database.url must not be empty".to_string(),
            ));
        }
        if self.summary.table_name.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "summary.table_name must not be empty".to_string(),
            ));
        }
        let level = self.logging.level.to_ascii_lowercase();
        if !LOG_LEVELS.contains(&level.as_str()) {
            return Err(ConfigError::ValidationError(format!(
                "logging.level '{}' is not one of {}",
                self.logging.level,
                LOG_LEVELS.join(", ")
            )));
        }
        Ok(())
    }
}
