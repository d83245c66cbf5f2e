//! Configuration for the `TodoMaster` client.
//!
//! Supports layered configuration with the following priority (highest first):
//! 1. CLI arguments
//! 2. Environment variables (via clap `env` attribute)
//! 3. TOML config file (`~/.config/todomaster/config.toml`)
//! 4. Compiled defaults
//!
//! Missing config file is not an error (defaults are used). An explicit
//! `--config` path that doesn't exist is an error.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::NaiveDate;
use todomaster_core::CategoryFilter;

use crate::ui::theme::Theme;

/// Name of the data file when no path is configured.
pub const DATA_FILE_NAME: &str = "todo_data.json";

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file.
    #[error("failed to read config file {path}: {source}")]
    ReadFile {
        /// Path that was attempted.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Failed to parse the TOML configuration.
    #[error("failed to parse config file: {0}")]
    ParseToml(#[from] toml::de::Error),

    /// A setting parsed but holds an unusable value.
    #[error("invalid value for {key}: {message}")]
    InvalidValue {
        /// Dotted key of the setting, e.g. `ui.date_format`.
        key: &'static str,
        /// What is wrong with it.
        message: String,
    },
}

/// Top-level TOML config file structure.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
struct ConfigFile {
    storage: StorageFileConfig,
    ui: UiFileConfig,
}

/// `[storage]` section of the config file.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
struct StorageFileConfig {
    data_file: Option<PathBuf>,
}

/// `[ui]` section of the config file.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
struct UiFileConfig {
    poll_timeout_ms: Option<u64>,
    default_category: Option<String>,
    date_format: Option<String>,
    theme: Option<String>,
}

/// Fully resolved client configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// JSON file the task list is kept in.
    pub data_file: PathBuf,
    /// Poll timeout for the TUI event loop.
    pub poll_timeout: Duration,
    /// Sidebar entry selected at startup.
    pub default_category: CategoryFilter,
    /// Due date display format string (chrono).
    pub date_format: String,
    /// Colour scheme at startup.
    pub theme: Theme,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_file: default_data_file(),
            poll_timeout: Duration::from_millis(100),
            default_category: CategoryFilter::All,
            date_format: "%Y-%m-%d".to_string(),
            theme: Theme::default(),
        }
    }
}

impl Config {
    /// Load configuration by merging CLI args, env vars, and a TOML file.
    ///
    /// If `--config` is given and the file does not exist, returns an error.
    /// Otherwise the default path (`~/.config/todomaster/config.toml`) is
    /// tried and silently ignored if missing.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the config file cannot be read or parsed,
    /// or if one of its values is unusable.
    pub fn load(cli: &CliArgs) -> Result<Self, ConfigError> {
        let file = load_config_file(cli.config.as_deref())?;
        Self::resolve(cli, &file)
    }

    /// CLI args over compiled defaults, ignoring any config file.
    ///
    /// Used when the config file cannot be loaded.
    #[must_use]
    pub fn from_cli(cli: &CliArgs) -> Self {
        let defaults = Self::default();
        Self {
            data_file: cli.data_file.clone().unwrap_or(defaults.data_file),
            default_category: cli.category.unwrap_or(defaults.default_category),
            ..defaults
        }
    }

    /// Resolve a `Config` from CLI args and a parsed config file.
    ///
    /// Priority: CLI > file > default. Separate from `load()` so it can be
    /// tested without CLI parsing.
    fn resolve(cli: &CliArgs, file: &ConfigFile) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let default_category = match (cli.category, file.ui.default_category.as_deref()) {
            (Some(filter), _) => filter,
            (None, Some(raw)) => raw.parse::<CategoryFilter>().map_err(|e| ConfigError::InvalidValue {
                key: "ui.default_category",
                message: e.to_string(),
            })?,
            (None, None) => defaults.default_category,
        };

        let date_format = file
            .ui
            .date_format
            .clone()
            .unwrap_or(defaults.date_format);
        check_date_format(&date_format)?;

        let theme = match file.ui.theme.as_deref() {
            Some(raw) => raw.parse::<Theme>().map_err(|e| ConfigError::InvalidValue {
                key: "ui.theme",
                message: e.to_string(),
            })?,
            None => defaults.theme,
        };

        Ok(Self {
            data_file: cli
                .data_file
                .clone()
                .or_else(|| file.storage.data_file.clone())
                .unwrap_or(defaults.data_file),
            poll_timeout: file
                .ui
                .poll_timeout_ms
                .map_or(defaults.poll_timeout, Duration::from_millis),
            default_category,
            date_format,
            theme,
        })
    }
}

/// Rejects formats chrono cannot render for a plain date, including ones
/// that ask for time fields such as `%H`.
fn check_date_format(date_format: &str) -> Result<(), ConfigError> {
    let mut rendered = String::new();
    write!(rendered, "{}", NaiveDate::default().format(date_format)).map_err(|_| {
        ConfigError::InvalidValue {
            key: "ui.date_format",
            message: format!("{date_format:?} cannot be used to show a date"),
        }
    })
}

/// CLI arguments parsed by clap.
#[derive(clap::Parser, Debug, Default)]
#[command(version, about = "Terminal to-do list manager")]
pub struct CliArgs {
    /// Path to the task data file (default: `todo_data.json` next to the executable).
    #[arg(long, env = "TODOMASTER_DATA")]
    pub data_file: Option<PathBuf>,

    /// Category shown at startup (All, Personal, Work, Shopping, Health, Education).
    #[arg(long)]
    pub category: Option<CategoryFilter>,

    /// Path to config file (default: `~/.config/todomaster/config.toml`).
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Log level filter (trace, debug, info, warn, error).
    #[arg(long, default_value = "info", env = "TODOMASTER_LOG")]
    pub log_level: String,

    /// Path to log file (default: `$TMPDIR/todomaster.log`).
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

/// `todo_data.json` in the directory of the running executable, or in the
/// current directory when that cannot be determined.
#[must_use]
pub fn default_data_file() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
        .unwrap_or_default()
        .join(DATA_FILE_NAME)
}

/// Load and parse a TOML config file.
///
/// If `explicit_path` is `Some`, the file must exist (error if not).
/// If `explicit_path` is `None`, the default path is tried and missing file
/// is treated as empty config.
fn load_config_file(explicit_path: Option<&Path>) -> Result<ConfigFile, ConfigError> {
    if let Some(p) = explicit_path {
        let contents = std::fs::read_to_string(p).map_err(|e| ConfigError::ReadFile {
            path: p.to_path_buf(),
            source: e,
        })?;
        return Ok(toml::from_str(&contents)?);
    }

    let Some(config_dir) = dirs::config_dir() else {
        return Ok(ConfigFile::default());
    };
    let path = config_dir.join("todomaster").join("config.toml");

    match std::fs::read_to_string(&path) {
        Ok(contents) => Ok(toml::from_str(&contents)?),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(ConfigFile::default()),
        Err(e) => Err(ConfigError::ReadFile { path, source: e }),
    }
}
