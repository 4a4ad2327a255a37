//! Configuration management for the employee registry.
//!
//! Handles:
//! - Command-line argument parsing
//! - Optional TOML config file
//! - Data directory and locale defaults

use clap::{Parser, Subcommand};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;
use crate::i18n::Locale;
use crate::model::{EmployeeDraft, Field};
use crate::pagination::{PageSizes, ViewMode};

const APP_DIR: &str = "employee-registry";

/// Command-line arguments for the employee registry
#[derive(Debug, Parser)]
#[command(name = "employees")]
#[command(about = "Manage employee records")]
#[command(version)]
pub struct Args {
    /// Directory holding the employee data file
    #[arg(long, global = true, env = "EMPLOYEES_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Message language
    #[arg(long, global = true, help = "Locale for messages (en, tr)")]
    pub locale: Option<String>,

    /// Log level
    #[arg(
        long,
        global = true,
        help = "Log level (trace, debug, info, warn, error)"
    )]
    pub log_level: Option<String>,

    /// Config file to read instead of the default location
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List employees one page at a time
    List {
        #[arg(long, default_value_t = 1)]
        page: usize,
        #[arg(long)]
        page_size: Option<usize>,
        /// Layout whose page size applies when `--page-size` is not given
        #[arg(long, value_enum)]
        view: Option<ViewMode>,
        /// Print the page as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show one employee as JSON
    Show { id: String },
    /// Create an employee (dates as yyyy-mm-dd)
    Add(EmployeeArgs),
    /// Change fields of an existing employee
    Update {
        id: String,
        #[command(flatten)]
        fields: EmployeeArgs,
    },
    /// Delete one or more employees
    Delete {
        #[arg(required = true)]
        ids: Vec<String>,
    },
    /// Validate values without saving them
    Validate {
        /// Only validate this field (e.g. `email`)
        #[arg(long)]
        field: Option<String>,
        #[command(flatten)]
        fields: EmployeeArgs,
    },
}

/// Employee field values supplied as flags
#[derive(Debug, Clone, Default, clap::Args)]
pub struct EmployeeArgs {
    #[arg(long)]
    pub first_name: Option<String>,
    #[arg(long)]
    pub last_name: Option<String>,
    #[arg(long)]
    pub date_of_employment: Option<String>,
    #[arg(long)]
    pub date_of_birth: Option<String>,
    #[arg(long)]
    pub phone: Option<String>,
    #[arg(long)]
    pub email: Option<String>,
    #[arg(long)]
    pub department: Option<String>,
    #[arg(long)]
    pub position: Option<String>,
}

impl EmployeeArgs {
    /// Supplied flags as `(field, value)` pairs
    pub fn values(&self) -> Vec<(Field, &str)> {
        [
            (Field::FirstName, &self.first_name),
            (Field::LastName, &self.last_name),
            (Field::DateOfEmployment, &self.date_of_employment),
            (Field::DateOfBirth, &self.date_of_birth),
            (Field::Phone, &self.phone),
            (Field::Email, &self.email),
            (Field::Department, &self.department),
            (Field::Position, &self.position),
        ]
        .into_iter()
        .filter_map(|(field, value)| value.as_deref().map(|v| (field, v)))
        .collect()
    }

    pub fn to_draft(&self) -> EmployeeDraft {
        let mut draft = EmployeeDraft::new();
        for (field, value) in self.values() {
            draft.set(field, value);
        }
        draft
    }
}

/// Contents of the optional TOML config file
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct ConfigFile {
    pub data_dir: Option<PathBuf>,
    pub locale: Option<String>,
    pub log_level: Option<String>,
    pub page_size: Option<usize>,
}

impl ConfigFile {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Combined configuration from all sources
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory for the durable store
    pub data_dir: PathBuf,
    pub locale: Locale,
    pub log_level: String,
    pub page_sizes: PageSizes,
}

impl Config {
    /// Create configuration from command-line arguments and environment
    pub fn from_args_and_env() -> Result<(Self, Command), ConfigError> {
        let args = Args::parse();
        let config = Self::from_args(&args)?;
        Ok((config, args.command))
    }

    /// Create configuration from explicit arguments (useful for testing)
    pub fn from_args(args: &Args) -> Result<Self, ConfigError> {
        let file = match &args.config {
            Some(path) => ConfigFile::load(path)?,
            None => match default_config_path().filter(|p| p.is_file()) {
                Some(path) => ConfigFile::load(&path)?,
                None => ConfigFile::default(),
            },
        };
        Self::merge(args, file)
    }

    /// Apply precedence: command line, then config file, then defaults
    pub fn merge(args: &Args, file: ConfigFile) -> Result<Self, ConfigError> {
        let data_dir = args
            .data_dir
            .clone()
            .or(file.data_dir)
            .unwrap_or_else(default_data_dir);

        let locale = match args.locale.as_deref().or(file.locale.as_deref()) {
            Some(code) => code.parse::<Locale>()?,
            None => Locale::default(),
        };

        let log_level = args
            .log_level
            .clone()
            .or(file.log_level)
            .unwrap_or_else(|| "warn".to_string());

        let mut page_sizes = PageSizes::default();
        if let Some(size) = file.page_size {
            if size == 0 {
                return Err(ConfigError::PageSize);
            }
            page_sizes.default = size;
        }

        Ok(Config {
            data_dir,
            locale,
            log_level,
            page_sizes,
        })
    }
}

/// `<config_dir>/employee-registry/config.toml`, if the platform has a config dir
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR).join("config.toml"))
}

/// `<data_dir>/employee-registry`, or the working directory
pub fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .map(|dir| dir.join(APP_DIR))
        .unwrap_or_else(|| PathBuf::from("."))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(extra: &[&str]) -> Args {
        let mut argv = vec!["employees"];
        argv.extend_from_slice(extra);
        argv.push("list");
        Args::parse_from(argv)
    }

    #[test]
    fn command_line_wins_over_file() {
        let file = ConfigFile {
            data_dir: Some(PathBuf::from("/from/file")),
            locale: Some("en".to_string()),
            log_level: Some("debug".to_string()),
            page_size: Some(25),
        };
        let config = Config::merge(&args(&["--data-dir", "/cli", "--locale", "tr"]), file).unwrap();

        assert_eq!(config.data_dir, PathBuf::from("/cli"));
        assert_eq!(config.locale, Locale::Tr);
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.page_sizes.default, 25);
    }

    #[test]
    fn defaults_apply_without_sources() {
        let config = Config::merge(&args(&["--data-dir", "/d"]), ConfigFile::default()).unwrap();
        assert_eq!(config.locale, Locale::En);
        assert_eq!(config.log_level, "warn");
        assert_eq!(config.page_sizes, PageSizes::default());
    }

    #[test]
    fn rejects_unknown_locale_and_zero_page_size() {
        assert!(Config::merge(&args(&["--locale", "fr"]), ConfigFile::default()).is_err());
        let file = ConfigFile {
            page_size: Some(0),
            ..ConfigFile::default()
        };
        assert!(matches!(
            Config::merge(&args(&[]), file),
            Err(ConfigError::PageSize)
        ));
    }

    #[test]
    fn employee_flags_become_a_partial_draft() {
        let parsed = Args::parse_from(["employees", "update", "7", "--first-name", "Edited"]);
        let Command::Update { id, fields } = parsed.command else {
            panic!("expected update");
        };
        assert_eq!(id, "7");
        let draft = fields.to_draft();
        assert_eq!(draft.get(Field::FirstName), Some("Edited"));
        assert_eq!(draft.get(Field::LastName), None);
    }

    #[test]
    fn list_accepts_a_view_layout() {
        let parsed = Args::parse_from(["employees", "list", "--view", "mobile"]);
        let Command::List { view, page_size, .. } = parsed.command else {
            panic!("expected list");
        };
        assert_eq!(view, Some(ViewMode::Mobile));
        assert_eq!(page_size, None);
    }
}
