//! Configuration management
//!
//! The CLI surface and the loading of raw option objects. Raw options are
//! kept as untyped JSON on purpose: the sanitizer is the only place that
//! interprets them.

use crate::process::DEFAULT_PROGRAM;
use crate::types::RoboError;
use clap::{Args, Parser, Subcommand};
use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};

/// Robocopy front-end core
#[derive(Debug, Parser)]
#[command(name = "robokit", version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Log filter (error, warn, info, debug, trace). RUST_LOG takes precedence.
    #[arg(long, global = true, default_value = "warn")]
    pub log_level: String,

    /// Print machine-readable JSON instead of text
    #[arg(long, global = true)]
    pub json: bool,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Sanitize options and print the robocopy argument vector
    Args(OptionsArgs),

    /// Sanitize options, run robocopy and report live statistics
    Run {
        #[command(flatten)]
        options: OptionsArgs,

        /// Program to invoke instead of robocopy
        #[arg(long, default_value = DEFAULT_PROGRAM)]
        program: String,
    },

    /// Parse a saved robocopy log and print the final statistics
    Parse {
        /// Log file to read
        log: PathBuf,
    },

    /// Validate a scheduled task definition
    ValidateTask {
        #[arg(long)]
        name: String,

        /// Cron expression (5, 6 or 7 fields)
        #[arg(long)]
        schedule: String,
    },
}

/// Where raw options come from. Flags override file values.
#[derive(Debug, Clone, Default, Args)]
pub struct OptionsArgs {
    /// Options file (.json or .toml) with the form fields
    #[arg(short = 'o', long = "options")]
    pub options_file: Option<PathBuf>,

    #[arg(short, long)]
    pub source: Option<String>,

    #[arg(short, long)]
    pub destination: Option<String>,

    /// File selection pattern, e.g. "*.docx"
    #[arg(long)]
    pub pattern: Option<String>,
}

/// Settings for one CLI invocation
#[derive(Debug, Clone)]
pub struct Config {
    /// Raw, unsanitized options object
    pub raw_options: Value,

    /// Copy tool to invoke
    pub program: String,

    /// JSON output mode
    pub json: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            raw_options: Value::Object(Map::new()),
            program: DEFAULT_PROGRAM.to_string(),
            json: false,
        }
    }
}

impl Config {
    /// Build a config from option sources.
    pub fn from_options(options: &OptionsArgs, json: bool) -> Result<Self, RoboError> {
        Ok(Self {
            raw_options: load_raw_options(options)?,
            json,
            ..Self::default()
        })
    }

    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), RoboError> {
        if self.program.trim().is_empty() {
            return Err(RoboError::Config("Program name cannot be empty".to_string()));
        }
        if !self.raw_options.is_object() {
            return Err(RoboError::Config("Options must be an object".to_string()));
        }
        Ok(())
    }
}

/// Read an options file (JSON or TOML, chosen by extension) into raw JSON.
pub fn read_options_file(path: &Path) -> Result<Value, RoboError> {
    let contents = fs::read_to_string(path)?;
    let is_toml = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));

    if is_toml {
        toml::from_str::<Value>(&contents)
            .map_err(|e| RoboError::Config(format!("Invalid TOML in {:?}: {}", path, e)))
    } else {
        serde_json::from_str::<Value>(&contents)
            .map_err(|e| RoboError::Config(format!("Invalid JSON in {:?}: {}", path, e)))
    }
}

/// Merge the options file (if any) with CLI overrides.
pub fn load_raw_options(options: &OptionsArgs) -> Result<Value, RoboError> {
    let mut raw = match &options.options_file {
        Some(path) => read_options_file(path)?,
        None => Value::Object(Map::new()),
    };

    let object = raw
        .as_object_mut()
        .ok_or_else(|| RoboError::Config("Options file must contain an object".to_string()))?;

    let overrides = [
        ("source", &options.source),
        ("destination", &options.destination),
        ("files", &options.pattern),
    ];
    for (key, value) in overrides {
        if let Some(value) = value {
            object.insert(key.to_string(), Value::String(value.clone()));
        }
    }

    Ok(raw)
}
