use std::fmt;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EtlError {
    #[error("Input file not found: {path}")]
    InputNotFound { path: String },

    #[error("Failed to read {path}: {source}")]
    ReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {path}: {source}")]
    ParseError {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Input document {path} must be a JSON object, found {found}")]
    NotAnObject { path: String, found: &'static str },

    #[error("Key '{key}' is missing from {path}")]
    MissingKey { key: String, path: String },

    #[error("Failed to write {path}: {source}")]
    WriteError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for '{field}': '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

/// The pipeline step an error surfaced in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Config,
    Open,
    Parse,
    Lookup,
    Write,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Config => "config",
            Stage::Open => "open",
            Stage::Parse => "parse",
            Stage::Lookup => "lookup",
            Stage::Write => "write",
        };
        f.write_str(name)
    }
}

impl EtlError {
    pub fn stage(&self) -> Stage {
        match self {
            EtlError::ConfigError { .. } | EtlError::InvalidConfigValueError { .. } => {
                Stage::Config
            }
            EtlError::InputNotFound { .. } | EtlError::ReadError { .. } => Stage::Open,
            EtlError::ParseError { .. } | EtlError::NotAnObject { .. } => Stage::Parse,
            EtlError::MissingKey { .. } => Stage::Lookup,
            EtlError::WriteError { .. } | EtlError::SerializationError(_) => Stage::Write,
        }
    }

    pub fn exit_code(&self) -> i32 {
        match self.stage() {
            Stage::Config => 2,
            Stage::Open => 3,
            Stage::Parse => 4,
            Stage::Lookup => 5,
            Stage::Write => 6,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            EtlError::InputNotFound { path } => {
                format!("Could not find the input file at {}", path)
            }
            EtlError::ReadError { path, .. } => format!("Could not read {}", path),
            EtlError::ParseError { path, source } => format!(
                "{} is not valid JSON (line {}, column {})",
                path,
                source.line(),
                source.column()
            ),
            EtlError::NotAnObject { path, found } => {
                format!("{} holds a JSON {} instead of an object", path, found)
            }
            EtlError::MissingKey { key, path } => {
                format!("{} has no '{}' entry", path, key)
            }
            EtlError::WriteError { path, .. } => format!("Could not write {}", path),
            EtlError::SerializationError(_) => "Could not encode a funscript".to_string(),
            EtlError::ConfigError { message } => format!("Invalid configuration: {}", message),
            EtlError::InvalidConfigValueError { field, reason, .. } => {
                format!("Invalid configuration for '{}': {}", field, reason)
            }
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.stage() {
            Stage::Config => "Check the command line flags or the TOML configuration file",
            Stage::Open => "Check --base-dir and --base-name point at an existing <name>/<name>.json",
            Stage::Parse => "Make sure the input file is a JSON object keyed by axis",
            Stage::Lookup => "Add the missing axis key or run without --strict-keys",
            Stage::Write => "Check that the output directory exists and is writable",
        }
    }
}

pub type Result<T> = std::result::Result<T, EtlError>;
