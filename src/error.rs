//! Error types for argq

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for argq operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for argq
#[derive(Error, Debug)]
pub enum Error {
    /// Command-line usage errors
    #[error("{0}")]
    Usage(#[from] UsageError),

    /// Command table errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// YAML parsing errors
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Errors caused by the tokens the user typed
///
/// All of these abort the parse immediately. The caller decides how to
/// present them and which exit code to use.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UsageError {
    #[error("unrecognised flag '{0}'")]
    UnrecognizedFlag(String),

    #[error("flag '{flag}' requires {arity} argument(s)")]
    MissingFlagValue { flag: String, arity: usize },

    #[error("unexpected argument '{0}'")]
    UnexpectedArgument(String),

    #[error("more arguments are required")]
    MissingArguments,

    #[error("'{0}' is not a recognised command")]
    UnknownCommand(String),

    #[error("invalid value '{value}' for flag '{flag}' (expected one of: {expected})")]
    InvalidFlagValue {
        flag: String,
        value: String,
        expected: String,
    },

    #[error("completion cursor {index} is outside the {len} argument(s)")]
    CompletionCursor { index: usize, len: usize },

    /// Free-form failure reported by a flag or positional handler
    #[error("{0}")]
    Handler(String),
}

/// Declarative command table errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to find command table (searched: {0})")]
    NotFound(String),

    #[error("Invalid command table: {0}")]
    Invalid(String),

    #[error("Flag '{0}' is defined more than once")]
    DuplicateFlag(String),

    #[error("Short flag '-{0}' is defined more than once")]
    DuplicateShort(char),

    #[error("Flag '{flag}': {reason}")]
    InvalidFlag { flag: String, reason: String },

    #[error("Argument '{label}': {reason}")]
    InvalidArg { label: String, reason: String },

    #[error("Command '{0}' declares both positional arguments and sub-commands")]
    ArgsWithCommands(String),

    #[error("Environment variable {var} must hold a token index, got '{value}'")]
    InvalidEnv { var: String, value: String },

    #[error("Failed to read '{}': {error}", path.display())]
    ReadFile { path: PathBuf, error: String },
}

/// Specialized result type for parsing operations
pub type UsageResult<T> = std::result::Result<T, UsageError>;

/// Specialized result type for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Returns true when the error comes from the user's input rather than
/// from the environment or the command table
pub fn is_usage_error(err: &Error) -> bool {
    matches!(err, Error::Usage(_))
}
