//! argq - a command-line argument parsing engine
//!
//! Commands declare flags and an ordered queue of positional slots; a parse
//! walks the token list once, expanding compound short flags (`-qlf`,
//! `-j3`), honoring `--`, and calling handlers as values arrive. A
//! [`MultiCommand`] selects a sub-command by name and forwards the rest of
//! the command line to it. Setting [`COMPLETIONS_ENV`] turns a parse into a
//! shell-completion pass that collects suggestions for one token.

// Public modules
pub mod cli;
pub mod command;
pub mod completion;
pub mod config;
pub mod error;
pub mod parse;

// Re-export commonly used types
pub use command::{BasicCommand, Command, Commands, Example, MultiCommand};
pub use completion::{Completions, Context, COMPLETIONS_ENV, COMPLETION_MARKER};
pub use error::{Error, Result, UsageError, UsageResult};
pub use parse::{args_from_env, parse_cmdline, ArgSpec, Args, Arity, Category, ExpectedArg, Flag, Handler};

/// Current version of argq
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
