//! Commands and command hierarchies
//!
//! A [`Command`] is an [`Args`] target with metadata and something to run.
//! [`BasicCommand`] covers the common case of a fixed argument shape plus
//! an action; [`MultiCommand`] selects a sub-command by name and forwards
//! everything after it.

pub mod basic;
pub mod multi;

use crate::parse::{ArgSpec, Args, Category};

// Re-export main types
pub use basic::*;
pub use multi::*;

/// An example invocation, for help output
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Example {
    pub description: String,
    pub command: String,
}

impl Example {
    pub fn new(description: impl Into<String>, command: impl Into<String>) -> Self {
        Example {
            description: description.into(),
            command: command.into(),
        }
    }
}

/// A named capability: an argument shape plus behavior
pub trait Command: Args {
    /// The command's own flags and positional slots
    fn spec(&self) -> &ArgSpec;

    /// One-line summary
    fn description(&self) -> String {
        String::new()
    }

    fn examples(&self) -> Vec<Example> {
        Vec::new()
    }

    fn category(&self) -> Category {
        Category::DEFAULT
    }

    /// Names of the sub-commands selected below this one, outermost first
    fn selected_path(&self) -> Vec<String> {
        Vec::new()
    }

    /// Execute after a successful parse
    fn run(&mut self) -> anyhow::Result<()>;
}
