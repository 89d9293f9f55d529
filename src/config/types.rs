//! Declarative command table types
//!
//! This module defines the data structures that represent an argq.yml
//! command table.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One command level: its flags and either positionals or sub-commands
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct CommandConfig {
    /// One-line summary
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Help grouping tag
    #[serde(default)]
    pub category: u32,

    /// Example invocations
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub examples: Vec<ExampleConfig>,

    /// Flags, in declaration order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub flags: Vec<FlagConfig>,

    /// Positional arguments, consumed in declaration order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub args: Vec<ArgConfig>,

    /// Sub-commands by name
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub commands: BTreeMap<String, CommandConfig>,

    /// Whether a sub-command name may be left out
    #[serde(default, rename = "command-optional")]
    pub command_optional: bool,
}

/// An example invocation
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ExampleConfig {
    pub description: String,
    pub command: String,
}

/// A flag definition
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct FlagConfig {
    /// Long name, without the leading `--`
    pub long: String,

    /// Short flag (single character)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short: Option<String>,

    /// Description for help text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Help grouping tag
    #[serde(default)]
    pub category: u32,

    /// Hidden from completion and visible listings
    #[serde(default)]
    pub hidden: bool,

    /// One label per value; the flag takes exactly this many values
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub labels: Vec<String>,

    /// Take any number of values instead
    #[serde(default)]
    pub variadic: bool,

    /// Enumerated domain for a single value
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub choices: Vec<String>,

    /// Values are filesystem paths
    #[serde(default)]
    pub path: bool,
}

/// A positional argument definition
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ArgConfig {
    pub label: String,

    /// May be left out at the end of the command line
    #[serde(default)]
    pub optional: bool,

    /// Take every remaining token
    #[serde(default)]
    pub variadic: bool,

    /// Values are filesystem paths
    #[serde(default)]
    pub path: bool,
}

impl FlagConfig {
    /// The single short-flag character, if one is declared
    pub fn short_char(&self) -> Option<char> {
        self.short.as_deref().and_then(|s| s.chars().next())
    }
}

impl CommandConfig {
    /// Whether this level dispatches to sub-commands
    pub fn is_multi(&self) -> bool {
        !self.commands.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_simple_table() {
        let yaml = r#"
description: Copy files
flags:
  - long: verbose
    short: v
args:
  - label: src
  - label: dst
    optional: true
"#;
        let config: CommandConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.flags.len(), 1);
        assert_eq!(config.flags[0].short_char(), Some('v'));
        assert!(config.args[1].optional);
        assert!(!config.is_multi());
    }

    #[test]
    fn test_deserialize_nested_commands() {
        let yaml = r#"
flags:
  - long: jobs
    labels: [n]
commands:
  build:
    description: Build things
    flags:
      - long: level
        labels: [level]
        choices: [debug, release]
  run:
    args:
      - label: files
        variadic: true
        path: true
"#;
        let config: CommandConfig = serde_yaml::from_str(yaml).unwrap();
        assert!(config.is_multi());
        assert_eq!(config.commands["build"].flags[0].choices.len(), 2);
        assert!(config.commands["run"].args[0].variadic);
    }
}
