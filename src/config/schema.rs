//! Command table validation
//!
//! Everything checked here would otherwise be a panic when the table is
//! turned into commands, so tables are validated before building.

use crate::config::types::{ArgConfig, CommandConfig, FlagConfig};
use crate::error::{ConfigError, ConfigResult};
use std::collections::HashSet;

/// Validate a complete command table, including every sub-command
pub fn validate_config(config: &CommandConfig) -> ConfigResult<()> {
    validate_command("(top level)", config)
}

/// Validate one command level and its sub-commands
pub fn validate_command(name: &str, config: &CommandConfig) -> ConfigResult<()> {
    let mut longs = HashSet::new();
    let mut shorts = HashSet::new();
    for flag in &config.flags {
        validate_flag(flag)?;
        if !longs.insert(flag.long.as_str()) {
            return Err(ConfigError::DuplicateFlag(flag.long.clone()));
        }
        if let Some(c) = flag.short_char() {
            if !shorts.insert(c) {
                return Err(ConfigError::DuplicateShort(c));
            }
        }
    }

    validate_args(&config.args)?;

    if config.is_multi() && !config.args.is_empty() {
        return Err(ConfigError::ArgsWithCommands(name.to_string()));
    }

    for (sub_name, sub) in &config.commands {
        if sub_name.is_empty() || sub_name.starts_with('-') {
            return Err(ConfigError::Invalid(format!(
                "Invalid command name '{}' under {}",
                sub_name, name
            )));
        }
        validate_command(sub_name, sub)?;
    }

    Ok(())
}

/// Validate a single flag definition
fn validate_flag(flag: &FlagConfig) -> ConfigResult<()> {
    let invalid = |reason: &str| ConfigError::InvalidFlag {
        flag: flag.long.clone(),
        reason: reason.to_string(),
    };

    if flag.long.is_empty() {
        return Err(invalid("long name must not be empty"));
    }
    if flag.long.starts_with('-') {
        return Err(invalid("long name must not start with '-'"));
    }

    if let Some(short) = &flag.short {
        let mut chars = short.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) if c != '-' => {}
            _ => return Err(invalid("short name must be a single character other than '-'")),
        }
    }

    if !flag.choices.is_empty() {
        if flag.variadic || flag.path {
            return Err(invalid("choices cannot be combined with variadic or path"));
        }
        if flag.labels.len() != 1 {
            return Err(invalid("choices need exactly one label"));
        }
    }

    if flag.path && flag.labels.is_empty() && !flag.variadic {
        return Err(invalid("path flags must take a value"));
    }

    Ok(())
}

/// Validate positional definitions of one command
fn validate_args(args: &[ArgConfig]) -> ConfigResult<()> {
    let mut labels = HashSet::new();
    for (i, arg) in args.iter().enumerate() {
        let invalid = |reason: &str| ConfigError::InvalidArg {
            label: arg.label.clone(),
            reason: reason.to_string(),
        };

        if arg.label.is_empty() {
            return Err(invalid("label must not be empty"));
        }
        if !labels.insert(arg.label.as_str()) {
            return Err(invalid("declared more than once"));
        }
        if arg.variadic && i + 1 != args.len() {
            return Err(invalid("only the last argument can be variadic"));
        }
    }
    Ok(())
}
