//! Turning command tables into commands
//!
//! Commands built here record what they parse into a shared [`Matches`]
//! instead of running business logic.

use crate::command::{BasicCommand, Command, Commands, Example, MultiCommand};
use crate::completion::{complete_path, Context};
use crate::config::types::{ArgConfig, CommandConfig, FlagConfig};
use crate::error::UsageResult;
use crate::parse::{Arity, Category, ExpectedArg, Flag, Handler};
use serde::Serialize;
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

/// Category given to flags declared `hidden`
pub const HIDDEN_CATEGORY: Category = Category(u32::MAX);

/// Everything a table-built command saw during one parse
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Matches {
    /// Selected sub-command names, outermost first
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub commands: Vec<String>,

    /// Values of every flag occurrence, by long name
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub flags: BTreeMap<String, Vec<Vec<String>>>,

    /// Values of each positional, by label
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub args: BTreeMap<String, Vec<String>>,
}

impl Matches {
    /// How many times a flag occurred
    pub fn occurrences(&self, long: &str) -> usize {
        self.flags.get(long).map_or(0, Vec::len)
    }

    /// Values of the last occurrence of a flag
    pub fn last(&self, long: &str) -> Option<&[String]> {
        self.flags
            .get(long)
            .and_then(|all| all.last())
            .map(Vec::as_slice)
    }

    /// Values of a positional
    pub fn arg(&self, label: &str) -> Option<&[String]> {
        self.args.get(label).map(Vec::as_slice)
    }
}

/// Matches shared between a command tree and its handlers
pub type SharedMatches = Rc<RefCell<Matches>>;

/// Build the command tree described by a validated table
///
/// Flags of every level record into the same `matches`; a flag name reused
/// at several levels collects the occurrences of all of them.
pub fn build_command(config: &CommandConfig, matches: &SharedMatches) -> Box<dyn Command> {
    if !config.is_multi() {
        return Box::new(build_leaf(config, matches));
    }

    let mut commands = Commands::new();
    for (name, sub) in &config.commands {
        let sub = sub.clone();
        let matches = matches.clone();
        commands.insert(
            name.clone(),
            Box::new(move || build_command(&sub, &matches)),
        );
    }

    let mut command = if config.command_optional {
        MultiCommand::optional(commands)
    } else {
        MultiCommand::new(commands)
    };
    command = command
        .with_description(config.description.clone().unwrap_or_default())
        .with_category(Category(config.category))
        .with_hidden_category(HIDDEN_CATEGORY);
    for example in &config.examples {
        command = command.with_example(Example::new(&example.description, &example.command));
    }
    for flag in &config.flags {
        command = command.with_flag(build_flag(flag, matches));
    }
    Box::new(command)
}

/// Parse `cmdline` against a table and collect the result
pub fn parse_with_config(
    config: &CommandConfig,
    cmdline: Vec<String>,
    ctx: &mut Context,
) -> UsageResult<Matches> {
    let matches = SharedMatches::default();
    let mut command = build_command(config, &matches);
    command.parse_cmdline(cmdline, ctx)?;

    let mut result = matches.borrow().clone();
    result.commands = command.selected_path();
    Ok(result)
}

fn build_leaf(config: &CommandConfig, matches: &SharedMatches) -> BasicCommand {
    let mut command = BasicCommand::new()
        .with_description(config.description.clone().unwrap_or_default())
        .with_category(Category(config.category))
        .with_hidden_category(HIDDEN_CATEGORY);
    for example in &config.examples {
        command = command.with_example(Example::new(&example.description, &example.command));
    }
    for flag in &config.flags {
        command = command.with_flag(build_flag(flag, matches));
    }
    for arg in &config.args {
        command = command.with_arg(build_arg(arg, matches));
    }
    command
}

fn build_flag(config: &FlagConfig, matches: &SharedMatches) -> Flag {
    let record = {
        let matches = matches.clone();
        let long = config.long.clone();
        move |values: Vec<String>| -> UsageResult<()> {
            matches
                .borrow_mut()
                .flags
                .entry(long.clone())
                .or_default()
                .push(values);
            Ok(())
        }
    };
    let description = config.description.clone().unwrap_or_default();

    let mut flag = if config.choices.is_empty() {
        let arity = if config.variadic {
            Arity::Any
        } else {
            Arity::Exactly(config.labels.len())
        };
        let flag = Flag::new(&config.long)
            .description(description)
            .labels(config.labels.iter())
            .handler(Handler::new(arity, record));
        if config.path {
            flag.completer(complete_path)
        } else {
            flag
        }
    } else {
        let choices: Vec<&str> = config.choices.iter().map(String::as_str).collect();
        let label = config.labels.first().cloned().unwrap_or_default();
        Flag::choice(&config.long, description, label, &choices, move |value| {
            record(vec![value])
        })
    };

    flag = flag.category(if config.hidden {
        HIDDEN_CATEGORY
    } else {
        Category(config.category)
    });
    if let Some(c) = config.short_char() {
        flag = flag.short(c);
    }
    flag
}

fn build_arg(config: &ArgConfig, matches: &SharedMatches) -> ExpectedArg {
    let record = {
        let matches = matches.clone();
        let label = config.label.clone();
        move |values: Vec<String>| -> UsageResult<()> {
            matches.borrow_mut().args.insert(label.clone(), values);
            Ok(())
        }
    };
    let arity = if config.variadic {
        Arity::Any
    } else {
        Arity::Exactly(1)
    };

    let arg = ExpectedArg::new(&config.label, arity, record).optional(config.optional);
    if config.path {
        arg.completer(complete_path)
    } else {
        arg
    }
}
