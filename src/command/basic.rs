//! Leaf commands

use super::{Command, Example};
use crate::completion::Context;
use crate::error::UsageResult;
use crate::parse::{ArgSpec, Args, Category, ExpectedArg, Flag, Tokens};
use std::fmt;

type Action = Box<dyn FnMut() -> anyhow::Result<()>>;

/// A command with a fixed argument shape and an action
pub struct BasicCommand {
    spec: ArgSpec,
    description: String,
    examples: Vec<Example>,
    category: Category,
    action: Option<Action>,
}

impl BasicCommand {
    /// Create a command with no flags, no positionals and no action
    pub fn new() -> Self {
        BasicCommand {
            spec: ArgSpec::new(),
            description: String::new(),
            examples: Vec::new(),
            category: Category::DEFAULT,
            action: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_example(mut self, example: Example) -> Self {
        self.examples.push(example);
        self
    }

    pub fn with_category(mut self, category: Category) -> Self {
        self.category = category;
        self
    }

    /// Keep flags of this category out of completion
    pub fn with_hidden_category(mut self, category: Category) -> Self {
        self.spec.flags.hide_category(category);
        self
    }

    pub fn with_flag(mut self, flag: Flag) -> Self {
        self.spec.add_flag(flag);
        self
    }

    pub fn with_arg(mut self, arg: ExpectedArg) -> Self {
        self.spec.expect_arg(arg);
        self
    }

    /// Set what [`Command::run`] does
    pub fn with_action<F>(mut self, action: F) -> Self
    where
        F: FnMut() -> anyhow::Result<()> + 'static,
    {
        self.action = Some(Box::new(action));
        self
    }

    pub fn spec_mut(&mut self) -> &mut ArgSpec {
        &mut self.spec
    }
}

impl Default for BasicCommand {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for BasicCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BasicCommand")
            .field("description", &self.description)
            .field("spec", &self.spec)
            .finish()
    }
}

impl Args for BasicCommand {
    fn process_flag(&mut self, tokens: &mut Tokens, ctx: &mut Context) -> UsageResult<bool> {
        self.spec.process_flag(tokens, ctx)
    }

    fn process_args(
        &mut self,
        pending: &[String],
        finish: bool,
        ctx: &mut Context,
    ) -> UsageResult<bool> {
        self.spec.process_args(pending, finish, ctx)
    }
}

impl Command for BasicCommand {
    fn spec(&self) -> &ArgSpec {
        &self.spec
    }

    fn description(&self) -> String {
        self.description.clone()
    }

    fn examples(&self) -> Vec<Example> {
        self.examples.clone()
    }

    fn category(&self) -> Category {
        self.category
    }

    fn run(&mut self) -> anyhow::Result<()> {
        match self.action.as_mut() {
            Some(action) => action(),
            None => Ok(()),
        }
    }
}
