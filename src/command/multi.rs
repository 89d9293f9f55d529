//! Commands that dispatch to named sub-commands

use super::{Command, Example};
use crate::completion::Context;
use crate::error::{UsageError, UsageResult};
use crate::parse::{ArgSpec, Args, Category, ExpectedArg, Flag, Tokens};
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

/// Builds a fresh sub-command instance
pub type CommandFactory = Box<dyn Fn() -> Box<dyn Command>>;

/// Sub-command factories by name
pub type Commands = BTreeMap<String, CommandFactory>;

/// The sub-command a [`MultiCommand`] forwards to
pub enum Delegate {
    NotSelected,
    Selected {
        name: String,
        command: Box<dyn Command>,
    },
}

impl Delegate {
    /// The only allowed transition: `NotSelected` to `Selected`
    ///
    /// # Panics
    ///
    /// If a sub-command was already selected.
    fn select(&mut self, name: String, command: Box<dyn Command>) {
        if let Delegate::Selected { name: current, .. } = self {
            panic!("sub-command '{}' is already selected", current);
        }
        *self = Delegate::Selected { name, command };
    }

    pub fn name(&self) -> Option<&str> {
        match self {
            Delegate::Selected { name, .. } => Some(name.as_str()),
            Delegate::NotSelected => None,
        }
    }
}

impl fmt::Debug for Delegate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Delegate::NotSelected => f.write_str("NotSelected"),
            Delegate::Selected { name, .. } => f.debug_tuple("Selected").field(name).finish(),
        }
    }
}

/// A command whose single positional names a sub-command
///
/// Once the name is consumed, the matching factory is instantiated and every
/// later token goes to the new instance. The multi-command's own flags are
/// common to all sub-commands and take precedence over theirs.
pub struct MultiCommand {
    spec: ArgSpec,
    commands: Rc<Commands>,
    delegate: Rc<RefCell<Delegate>>,
    description: String,
    examples: Vec<Example>,
    category: Category,
}

impl MultiCommand {
    /// A multi-command that requires a sub-command name
    pub fn new(commands: Commands) -> Self {
        Self::build(commands, false)
    }

    /// A multi-command that may be invoked without a sub-command name
    pub fn optional(commands: Commands) -> Self {
        Self::build(commands, true)
    }

    fn build(commands: Commands, optional: bool) -> Self {
        let commands = Rc::new(commands);
        let delegate = Rc::new(RefCell::new(Delegate::NotSelected));

        let select = {
            let commands = commands.clone();
            let delegate = delegate.clone();
            move |name: String| -> UsageResult<()> {
                let factory = commands
                    .get(&name)
                    .ok_or_else(|| UsageError::UnknownCommand(name.clone()))?;
                let command = factory();
                log::debug!("selected sub-command '{}'", name);
                delegate.borrow_mut().select(name, command);
                Ok(())
            }
        };
        let complete = {
            let commands = commands.clone();
            move |ctx: &mut Context, _: usize, prefix: &str| {
                if let Some(completions) = ctx.completions_mut() {
                    completions.add_matching(commands.keys().map(String::as_str), prefix);
                }
            }
        };

        let mut spec = ArgSpec::new();
        spec.expect_arg(
            ExpectedArg::single("command", select)
                .optional(optional)
                .completer(complete),
        );

        MultiCommand {
            spec,
            commands,
            delegate,
            description: String::new(),
            examples: Vec::new(),
            category: Category::DEFAULT,
        }
    }

    /// Add a flag common to every sub-command
    pub fn with_flag(mut self, flag: Flag) -> Self {
        self.spec.add_flag(flag);
        self
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

    /// Keep common flags of this category out of completion
    pub fn with_hidden_category(mut self, category: Category) -> Self {
        self.spec.flags.hide_category(category);
        self
    }

    /// Registered sub-command names, sorted
    pub fn command_names(&self) -> impl Iterator<Item = &str> {
        self.commands.keys().map(String::as_str)
    }

    /// Build a throwaway instance of a sub-command, e.g. to read its
    /// description for help output
    pub fn instantiate(&self, name: &str) -> Option<Box<dyn Command>> {
        self.commands.get(name).map(|factory| factory())
    }

    /// Name of the selected sub-command, if any
    pub fn selected(&self) -> Option<String> {
        self.delegate.borrow().name().map(str::to_owned)
    }

    /// Inspect the selected sub-command
    pub fn with_selected<R, F>(&self, f: F) -> Option<R>
    where
        F: FnOnce(&str, &dyn Command) -> R,
    {
        match &*self.delegate.borrow() {
            Delegate::Selected { name, command } => Some(f(name, command.as_ref())),
            Delegate::NotSelected => None,
        }
    }
}

impl fmt::Debug for MultiCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MultiCommand")
            .field("commands", &self.commands.keys().collect::<Vec<_>>())
            .field("delegate", &*self.delegate.borrow())
            .finish()
    }
}

impl Args for MultiCommand {
    fn process_flag(&mut self, tokens: &mut Tokens, ctx: &mut Context) -> UsageResult<bool> {
        if self.spec.process_flag(tokens, ctx)? {
            return Ok(true);
        }
        match &mut *self.delegate.borrow_mut() {
            Delegate::Selected { command, .. } => command.process_flag(tokens, ctx),
            Delegate::NotSelected => Ok(false),
        }
    }

    fn process_args(
        &mut self,
        pending: &[String],
        finish: bool,
        ctx: &mut Context,
    ) -> UsageResult<bool> {
        if let Delegate::Selected { command, .. } = &mut *self.delegate.borrow_mut() {
            return command.process_args(pending, finish, ctx);
        }
        self.spec.process_args(pending, finish, ctx)
    }
}

impl Command for MultiCommand {
    fn spec(&self) -> &ArgSpec {
        &self.spec
    }

    fn description(&self) -> String {
        self.description.clone()
    }

    fn examples(&self) -> Vec<Example> {
        self.with_selected(|_, command| command.examples())
            .unwrap_or_else(|| self.examples.clone())
    }

    fn category(&self) -> Category {
        self.category
    }

    fn selected_path(&self) -> Vec<String> {
        self.with_selected(|name, command| {
            let mut path = vec![name.to_string()];
            path.extend(command.selected_path());
            path
        })
        .unwrap_or_default()
    }

    fn run(&mut self) -> anyhow::Result<()> {
        match &mut *self.delegate.borrow_mut() {
            Delegate::Selected { command, .. } => command.run(),
            Delegate::NotSelected => anyhow::bail!("no sub-command was given"),
        }
    }
}
