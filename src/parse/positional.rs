//! Positional argument slots

use super::{Arity, Completer, HandlerFn};
use crate::completion::{complete_path, strip_marker, Context};
use crate::error::{UsageError, UsageResult};
use std::collections::VecDeque;
use std::fmt;

/// One expected positional slot
pub struct ExpectedArg {
    pub label: String,
    pub arity: Arity,
    /// Whether parsing may end with this slot unfilled
    pub optional: bool,
    pub handler: HandlerFn,
    pub completer: Option<Completer>,
}

impl ExpectedArg {
    /// # Panics
    ///
    /// If `arity` is `Arity::Exactly(0)`; a positional slot always takes
    /// at least one token.
    pub fn new<F>(label: impl Into<String>, arity: Arity, fun: F) -> Self
    where
        F: FnMut(Vec<String>) -> UsageResult<()> + 'static,
    {
        let label = label.into();
        assert!(
            arity != Arity::Exactly(0),
            "positional '{}' must take at least one value",
            label
        );
        ExpectedArg {
            label,
            arity,
            optional: false,
            handler: Box::new(fun),
            completer: None,
        }
    }

    /// A required single-token slot
    pub fn single<F>(label: impl Into<String>, mut fun: F) -> Self
    where
        F: FnMut(String) -> UsageResult<()> + 'static,
    {
        Self::new(label, Arity::Exactly(1), move |mut values| fun(values.remove(0)))
    }

    /// A slot taking every remaining token
    pub fn remaining<F>(label: impl Into<String>, fun: F) -> Self
    where
        F: FnMut(Vec<String>) -> UsageResult<()> + 'static,
    {
        Self::new(label, Arity::Any, fun)
    }

    /// A single filesystem path, completed by globbing
    pub fn path<F>(label: impl Into<String>, optional: bool, fun: F) -> Self
    where
        F: FnMut(String) -> UsageResult<()> + 'static,
    {
        Self::single(label, fun).optional(optional).completer(complete_path)
    }

    /// Every remaining token, each a filesystem path
    pub fn paths<F>(label: impl Into<String>, fun: F) -> Self
    where
        F: FnMut(Vec<String>) -> UsageResult<()> + 'static,
    {
        Self::remaining(label, fun).completer(complete_path)
    }

    pub fn optional(mut self, optional: bool) -> Self {
        self.optional = optional;
        self
    }

    pub fn completer<F>(mut self, completer: F) -> Self
    where
        F: Fn(&mut Context, usize, &str) + 'static,
    {
        self.completer = Some(Box::new(completer));
        self
    }
}

impl fmt::Debug for ExpectedArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExpectedArg")
            .field("label", &self.label)
            .field("arity", &self.arity)
            .field("optional", &self.optional)
            .finish()
    }
}

/// Positional slots still waiting for values, in declaration order
#[derive(Debug, Default)]
pub struct PositionalQueue {
    expected: VecDeque<ExpectedArg>,
}

impl PositionalQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, arg: ExpectedArg) {
        self.expected.push_back(arg);
    }

    pub fn is_empty(&self) -> bool {
        self.expected.is_empty()
    }

    pub fn len(&self) -> usize {
        self.expected.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ExpectedArg> {
        self.expected.iter()
    }

    /// Try to hand the pending tokens to the front slot
    ///
    /// Returns `Ok(true)` when the pending tokens were claimed and should be
    /// cleared. With `finish` set, a front slot that is still required after
    /// the flush is an error.
    pub fn process_args(
        &mut self,
        pending: &[String],
        finish: bool,
        ctx: &mut Context,
    ) -> UsageResult<bool> {
        let Some(exp) = self.expected.front_mut() else {
            if let Some(arg) = pending.first() {
                return Err(UsageError::UnexpectedArgument(strip_marker(arg)));
            }
            return Ok(true);
        };

        let ready = match exp.arity {
            Arity::Any => finish,
            Arity::Exactly(n) => pending.len() == n,
        };

        let mut claimed = false;
        if ready {
            if let Some(completer) = exp.completer.as_ref() {
                for (i, arg) in pending.iter().enumerate() {
                    if let Some(prefix) = ctx.completion_prefix(arg) {
                        completer(ctx, i, &prefix);
                    }
                }
            }
            log::trace!("'{}' takes {} value(s)", exp.label, pending.len());
            (exp.handler)(pending.iter().map(|arg| strip_marker(arg)).collect())?;
            self.expected.pop_front();
            claimed = true;
        }

        if finish && self.expected.front().map_or(false, |exp| !exp.optional) {
            return Err(UsageError::MissingArguments);
        }

        Ok(claimed)
    }
}
