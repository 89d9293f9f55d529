//! Flag definitions and the flag registry

use super::Tokens;
use crate::completion::{strip_marker, Context};
use crate::error::{UsageError, UsageResult};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// How many value tokens a flag or positional consumes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    /// Exactly this many
    Exactly(usize),
    /// Any number: a flag takes values up to the next flag, a positional
    /// takes whatever remains at the end of input
    Any,
}

/// Help grouping tag; orthogonal to parsing
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Category(pub u32);

impl Category {
    pub const DEFAULT: Category = Category(0);
}

/// Side effect run with the values gathered for one occurrence
pub type HandlerFn = Box<dyn FnMut(Vec<String>) -> UsageResult<()>>;

/// Suggests values for the slot at `index`, given the typed prefix
pub type Completer = Box<dyn Fn(&mut Context, usize, &str)>;

/// A handler together with the number of values it takes
pub struct Handler {
    pub arity: Arity,
    pub fun: HandlerFn,
}

impl Handler {
    pub fn new<F>(arity: Arity, fun: F) -> Self
    where
        F: FnMut(Vec<String>) -> UsageResult<()> + 'static,
    {
        Handler {
            arity,
            fun: Box::new(fun),
        }
    }

    /// A handler for a flag that takes no values
    pub fn nullary<F>(mut fun: F) -> Self
    where
        F: FnMut() -> UsageResult<()> + 'static,
    {
        Self::new(Arity::Exactly(0), move |_| fun())
    }

    /// A handler for a flag that takes one value
    pub fn unary<F>(mut fun: F) -> Self
    where
        F: FnMut(String) -> UsageResult<()> + 'static,
    {
        Self::new(Arity::Exactly(1), move |mut values| fun(values.remove(0)))
    }

    /// A handler for a flag that takes any number of values
    pub fn variadic<F>(fun: F) -> Self
    where
        F: FnMut(Vec<String>) -> UsageResult<()> + 'static,
    {
        Self::new(Arity::Any, fun)
    }
}

impl Default for Handler {
    fn default() -> Self {
        Handler::nullary(|| Ok(()))
    }
}

impl fmt::Debug for Handler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Handler").field("arity", &self.arity).finish()
    }
}

/// A named command-line option
pub struct Flag {
    pub long_name: String,
    pub short_name: Option<char>,
    pub description: String,
    pub category: Category,
    pub labels: Vec<String>,
    pub handler: Handler,
    pub completer: Option<Completer>,
}

impl Flag {
    /// Start building a flag called `--long`
    pub fn new(long: impl Into<String>) -> Self {
        Flag {
            long_name: long.into(),
            short_name: None,
            description: String::new(),
            category: Category::DEFAULT,
            labels: Vec::new(),
            handler: Handler::default(),
            completer: None,
        }
    }

    pub fn short(mut self, c: char) -> Self {
        self.short_name = Some(c);
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn category(mut self, category: Category) -> Self {
        self.category = category;
        self
    }

    pub fn labels<I, S>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.labels = labels.into_iter().map(Into::into).collect();
        self
    }

    pub fn handler(mut self, handler: Handler) -> Self {
        self.handler = handler;
        self
    }

    pub fn completer<F>(mut self, completer: F) -> Self
    where
        F: Fn(&mut Context, usize, &str) + 'static,
    {
        self.completer = Some(Box::new(completer));
        self
    }

    /// A unary flag whose value must be one of `choices`
    ///
    /// Completion offers the choices sharing the typed prefix; any other
    /// value fails with [`UsageError::InvalidFlagValue`].
    pub fn choice<F>(
        long: impl Into<String>,
        description: impl Into<String>,
        label: impl Into<String>,
        choices: &[&str],
        mut fun: F,
    ) -> Self
    where
        F: FnMut(String) -> UsageResult<()> + 'static,
    {
        let long = long.into();
        let flag_name = format!("--{}", long);
        let allowed: Vec<String> = choices.iter().map(|s| s.to_string()).collect();
        let suggest = allowed.clone();

        Flag::new(long)
            .description(description)
            .labels([label])
            .handler(Handler::unary(move |value| {
                if !allowed.contains(&value) {
                    return Err(UsageError::InvalidFlagValue {
                        flag: flag_name.clone(),
                        value,
                        expected: allowed.join(", "),
                    });
                }
                fun(value)
            }))
            .completer(move |ctx, _, prefix| {
                if let Some(completions) = ctx.completions_mut() {
                    completions.add_matching(suggest.iter().map(String::as_str), prefix);
                }
            })
    }
}

impl fmt::Debug for Flag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Flag")
            .field("long_name", &self.long_name)
            .field("short_name", &self.short_name)
            .field("category", &self.category)
            .field("labels", &self.labels)
            .field("arity", &self.handler.arity)
            .finish()
    }
}

/// Flags of one command, addressable by long and short name
#[derive(Debug, Default)]
pub struct FlagRegistry {
    flags: Vec<Flag>,
    long: BTreeMap<String, usize>,
    short: BTreeMap<char, usize>,
    hidden: BTreeSet<Category>,
}

impl FlagRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a flag
    ///
    /// # Panics
    ///
    /// On an empty or duplicate long name, a duplicate short name, or a
    /// fixed arity that differs from the number of labels.
    pub fn add(&mut self, flag: Flag) {
        assert!(!flag.long_name.is_empty(), "flag long name must not be empty");
        if let Arity::Exactly(n) = flag.handler.arity {
            assert_eq!(
                n,
                flag.labels.len(),
                "flag '--{}' takes {} value(s) but has {} label(s)",
                flag.long_name,
                n,
                flag.labels.len()
            );
        }
        assert!(
            !self.long.contains_key(&flag.long_name),
            "flag '--{}' registered twice",
            flag.long_name
        );

        let index = self.flags.len();
        if let Some(c) = flag.short_name {
            assert!(
                self.short.insert(c, index).is_none(),
                "short flag '-{}' registered twice",
                c
            );
        }
        self.long.insert(flag.long_name.clone(), index);
        self.flags.push(flag);
    }

    /// Keep flags of this category out of completion and visible listings
    pub fn hide_category(&mut self, category: Category) {
        self.hidden.insert(category);
    }

    pub fn is_hidden(&self, category: Category) -> bool {
        self.hidden.contains(&category)
    }

    pub fn len(&self) -> usize {
        self.flags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }

    pub fn get(&self, long: &str) -> Option<&Flag> {
        self.long.get(long).map(|&i| &self.flags[i])
    }

    pub fn get_short(&self, c: char) -> Option<&Flag> {
        self.short.get(&c).map(|&i| &self.flags[i])
    }

    /// All flags, sorted by long name
    pub fn iter(&self) -> impl Iterator<Item = &Flag> {
        self.long.values().map(move |&i| &self.flags[i])
    }

    /// Flags outside hidden categories, sorted by long name
    pub fn visible_flags(&self) -> impl Iterator<Item = &Flag> {
        self.iter().filter(move |flag| !self.is_hidden(flag.category))
    }

    /// Try to handle the flag token at the front of `tokens`
    ///
    /// Returns `Ok(false)` without consuming anything when no registered
    /// flag matches; the caller decides whether that is an error.
    pub fn process_flag(&mut self, tokens: &mut Tokens, ctx: &mut Context) -> UsageResult<bool> {
        let Some(arg) = tokens.peek().map(str::to_owned) else {
            return Ok(false);
        };

        if let Some(name) = arg.strip_prefix("--") {
            if let Some(prefix) = ctx.completion_prefix(name) {
                let names: Vec<String> = self
                    .visible_flags()
                    .filter(|flag| flag.long_name.starts_with(&prefix))
                    .map(|flag| format!("--{}", flag.long_name))
                    .collect();
                for name in names {
                    ctx.add_completion(name);
                }
            }
            return match self.long.get(name) {
                Some(&index) => self.invoke(index, &format!("--{}", name), tokens, ctx),
                None => Ok(false),
            };
        }

        let mut chars = arg.chars();
        if let (Some('-'), Some(c), None) = (chars.next(), chars.next(), chars.next()) {
            return match self.short.get(&c) {
                Some(&index) => self.invoke(index, &format!("-{}", c), tokens, ctx),
                None => Ok(false),
            };
        }

        if ctx.completion_prefix(&arg).as_deref() == Some("-") {
            ctx.add_completion("--");
            for c in self.short.keys() {
                ctx.add_completion(format!("-{}", c));
            }
        }

        Ok(false)
    }

    /// Consume the flag token and its values, then run its handler once
    fn invoke(
        &mut self,
        index: usize,
        name: &str,
        tokens: &mut Tokens,
        ctx: &mut Context,
    ) -> UsageResult<bool> {
        tokens.next();
        let flag = &mut self.flags[index];
        log::debug!("matched flag {}", name);

        let mut values = Vec::new();
        loop {
            let value = match flag.handler.arity {
                Arity::Exactly(n) if values.len() == n => break,
                Arity::Exactly(n) => tokens.next().ok_or_else(|| UsageError::MissingFlagValue {
                    flag: name.to_string(),
                    arity: n,
                })?,
                Arity::Any => match tokens.next_value() {
                    Some(value) => value,
                    None => break,
                },
            };
            if let (Some(prefix), Some(completer)) =
                (ctx.completion_prefix(&value), flag.completer.as_ref())
            {
                completer(ctx, values.len(), &prefix);
            }
            values.push(strip_marker(&value));
        }

        (flag.handler.fun)(values)?;
        Ok(true)
    }
}
