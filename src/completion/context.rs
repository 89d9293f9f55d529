//! Parse context
//!
//! The context is created once per parse and threaded through every
//! dispatch call. It carries the completion state, which only exists when
//! the caller asked for a completion run.

use super::{needs_completion, Completions, COMPLETIONS_ENV, COMPLETION_MARKER};
use crate::error::{ConfigError, ConfigResult, UsageError, UsageResult};
use std::env;

/// State shared by everything taking part in one parse
#[derive(Debug, Default)]
pub struct Context {
    /// 1-based index of the token under the cursor
    cursor: Option<usize>,

    /// Present only during a completion run
    completions: Option<Completions>,
}

impl Context {
    /// Create a context for an ordinary parse
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a context that completes the token at 1-based `cursor`
    pub fn completing(cursor: usize) -> Self {
        Context {
            cursor: Some(cursor),
            completions: Some(Completions::new()),
        }
    }

    /// Read the completion cursor from [`COMPLETIONS_ENV`]
    pub fn from_env() -> ConfigResult<Self> {
        Self::from_env_var(COMPLETIONS_ENV)
    }

    /// Read the completion cursor from a caller-chosen variable
    pub fn from_env_var(var: &str) -> ConfigResult<Self> {
        match env::var(var) {
            Ok(value) => {
                let cursor = value.trim().parse::<usize>().map_err(|_| ConfigError::InvalidEnv {
                    var: var.to_string(),
                    value: value.clone(),
                })?;
                log::debug!("completion requested for token {}", cursor);
                Ok(Self::completing(cursor))
            }
            Err(_) => Ok(Self::new()),
        }
    }

    /// Whether this parse collects suggestions
    pub fn is_completing(&self) -> bool {
        self.completions.is_some()
    }

    /// Tag the token under the cursor with the completion marker
    ///
    /// `tokens` is the command line before any compound-flag expansion.
    pub fn mark_cursor(&self, tokens: &mut [String]) -> UsageResult<()> {
        let Some(index) = self.cursor else {
            return Ok(());
        };
        if index == 0 || index > tokens.len() {
            return Err(UsageError::CompletionCursor {
                index,
                len: tokens.len(),
            });
        }
        tokens[index - 1].push_str(COMPLETION_MARKER);
        Ok(())
    }

    /// Text typed before the marker, if completing and `s` is the target
    pub fn completion_prefix(&self, s: &str) -> Option<String> {
        if !self.is_completing() {
            return None;
        }
        needs_completion(s).map(str::to_owned)
    }

    /// Add a suggestion; ignored outside completion runs
    pub fn add_completion(&mut self, suggestion: impl Into<String>) {
        if let Some(completions) = self.completions.as_mut() {
            completions.add(suggestion);
        }
    }

    pub fn completions(&self) -> Option<&Completions> {
        self.completions.as_ref()
    }

    pub fn completions_mut(&mut self) -> Option<&mut Completions> {
        self.completions.as_mut()
    }

    /// Hand the collected suggestions to the caller
    pub fn into_completions(self) -> Option<Completions> {
        self.completions
    }
}
