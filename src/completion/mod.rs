//! Shell completion support
//!
//! A completion run is a normal parse in which one token carries
//! [`COMPLETION_MARKER`]. Everything that knows how to complete the marked
//! token (long flag names, flag value completers, positional completers,
//! sub-command names) adds suggestions to a shared [`Completions`] set held
//! by the parse [`Context`].

pub mod context;
pub mod path;

use std::collections::BTreeSet;
use std::fmt;

// Re-export main types
pub use context::*;
pub use path::*;

/// Appended to the token under the shell's cursor
pub const COMPLETION_MARKER: &str = "___COMPLETE___";

/// Environment variable holding the 1-based index of the token to complete
pub const COMPLETIONS_ENV: &str = "ARGQ_GET_COMPLETIONS";

/// Return the text typed before the marker, if `s` is the completion target
pub fn needs_completion(s: &str) -> Option<&str> {
    s.find(COMPLETION_MARKER).map(|i| &s[..i])
}

/// Remove the marker from a token, leaving what the user actually typed
pub fn strip_marker(s: &str) -> String {
    s.replacen(COMPLETION_MARKER, "", 1)
}

/// How the shell should treat the suggestions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompletionKind {
    /// Plain words: flag names, enumerated values, command names
    Normal,
    /// Filesystem paths; shells should not append a trailing space
    Filenames,
}

/// Suggestions collected during a completion run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Completions {
    suggestions: BTreeSet<String>,
    path_completion: bool,
}

impl Completions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one suggestion
    pub fn add(&mut self, suggestion: impl Into<String>) {
        self.suggestions.insert(suggestion.into());
    }

    /// Add every candidate starting with `prefix`
    pub fn add_matching<'a, I>(&mut self, candidates: I, prefix: &str)
    where
        I: IntoIterator<Item = &'a str>,
    {
        for candidate in candidates {
            if candidate.starts_with(prefix) {
                self.add(candidate);
            }
        }
    }

    /// Record that path-style completion happened
    pub fn mark_path_completion(&mut self) {
        self.path_completion = true;
    }

    pub fn suggestions(&self) -> &BTreeSet<String> {
        &self.suggestions
    }

    pub fn into_suggestions(self) -> BTreeSet<String> {
        self.suggestions
    }

    pub fn is_empty(&self) -> bool {
        self.suggestions.is_empty()
    }

    pub fn contains(&self, suggestion: &str) -> bool {
        self.suggestions.contains(suggestion)
    }

    pub fn is_path_completion(&self) -> bool {
        self.path_completion
    }

    pub fn kind(&self) -> CompletionKind {
        if self.path_completion {
            CompletionKind::Filenames
        } else {
            CompletionKind::Normal
        }
    }
}

/// Shell protocol: a `normal`/`filenames` header line, then one suggestion
/// per line in sorted order.
impl fmt::Display for Completions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind() {
            CompletionKind::Normal => writeln!(f, "normal")?,
            CompletionKind::Filenames => writeln!(f, "filenames")?,
        }
        for suggestion in &self.suggestions {
            writeln!(f, "{}", suggestion)?;
        }
        Ok(())
    }
}
