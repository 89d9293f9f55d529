//! Token cursor over a command line
//!
//! Tokens are stored reversed so taking the next one is a `pop`, and
//! expanding a compound short-flag cluster pushes the pieces back in front
//! of the cursor without disturbing anything already consumed.

/// Cursor over the remaining tokens of one parse
#[derive(Debug, Clone)]
pub struct Tokens {
    rargs: Vec<String>,
    after_double_dash: bool,
}

impl Tokens {
    pub fn new(mut args: Vec<String>) -> Self {
        args.reverse();
        Tokens {
            rargs: args,
            after_double_dash: false,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rargs.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rargs.len()
    }

    /// The next token, without consuming it
    pub fn peek(&self) -> Option<&str> {
        self.rargs.last().map(String::as_str)
    }

    /// Take the next token verbatim
    pub fn next(&mut self) -> Option<String> {
        self.rargs.pop()
    }

    /// Put a token back in front of the cursor
    pub fn push_front(&mut self, arg: String) {
        self.rargs.push(arg)
    }

    /// Whether a `--` separator has been consumed
    pub fn after_double_dash(&self) -> bool {
        self.after_double_dash
    }

    /// Consume a `--` separator; everything after it is positional
    pub fn mark_double_dash(&mut self) {
        self.after_double_dash = true;
    }

    /// The next token if it looks like a flag (`-x`, `--x`, `--`)
    pub fn peek_flag(&self) -> Option<&str> {
        self.peek().filter(|it| it.len() > 1 && it.starts_with('-'))
    }

    /// Take the next token for a variadic flag, stopping at the next flag
    pub fn next_value(&mut self) -> Option<String> {
        if self.peek_flag().is_some() {
            return None;
        }
        self.next()
    }

    /// Rewrite a compound short-flag cluster at the cursor
    ///
    /// `-qlf` becomes `-q -l -f`, and `-j3` becomes `-j 3`: every
    /// alphabetic character gets its own flag, and the first non-alphabetic
    /// character starts an attached value that runs to the end of the
    /// cluster. Nothing happens past `--`, or for tokens of two characters
    /// or fewer.
    pub fn expand_compound(&mut self) {
        if self.after_double_dash {
            return;
        }
        let Some(arg) = self.peek() else {
            return;
        };
        let mut chars = arg.chars();
        let is_cluster = chars.next() == Some('-')
            && chars.next().map_or(false, |c| c.is_ascii_alphabetic())
            && chars.next().is_some();
        if !is_cluster {
            return;
        }

        let Some(arg) = self.next() else {
            return;
        };
        let mut pieces = Vec::new();
        for (i, c) in arg.char_indices().skip(1) {
            if c.is_ascii_alphabetic() {
                pieces.push(format!("-{}", c));
            } else {
                pieces.push(arg[i..].to_string());
                break;
            }
        }
        log::trace!("expanded '{}' into {:?}", arg, pieces);
        for piece in pieces.into_iter().rev() {
            self.push_front(piece);
        }
    }
}
