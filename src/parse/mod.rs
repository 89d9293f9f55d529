//! Command-line parsing core
//!
//! This module turns a raw token list into flag handler calls and
//! positional handler calls. Flags live in a [`FlagRegistry`], positional
//! slots in a [`PositionalQueue`]; anything implementing [`Args`] can be
//! driven by [`parse_cmdline`].

pub mod flag;
pub mod positional;
pub mod tokens;

use crate::completion::{strip_marker, Context};
use crate::error::{UsageError, UsageResult};

// Re-export main types
pub use flag::*;
pub use positional::*;
pub use tokens::*;

/// Something tokens can be routed to
pub trait Args {
    /// Handle the flag at the front of `tokens`, or return `Ok(false)`
    /// without consuming it
    fn process_flag(&mut self, tokens: &mut Tokens, ctx: &mut Context) -> UsageResult<bool>;

    /// Offer the pending positional tokens; `Ok(true)` means they were
    /// claimed
    fn process_args(
        &mut self,
        pending: &[String],
        finish: bool,
        ctx: &mut Context,
    ) -> UsageResult<bool>;

    /// Parse a full command line (program name already stripped)
    fn parse_cmdline(&mut self, cmdline: Vec<String>, ctx: &mut Context) -> UsageResult<()> {
        parse_cmdline(self, cmdline, ctx)
    }
}

/// Flags plus positional slots: the argument shape of one command
#[derive(Debug, Default)]
pub struct ArgSpec {
    pub flags: FlagRegistry,
    pub expected: PositionalQueue,
}

impl ArgSpec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_flag(&mut self, flag: Flag) {
        self.flags.add(flag);
    }

    pub fn expect_arg(&mut self, arg: ExpectedArg) {
        self.expected.push(arg);
    }

    /// Builder form of [`ArgSpec::add_flag`]
    pub fn flag(mut self, flag: Flag) -> Self {
        self.add_flag(flag);
        self
    }

    /// Builder form of [`ArgSpec::expect_arg`]
    pub fn arg(mut self, arg: ExpectedArg) -> Self {
        self.expect_arg(arg);
        self
    }
}

impl Args for ArgSpec {
    fn process_flag(&mut self, tokens: &mut Tokens, ctx: &mut Context) -> UsageResult<bool> {
        self.flags.process_flag(tokens, ctx)
    }

    fn process_args(
        &mut self,
        pending: &[String],
        finish: bool,
        ctx: &mut Context,
    ) -> UsageResult<bool> {
        self.expected.process_args(pending, finish, ctx)
    }
}

/// Drive `args` over `cmdline` from left to right
///
/// Compound short flags are expanded as they are reached, `--` ends flag
/// processing, and positional tokens accumulate until the front positional
/// slot claims them. A final flush at end of input resolves variable-arity
/// and optional slots. When `ctx` is completing, the token under its cursor
/// is marked before anything else happens.
pub fn parse_cmdline<A: Args + ?Sized>(
    args: &mut A,
    mut cmdline: Vec<String>,
    ctx: &mut Context,
) -> UsageResult<()> {
    ctx.mark_cursor(&mut cmdline)?;

    let mut tokens = Tokens::new(cmdline);
    let mut pending = Vec::new();

    loop {
        tokens.expand_compound();
        let Some(arg) = tokens.peek().map(str::to_owned) else {
            break;
        };
        let flags_allowed = !tokens.after_double_dash();

        if flags_allowed && arg == "--" {
            log::trace!("end of flags");
            tokens.mark_double_dash();
            tokens.next();
        } else if flags_allowed && arg.len() > 1 && arg.starts_with('-') {
            if !args.process_flag(&mut tokens, ctx)? {
                return Err(UsageError::UnrecognizedFlag(strip_marker(&arg)));
            }
        } else {
            pending.extend(tokens.next());
            if args.process_args(&pending, false, ctx)? {
                pending.clear();
            }
        }
    }

    args.process_args(&pending, true, ctx)?;
    Ok(())
}

/// The process arguments with the program name stripped
pub fn args_from_env() -> Vec<String> {
    std::env::args().skip(1).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    type Log = Rc<RefCell<Vec<String>>>;

    fn strings(args: &[&str]) -> Vec<String> {
        args.iter().map(|s| s.to_string()).collect()
    }

    /// Flags -q -l -f (switches), -j N, and a trailing "rest" positional
    fn spec(log: &Log) -> ArgSpec {
        let mut spec = ArgSpec::new();
        for (long, short) in [("quiet", 'q'), ("long", 'l'), ("force", 'f')] {
            let log = log.clone();
            spec.add_flag(Flag::new(long).short(short).handler(Handler::nullary(move || {
                log.borrow_mut().push(format!("--{}", long));
                Ok(())
            })));
        }
        let jobs = log.clone();
        spec.add_flag(
            Flag::new("jobs")
                .short('j')
                .labels(["n"])
                .handler(Handler::unary(move |n| {
                    jobs.borrow_mut().push(format!("--jobs {}", n));
                    Ok(())
                })),
        );
        let rest = log.clone();
        spec.expect_arg(ExpectedArg::remaining("rest", move |values| {
            rest.borrow_mut().push(format!("rest {:?}", values));
            Ok(())
        }));
        spec
    }

    fn run(args: &[&str]) -> UsageResult<Vec<String>> {
        let log = Log::default();
        let mut spec = spec(&log);
        spec.parse_cmdline(strings(args), &mut Context::new())?;
        let out = log.borrow().clone();
        Ok(out)
    }

    #[test]
    fn test_compound_flags_match_separate_flags() {
        assert_eq!(run(&["-qlf"]).unwrap(), run(&["-q", "-l", "-f"]).unwrap());
        assert_eq!(run(&["-j3"]).unwrap(), run(&["-j", "3"]).unwrap());
        assert_eq!(
            run(&["-qj3", "x"]).unwrap(),
            vec!["--quiet", "--jobs 3", r#"rest ["x"]"#]
        );
    }

    #[test]
    fn test_bare_dash_is_positional() {
        assert_eq!(run(&["-"]).unwrap(), vec![r#"rest ["-"]"#]);
    }

    #[test]
    fn test_double_dash_boundary() {
        assert_eq!(
            run(&["-q", "--", "-l", "--jobs", "--"]).unwrap(),
            vec!["--quiet", r#"rest ["-l", "--jobs", "--"]"#]
        );
    }

    #[test]
    fn test_flag_value_is_not_expanded() {
        assert_eq!(run(&["--jobs", "-qlf"]).unwrap(), vec!["--jobs -qlf", "rest []"]);
    }

    #[test]
    fn test_unknown_long_flag() {
        assert_eq!(
            run(&["--bogus"]).unwrap_err(),
            UsageError::UnrecognizedFlag("--bogus".to_string())
        );
    }

    #[test]
    fn test_unknown_short_in_cluster() {
        assert_eq!(
            run(&["-qx"]).unwrap_err(),
            UsageError::UnrecognizedFlag("-x".to_string())
        );
    }

    #[test]
    fn test_missing_flag_value() {
        assert!(matches!(
            run(&["-j"]).unwrap_err(),
            UsageError::MissingFlagValue { arity: 1, .. }
        ));
    }

    #[test]
    fn test_positionals_in_declaration_order() {
        let log = Log::default();
        let first = log.clone();
        let second = log.clone();
        let mut spec = ArgSpec::new()
            .arg(ExpectedArg::single("src", move |v| {
                first.borrow_mut().push(format!("src {}", v));
                Ok(())
            }))
            .arg(ExpectedArg::single("dst", move |v| {
                second.borrow_mut().push(format!("dst {}", v));
                Ok(())
            }));

        spec.parse_cmdline(strings(&["a", "b"]), &mut Context::new()).unwrap();
        assert_eq!(*log.borrow(), vec!["src a", "dst b"]);
    }

    #[test]
    fn test_no_positionals_rejects_arguments() {
        let mut spec = ArgSpec::new();
        assert_eq!(
            spec.parse_cmdline(strings(&["x"]), &mut Context::new()),
            Err(UsageError::UnexpectedArgument("x".to_string()))
        );
    }

    #[test]
    fn test_reparse_is_identical() {
        let first = run(&["-qj2", "a", "b"]).unwrap();
        let second = run(&["-qj2", "a", "b"]).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_completion_cursor_out_of_range() {
        let log = Log::default();
        let mut spec = spec(&log);
        assert_eq!(
            spec.parse_cmdline(strings(&["-q"]), &mut Context::completing(5)),
            Err(UsageError::CompletionCursor { index: 5, len: 1 })
        );
    }
}
