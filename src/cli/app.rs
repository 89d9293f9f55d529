//! Main CLI application

use crate::completion::{complete_path, Context};
use crate::config::{parse_config_auto, parse_config_file, parse_with_config, CommandConfig};
use crate::error::{Error, UsageError, UsageResult};
use crate::parse::{args_from_env, ArgSpec, Args, ExpectedArg, Flag, Handler};
use std::cell::{Cell, RefCell};
use std::path::PathBuf;
use std::rc::Rc;

/// CLI application
pub struct App {
    /// Parsed command table
    config: CommandConfig,
    /// Command table path
    config_path: PathBuf,
}

impl App {
    /// Create an app from the command table found in the current directory
    /// or one of its parents
    pub fn new() -> Result<Self, Error> {
        let (config, config_path) = parse_config_auto()?;
        Ok(App {
            config,
            config_path,
        })
    }

    /// Create an app with a specific command table file
    pub fn with_config_file(path: PathBuf) -> Result<Self, Error> {
        let config = parse_config_file(&path)?;
        Ok(App {
            config,
            config_path: path,
        })
    }

    pub fn config_path(&self) -> &PathBuf {
        &self.config_path
    }

    /// Interpret `args` under the command table
    ///
    /// Returns the matches as YAML, or the completion protocol when `ctx`
    /// is completing. Usage errors raised during a completion pass are
    /// expected (the marked token is usually incomplete) and are dropped,
    /// except for a cursor that points outside `args`.
    pub fn interpret(&self, args: Vec<String>, mut ctx: Context) -> Result<String, Error> {
        let result = parse_with_config(&self.config, args, &mut ctx);

        if let Err(e @ UsageError::CompletionCursor { .. }) = &result {
            return Err(e.clone().into());
        }

        if let Some(completions) = ctx.into_completions() {
            if let Err(e) = &result {
                log::debug!("ignoring '{}' during completion", e);
            }
            return Ok(completions.to_string());
        }

        let matches = result?;
        Ok(serde_yaml::to_string(&matches)?)
    }
}

/// The binary's own command line
#[derive(Debug, Default, PartialEq)]
pub struct Options {
    /// Explicit command table
    pub spec: Option<PathBuf>,
    /// Print the version and exit
    pub version: bool,
    /// Command line to interpret
    pub args: Vec<String>,
}

/// Parse the binary's own command line
///
/// Flags meant for the interpreted command line go after `--`.
pub fn parse_options(argv: Vec<String>) -> UsageResult<Options> {
    let spec = Rc::new(RefCell::new(None));
    let version = Rc::new(Cell::new(false));
    let args = Rc::new(RefCell::new(Vec::new()));

    let mut cli = {
        let (spec, version, args) = (spec.clone(), version.clone(), args.clone());
        ArgSpec::new()
            .flag(
                Flag::new("spec")
                    .short('s')
                    .description("Path to the argq.yml command table")
                    .labels(["file"])
                    .handler(Handler::unary(move |path| {
                        *spec.borrow_mut() = Some(PathBuf::from(path));
                        Ok(())
                    }))
                    .completer(complete_path),
            )
            .flag(
                Flag::new("version")
                    .short('V')
                    .description("Print version information")
                    .handler(Handler::nullary(move || {
                        version.set(true);
                        Ok(())
                    })),
            )
            .arg(ExpectedArg::remaining("args", move |values| {
                *args.borrow_mut() = values;
                Ok(())
            }))
    };
    cli.parse_cmdline(argv, &mut Context::new())?;

    let spec = spec.borrow_mut().take();
    let args = args.take();
    Ok(Options {
        spec,
        version: version.get(),
        args,
    })
}

/// Run the CLI application with the process arguments
pub fn run() -> Result<(), Error> {
    let options = parse_options(args_from_env())?;
    if options.version {
        println!("argq {}", crate::VERSION);
        return Ok(());
    }

    let app = match options.spec {
        Some(path) => App::with_config_file(path)?,
        None => App::new()?,
    };
    let ctx = Context::from_env()?;

    print!("{}", app.interpret(options.args, ctx)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::parse_config;

    fn strings(args: &[&str]) -> Vec<String> {
        args.iter().map(|s| s.to_string()).collect()
    }

    fn app(yaml: &str) -> App {
        App {
            config: parse_config(yaml).unwrap(),
            config_path: PathBuf::from("argq.yml"),
        }
    }

    #[test]
    fn test_parse_options() {
        let options = parse_options(strings(&["-s", "t.yml", "--", "build", "-j4"])).unwrap();
        assert_eq!(options.spec, Some(PathBuf::from("t.yml")));
        assert!(!options.version);
        assert_eq!(options.args, strings(&["build", "-j4"]));
    }

    #[test]
    fn test_parse_options_compound() {
        let options = parse_options(strings(&["-Vs./t.yml"])).unwrap();
        assert!(options.version);
        assert_eq!(options.spec, Some(PathBuf::from("./t.yml")));
    }

    #[test]
    fn test_parse_options_rejects_foreign_flags() {
        assert!(parse_options(strings(&["build", "-j4"])).is_err());
    }

    #[test]
    fn test_interpret_matches() {
        let app = app("flags:\n  - long: name\n    labels: [name]\n");
        let out = app
            .interpret(strings(&["--name", "world"]), Context::new())
            .unwrap();
        assert!(out.contains("name:"));
        assert!(out.contains("world"));
    }

    #[test]
    fn test_interpret_usage_error() {
        let app = app("flags: []\n");
        let err = app.interpret(strings(&["--nope"]), Context::new()).unwrap_err();
        assert_eq!(err.to_string(), "unrecognised flag '--nope'");
    }

    #[test]
    fn test_interpret_cursor_out_of_range() {
        let app = app("commands:\n  build: {}\n");
        for cursor in [0, 3] {
            let err = app
                .interpret(strings(&["build", "x"]), Context::completing(cursor))
                .unwrap_err();
            assert!(matches!(
                err,
                Error::Usage(UsageError::CompletionCursor { len: 2, .. })
            ));
        }
    }

    #[test]
    fn test_interpret_completion_ignores_errors() {
        let app = app("commands:\n  build: {}\n  bench: {}\n  run: {}\n");
        let out = app.interpret(strings(&["b"]), Context::completing(1)).unwrap();
        assert_eq!(out, "normal\nbench\nbuild\n");
    }
}
