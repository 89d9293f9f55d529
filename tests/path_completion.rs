//! Integration tests for path completion
//!
//! Kept in their own test binary: one test changes the working directory.

use argq::completion::complete_path;
use argq::{ArgSpec, Args, Context, ExpectedArg};
use std::cell::RefCell;
use std::env;
use std::fs;
use std::rc::Rc;
use tempfile::TempDir;

#[test]
fn test_dot_slash_prefix_is_kept() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("dev.toml"), "").unwrap();
    fs::write(dir.path().join("prod.toml"), "").unwrap();

    let previous = env::current_dir().unwrap();
    env::set_current_dir(dir.path()).unwrap();
    let mut ctx = Context::completing(1);
    complete_path(&mut ctx, 0, "./de");
    env::set_current_dir(previous).unwrap();

    let completions = ctx.into_completions().unwrap();
    let got: Vec<&str> = completions.suggestions().iter().map(String::as_str).collect();
    assert_eq!(got, vec!["./dev.toml"]);
}

#[test]
fn test_path_positional_completion() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("notes.md"), "").unwrap();
    fs::write(dir.path().join("other.md"), "").unwrap();

    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = seen.clone();
    let mut spec = ArgSpec::new().arg(ExpectedArg::path("file", false, move |path| {
        sink.borrow_mut().push(path);
        Ok(())
    }));

    let prefix = format!("{}/no", dir.path().display());
    let mut ctx = Context::completing(1);
    spec.parse_cmdline(vec![prefix.clone()], &mut ctx).unwrap();

    // the handler still runs, with the marker stripped
    assert_eq!(*seen.borrow(), vec![prefix]);

    let completions = ctx.into_completions().unwrap();
    assert!(completions.is_path_completion());
    assert_eq!(
        completions.to_string(),
        format!("filenames\n{}/notes.md\n", dir.path().display())
    );
}

#[test]
fn test_paths_positional_completes_each_marked_token() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("a.rs"), "").unwrap();
    fs::write(dir.path().join("b.rs"), "").unwrap();

    let mut spec = ArgSpec::new().arg(ExpectedArg::paths("files", |_| Ok(())));

    let first = format!("{}/a.rs", dir.path().display());
    let second = format!("{}/b", dir.path().display());
    let mut ctx = Context::completing(2);
    spec.parse_cmdline(vec![first, second], &mut ctx).unwrap();

    let completions = ctx.into_completions().unwrap();
    assert!(completions.is_path_completion());
    let got: Vec<&str> = completions.suggestions().iter().map(String::as_str).collect();
    assert_eq!(got, vec![format!("{}/b.rs", dir.path().display()).as_str()]);
}
