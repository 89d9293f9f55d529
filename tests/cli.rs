//! Integration tests for the argq binary

mod common;

use assert_cmd::Command;
use common::{create_test_config, create_test_config_in_subdir};
use predicates::prelude::*;

const TABLE: &str = r#"
flags:
  - long: verbose
    short: v
commands:
  build:
    flags:
      - long: jobs
        short: j
        labels: [n]
      - long: release
    args:
      - label: target
        optional: true
  run:
    args:
      - label: program
"#;

fn argq() -> Command {
    let mut cmd = Command::cargo_bin("argq").unwrap();
    cmd.env_remove("ARGQ_GET_COMPLETIONS").env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_prints_matches() {
    let (_temp_dir, config_path) = create_test_config(TABLE);

    argq()
        .arg("--spec")
        .arg(&config_path)
        .args(["--", "-v", "build", "-j4", "lib"])
        .assert()
        .success()
        .stdout(predicate::str::contains("- build"))
        .stdout(predicate::str::contains("jobs:"))
        .stdout(predicate::str::contains("'4'").or(predicate::str::contains("\"4\"")))
        .stdout(predicate::str::contains("target:"));
}

#[test]
fn test_discovers_table_from_subdir() {
    let (_temp_dir, _config_path, sub_dir) = create_test_config_in_subdir(TABLE);

    argq()
        .current_dir(&sub_dir)
        .args(["--", "run", "app"])
        .assert()
        .success()
        .stdout(predicate::str::contains("program:"))
        .stdout(predicate::str::contains("app"));
}

#[test]
fn test_usage_error_exit_code() {
    let (_temp_dir, config_path) = create_test_config(TABLE);

    argq()
        .arg("-s")
        .arg(&config_path)
        .args(["--", "build", "--bogus"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Error:"))
        .stderr(predicate::str::contains("unrecognised flag '--bogus'"));
}

#[test]
fn test_own_flags_need_double_dash() {
    let (_temp_dir, config_path) = create_test_config(TABLE);

    argq()
        .arg("-s")
        .arg(&config_path)
        .args(["build", "-j4"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unrecognised flag '-j'"));
}

#[test]
fn test_completion_protocol() {
    let (_temp_dir, config_path) = create_test_config(TABLE);

    argq()
        .env("ARGQ_GET_COMPLETIONS", "2")
        .arg("-s")
        .arg(&config_path)
        .args(["--", "build", "--re"])
        .assert()
        .success()
        .stdout("normal\n--release\n");

    argq()
        .env("ARGQ_GET_COMPLETIONS", "1")
        .arg("-s")
        .arg(&config_path)
        .args(["--", ""])
        .assert()
        .success()
        .stdout("normal\nbuild\nrun\n");
}

#[test]
fn test_completion_cursor_out_of_range() {
    let (_temp_dir, config_path) = create_test_config(TABLE);

    argq()
        .env("ARGQ_GET_COMPLETIONS", "99")
        .arg("-s")
        .arg(&config_path)
        .args(["--", "build"])
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains(
            "completion cursor 99 is outside the 1 argument(s)",
        ));
}

#[test]
fn test_debug_logging() {
    let (_temp_dir, config_path) = create_test_config(TABLE);

    argq()
        .env("RUST_LOG", "argq=debug")
        .arg("-s")
        .arg(&config_path)
        .args(["--", "build"])
        .assert()
        .success()
        .stderr(predicate::str::contains("selected sub-command 'build'"));
}

#[test]
fn test_invalid_completion_env() {
    let (_temp_dir, config_path) = create_test_config(TABLE);

    argq()
        .env("ARGQ_GET_COMPLETIONS", "soon")
        .arg("-s")
        .arg(&config_path)
        .args(["--", "build"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("ARGQ_GET_COMPLETIONS"));
}

#[test]
fn test_missing_table() {
    argq()
        .arg("-s")
        .arg("/nonexistent/argq.yml")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error:"));
}

#[test]
fn test_version() {
    argq()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("argq "));
}
