//! Common test utilities

#![allow(dead_code)]

use std::cell::RefCell;
use std::fs;
use std::path::PathBuf;
use std::rc::Rc;
use tempfile::TempDir;

/// Create a temporary directory with an argq.yml file
pub fn create_test_config(content: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("argq.yml");
    fs::write(&config_path, content).unwrap();
    (temp_dir, config_path)
}

/// Create a test config with an empty subdirectory next to it
pub fn create_test_config_in_subdir(content: &str) -> (TempDir, PathBuf, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("argq.yml");
    let sub_dir = temp_dir.path().join("subdir");

    fs::write(&config_path, content).unwrap();
    fs::create_dir(&sub_dir).unwrap();

    (temp_dir, config_path, sub_dir)
}

pub fn strings(args: &[&str]) -> Vec<String> {
    args.iter().map(|s| s.to_string()).collect()
}

/// Ordered record of handler calls, as "name=value,value"
pub type Log = Rc<RefCell<Vec<String>>>;

/// A handler body that appends one call to `log`
pub fn record(log: &Log, name: &str) -> impl FnMut(Vec<String>) -> argq::UsageResult<()> {
    let log = log.clone();
    let name = name.to_string();
    move |values| {
        log.borrow_mut().push(format!("{}={}", name, values.join(",")));
        Ok(())
    }
}
