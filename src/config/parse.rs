//! Command table parsing and discovery

use crate::config::types::CommandConfig;
use crate::config::validate_config;
use crate::error::{ConfigError, ConfigResult, Error};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Default command table file names to search for
const CONFIG_FILE_NAMES: &[&str] = &["argq.yml", "argq.yaml"];

/// Find the command table by searching current and parent directories
pub fn find_config_file() -> ConfigResult<PathBuf> {
    find_config_file_from(env::current_dir().map_err(|e| {
        ConfigError::Invalid(format!("Failed to get current directory: {}", e))
    })?)
}

/// Find the command table starting from a specific directory
pub fn find_config_file_from(start_dir: PathBuf) -> ConfigResult<PathBuf> {
    let mut current_dir = start_dir;
    let mut searched_paths = Vec::new();

    loop {
        for file_name in CONFIG_FILE_NAMES {
            let config_path = current_dir.join(file_name);
            searched_paths.push(config_path.display().to_string());

            if config_path.is_file() {
                return Ok(config_path);
            }
        }

        match current_dir.parent() {
            Some(parent) => current_dir = parent.to_path_buf(),
            None => return Err(ConfigError::NotFound(searched_paths.join(", "))),
        }
    }
}

/// Parse and validate a command table file
pub fn parse_config_file(path: &Path) -> Result<CommandConfig, Error> {
    let contents = fs::read_to_string(path).map_err(|e| ConfigError::ReadFile {
        path: path.to_path_buf(),
        error: e.to_string(),
    })?;

    parse_config(&contents)
}

/// Parse and validate a command table from a string
pub fn parse_config(yaml: &str) -> Result<CommandConfig, Error> {
    let config: CommandConfig = serde_yaml::from_str(yaml)?;
    validate_config(&config)?;
    Ok(config)
}

/// Find and parse the command table, returning it with its path
pub fn parse_config_auto() -> Result<(CommandConfig, PathBuf), Error> {
    let path = find_config_file()?;
    let config = parse_config_file(&path)?;
    Ok((config, path))
}
