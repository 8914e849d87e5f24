//! Credential loading from a local `KEY=VALUE` file with an environment fallback.

use crate::{Error, Result};
use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

/// Name of the key looked up in the config file and in the environment.
pub const API_KEY_VAR: &str = "OPENROUTER_API_KEY";

/// Parse `KEY=VALUE` lines, skipping blanks, `#` comments and lines without `=`.
pub fn parse_env_file(contents: &str) -> HashMap<String, String> {
    let mut values = HashMap::new();

    for raw_line in contents.lines() {
        let line = raw_line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let Some((key, value)) = line.split_once('=') else {
            continue;
        };
        let value = value.trim().trim_matches('"').trim_matches('\'');
        values.insert(key.trim().to_string(), value.to_string());
    }

    values
}

/// Read and parse a config file. A missing file yields an empty mapping.
pub fn load_env_file(path: &Path) -> Result<HashMap<String, String>> {
    match fs::read_to_string(path) {
        Ok(contents) => Ok(parse_env_file(&contents)),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::debug!("Config file {} not found", path.display());
            Ok(HashMap::new())
        }
        Err(e) => Err(e.into()),
    }
}

/// Resolve the API key: config file first, then `env_value`.
///
/// `env_value` is whatever the caller read from `OPENROUTER_API_KEY`; this
/// function never touches the process environment itself.
pub fn load_api_key(config_path: &Path, env_value: Option<&str>) -> Result<String> {
    let values = load_env_file(config_path)?;

    if let Some(key) = values.get(API_KEY_VAR).filter(|v| !v.is_empty()) {
        tracing::debug!("Using API key from {}", config_path.display());
        return Ok(key.clone());
    }

    if let Some(key) = env_value.filter(|v| !v.is_empty()) {
        tracing::debug!("Using API key from environment");
        return Ok(key.to_string());
    }

    Err(Error::MissingCredential(config_path.to_path_buf()))
}
