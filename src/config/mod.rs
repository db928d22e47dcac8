//! Global configuration for rule construction, loaded from TOML.
//!
//! Follows the same lazily-initialized singleton pattern used elsewhere in
//! the corpus this crate draws from: call [`init_custom`] once at startup
//! (optional) before the first [`config`] call, or just let [`config`] fall
//! back to the embedded default.

use std::collections::HashSet;
use std::sync::OnceLock;

use serde::Deserialize;

const DEFAULT_CONFIG_TOML: &str = include_str!("default_config.toml");

static CUSTOM_TOML: OnceLock<String> = OnceLock::new();

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("TOML parse error: {0}")]
    Parse(String),
    #[error("direct_inputtable must not be empty")]
    EmptyDirectInputtable,
    #[error("config already initialized")]
    AlreadyInitialized,
}

#[derive(Debug, Deserialize)]
struct RawConfig {
    direct_inputtable: String,
    allow_direct_next_input: bool,
}

/// Parsed, validated configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub direct_inputtable: HashSet<char>,
    pub allow_direct_next_input: bool,
}

fn parse(toml_str: &str) -> Result<Config, ConfigError> {
    let raw: RawConfig = toml::from_str(toml_str).map_err(|e| ConfigError::Parse(e.to_string()))?;
    if raw.direct_inputtable.is_empty() {
        return Err(ConfigError::EmptyDirectInputtable);
    }
    Ok(Config {
        direct_inputtable: raw.direct_inputtable.chars().collect(),
        allow_direct_next_input: raw.allow_direct_next_input,
    })
}

/// Set custom TOML before the first [`config`] call. Fails if [`config`] was
/// already called (and so the default was already locked in).
pub fn init_custom(toml_content: String) -> Result<(), ConfigError> {
    parse(&toml_content)?;
    CUSTOM_TOML
        .set(toml_content)
        .map_err(|_| ConfigError::AlreadyInitialized)
}

/// Get or lazily initialize the global config singleton.
pub fn config() -> &'static Config {
    static INSTANCE: OnceLock<Config> = OnceLock::new();
    INSTANCE.get_or_init(|| {
        let toml_str = CUSTOM_TOML.get().map(String::as_str).unwrap_or(DEFAULT_CONFIG_TOML);
        parse(toml_str).expect("embedded default config must be valid")
    })
}

/// The embedded default configuration TOML, for callers that want to start
/// from it and override a few keys.
pub fn default_toml() -> &'static str {
    DEFAULT_CONFIG_TOML
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_toml_parses() {
        let cfg = parse(DEFAULT_CONFIG_TOML).unwrap();
        assert!(cfg.direct_inputtable.contains(&'a'));
        assert!(cfg.direct_inputtable.contains(&' '));
        assert!(!cfg.allow_direct_next_input);
    }

    #[test]
    fn rejects_empty_direct_inputtable() {
        let err = parse("direct_inputtable = ''\nallow_direct_next_input = false\n").unwrap_err();
        assert!(matches!(err, ConfigError::EmptyDirectInputtable));
    }

    #[test]
    fn rejects_malformed_toml() {
        let err = parse("not valid toml = = =").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
