//! Configuration loading from disk and the environment.

use std::fs;
use std::path::Path;
use std::str::FromStr;

use crate::config::schema::ClientConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Endpoint URL override.
pub const ENDPOINT_ENV_VAR: &str = "ETH_RPC";
pub const CHAIN_ID_ENV_VAR: &str = "ETH_CHAIN_ID";
pub const GAS_LIMIT_ENV_VAR: &str = "ETH_GAS_LIMIT";
pub const GAS_PRICE_ENV_VAR: &str = "ETH_GAS_PRICE_WEI";
pub const RPC_TIMEOUT_ENV_VAR: &str = "ETH_RPC_TIMEOUT_SECS";

/// Error type for configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Env { var: &'static str, value: String },
    Validation(Vec<ValidationError>),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "IO error: {}", e),
            ConfigError::Parse(e) => write!(f, "Parse error: {}", e),
            ConfigError::Env { var, value } => {
                write!(f, "Invalid value '{}' for {}", value, var)
            }
            ConfigError::Validation(errors) => {
                write!(f, "Validation failed: ")?;
                for (i, err) in errors.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", err)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Load a TOML file, apply environment overrides and validate.
pub fn load_config(path: &Path) -> Result<ClientConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: ClientConfig = toml::from_str(&content).map_err(ConfigError::Parse)?;
    finish(config, |var| std::env::var(var).ok())
}

impl ClientConfig {
    /// Defaults plus `ETH_*` environment overrides, validated.
    pub fn from_env() -> Result<Self, ConfigError> {
        finish(Self::default(), |var| std::env::var(var).ok())
    }
}

fn finish<F>(config: ClientConfig, lookup: F) -> Result<ClientConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let config = apply_env_overrides(config, lookup)?;
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

/// Overlay values found through `lookup` onto `config`.
pub fn apply_env_overrides<F>(mut config: ClientConfig, lookup: F) -> Result<ClientConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(endpoint) = lookup(ENDPOINT_ENV_VAR) {
        config.endpoint = endpoint;
    }
    if let Some(v) = parse_var(&lookup, CHAIN_ID_ENV_VAR)? {
        config.chain_id = v;
    }
    if let Some(v) = parse_var(&lookup, GAS_LIMIT_ENV_VAR)? {
        config.gas_limit = v;
    }
    if let Some(v) = parse_var(&lookup, GAS_PRICE_ENV_VAR)? {
        config.gas_price_wei = v;
    }
    if let Some(v) = parse_var(&lookup, RPC_TIMEOUT_ENV_VAR)? {
        config.rpc_timeout_secs = v;
    }
    Ok(config)
}

fn parse_var<F, T>(lookup: &F, var: &'static str) -> Result<Option<T>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(var) {
        None => Ok(None),
        Some(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::Env { var, value }),
    }
}
