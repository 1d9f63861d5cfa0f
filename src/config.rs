//! Runtime configuration read from environment variables.

use std::{env, fmt::Display, str::FromStr};

use rust_decimal::Decimal;
use thiserror::Error;
use tracing::{info, warn};

pub const DEFAULT_PORT: &str = "8000";
pub const DEFAULT_DATABASE_URL: &str = "pos.db";
pub const DEFAULT_TAX_RATE: &str = "0.08";

#[derive(Debug, Error)]
#[error("invalid value for {key}: {reason}")]
pub struct ConfigError {
    pub key: String,
    pub reason: String,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    /// SQLite file path, or `:memory:`.
    pub database_url: String,
    /// Applied when a cart request omits `tax_rate`.
    pub default_tax_rate: Decimal,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8000,
            database_url: DEFAULT_DATABASE_URL.to_string(),
            default_tax_rate: Decimal::new(8, 2),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds a config from an arbitrary key lookup, so tests need not touch the process env.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let default_tax_rate: Decimal = try_load(&lookup, "TAX_RATE", DEFAULT_TAX_RATE)?;
        if default_tax_rate < Decimal::ZERO {
            return Err(ConfigError {
                key: "TAX_RATE".into(),
                reason: "must not be negative".into(),
            });
        }

        Ok(Self {
            port: try_load(&lookup, "PORT", DEFAULT_PORT)?,
            database_url: try_load(&lookup, "DATABASE_URL", DEFAULT_DATABASE_URL)?,
            default_tax_rate,
        })
    }
}

fn try_load<T, F>(lookup: &F, key: &str, default: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: Display,
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .unwrap_or_else(|| {
            info!("{key} not set, using default: {default}");
            default.to_string()
        })
        .trim()
        .parse()
        .map_err(|e: T::Err| {
            warn!("Invalid {key} value: {e}");
            ConfigError {
                key: key.to_string(),
                reason: e.to_string(),
            }
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_apply_when_unset() {
        let config = load(&[]).unwrap();

        assert_eq!(config.port, 8000);
        assert_eq!(config.database_url, "pos.db");
        assert_eq!(config.default_tax_rate, Decimal::new(8, 2));
    }

    #[test]
    fn overrides_are_parsed() {
        let config = load(&[
            ("PORT", "9090"),
            ("DATABASE_URL", ":memory:"),
            ("TAX_RATE", "0.0725"),
        ])
        .unwrap();

        assert_eq!(config.port, 9090);
        assert_eq!(config.database_url, ":memory:");
        assert_eq!(config.default_tax_rate, Decimal::new(725, 4));
    }

    #[test]
    fn bad_port_names_the_variable() {
        let err = load(&[("PORT", "eighty")]).unwrap_err();
        assert_eq!(err.key, "PORT");
    }

    #[test]
    fn negative_tax_rate_is_rejected() {
        let err = load(&[("TAX_RATE", "-0.01")]).unwrap_err();
        assert_eq!(err.key, "TAX_RATE");
    }
}
