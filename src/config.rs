// src/config.rs
use std::{
    env,
    fmt::Display,
    net::{IpAddr, SocketAddr},
    str::FromStr,
};

use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("{key} must be set")]
    Missing { key: &'static str },

    #[error("invalid {key} value {value:?}: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub bind: SocketAddr,
    pub index_limit: usize,
    /// `None` when running on the in-memory store.
    pub database: Option<DatabaseConfig>,
}

impl Config {
    /// Reads settings from the process environment. `DATABASE_URL` is only
    /// required when `use_database` is set.
    pub fn from_env(use_database: bool) -> Result<Self, ConfigError> {
        Self::load(|key| env::var(key).ok(), use_database)
    }

    fn load(
        lookup: impl Fn(&str) -> Option<String>,
        use_database: bool,
    ) -> Result<Self, ConfigError> {
        let host: IpAddr = try_load(&lookup, "HOST", "0.0.0.0")?;
        let port: u16 = try_load(&lookup, "PORT", "3030")?;
        let bind = SocketAddr::new(host, port);

        let database = if use_database {
            let url = lookup("DATABASE_URL").ok_or(ConfigError::Missing {
                key: "DATABASE_URL",
            })?;
            Some(DatabaseConfig {
                url,
                max_connections: try_load(&lookup, "DATABASE_MAX_CONNECTIONS", "5")?,
            })
        } else {
            None
        };

        Ok(Self {
            bind,
            index_limit: try_load(&lookup, "POLLS_INDEX_LIMIT", "5")?,
            database,
        })
    }
}

fn try_load<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    default: &str,
) -> Result<T, ConfigError>
where
    T::Err: Display,
{
    let value = lookup(key).unwrap_or_else(|| {
        info!("{key} not set, using default: {default}");
        default.to_string()
    });
    parse(key, &value)
}

fn parse<T: FromStr>(key: &'static str, value: &str) -> Result<T, ConfigError>
where
    T::Err: Display,
{
    value.parse().map_err(|e: T::Err| ConfigError::Invalid {
        key,
        value: value.to_string(),
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn defaults_without_database() {
        let config = Config::load(lookup(&[]), false).unwrap();
        assert_eq!(config.bind, "0.0.0.0:3030".parse::<SocketAddr>().unwrap());
        assert_eq!(config.index_limit, 5);
        assert!(config.database.is_none());
    }

    #[test]
    fn database_url_required_when_enabled() {
        let err = Config::load(lookup(&[]), true).unwrap_err();
        assert!(matches!(err, ConfigError::Missing { key: "DATABASE_URL" }));

        let config = Config::load(
            lookup(&[
                ("DATABASE_URL", "postgres://localhost/polls"),
                ("DATABASE_MAX_CONNECTIONS", "12"),
            ]),
            true,
        )
        .unwrap();
        let database = config.database.unwrap();
        assert_eq!(database.url, "postgres://localhost/polls");
        assert_eq!(database.max_connections, 12);
    }

    #[test]
    fn ipv6_host_binds() {
        let config = Config::load(lookup(&[("HOST", "::"), ("PORT", "8080")]), false).unwrap();
        assert_eq!(config.bind, "[::]:8080".parse::<SocketAddr>().unwrap());

        let err = Config::load(lookup(&[("HOST", "localhost")]), false).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "HOST", .. }));
    }

    #[test]
    fn invalid_port_is_reported() {
        let err = Config::load(lookup(&[("PORT", "eighty")]), false).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "PORT", .. }));
    }
}
