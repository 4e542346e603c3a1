use std::env;
use std::net::SocketAddr;

use anyhow::{anyhow, Context};
use simplelog::LevelFilter;

const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:3000";
const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Server settings, read from the environment once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub listen_addr: SocketAddr,
    pub max_connections: u32,
    pub log_level: LevelFilter,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let database_url = lookup("DATABASE_URL").context("$DATABASE_URL is not set")?;

        let listen_addr = lookup("LISTEN_ADDR")
            .unwrap_or_else(|| DEFAULT_LISTEN_ADDR.to_string())
            .parse::<SocketAddr>()
            .context("$LISTEN_ADDR is not a socket address")?;

        let max_connections = match lookup("DATABASE_MAX_CONNECTIONS") {
            Some(value) => value
                .parse::<u32>()
                .context("$DATABASE_MAX_CONNECTIONS is not numeric")?,
            None => DEFAULT_MAX_CONNECTIONS,
        };
        if max_connections == 0 {
            return Err(anyhow!("$DATABASE_MAX_CONNECTIONS must be at least 1"));
        }

        let log_level = match lookup("LOG_LEVEL") {
            Some(value) => value
                .parse::<LevelFilter>()
                .map_err(|_| anyhow!("$LOG_LEVEL {:?} is not a log level", value))?,
            None => LevelFilter::Debug,
        };

        Ok(Config {
            database_url,
            listen_addr,
            max_connections,
            log_level,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> anyhow::Result<Config> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[("DATABASE_URL", "mysql://chess@localhost/chess")]).unwrap();
        assert_eq!(config.database_url, "mysql://chess@localhost/chess");
        assert_eq!(config.listen_addr, "0.0.0.0:3000".parse().unwrap());
        assert_eq!(config.max_connections, 5);
        assert_eq!(config.log_level, LevelFilter::Debug);
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("DATABASE_URL", "sqlite::memory:"),
            ("LISTEN_ADDR", "127.0.0.1:8080"),
            ("DATABASE_MAX_CONNECTIONS", "12"),
            ("LOG_LEVEL", "warn"),
        ])
        .unwrap();
        assert_eq!(config.listen_addr.port(), 8080);
        assert_eq!(config.max_connections, 12);
        assert_eq!(config.log_level, LevelFilter::Warn);
    }

    #[test]
    fn test_missing_database_url() {
        assert!(config_from(&[]).is_err());
    }

    #[test]
    fn test_malformed_values() {
        let url = ("DATABASE_URL", "sqlite::memory:");
        assert!(config_from(&[url, ("LISTEN_ADDR", "nowhere")]).is_err());
        assert!(config_from(&[url, ("DATABASE_MAX_CONNECTIONS", "many")]).is_err());
        assert!(config_from(&[url, ("DATABASE_MAX_CONNECTIONS", "0")]).is_err());
        assert!(config_from(&[url, ("LOG_LEVEL", "loud")]).is_err());
    }
}
