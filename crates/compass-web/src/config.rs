//! Configuration loaded from environment variables.

use std::env;
use std::net::SocketAddr;

const DEFAULT_ADDR: &str = "127.0.0.1:3000";
const DEFAULT_DATABASE_URL: &str = "sqlite:compass.db?mode=rwc";

/// COMPASS web server configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Server bind address.
    pub addr: SocketAddr,
    /// SQLite database URL.
    pub database_url: String,
    /// Upsert the built-in course catalogue on start.
    pub seed_courses: bool,
    /// Rate for estimated generator cost in usage stats.
    pub cost_per_1k_tokens: f64,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// | Variable | Description | Default |
    /// |----------|-------------|---------|
    /// | `COMPASS_ADDR` | Server bind address | `127.0.0.1:3000` |
    /// | `SQLITE_PATH` | SQLite database URL | `sqlite:compass.db?mode=rwc` |
    /// | `COMPASS_SEED_COURSES` | Seed the course catalogue | `true` |
    /// | `COMPASS_COST_PER_1K_TOKENS` | Estimated cost per 1000 tokens | `0.0` |
    ///
    /// Generator settings are read separately by `OllamaConfig::from_env`.
    pub fn from_env() -> Result<Self, ConfigError> {
        let addr = env::var("COMPASS_ADDR")
            .unwrap_or_else(|_| DEFAULT_ADDR.to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidAddr)?;

        let database_url =
            env::var("SQLITE_PATH").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string());

        let seed_courses = match env::var("COMPASS_SEED_COURSES") {
            Ok(value) => parse_bool(&value).ok_or(ConfigError::Invalid {
                var: "COMPASS_SEED_COURSES",
                value,
            })?,
            Err(_) => true,
        };

        let cost_per_1k_tokens = match env::var("COMPASS_COST_PER_1K_TOKENS") {
            Ok(value) => match value.trim().parse::<f64>() {
                Ok(cost) if cost >= 0.0 && cost.is_finite() => cost,
                _ => {
                    return Err(ConfigError::Invalid {
                        var: "COMPASS_COST_PER_1K_TOKENS",
                        value,
                    })
                }
            },
            Err(_) => 0.0,
        };

        Ok(Self {
            addr,
            database_url,
            seed_courses,
            cost_per_1k_tokens,
        })
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid COMPASS_ADDR format")]
    InvalidAddr,

    #[error("Invalid value for {var}: {value}")]
    Invalid { var: &'static str, value: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    static ENV_LOCK: Mutex<()> = Mutex::new(());

    fn clear_vars() {
        env::remove_var("COMPASS_ADDR");
        env::remove_var("SQLITE_PATH");
        env::remove_var("COMPASS_SEED_COURSES");
        env::remove_var("COMPASS_COST_PER_1K_TOKENS");
    }

    #[test]
    fn test_from_env() {
        let _guard = ENV_LOCK.lock().unwrap();

        // Defaults
        clear_vars();
        let config = Config::from_env().unwrap();
        assert_eq!(config.addr, "127.0.0.1:3000".parse().unwrap());
        assert_eq!(config.database_url, DEFAULT_DATABASE_URL);
        assert!(config.seed_courses);
        assert_eq!(config.cost_per_1k_tokens, 0.0);

        // Overrides
        env::set_var("COMPASS_ADDR", "0.0.0.0:8080");
        env::set_var("SQLITE_PATH", "sqlite::memory:");
        env::set_var("COMPASS_SEED_COURSES", "off");
        env::set_var("COMPASS_COST_PER_1K_TOKENS", "0.002");
        let config = Config::from_env().unwrap();
        assert_eq!(config.addr.port(), 8080);
        assert_eq!(config.database_url, "sqlite::memory:");
        assert!(!config.seed_courses);
        assert_eq!(config.cost_per_1k_tokens, 0.002);

        // Invalid values
        env::set_var("COMPASS_COST_PER_1K_TOKENS", "-1");
        assert!(matches!(
            Config::from_env(),
            Err(ConfigError::Invalid { var: "COMPASS_COST_PER_1K_TOKENS", .. })
        ));
        env::remove_var("COMPASS_COST_PER_1K_TOKENS");

        env::set_var("COMPASS_SEED_COURSES", "maybe");
        assert!(Config::from_env().is_err());
        env::remove_var("COMPASS_SEED_COURSES");

        env::set_var("COMPASS_ADDR", "not an addr");
        assert!(matches!(Config::from_env(), Err(ConfigError::InvalidAddr)));

        clear_vars();
    }
}
