//! Configuration module for the dealerships backend.
//!
//! All configuration is loaded from environment variables with sensible defaults.

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

use crate::errors::AppError;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Path to SQLite database file
    pub db_path: PathBuf,
    /// Seed file holding `{"reviews": [...]}`
    pub reviews_seed_path: PathBuf,
    /// Seed file holding `{"dealerships": [...]}`
    pub dealerships_seed_path: PathBuf,
    /// Address to bind the server to
    pub bind_addr: SocketAddr,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
    /// Emit log lines as JSON
    pub log_json: bool,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();

        let db_path = env::var("DEALERS_DB_PATH")
            .unwrap_or_else(|_| "./data/dealerships.sqlite".to_string())
            .into();

        let reviews_seed_path = env::var("DEALERS_REVIEWS_SEED")
            .unwrap_or_else(|_| "./reviews.json".to_string())
            .into();

        let dealerships_seed_path = env::var("DEALERS_DEALERSHIPS_SEED")
            .unwrap_or_else(|_| "./dealerships.json".to_string())
            .into();

        let raw_bind_addr =
            env::var("DEALERS_BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3030".to_string());
        let bind_addr = raw_bind_addr.parse().map_err(|e| {
            AppError::Config(format!(
                "Invalid DEALERS_BIND_ADDR '{}': {}",
                raw_bind_addr, e
            ))
        })?;

        let log_level = env::var("DEALERS_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let log_json = env::var("DEALERS_LOG_JSON")
            .map(|v| parse_flag(&v))
            .unwrap_or(false);

        Ok(Self {
            db_path,
            reviews_seed_path,
            dealerships_seed_path,
            bind_addr,
            log_level,
            log_json,
        })
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const VARS: [&str; 6] = [
        "DEALERS_DB_PATH",
        "DEALERS_REVIEWS_SEED",
        "DEALERS_DEALERSHIPS_SEED",
        "DEALERS_BIND_ADDR",
        "DEALERS_LOG_LEVEL",
        "DEALERS_LOG_JSON",
    ];

    // Both cases live in one test so they never race on the process environment.
    #[test]
    fn test_config_from_env() {
        for var in VARS {
            env::remove_var(var);
        }

        let config = Config::from_env().unwrap();

        assert_eq!(config.db_path, PathBuf::from("./data/dealerships.sqlite"));
        assert_eq!(config.reviews_seed_path, PathBuf::from("./reviews.json"));
        assert_eq!(
            config.dealerships_seed_path,
            PathBuf::from("./dealerships.json")
        );
        assert_eq!(config.bind_addr.to_string(), "0.0.0.0:3030");
        assert_eq!(config.log_level, "info");
        assert!(!config.log_json);

        env::set_var("DEALERS_BIND_ADDR", "not-an-address");
        let err = Config::from_env().unwrap_err();
        assert!(err.to_string().contains("DEALERS_BIND_ADDR"));

        env::remove_var("DEALERS_BIND_ADDR");
    }

    #[test]
    fn test_parse_flag() {
        assert!(parse_flag("true"));
        assert!(parse_flag(" YES "));
        assert!(parse_flag("1"));
        assert!(!parse_flag("0"));
        assert!(!parse_flag("off"));
        assert!(!parse_flag(""));
    }
}
