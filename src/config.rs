use std::env;
use std::time::Duration;

const DEFAULT_DB_HOST: &str = "localhost";
const DEFAULT_DB_PORT: u16 = 5432;
const DEFAULT_DB_USER: &str = "postgres";
const DEFAULT_DB_PASSWORD: &str = "password";
const DEFAULT_DB_NAME: &str = "leiloes";
const DEFAULT_SERVER_PORT: u16 = 3001;
const DEFAULT_POOL_MAX_CONNECTIONS: u32 = 10;
const DEFAULT_ACQUIRE_TIMEOUT_SECS: u64 = 5;

#[derive(Debug, Clone)]
pub struct Config {
    pub db_host: String,
    pub db_port: u16,
    pub db_user: String,
    pub db_password: String,
    pub db_name: String,
    pub server_port: u16,
    pub pool_max_connections: u32,
    pub acquire_timeout: Duration,
    pub log_level: String,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup. Missing or
    /// unparseable values fall back to their defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let string = |key: &str, default: &str| {
            lookup(key)
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        Config {
            db_host: string("DB_HOST", DEFAULT_DB_HOST),
            db_port: parse_or(lookup("DB_PORT"), DEFAULT_DB_PORT),
            db_user: string("DB_USER", DEFAULT_DB_USER),
            db_password: string("DB_PASSWORD", DEFAULT_DB_PASSWORD),
            db_name: string("DB_NAME", DEFAULT_DB_NAME),
            server_port: parse_or(lookup("PORT"), DEFAULT_SERVER_PORT),
            pool_max_connections: parse_or(
                lookup("DB_POOL_MAX_CONNECTIONS"),
                DEFAULT_POOL_MAX_CONNECTIONS,
            )
            .max(1),
            acquire_timeout: Duration::from_secs(parse_or(
                lookup("DB_ACQUIRE_TIMEOUT_SECS"),
                DEFAULT_ACQUIRE_TIMEOUT_SECS,
            )),
            log_level: string("RUST_LOG", "info"),
        }
    }

    pub fn database_url(&self) -> String {
        format!(
            "postgresql://{}:{}@{}:{}/{}",
            self.db_user, self.db_password, self.db_host, self.db_port, self.db_name
        )
    }
}

fn parse_or<T: std::str::FromStr>(value: Option<String>, default: T) -> T {
    value
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}
