// src/config.rs

use std::env;
use std::fmt;
use std::net::SocketAddr;

use dotenvy::dotenv;

/// Two weeks, the usual lifetime of a browser login session.
const DEFAULT_JWT_EXPIRATION: u64 = 60 * 60 * 24 * 14;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,
    /// Session token lifetime in seconds.
    pub jwt_expiration: u64,
    pub rust_log: String,
    pub bind_addr: SocketAddr,
    /// Marks the session cookie `Secure`; enable behind HTTPS.
    pub cookie_secure: bool,
    pub static_dir: String,
}

#[derive(Debug)]
pub enum ConfigError {
    Missing(&'static str),
    Invalid { key: &'static str, value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Missing(key) => write!(f, "{} must be set", key),
            ConfigError::Invalid { key, value } => write!(f, "{} has an invalid value: {:?}", key, value),
        }
    }
}

impl std::error::Error for ConfigError {}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv().ok();

        let database_url = env::var("DATABASE_URL")
            .unwrap_or_else(|_| "sqlite://quiz.db".to_string());

        let jwt_secret = env::var("JWT_SECRET")
            .map_err(|_| ConfigError::Missing("JWT_SECRET"))?;

        let jwt_expiration = parse_var("JWT_EXPIRATION", DEFAULT_JWT_EXPIRATION)?;

        let rust_log = env::var("RUST_LOG")
            .unwrap_or_else(|_| "info".to_string());

        let bind_addr = parse_var("BIND_ADDR", SocketAddr::from(([0, 0, 0, 0], 3000)))?;

        let cookie_secure = parse_var("COOKIE_SECURE", false)?;

        let static_dir = env::var("STATIC_DIR")
            .unwrap_or_else(|_| "static".to_string());

        Ok(Self {
            database_url,
            jwt_secret,
            jwt_expiration,
            rust_log,
            bind_addr,
            cookie_secure,
            static_dir,
        })
    }
}

fn parse_var<T: std::str::FromStr>(key: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(key) {
        Ok(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { key, value }),
        Err(_) => Ok(default),
    }
}
