use log::*;

use std::env;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/**
 * Runtime configuration, read once at startup and handed to whoever needs it
 */
#[derive(Clone)]
pub struct Config {
    /**
     * Display labels for the two ballot options, never enforced on votes
     */
    pub option_a: String,
    pub option_b: String,
    pub pg_host: String,
    pub pg_port: u16,
    pub pg_database: String,
    pub pg_user: String,
    pub pg_password: String,
    /**
     * Number of connection attempts the schema initializer makes before giving up
     */
    pub init_retries: u32,
    pub init_delay: Duration,
    pub max_connections: u32,
    pub listen_addr: String,
}

impl Config {
    /**
     * Load the configuration from the process environment. A `.env` file, if
     * any, has to be loaded by the caller beforehand
     */
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /**
     * Build the configuration from an arbitrary key lookup
     */
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let string = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        Config {
            option_a: string("OPTION_A", "Cats"),
            option_b: string("OPTION_B", "Dogs"),
            pg_host: string("PGHOST", "postgres"),
            pg_port: parsed(&lookup, "PGPORT", 5432),
            pg_database: string("PGDATABASE", "postgres"),
            pg_user: string("PGUSER", "postgres"),
            pg_password: string("PGPASSWORD", "postgres"),
            init_retries: parsed(&lookup, "DB_INIT_RETRIES", 10),
            init_delay: Duration::from_secs(parsed(&lookup, "DB_INIT_DELAY_SECS", 3)),
            max_connections: positive(parsed(&lookup, "DB_MAX_CONNECTIONS", 5), "DB_MAX_CONNECTIONS", 5),
            listen_addr: string("LISTEN_ADDR", "0.0.0.0:8080"),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

/*
 * Hand-written so the password never ends up in a log line
 */
impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("option_a", &self.option_a)
            .field("option_b", &self.option_b)
            .field("pg_host", &self.pg_host)
            .field("pg_port", &self.pg_port)
            .field("pg_database", &self.pg_database)
            .field("pg_user", &self.pg_user)
            .field("pg_password", &"<redacted>")
            .field("init_retries", &self.init_retries)
            .field("init_delay", &self.init_delay)
            .field("max_connections", &self.max_connections)
            .field("listen_addr", &self.listen_addr)
            .finish()
    }
}

fn parsed<F, T>(lookup: &F, key: &str, default: T) -> T
where
    F: Fn(&str) -> Option<String>,
    T: FromStr + fmt::Display,
{
    match lookup(key) {
        None => default,
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!("Ignoring unparsable {}={:?}, using {}", key, raw, default);
            default
        }),
    }
}

fn positive(value: u32, key: &str, default: u32) -> u32 {
    if value == 0 {
        warn!("{} must be at least 1, using {}", key, default);
        default
    } else {
        value
    }
}
