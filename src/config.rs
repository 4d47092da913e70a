//! Gateway and client configuration loaded from environment variables.
//!
//! Follows 12-factor style: all settings come from environment variables
//! (or a `.env` file via `dotenvy`). Missing or unparsable values fall back
//! to the defaults documented on each field.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

/// Default external quote provider.
pub const DEFAULT_PROVIDER_URL: &str = "https://economia.awesomeapi.com.br/json/last/USD-BRL";

/// Top-level server configuration.
///
/// Loaded once at startup via [`GatewayConfig::from_env`].
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Socket address to bind the HTTP server to (default `0.0.0.0:8080`).
    pub listen_addr: SocketAddr,

    /// SQLite connection string (default `sqlite://cotacoes.db`).
    pub database_url: String,

    /// Maximum number of connections in the shared store pool.
    pub database_max_connections: u32,

    /// URL of the external quote provider.
    pub quote_provider_url: String,

    /// Attempt budget for a single quote fetch.
    pub fetch_max_attempts: u32,

    /// Deadline applied to each fetch attempt, fresh per attempt.
    pub fetch_attempt_timeout: Duration,

    /// Fixed delay between two fetch attempts.
    pub fetch_retry_delay: Duration,

    /// Deadline for a single quote insert.
    pub save_timeout: Duration,

    /// Outer safety-net timeout for a whole HTTP request.
    pub request_timeout: Duration,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            listen_addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
            database_url: "sqlite://cotacoes.db".to_string(),
            database_max_connections: 5,
            quote_provider_url: DEFAULT_PROVIDER_URL.to_string(),
            fetch_max_attempts: 3,
            fetch_attempt_timeout: Duration::from_millis(200),
            fetch_retry_delay: Duration::from_millis(50),
            save_timeout: Duration::from_millis(10),
            request_timeout: Duration::from_secs(5),
        }
    }
}

impl GatewayConfig {
    /// Loads configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv().ok()` to optionally load a `.env` file.
    ///
    /// # Errors
    ///
    /// Returns an error if `LISTEN_ADDR` is set but cannot be parsed as
    /// a [`SocketAddr`].
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        dotenvy::dotenv().ok();
        let defaults = Self::default();

        let listen_addr = match std::env::var("LISTEN_ADDR") {
            Ok(raw) => raw.parse()?,
            Err(_) => defaults.listen_addr,
        };

        Ok(Self {
            listen_addr,
            database_url: std::env::var("DATABASE_URL").unwrap_or(defaults.database_url),
            database_max_connections: parse_env(
                "DATABASE_MAX_CONNECTIONS",
                defaults.database_max_connections,
            ),
            quote_provider_url: std::env::var("QUOTE_PROVIDER_URL")
                .unwrap_or(defaults.quote_provider_url),
            fetch_max_attempts: parse_env("FETCH_MAX_ATTEMPTS", defaults.fetch_max_attempts),
            fetch_attempt_timeout: parse_env_millis(
                "FETCH_ATTEMPT_TIMEOUT_MS",
                defaults.fetch_attempt_timeout,
            ),
            fetch_retry_delay: parse_env_millis("FETCH_RETRY_DELAY_MS", defaults.fetch_retry_delay),
            save_timeout: parse_env_millis("SAVE_TIMEOUT_MS", defaults.save_timeout),
            request_timeout: Duration::from_secs(parse_env(
                "REQUEST_TIMEOUT_SECS",
                defaults.request_timeout.as_secs(),
            )),
        })
    }
}

/// Configuration of the `quote-client` process. The client takes no flags.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Endpoint serving the current quote.
    pub server_url: String,

    /// Deadline for the single request, body decoding included.
    pub timeout: Duration,

    /// File the formatted quote is written to.
    pub output_path: PathBuf,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            server_url: "http://localhost:8080/cotacao".to_string(),
            timeout: Duration::from_millis(300),
            output_path: PathBuf::from("cotacao.txt"),
        }
    }
}

impl ClientConfig {
    /// Loads the client configuration from environment variables, falling
    /// back to defaults for anything missing or invalid.
    #[must_use]
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        let defaults = Self::default();

        Self {
            server_url: std::env::var("QUOTE_SERVER_URL").unwrap_or(defaults.server_url),
            timeout: parse_env_millis("CLIENT_TIMEOUT_MS", defaults.timeout),
            output_path: std::env::var("QUOTE_OUTPUT_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.output_path),
        }
    }
}

/// Parses an environment variable as `T`, returning `default` on missing
/// or invalid values.
fn parse_env<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

/// Parses an environment variable holding a number of milliseconds.
fn parse_env_millis(key: &str, default: Duration) -> Duration {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        .map_or(default, Duration::from_millis)
}
