use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 15;
const DEFAULT_RESULTS_PER_PROVIDER: u32 = 50;
const MAX_RESULTS_PER_PROVIDER: u32 = 100;

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub market: MarketConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            market: MarketConfig::from_env()?,
        })
    }
}

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|source| ConfigError::InvalidHost { source })?;

        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Adzuna authenticates with an application id/key pair sent as query parameters.
#[derive(Clone, PartialEq, Eq)]
pub struct AdzunaCredentials {
    pub app_id: String,
    pub app_key: String,
}

impl fmt::Debug for AdzunaCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdzunaCredentials")
            .field("app_id", &self.app_id)
            .field("app_key", &"<redacted>")
            .finish()
    }
}

/// Fallbacks applied when a request omits its search term or region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryDefaults {
    pub query: String,
    pub location: String,
}

impl Default for QueryDefaults {
    fn default() -> Self {
        Self {
            query: "electrician".to_string(),
            location: "UK".to_string(),
        }
    }
}

/// Provider credentials and fan-out limits for the market aggregation.
///
/// Credentials are optional on purpose: a provider without them is still
/// registered and reports itself as failed when queried.
#[derive(Clone)]
pub struct MarketConfig {
    pub adzuna: Option<AdzunaCredentials>,
    pub reed_api_key: Option<String>,
    pub fetch_timeout: Duration,
    pub results_per_provider: u32,
    pub defaults: QueryDefaults,
}

impl fmt::Debug for MarketConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MarketConfig")
            .field("adzuna", &self.adzuna)
            .field("reed_api_key", &self.reed_api_key.as_ref().map(|_| "<redacted>"))
            .field("fetch_timeout", &self.fetch_timeout)
            .field("results_per_provider", &self.results_per_provider)
            .field("defaults", &self.defaults)
            .finish()
    }
}

impl Default for MarketConfig {
    fn default() -> Self {
        Self {
            adzuna: None,
            reed_api_key: None,
            fetch_timeout: Duration::from_secs(DEFAULT_FETCH_TIMEOUT_SECS),
            results_per_provider: DEFAULT_RESULTS_PER_PROVIDER,
            defaults: QueryDefaults::default(),
        }
    }
}

impl MarketConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let adzuna = match (non_empty_var("ADZUNA_APP_ID"), non_empty_var("ADZUNA_APP_KEY")) {
            (Some(app_id), Some(app_key)) => Some(AdzunaCredentials { app_id, app_key }),
            _ => None,
        };

        let fetch_timeout = match non_empty_var("MARKET_FETCH_TIMEOUT_SECS") {
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => return Err(ConfigError::InvalidFetchTimeout),
            },
            None => Duration::from_secs(DEFAULT_FETCH_TIMEOUT_SECS),
        };

        let results_per_provider = match non_empty_var("MARKET_RESULTS_PER_PROVIDER") {
            Some(raw) => match raw.trim().parse::<u32>() {
                Ok(count) if (1..=MAX_RESULTS_PER_PROVIDER).contains(&count) => count,
                _ => return Err(ConfigError::InvalidResultsPerProvider),
            },
            None => DEFAULT_RESULTS_PER_PROVIDER,
        };

        let fallback = QueryDefaults::default();
        let defaults = QueryDefaults {
            query: non_empty_var("MARKET_DEFAULT_QUERY").unwrap_or(fallback.query),
            location: non_empty_var("MARKET_DEFAULT_LOCATION").unwrap_or(fallback.location),
        };

        Ok(Self {
            adzuna,
            reed_api_key: non_empty_var("REED_API_KEY"),
            fetch_timeout,
            results_per_provider,
            defaults,
        })
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidFetchTimeout,
    InvalidResultsPerProvider,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidFetchTimeout => {
                write!(f, "MARKET_FETCH_TIMEOUT_SECS must be a positive number of seconds")
            }
            ConfigError::InvalidResultsPerProvider => write!(
                f,
                "MARKET_RESULTS_PER_PROVIDER must be between 1 and {MAX_RESULTS_PER_PROVIDER}"
            ),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::InvalidPort
            | ConfigError::InvalidFetchTimeout
            | ConfigError::InvalidResultsPerProvider => None,
        }
    }
}
