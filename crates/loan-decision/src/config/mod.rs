use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::str::FromStr;

use crate::decision::DecisionLimits;

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
    pub decision: DecisionConfig,
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
            decision: DecisionConfig::from_env()?,
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

/// Platform limits and the client dataset location.
#[derive(Debug, Clone)]
pub struct DecisionConfig {
    pub limits: DecisionLimits,
    /// Falls back to the bundled dataset when unset.
    pub client_data_path: Option<PathBuf>,
}

impl DecisionConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let defaults = DecisionLimits::default();

        let limits = DecisionLimits {
            minimum_loan_amount: env_or("LOAN_MIN_AMOUNT", defaults.minimum_loan_amount)?,
            maximum_loan_amount: env_or("LOAN_MAX_AMOUNT", defaults.maximum_loan_amount)?,
            minimum_loan_period: env_or("LOAN_MIN_PERIOD", defaults.minimum_loan_period)?,
            maximum_loan_period: env_or("LOAN_MAX_PERIOD", defaults.maximum_loan_period)?,
            minimum_age: env_or("APPLICANT_MIN_AGE", defaults.minimum_age)?,
            expected_lifetime_years: env_or(
                "APPLICANT_EXPECTED_LIFETIME_YEARS",
                defaults.expected_lifetime_years,
            )?,
            maximum_loan_period_years: env_or(
                "LOAN_MAX_PERIOD_YEARS",
                defaults.maximum_loan_period_years,
            )?,
            minimum_loan_period_years: env_or(
                "LOAN_MIN_PERIOD_YEARS",
                defaults.minimum_loan_period_years,
            )?,
        };
        limits.check().map_err(ConfigError::InvalidLimits)?;

        let client_data_path = env::var("CLIENT_DATA_PATH")
            .ok()
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .map(PathBuf::from);

        Ok(Self {
            limits,
            client_data_path,
        })
    }
}

fn env_or<T: FromStr>(key: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|_| ConfigError::InvalidNumber { key }),
        Err(_) => Ok(default),
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidNumber { key: &'static str },
    InvalidLimits(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidNumber { key } => {
                write!(f, "{key} must be a non-negative integer")
            }
            ConfigError::InvalidLimits(detail) => write!(f, "inconsistent loan limits: {detail}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::InvalidPort
            | ConfigError::InvalidNumber { .. }
            | ConfigError::InvalidLimits(_) => None,
        }
    }
}
