use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

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
    pub dataset: DatasetConfig,
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

        let source_path = PathBuf::from(
            env::var("APP_DATASET_PATH").unwrap_or_else(|_| "data/glassdoor_jobs.csv".to_string()),
        );
        let cleaned_path = PathBuf::from(
            env::var("APP_CLEANED_PATH")
                .unwrap_or_else(|_| "data/processed/jobs_cleaned.csv".to_string()),
        );
        let hourly_annual_hours = match env::var("APP_HOURLY_ANNUAL_HOURS") {
            Ok(raw) => {
                let hours = raw
                    .trim()
                    .parse::<f64>()
                    .map_err(|_| ConfigError::InvalidHourlyHours)?;
                if !hours.is_finite() || hours <= 0.0 {
                    return Err(ConfigError::InvalidHourlyHours);
                }
                Some(hours)
            }
            Err(_) => None,
        };

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            dataset: DatasetConfig {
                source_path,
                cleaned_path,
                hourly_annual_hours,
            },
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

/// Tracing and metrics controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Locations of the raw export and the cleaned output file, plus the
/// optional annual-hours factor for annualizing hourly salary text.
#[derive(Debug, Clone)]
pub struct DatasetConfig {
    pub source_path: PathBuf,
    pub cleaned_path: PathBuf,
    pub hourly_annual_hours: Option<f64>,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidHourlyHours,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidHourlyHours => {
                write!(f, "APP_HOURLY_ANNUAL_HOURS must be a positive number")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidPort => None,
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::InvalidHourlyHours => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::{Mutex, OnceLock};

    fn env_guard() -> &'static Mutex<()> {
        static GUARD: OnceLock<Mutex<()>> = OnceLock::new();
        GUARD.get_or_init(|| Mutex::new(()))
    }

    fn reset_env() {
        env::remove_var("APP_ENV");
        env::remove_var("APP_HOST");
        env::remove_var("APP_PORT");
        env::remove_var("APP_LOG_LEVEL");
        env::remove_var("APP_DATASET_PATH");
        env::remove_var("APP_CLEANED_PATH");
        env::remove_var("APP_HOURLY_ANNUAL_HOURS");
    }

    #[test]
    fn load_uses_defaults_when_env_missing() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        let config = AppConfig::load().expect("config loads with defaults");
        assert_eq!(config.environment, AppEnvironment::Development);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.telemetry.log_level, "info");
        assert_eq!(
            config.dataset.source_path,
            PathBuf::from("data/glassdoor_jobs.csv")
        );
        assert_eq!(
            config.dataset.cleaned_path,
            PathBuf::from("data/processed/jobs_cleaned.csv")
        );
        assert_eq!(config.dataset.hourly_annual_hours, None);
    }

    #[test]
    fn accepts_localhost_host() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_HOST", "localhost");
        let config = AppConfig::load().expect("config loads");
        let addr = config.server.socket_addr().expect("localhost resolves");
        assert_eq!(addr, SocketAddr::new(IpAddr::from([127, 0, 0, 1]), 3000));
    }

    #[test]
    fn hourly_hours_parse_when_present() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_HOURLY_ANNUAL_HOURS", "2080");
        let config = AppConfig::load().expect("config loads");
        assert_eq!(config.dataset.hourly_annual_hours, Some(2080.0));
    }

    #[test]
    fn invalid_hourly_hours_are_rejected() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_HOURLY_ANNUAL_HOURS", "forty");
        assert!(matches!(
            AppConfig::load(),
            Err(ConfigError::InvalidHourlyHours)
        ));

        env::set_var("APP_HOURLY_ANNUAL_HOURS", "-10");
        assert!(matches!(
            AppConfig::load(),
            Err(ConfigError::InvalidHourlyHours)
        ));
        reset_env();
    }
}
