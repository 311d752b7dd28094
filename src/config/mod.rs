use std::env;
use std::fmt;

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
    pub telemetry: TelemetryConfig,
    pub scoring: ScoringPolicy,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let zno_weight = load_weight("SCORING_ZNO_WEIGHT", ScoringPolicy::DEFAULT_ZNO_WEIGHT)?;
        let att_weight = load_weight("SCORING_ATT_WEIGHT", ScoringPolicy::DEFAULT_ATT_WEIGHT)?;

        Ok(Self {
            environment,
            telemetry: TelemetryConfig { log_level },
            scoring: ScoringPolicy {
                zno_weight,
                att_weight,
            },
        })
    }
}

fn load_weight(var: &'static str, default: f64) -> Result<f64, ConfigError> {
    let value = match env::var(var) {
        Ok(raw) => raw
            .trim()
            .parse::<f64>()
            .map_err(|_| ConfigError::InvalidWeight { var })?,
        Err(_) => default,
    };

    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(ConfigError::InvalidWeight { var })
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Global scoring coefficients: the exam-mark term and the attestation term.
/// Carried as configuration so tests and future tuning can inject values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoringPolicy {
    pub zno_weight: f64,
    pub att_weight: f64,
}

impl ScoringPolicy {
    pub const DEFAULT_ZNO_WEIGHT: f64 = 0.6;
    pub const DEFAULT_ATT_WEIGHT: f64 = 0.4;
}

impl Default for ScoringPolicy {
    fn default() -> Self {
        Self {
            zno_weight: Self::DEFAULT_ZNO_WEIGHT,
            att_weight: Self::DEFAULT_ATT_WEIGHT,
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidWeight { var: &'static str },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidWeight { var } => {
                write!(f, "{var} must be a positive finite number")
            }
        }
    }
}

impl std::error::Error for ConfigError {}
