//! Application configuration management.

use rust_decimal::Decimal;
use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Payroll calculation configuration.
    #[serde(default)]
    pub payroll: PayrollConfig,
    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Payroll calculation configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct PayrollConfig {
    /// Hours assumed for an hourly pay period when none are supplied.
    #[serde(default = "default_hours")]
    pub default_hours: Decimal,
    /// Contractor pay above this amount is subject to withholding.
    #[serde(default = "default_contractor_threshold")]
    pub contractor_threshold: Decimal,
    /// Withholding percentage applied above the threshold (10 means 10%).
    #[serde(default = "default_contractor_rate_percent")]
    pub contractor_rate_percent: Decimal,
}

fn default_hours() -> Decimal {
    Decimal::from(40)
}

fn default_contractor_threshold() -> Decimal {
    Decimal::from(500)
}

fn default_contractor_rate_percent() -> Decimal {
    Decimal::from(10)
}

impl Default for PayrollConfig {
    fn default() -> Self {
        Self {
            default_hours: default_hours(),
            contractor_threshold: default_contractor_threshold(),
            contractor_rate_percent: default_contractor_rate_percent(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// `tracing_subscriber::EnvFilter` directive used when `RUST_LOG` is unset.
    #[serde(default = "default_filter")]
    pub filter: String,
    /// Emit JSON log lines instead of human-readable ones.
    #[serde(default)]
    pub json: bool,
}

fn default_filter() -> String {
    "abacus=info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_filter(),
            json: false,
        }
    }
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// Sources, later ones overriding earlier ones:
    /// 1. `config/default.toml` (optional)
    /// 2. `config/{RUN_MODE}.toml` (optional, `RUN_MODE` defaults to `development`)
    /// 3. `ABACUS__*` environment variables, e.g. `ABACUS__PAYROLL__DEFAULT_HOURS=37.5`
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("ABACUS").separator("__"))
            .build()?;

        let loaded: Self = config.try_deserialize()?;
        loaded.validate()?;
        Ok(loaded)
    }

    /// Rejects values no calculation could use.
    fn validate(&self) -> Result<(), config::ConfigError> {
        let payroll = &self.payroll;
        if payroll.default_hours.is_sign_negative() {
            return Err(config::ConfigError::Message(
                "payroll.default_hours must not be negative".to_string(),
            ));
        }
        if payroll.contractor_threshold.is_sign_negative() {
            return Err(config::ConfigError::Message(
                "payroll.contractor_threshold must not be negative".to_string(),
            ));
        }
        if payroll.contractor_rate_percent.is_sign_negative()
            || payroll.contractor_rate_percent > Decimal::ONE_HUNDRED
        {
            return Err(config::ConfigError::Message(
                "payroll.contractor_rate_percent must be between 0 and 100".to_string(),
            ));
        }
        Ok(())
    }
}
