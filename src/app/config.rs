//! Application configuration loading and validation.
//!
//! Every section of the TOML file is optional; a missing file section falls
//! back to its defaults. Persisted operator settings are layered on top of
//! the `[policy]` section at startup.

use std::path::{Path, PathBuf};
use std::time::Duration;

use rust_decimal::Decimal;
use serde::Deserialize;
use tracing_subscriber::{fmt, EnvFilter};

use super::settings::Settings;
use super::settings_store::{JsonFileStore, SettingsStore, UnavailableStore};
use crate::domain::{PlatformNames, ReconciliationEngine, ReconciliationPolicy, ReportPeriod};
use crate::error::{ConfigError, Result};

/// Directory under the platform config dir that holds the settings file.
const APP_DIR: &str = "cafe-recon";
const SETTINGS_FILE: &str = "settings.json";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub platforms: PlatformNames,
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub policy: ReconciliationPolicy,
    #[serde(default)]
    pub simulation: SimulationConfig,
    /// Period preselected when no settings are stored.
    #[serde(default)]
    pub default_period: ReportPeriod,
    /// Where operator settings persist. Defaults to the user config dir.
    #[serde(default)]
    pub settings_path: Option<PathBuf>,
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        Self::parse(&content)
    }

    /// Parse and validate TOML text.
    pub fn parse(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    /// Load `path` if given, otherwise use defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    fn validate(&self) -> Result<()> {
        if self.platforms.platform_a.trim().is_empty() {
            return Err(ConfigError::MissingField {
                field: "platforms.platform_a",
            }
            .into());
        }
        if self.platforms.platform_b.trim().is_empty() {
            return Err(ConfigError::MissingField {
                field: "platforms.platform_b",
            }
            .into());
        }

        let policy = &self.policy;
        let threshold = policy.variance_threshold;
        if threshold < Decimal::ZERO || threshold > Decimal::ONE_HUNDRED {
            return Err(ConfigError::InvalidValue {
                field: "policy.variance_threshold",
                reason: format!("{threshold} is outside 0..=100"),
            }
            .into());
        }

        let rates = [
            ("policy.platform_a_commission", policy.platform_a_commission),
            ("policy.platform_b_commission", policy.platform_b_commission),
            ("policy.advertising_rate", policy.advertising_rate),
            ("policy.discount_rate", policy.discount_rate),
            ("policy.rejection_share", policy.rejection_share),
            ("policy.payout_ratio", policy.payout_ratio),
        ];
        for (field, rate) in rates {
            if rate < Decimal::ZERO || rate > Decimal::ONE {
                return Err(ConfigError::InvalidValue {
                    field,
                    reason: format!("{rate} is outside 0..=1"),
                }
                .into());
            }
        }
        Ok(())
    }

    /// Settings implied by this config alone.
    #[must_use]
    pub fn baseline_settings(&self) -> Settings {
        Settings::from_policy(&self.policy, self.default_period)
    }

    /// The configured settings store, or an unavailable one when no config
    /// directory can be determined.
    #[must_use]
    pub fn settings_store(&self) -> Box<dyn SettingsStore> {
        let path = self
            .settings_path
            .clone()
            .or_else(|| dirs::config_dir().map(|dir| dir.join(APP_DIR).join(SETTINGS_FILE)));
        match path {
            Some(path) => Box::new(JsonFileStore::new(path)),
            None => Box::new(UnavailableStore::new("no config directory on this platform")),
        }
    }

    /// Engine for this config with `settings` overlaid on the policy.
    #[must_use]
    pub fn engine(&self, settings: &Settings) -> ReconciliationEngine {
        let mut policy = self.policy.clone();
        settings.apply_to(&mut policy);
        ReconciliationEngine::new(policy, self.platforms.clone())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            logging: LoggingConfig::default(),
            platforms: PlatformNames::default(),
            display: DisplayConfig::default(),
            policy: ReconciliationPolicy::default(),
            simulation: SimulationConfig::default(),
            default_period: ReportPeriod::default(),
            settings_path: None,
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "warn".into()
}

fn default_log_format() -> String {
    "pretty".into()
}

impl LoggingConfig {
    /// Initialize the tracing subscriber. Logs go to stderr so stdout stays
    /// parseable in `--json` mode.
    pub fn init(&self) {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&self.level));

        match self.format.as_str() {
            "json" => {
                fmt()
                    .json()
                    .with_env_filter(filter)
                    .with_writer(std::io::stderr)
                    .init();
            }
            _ => {
                fmt()
                    .with_env_filter(filter)
                    .with_writer(std::io::stderr)
                    .init();
            }
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

/// How amounts are rendered.
#[derive(Debug, Clone, Deserialize)]
pub struct DisplayConfig {
    #[serde(default = "default_currency")]
    pub currency: String,
}

fn default_currency() -> String {
    "₹".into()
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            currency: default_currency(),
        }
    }
}

/// Simulated processing latency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct SimulationConfig {
    #[serde(default = "default_upload_delay_ms")]
    pub upload_delay_ms: u64,
    #[serde(default = "default_generation_delay_ms")]
    pub generation_delay_ms: u64,
}

const fn default_upload_delay_ms() -> u64 {
    1500
}

const fn default_generation_delay_ms() -> u64 {
    2000
}

impl SimulationConfig {
    /// No simulated latency at all.
    #[must_use]
    pub const fn instant() -> Self {
        Self {
            upload_delay_ms: 0,
            generation_delay_ms: 0,
        }
    }

    #[must_use]
    pub fn upload_delay(&self) -> Duration {
        Duration::from_millis(self.upload_delay_ms)
    }

    #[must_use]
    pub fn generation_delay(&self) -> Duration {
        Duration::from_millis(self.generation_delay_ms)
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            upload_delay_ms: default_upload_delay_ms(),
            generation_delay_ms: default_generation_delay_ms(),
        }
    }
}
