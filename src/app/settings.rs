//! Operator-adjustable settings layered over the configured policy.
//!
//! Settings are loaded once at startup. Saving tries the store first and
//! degrades to a session-only change when the store is unavailable.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::settings_store::SettingsStore;
use crate::domain::{ReconciliationPolicy, ReportPeriod};
use crate::error::ConfigError;

/// Persisted operator settings. Commissions are whole percentages (20 = 20%).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    pub variance_threshold: Decimal,
    pub platform_a_commission: Decimal,
    pub platform_b_commission: Decimal,
    #[serde(default)]
    pub default_period: ReportPeriod,
}

impl Settings {
    /// Settings equivalent to an unmodified `policy`.
    #[must_use]
    pub fn from_policy(policy: &ReconciliationPolicy, default_period: ReportPeriod) -> Self {
        Self {
            variance_threshold: policy.variance_threshold,
            platform_a_commission: policy.platform_a_commission * Decimal::ONE_HUNDRED,
            platform_b_commission: policy.platform_b_commission * Decimal::ONE_HUNDRED,
            default_period,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        check_percentage("variance_threshold", self.variance_threshold)?;
        check_percentage("platform_a_commission", self.platform_a_commission)?;
        check_percentage("platform_b_commission", self.platform_b_commission)?;
        Ok(())
    }

    /// Overlay the threshold and commissions onto `policy`.
    pub fn apply_to(&self, policy: &mut ReconciliationPolicy) {
        policy.variance_threshold = self.variance_threshold;
        policy.platform_a_commission = self.platform_a_commission / Decimal::ONE_HUNDRED;
        policy.platform_b_commission = self.platform_b_commission / Decimal::ONE_HUNDRED;
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self::from_policy(&ReconciliationPolicy::default(), ReportPeriod::default())
    }
}

fn check_percentage(field: &'static str, value: Decimal) -> Result<(), ConfigError> {
    if value < Decimal::ZERO || value > Decimal::ONE_HUNDRED {
        return Err(ConfigError::InvalidValue {
            field,
            reason: format!("{value} is outside 0..=100"),
        });
    }
    Ok(())
}

/// How far a settings change got.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    /// Written to the store.
    Persisted,
    /// Applied to this run only; the store rejected the write.
    SessionOnly,
}

impl SaveOutcome {
    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            Self::Persisted => "Settings saved successfully!",
            Self::SessionOnly => "Settings updated for this session.",
        }
    }
}

/// Current settings plus the store they came from.
pub struct SettingsManager {
    store: Box<dyn SettingsStore>,
    baseline: Settings,
    current: Settings,
}

impl SettingsManager {
    /// Load stored settings, falling back to `baseline` when nothing is
    /// stored or the store can't be read.
    pub fn open(store: Box<dyn SettingsStore>, baseline: Settings) -> Self {
        let current = match store.load() {
            Ok(Some(stored)) => match stored.validate() {
                Ok(()) => stored,
                Err(e) => {
                    warn!(
                        error = %e,
                        store = %store.describe(),
                        "ignoring invalid stored settings"
                    );
                    baseline.clone()
                }
            },
            Ok(None) => baseline.clone(),
            Err(e) => {
                warn!(error = %e, "settings store unreadable, using defaults");
                baseline.clone()
            }
        };

        Self {
            store,
            baseline,
            current,
        }
    }

    #[must_use]
    pub fn current(&self) -> &Settings {
        &self.current
    }

    #[must_use]
    pub fn location(&self) -> String {
        self.store.describe()
    }

    /// Validate and apply `settings`, persisting them if the store allows.
    pub fn save(&mut self, settings: Settings) -> Result<SaveOutcome, ConfigError> {
        settings.validate()?;
        let outcome = match self.store.save(&settings) {
            Ok(()) => {
                info!(store = %self.store.describe(), "settings saved");
                SaveOutcome::Persisted
            }
            Err(e) => {
                warn!(error = %e, "settings not persisted, keeping for this session");
                SaveOutcome::SessionOnly
            }
        };
        self.current = settings;
        Ok(outcome)
    }

    /// Return to the baseline and forget stored settings.
    pub fn reset(&mut self) -> SaveOutcome {
        self.current = self.baseline.clone();
        match self.store.clear() {
            Ok(()) => SaveOutcome::Persisted,
            Err(e) => {
                warn!(error = %e, "stored settings not cleared");
                SaveOutcome::SessionOnly
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::settings_store::{MemoryStore, UnavailableStore};
    use rust_decimal_macros::dec;

    fn custom() -> Settings {
        Settings {
            variance_threshold: dec!(3),
            platform_a_commission: dec!(18),
            platform_b_commission: dec!(24),
            default_period: ReportPeriod::Daily,
        }
    }

    #[test]
    fn defaults_mirror_policy() {
        let settings = Settings::default();
        assert_eq!(settings.variance_threshold, dec!(5.0));
        assert_eq!(settings.platform_a_commission, dec!(20));
        assert_eq!(settings.platform_b_commission, dec!(22));
        assert_eq!(settings.default_period, ReportPeriod::Weekly);
    }

    #[test]
    fn apply_converts_percentages_to_rates() {
        let mut policy = ReconciliationPolicy::default();
        custom().apply_to(&mut policy);
        assert_eq!(policy.variance_threshold, dec!(3));
        assert_eq!(policy.platform_a_commission, dec!(0.18));
        assert_eq!(policy.platform_b_commission, dec!(0.24));
        assert_eq!(policy.advertising_rate, dec!(0.05));
    }

    #[test]
    fn out_of_range_values_are_rejected() {
        let mut settings = custom();
        settings.platform_a_commission = dec!(101);
        assert!(matches!(
            settings.validate(),
            Err(ConfigError::InvalidValue {
                field: "platform_a_commission",
                ..
            })
        ));

        settings.platform_a_commission = dec!(20);
        settings.variance_threshold = dec!(-1);
        assert!(settings.validate().is_err());
    }

    #[test]
    fn parses_stored_json() {
        let json = r#"{"varianceThreshold":4,"platformACommission":19.5,"platformBCommission":21,"defaultPeriod":"monthly"}"#;
        let settings: Settings = serde_json::from_str(json).unwrap();
        assert_eq!(settings.platform_a_commission, dec!(19.5));
        assert_eq!(settings.default_period, ReportPeriod::Monthly);
    }

    #[test]
    fn open_prefers_stored_settings() {
        let manager =
            SettingsManager::open(Box::new(MemoryStore::with(custom())), Settings::default());
        assert_eq!(manager.current(), &custom());
    }

    #[test]
    fn save_persists_when_store_available() {
        let mut manager = SettingsManager::open(Box::new(MemoryStore::new()), Settings::default());
        assert_eq!(manager.save(custom()).unwrap(), SaveOutcome::Persisted);
        assert_eq!(manager.current(), &custom());
    }

    #[test]
    fn save_degrades_to_session_only() {
        let mut manager = SettingsManager::open(
            Box::new(UnavailableStore::new("read-only")),
            Settings::default(),
        );
        assert_eq!(manager.current(), &Settings::default());
        assert_eq!(manager.save(custom()).unwrap(), SaveOutcome::SessionOnly);
        assert_eq!(manager.current(), &custom());
    }

    #[test]
    fn invalid_save_leaves_current_untouched() {
        let mut manager = SettingsManager::open(Box::new(MemoryStore::new()), Settings::default());
        let mut bad = custom();
        bad.platform_b_commission = dec!(250);
        assert!(manager.save(bad).is_err());
        assert_eq!(manager.current(), &Settings::default());
    }

    #[test]
    fn reset_restores_baseline() {
        let mut manager =
            SettingsManager::open(Box::new(MemoryStore::with(custom())), Settings::default());
        assert_eq!(manager.reset(), SaveOutcome::Persisted);
        assert_eq!(manager.current(), &Settings::default());
    }
}
