//! `settings`: inspect and change persisted reconciliation settings.

use dialoguer::theme::ColorfulTheme;
use dialoguer::Confirm;
use serde_json::json;

use super::output::{self, Tone};
use super::{SettingsResetArgs, SettingsSetArgs};
use crate::app::{Config, SaveOutcome, Settings, SettingsManager};
use crate::error::Result;

fn open(config: &Config) -> SettingsManager {
    SettingsManager::open(config.settings_store(), config.baseline_settings())
}

pub fn show(config: &Config) -> Result<()> {
    let manager = open(config);
    print_settings(config, manager.current(), &manager.location());
    Ok(())
}

pub fn set(config: &Config, args: &SettingsSetArgs) -> Result<()> {
    let mut manager = open(config);

    let mut settings = manager.current().clone();
    if let Some(threshold) = args.variance_threshold {
        settings.variance_threshold = threshold;
    }
    if let Some(commission) = args.platform_a_commission {
        settings.platform_a_commission = commission;
    }
    if let Some(commission) = args.platform_b_commission {
        settings.platform_b_commission = commission;
    }
    if let Some(period) = args.default_period {
        settings.default_period = period;
    }

    let outcome = manager.save(settings)?;
    report_outcome(outcome);
    print_settings(config, manager.current(), &manager.location());
    Ok(())
}

pub fn reset(config: &Config, args: &SettingsResetArgs) -> Result<()> {
    if !args.yes {
        if output::is_json() {
            output::warning("refusing to reset without --yes in JSON mode");
            return Ok(());
        }
        let confirmed = Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt("Reset settings to the configured defaults?")
            .default(false)
            .interact()?;
        if !confirmed {
            output::note("Nothing changed.");
            return Ok(());
        }
    }

    let mut manager = open(config);
    let outcome = manager.reset();
    report_outcome(outcome);
    print_settings(config, manager.current(), &manager.location());
    Ok(())
}

fn report_outcome(outcome: SaveOutcome) {
    match outcome {
        SaveOutcome::Persisted => output::success(outcome.message()),
        SaveOutcome::SessionOnly => output::warning(outcome.message()),
    }
}

fn print_settings(config: &Config, settings: &Settings, location: &str) {
    if output::is_json() {
        output::event(
            "settings",
            json!({
                "settings": settings,
                "location": location,
            }),
        );
        return;
    }

    output::section("Settings");
    output::field("Variance threshold", format!("{}%", settings.variance_threshold));
    output::field(
        &format!("{} commission", config.platforms.platform_a),
        format!("{}%", settings.platform_a_commission),
    );
    output::field(
        &format!("{} commission", config.platforms.platform_b),
        format!("{}%", settings.platform_b_commission),
    );
    output::field("Default period", settings.default_period);
    output::field("Stored at", output::paint(location, Tone::Muted));
}
