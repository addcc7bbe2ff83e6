//! Config file loading through the public API.

use std::fs;

use cafe_recon::app::Config;
use cafe_recon::domain::ReportPeriod;
use cafe_recon::error::{ConfigError, Error};
use cafe_recon::testkit::config::write_temp_file;
use rust_decimal_macros::dec;

#[test]
fn loads_full_config_file() {
    let toml = concat!(
        "default_period = \"daily\"\n",
        "\n",
        "[logging]\n",
        "level = \"debug\"\n",
        "format = \"json\"\n",
        "\n",
        "[platforms]\n",
        "platform_a = \"Zomato\"\n",
        "platform_b = \"Swiggy\"\n",
        "\n",
        "[display]\n",
        "currency = \"Rs. \"\n",
        "\n",
        "[policy]\n",
        "variance_threshold = 4.5\n",
        "platform_a_commission = 0.18\n",
        "payout_ratio = 0.7\n",
        "\n",
        "[simulation]\n",
        "upload_delay_ms = 10\n",
        "generation_delay_ms = 20\n",
    );
    let path = write_temp_file("config.toml", toml);
    let config = Config::load(&path).unwrap();
    let _ = fs::remove_file(&path);

    assert_eq!(config.logging.format, "json");
    assert_eq!(config.display.currency, "Rs. ");
    assert_eq!(config.policy.variance_threshold, dec!(4.5));
    assert_eq!(config.policy.platform_a_commission, dec!(0.18));
    assert_eq!(config.policy.platform_b_commission, dec!(0.22));
    assert_eq!(config.policy.payout_ratio, dec!(0.7));
    assert_eq!(config.simulation.generation_delay_ms, 20);
    assert_eq!(config.default_period, ReportPeriod::Daily);
}

#[test]
fn missing_file_is_a_read_error() {
    let err = Config::load("/nonexistent/cafe-recon/config.toml").unwrap_err();
    assert!(matches!(err, Error::Config(ConfigError::ReadFile(_))));
}

#[test]
fn malformed_toml_is_a_parse_error() {
    let path = write_temp_file("broken.toml", "[policy\nvariance_threshold = 5");
    let err = Config::load(&path).unwrap_err();
    let _ = fs::remove_file(&path);
    assert!(matches!(err, Error::Config(ConfigError::Parse(_))));
}

#[test]
fn negative_commission_is_rejected() {
    let path = write_temp_file("negative.toml", "[policy]\nplatform_b_commission = -0.1\n");
    let err = Config::load(&path).unwrap_err();
    let _ = fs::remove_file(&path);

    match err {
        Error::Config(ConfigError::InvalidValue { field, .. }) => {
            assert_eq!(field, "policy.platform_b_commission");
        }
        other => panic!("expected InvalidValue, got {other:?}"),
    }
}

#[test]
fn no_path_means_defaults() {
    let config = Config::load_or_default(None).unwrap();
    assert_eq!(config.simulation.upload_delay_ms, 1500);
    assert_eq!(config.platforms.platform_b, "Swiggy");
}
