//! Miette diagnostics for errors that reach the command line.
//!
//! Each crate error maps to a diagnostic with a stable code and, where the
//! operator can do something about it, a help line. Config parse errors also
//! show the offending TOML with the failing span labeled.

use std::path::Path;

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

use super::output;
use crate::error::{ConfigError, Error, LifecycleError};

/// Configuration error pointing into the config file.
#[derive(Debug, Error, Diagnostic)]
#[error("{message}")]
#[diagnostic(code(cafe_recon::config))]
pub struct ConfigDiagnostic {
    pub message: String,

    #[source_code]
    pub src: NamedSource<String>,

    #[label("here")]
    pub span: Option<SourceSpan>,

    #[help]
    pub help: Option<String>,
}

/// Configuration error without source context.
#[derive(Debug, Error, Diagnostic)]
#[error("{message}")]
#[diagnostic(code(cafe_recon::config))]
pub struct InvalidConfig {
    pub message: String,

    #[help]
    pub help: Option<String>,
}

/// Report generation refused by the dashboard lifecycle.
#[derive(Debug, Error, Diagnostic)]
#[error("{message}")]
#[diagnostic(code(cafe_recon::lifecycle))]
pub struct LifecycleDiagnostic {
    pub message: String,

    #[help]
    pub help: Option<String>,
}

#[derive(Debug, Error, Diagnostic)]
#[error("{message}")]
#[diagnostic(
    code(cafe_recon::settings),
    help("settings still apply for this run; check the settings file location and permissions")
)]
pub struct SettingsDiagnostic {
    pub message: String,
}

#[derive(Debug, Error, Diagnostic)]
#[error("{message}")]
#[diagnostic(code(cafe_recon::io))]
pub struct IoDiagnostic {
    pub message: String,
}

/// Build the diagnostic for `err`. `config_path` is the file the config was
/// loaded from, if any.
#[must_use]
pub fn diagnose(err: &Error, config_path: Option<&Path>) -> miette::Report {
    match err {
        Error::Config(ConfigError::Parse(parse)) => match config_source(config_path) {
            Some(src) => ConfigDiagnostic {
                message: "failed to parse config".to_string(),
                span: parse.span().map(SourceSpan::from),
                src,
                help: Some(parse.message().to_string()),
            }
            .into(),
            None => InvalidConfig {
                message: err.to_string(),
                help: None,
            }
            .into(),
        },
        Error::Config(config) => InvalidConfig {
            message: config.to_string(),
            help: config_help(config),
        }
        .into(),
        Error::Lifecycle(lifecycle) => LifecycleDiagnostic {
            message: lifecycle.to_string(),
            help: lifecycle_help(lifecycle),
        }
        .into(),
        Error::Persistence(persistence) => SettingsDiagnostic {
            message: persistence.to_string(),
        }
        .into(),
        Error::Json(_) | Error::Io(_) => IoDiagnostic {
            message: err.to_string(),
        }
        .into(),
    }
}

/// Print `err` to stderr, as a diagnostic or a JSON error line.
pub fn print(err: &Error, config_path: Option<&Path>) {
    if output::is_json() {
        output::error(&err.to_string());
        return;
    }
    eprintln!("{:?}", diagnose(err, config_path));
}

fn config_source(path: Option<&Path>) -> Option<NamedSource<String>> {
    let path = path?;
    let content = std::fs::read_to_string(path).ok()?;
    Some(NamedSource::new(path.display().to_string(), content))
}

fn config_help(err: &ConfigError) -> Option<String> {
    match err {
        ConfigError::InvalidValue { field, .. } if field.starts_with("policy.") => Some(
            "rates are fractions between 0 and 1; variance_threshold is a percentage".to_string(),
        ),
        ConfigError::MissingField { .. } => {
            Some("platform names must not be blank".to_string())
        }
        ConfigError::ReadFile(_) => Some("pass --config with a readable TOML file".to_string()),
        _ => None,
    }
}

fn lifecycle_help(err: &LifecycleError) -> Option<String> {
    match err {
        LifecycleError::NoFiles => Some(
            "pass files with --pos, --platform-a or --platform-b, or try `cafe-recon demo`"
                .to_string(),
        ),
        LifecycleError::GenerationInFlight => {
            Some("wait for the running generation to finish".to_string())
        }
        LifecycleError::UploadsPending => {
            Some("generate again once every upload has finished".to_string())
        }
        LifecycleError::NotGenerating => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_files_has_help() {
        let report = diagnose(&Error::Lifecycle(LifecycleError::NoFiles), None);
        let help = report.help().map(|h| h.to_string()).unwrap_or_default();
        assert!(help.contains("--pos"));
        assert_eq!(
            report.code().map(|c| c.to_string()).as_deref(),
            Some("cafe_recon::lifecycle")
        );
    }

    #[test]
    fn invalid_rate_points_at_policy_help() {
        let err = Error::Config(ConfigError::InvalidValue {
            field: "policy.discount_rate",
            reason: "1.5 is outside 0..=1".to_string(),
        });
        let report = diagnose(&err, None);
        assert!(report.to_string().contains("policy.discount_rate"));
        assert!(report.help().is_some());
    }
}
