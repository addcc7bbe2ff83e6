//! Terminal output for report runs.
//!
//! Every printer goes through one of three modes chosen from the global
//! flags. Human mode prints colored, indented text. Quiet mode keeps
//! warnings, errors and report tables. JSON mode prints one
//! `{"type": ..., "payload": ...}` object per line on stdout.

use std::fmt::Display;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use parking_lot::RwLock;
use serde_json::{json, Value};
use tabled::settings::Style;
use tabled::Table;

/// Runtime output configuration set from global CLI flags.
#[derive(Debug, Clone, Copy, Default)]
pub struct OutputConfig {
    /// Emit JSON lines instead of human-readable text.
    pub json: bool,
    /// Suppress non-essential output.
    pub quiet: bool,
}

impl OutputConfig {
    #[must_use]
    pub const fn new(json: bool, quiet: bool) -> Self {
        Self { json, quiet }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Human,
    Quiet,
    Json,
}

impl From<OutputConfig> for Mode {
    fn from(config: OutputConfig) -> Self {
        match (config.json, config.quiet) {
            (true, _) => Self::Json,
            (false, true) => Self::Quiet,
            (false, false) => Self::Human,
        }
    }
}

static MODE: RwLock<Mode> = parking_lot::const_rwlock(Mode::Human);

fn mode() -> Mode {
    *MODE.read()
}

/// Apply output settings from global CLI flags.
pub fn configure(config: OutputConfig) {
    *MODE.write() = Mode::from(config);
}

#[must_use]
pub fn is_json() -> bool {
    mode() == Mode::Json
}

/// Emit one JSON line of the given kind.
pub fn event(kind: &str, payload: Value) {
    println!("{}", json!({ "type": kind, "payload": payload }));
}

/// Route one piece of non-essential output: an event in JSON mode, `human`
/// in human mode, nothing when quiet.
fn emit(kind: &str, payload: impl FnOnce() -> Value, human: impl FnOnce()) {
    match mode() {
        Mode::Json => event(kind, payload()),
        Mode::Human => human(),
        Mode::Quiet => {}
    }
}

/// Print the application name and version.
pub fn header(version: &str) {
    emit(
        "header",
        || json!({ "app": "cafe-recon", "version": version }),
        || println!("{} {}", "cafe-recon".bold(), version.dimmed()),
    );
}

/// Print a labeled value, e.g. an upload status or a settings entry.
pub fn field(label: &str, value: impl Display) {
    let value = value.to_string();
    emit(
        "field",
        || json!({ "label": label, "value": value }),
        || println!("  {:<24} {}", label.dimmed(), value),
    );
}

pub fn success(message: &str) {
    emit(
        "success",
        || json!({ "message": message }),
        || println!("  {} {}", "✓".green(), message),
    );
}

/// Title line above a report section.
pub fn section(title: &str) {
    emit(
        "section",
        || json!({ "title": title }),
        || println!("\n{}", title.bold()),
    );
}

pub fn note(message: &str) {
    emit(
        "note",
        || json!({ "message": message }),
        || println!("  {}", message.dimmed()),
    );
}

pub fn hint(message: &str) {
    emit(
        "hint",
        || json!({ "message": message }),
        || println!("  {}: {}", "hint".cyan().dimmed(), message.dimmed()),
    );
}

/// Print a warning line. Shown even in quiet mode.
pub fn warning(message: &str) {
    if is_json() {
        event("warning", json!({ "message": message }));
    } else {
        println!("  {} {}", "⚠".yellow(), message);
    }
}

/// Print an error line on stderr.
pub fn error(message: &str) {
    if is_json() {
        eprintln!("{}", json!({ "type": "error", "payload": { "message": message } }));
    } else {
        eprintln!("  {} {}", "×".red(), message);
    }
}

/// Print a report table with rounded borders, indented under its section.
///
/// Quiet mode still prints tables; JSON mode skips them since the report
/// event carries the same data.
pub fn table(mut table: Table) {
    if is_json() {
        return;
    }

    table.with(Style::rounded());
    println!();
    for line in table.to_string().lines() {
        println!("  {line}");
    }
}

const BRAILLE_SPINNER: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Spinner shown while a simulated upload or generation delay runs.
pub fn spinner(message: &str) -> ProgressBar {
    if mode() != Mode::Human {
        let pb = ProgressBar::hidden();
        pb.set_message(message.to_string());
        return pb;
    }

    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner()
        .tick_strings(BRAILLE_SPINNER)
        .template("  {spinner:.cyan} {msg}")
    {
        pb.set_style(style);
    }
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(80));
    pb
}

pub fn spinner_success(pb: &ProgressBar, message: &str) {
    finish_spinner(pb, message, true);
}

pub fn spinner_fail(pb: &ProgressBar, message: &str) {
    finish_spinner(pb, message, false);
}

// Failures stay visible in quiet mode.
fn finish_spinner(pb: &ProgressBar, message: &str, ok: bool) {
    match mode() {
        Mode::Json => {
            event("progress", json!({ "message": message, "ok": ok }));
            pb.finish_and_clear();
        }
        Mode::Quiet if ok => pb.finish_and_clear(),
        _ if ok => pb.finish_with_message(format!("{} {}", "✓".green(), message)),
        _ => pb.finish_with_message(format!("{} {}", "×".red(), message)),
    }
}

/// Color applied to a status value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Positive,
    Caution,
    Negative,
    Highlight,
    Muted,
}

/// Color `value` for the terminal. JSON mode gets the plain text.
pub fn paint(value: impl Display, tone: Tone) -> String {
    let value = value.to_string();
    if is_json() {
        return value;
    }
    match tone {
        Tone::Positive => value.green().to_string(),
        Tone::Caution => value.yellow().to_string(),
        Tone::Negative => value.red().to_string(),
        Tone::Highlight => value.cyan().to_string(),
        Tone::Muted => value.dimmed().to_string(),
    }
}
