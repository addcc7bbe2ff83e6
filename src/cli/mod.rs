//! Command-line interface definitions.

pub mod demo;
pub mod diagnostic;
pub mod generate;
pub mod output;
pub mod render;
pub mod settings;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use rust_decimal::Decimal;

use crate::app::Config;
use crate::domain::ReportPeriod;
use crate::error::Result;

/// Cafe delivery reconciliation: POS versus delivery platform reports.
#[derive(Parser, Debug)]
#[command(name = "cafe-recon")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Emit JSON lines instead of human-readable output
    #[arg(long, global = true)]
    pub json: bool,

    /// Only print warnings, errors and the report
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to a TOML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Reconcile uploaded POS and platform exports into a report
    Generate(GenerateArgs),

    /// Generate a report from the bundled demo upload set
    Demo(ReportArgs),

    /// Show or change persisted reconciliation settings
    #[command(subcommand)]
    Settings(SettingsCommand),
}

/// Arguments for the `generate` subcommand.
#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// POS export file (repeatable)
    #[arg(long = "pos", value_name = "FILE")]
    pub pos: Vec<PathBuf>,

    /// First delivery platform export file (repeatable)
    #[arg(long = "platform-a", value_name = "FILE")]
    pub platform_a: Vec<PathBuf>,

    /// Second delivery platform export file (repeatable)
    #[arg(long = "platform-b", value_name = "FILE")]
    pub platform_b: Vec<PathBuf>,

    #[command(flatten)]
    pub report: ReportArgs,
}

/// Options shared by every command that produces a report.
#[derive(Args, Debug, Clone)]
pub struct ReportArgs {
    /// Reporting period (daily, weekly, monthly); defaults to the saved setting
    #[arg(short, long)]
    pub period: Option<ReportPeriod>,

    /// Seed for reproducible figures
    #[arg(long)]
    pub seed: Option<u64>,

    /// Skip the simulated processing delays
    #[arg(long)]
    pub no_delay: bool,

    /// Sections to print (repeatable); all when omitted
    #[arg(long = "section", value_enum)]
    pub sections: Vec<Section>,
}

impl ReportArgs {
    /// Requested sections, or every section.
    #[must_use]
    pub fn sections(&self) -> Vec<Section> {
        if self.sections.is_empty() {
            Section::value_variants().to_vec()
        } else {
            self.sections.clone()
        }
    }
}

/// Report sections in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Section {
    Overview,
    Executive,
    Platforms,
    Financial,
    Variance,
    Daily,
}

/// Subcommands for `cafe-recon settings`
#[derive(Subcommand, Debug)]
pub enum SettingsCommand {
    /// Print the current settings and where they are stored
    Show,
    /// Change one or more settings
    Set(SettingsSetArgs),
    /// Restore the configured defaults
    Reset(SettingsResetArgs),
}

/// Arguments for `settings set`. Commissions are percentages (20 = 20%).
#[derive(Args, Debug)]
pub struct SettingsSetArgs {
    /// Maximum revenue variance percentage that still passes
    #[arg(long)]
    pub variance_threshold: Option<Decimal>,

    /// First platform's commission percentage
    #[arg(long)]
    pub platform_a_commission: Option<Decimal>,

    /// Second platform's commission percentage
    #[arg(long)]
    pub platform_b_commission: Option<Decimal>,

    /// Period preselected for new reports
    #[arg(long)]
    pub default_period: Option<ReportPeriod>,
}

#[derive(Args, Debug)]
pub struct SettingsResetArgs {
    /// Skip the confirmation prompt
    #[arg(short, long)]
    pub yes: bool,
}

/// Dispatch a parsed command.
pub async fn run(command: Commands, config: &Config) -> Result<()> {
    match command {
        Commands::Generate(args) => generate::execute(config, &args).await,
        Commands::Demo(args) => demo::execute(config, &args).await,
        Commands::Settings(SettingsCommand::Show) => settings::show(config),
        Commands::Settings(SettingsCommand::Set(args)) => settings::set(config, &args),
        Commands::Settings(SettingsCommand::Reset(args)) => settings::reset(config, &args),
    }
}
