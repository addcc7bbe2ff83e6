use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info};

use cafe_recon::app::Config;
use cafe_recon::cli::output::{self, OutputConfig};
use cafe_recon::cli::{self, diagnostic, Cli};

#[tokio::main]
async fn main() -> ExitCode {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();
    output::configure(OutputConfig::new(cli.json, cli.quiet));

    let config_path = cli.config.as_deref();
    let config = match Config::load_or_default(config_path) {
        Ok(config) => config,
        Err(e) => {
            diagnostic::print(&e, config_path);
            return ExitCode::FAILURE;
        }
    };

    config.logging.init();
    info!(config = ?config_path, "cafe-recon starting");

    match cli::run(cli.command, &config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "command failed");
            diagnostic::print(&e, config_path);
            ExitCode::FAILURE
        }
    }
}
