//! `generate`: upload the given exports and print the report.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::debug;

use super::render::{self, ReportView};
use super::{output, GenerateArgs, ReportArgs};
use crate::app::{Config, Dashboard, NoDelay, SettingsManager, SimulationConfig};
use crate::domain::{FileHandle, PlatformNames, Source, SourceFiles};
use crate::error::Result;

pub async fn execute(config: &Config, args: &GenerateArgs) -> Result<()> {
    let files = SourceFiles::new(
        file_handles(&args.pos)?,
        file_handles(&args.platform_a)?,
        file_handles(&args.platform_b)?,
    );

    output::header(env!("CARGO_PKG_VERSION"));
    let dashboard = open_dashboard(config, &args.report);
    upload_all(&dashboard, &config.platforms, files).await?;
    generate_and_print(&dashboard, config, &args.report).await
}

/// Build a dashboard from config plus persisted settings.
pub(crate) fn open_dashboard(config: &Config, args: &ReportArgs) -> Dashboard {
    let settings = SettingsManager::open(config.settings_store(), config.baseline_settings());
    let current = settings.current();
    let period = args.period.unwrap_or(current.default_period);

    let mut builder = Dashboard::builder(config.engine(current)).period(period);
    builder = if args.no_delay {
        builder
            .simulation(SimulationConfig::instant())
            .delay(Arc::new(NoDelay))
    } else {
        builder.simulation(config.simulation)
    };
    if let Some(seed) = args.seed {
        builder = builder.seed(seed);
    }
    builder.build()
}

/// Upload every source's files concurrently and report each status.
async fn upload_all(
    dashboard: &Dashboard,
    names: &PlatformNames,
    files: SourceFiles,
) -> Result<()> {
    let pb = output::spinner("Processing uploads...");
    let uploads = tokio::try_join!(
        dashboard.upload(Source::Pos, files.pos),
        dashboard.upload(Source::PlatformA, files.platform_a),
        dashboard.upload(Source::PlatformB, files.platform_b),
    );
    let statuses = match uploads {
        Ok((pos, a, b)) => [(Source::Pos, pos), (Source::PlatformA, a), (Source::PlatformB, b)],
        Err(e) => {
            output::spinner_fail(&pb, "Upload failed");
            return Err(e);
        }
    };
    output::spinner_success(&pb, &format!("Uploads processed ({})", dashboard.lifecycle()));

    for (source, status) in statuses {
        output::field(names.name_of(source), status);
    }
    Ok(())
}

/// Generate a report and print it.
pub(crate) async fn generate_and_print(
    dashboard: &Dashboard,
    config: &Config,
    args: &ReportArgs,
) -> Result<()> {
    let pb = output::spinner("Generating reconciliation report...");
    let report = match dashboard.generate().await {
        Ok(report) => report,
        Err(e) => {
            output::spinner_fail(&pb, "Report generation failed");
            return Err(e);
        }
    };
    output::spinner_success(&pb, &format!("Report generated for {}", report.period_label));

    let view = ReportView {
        report: &report,
        names: dashboard.engine().names(),
        currency: &config.display.currency,
        payout_ratio: dashboard.engine().policy().payout_ratio,
    };
    render::print_report(&view, &args.sections())
}

fn file_handles(paths: &[PathBuf]) -> Result<Vec<FileHandle>> {
    paths.iter().map(|path| file_handle(path)).collect()
}

/// Handle for an existing file. Contents are not read.
fn file_handle(path: &Path) -> Result<FileHandle> {
    let metadata = std::fs::metadata(path).map_err(|e| {
        std::io::Error::new(e.kind(), format!("{}: {e}", path.display()))
    })?;
    let name = path
        .file_name()
        .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned());
    debug!(file = %name, bytes = metadata.len(), "selected upload");
    Ok(FileHandle::new(name).with_size(metadata.len()))
}
