//! Async facade tying uploads, ingestion and the engine to [`AppState`].

use std::sync::Arc;

use chrono::Local;
use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{info, warn};

use super::config::SimulationConfig;
use super::delay::{Delay, TokioDelay};
use super::ingest::{ingest_all, Ingestor, PlaceholderIngestor};
use super::state::{AppState, LifecycleState, UploadTicket};
use crate::domain::{
    FileHandle, ReconciliationEngine, Report, ReportPeriod, Source, SourceFiles,
};
use crate::error::Result;

/// Longest file-name listing shown in an upload status before truncation.
const STATUS_NAMES_MAX: usize = 40;

/// Owns the dashboard state and serializes report generation.
///
/// Locks are never held across an `.await`; each simulated delay runs with
/// the state unlocked.
pub struct Dashboard {
    state: Mutex<AppState>,
    engine: ReconciliationEngine,
    ingestor: Mutex<Box<dyn Ingestor>>,
    series_rng: Mutex<StdRng>,
    delay: Arc<dyn Delay>,
    simulation: SimulationConfig,
}

impl Dashboard {
    /// Dashboard with real delays and non-deterministic figures.
    #[must_use]
    pub fn new(engine: ReconciliationEngine, simulation: SimulationConfig) -> Self {
        Self::builder(engine).simulation(simulation).build()
    }

    pub fn builder(engine: ReconciliationEngine) -> DashboardBuilder {
        DashboardBuilder::new(engine)
    }

    #[must_use]
    pub fn lifecycle(&self) -> LifecycleState {
        self.state.lock().lifecycle()
    }

    #[must_use]
    pub fn period(&self) -> ReportPeriod {
        self.state.lock().period()
    }

    #[must_use]
    pub fn engine(&self) -> &ReconciliationEngine {
        &self.engine
    }

    /// The current report; read-only for presentation.
    #[must_use]
    pub fn report(&self) -> Option<Arc<Report>> {
        self.state.lock().report()
    }

    pub fn set_period(&self, period: ReportPeriod) {
        self.state.lock().set_period(period);
    }

    /// Upload files for one source after the simulated processing delay.
    ///
    /// An empty file list is ignored, matching a cancelled file picker. Files
    /// of an upload overtaken by `clear_files` or `reset` are dropped.
    pub async fn upload(&self, source: Source, files: Vec<FileHandle>) -> Result<String> {
        if files.is_empty() {
            return Ok(self.upload_status(source));
        }

        let ticket = self.state.lock().begin_upload(source)?;
        let guard = UploadGuard::new(&self.state, ticket);
        info!(%source, files = files.len(), "processing upload");

        self.delay.wait(self.simulation.upload_delay()).await;

        guard.disarm();
        if !self.state.lock().complete_upload(ticket, files) {
            warn!(%source, "upload finished after the files were cleared");
        }
        Ok(self.upload_status(source))
    }

    /// Replace every source's files with the bundled demo upload set.
    pub fn load_demo(&self) -> Result<()> {
        self.state.lock().load_files(demo_files())?;
        info!("demo files loaded");
        Ok(())
    }

    /// Replace every source's files without a simulated delay.
    pub fn load_files(&self, files: SourceFiles) -> Result<()> {
        self.state.lock().load_files(files)?;
        Ok(())
    }

    pub fn clear_files(&self) -> Result<()> {
        self.state.lock().clear_files()?;
        Ok(())
    }

    /// Back to an empty dashboard with `period` selected.
    pub fn reset(&self, period: ReportPeriod) -> Result<()> {
        self.state.lock().reset(period)?;
        Ok(())
    }

    /// Generate a report from the current uploads.
    ///
    /// Rejects the request with `NoFiles` when nothing was uploaded, with
    /// `UploadsPending` while an upload is processing and with
    /// `GenerationInFlight` while another generation runs. Each source is
    /// ingested exactly once; the previous report is replaced only on success.
    pub async fn generate(&self) -> Result<Arc<Report>> {
        let ticket = self.state.lock().begin_generation()?;
        let guard = GenerationGuard::new(&self.state);
        info!(period = %ticket.period, files = ticket.files.file_count(), "generating report");

        self.delay.wait(self.simulation.generation_delay()).await;

        let aggregates = {
            let mut ingestor = self.ingestor.lock();
            ingest_all(ingestor.as_mut(), &ticket.files)
        };
        let report = {
            let mut rng = self.series_rng.lock();
            self.engine
                .generate(&aggregates, ticket.period, Local::now(), &mut *rng)
        };

        let report = self.state.lock().complete_generation(report)?;
        guard.disarm();

        info!(
            report_id = %report.id,
            status = %report.summary.status,
            variance_pct = %report.summary.variance_percentage.round_dp(2),
            "report generated"
        );
        Ok(report)
    }

    /// Operator-facing description of a source's uploaded files.
    #[must_use]
    pub fn upload_status(&self, source: Source) -> String {
        let state = self.state.lock();
        describe_files(state.files_for(source))
    }
}

/// Returns the dashboard to an idle state if a generation future is dropped
/// before it completes.
struct GenerationGuard<'a> {
    state: &'a Mutex<AppState>,
    armed: bool,
}

impl<'a> GenerationGuard<'a> {
    fn new(state: &'a Mutex<AppState>) -> Self {
        Self { state, armed: true }
    }

    fn disarm(mut self) {
        self.armed = false;
    }
}

impl Drop for GenerationGuard<'_> {
    fn drop(&mut self) {
        if self.armed {
            warn!("report generation abandoned before completion");
            self.state.lock().fail_generation();
        }
    }
}

/// Settles an upload whose future is dropped during its delay.
struct UploadGuard<'a> {
    state: &'a Mutex<AppState>,
    ticket: UploadTicket,
    armed: bool,
}

impl<'a> UploadGuard<'a> {
    fn new(state: &'a Mutex<AppState>, ticket: UploadTicket) -> Self {
        Self {
            state,
            ticket,
            armed: true,
        }
    }

    fn disarm(mut self) {
        self.armed = false;
    }
}

impl Drop for UploadGuard<'_> {
    fn drop(&mut self) {
        if self.armed {
            warn!(source = %self.ticket.source, "upload abandoned before completion");
            self.state.lock().abandon_upload(self.ticket);
        }
    }
}

/// Builder for [`Dashboard`] so tests can inject delays and seeds.
pub struct DashboardBuilder {
    engine: ReconciliationEngine,
    simulation: SimulationConfig,
    delay: Arc<dyn Delay>,
    ingestor: Option<Box<dyn Ingestor>>,
    seed: Option<u64>,
    period: ReportPeriod,
}

impl DashboardBuilder {
    fn new(engine: ReconciliationEngine) -> Self {
        Self {
            engine,
            simulation: SimulationConfig::default(),
            delay: Arc::new(TokioDelay),
            ingestor: None,
            seed: None,
            period: ReportPeriod::default(),
        }
    }

    #[must_use]
    pub fn simulation(mut self, simulation: SimulationConfig) -> Self {
        self.simulation = simulation;
        self
    }

    #[must_use]
    pub fn delay(mut self, delay: Arc<dyn Delay>) -> Self {
        self.delay = delay;
        self
    }

    #[must_use]
    pub fn ingestor(mut self, ingestor: Box<dyn Ingestor>) -> Self {
        self.ingestor = Some(ingestor);
        self
    }

    /// Make ingestion and the daily series reproducible.
    #[must_use]
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    #[must_use]
    pub fn period(mut self, period: ReportPeriod) -> Self {
        self.period = period;
        self
    }

    #[must_use]
    pub fn build(self) -> Dashboard {
        let seed = self.seed;
        let ingestor: Box<dyn Ingestor> = match self.ingestor {
            Some(ingestor) => ingestor,
            None => match seed {
                Some(seed) => Box::new(PlaceholderIngestor::seeded(seed)),
                None => Box::new(PlaceholderIngestor::from_entropy()),
            },
        };
        // Offset so the series does not replay the ingestion draws.
        let series_rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(1)),
            None => StdRng::from_entropy(),
        };

        Dashboard {
            state: Mutex::new(AppState::new(self.period)),
            engine: self.engine,
            ingestor: Mutex::new(ingestor),
            series_rng: Mutex::new(series_rng),
            delay: self.delay,
            simulation: self.simulation,
        }
    }
}

/// The sample upload set used by `demo`.
#[must_use]
pub fn demo_files() -> SourceFiles {
    SourceFiles::new(
        vec![FileHandle::new("demo_pos_data.xlsx").with_size(15_420)],
        vec![
            FileHandle::new("demo_zomato_orders.csv").with_size(8_730),
            FileHandle::new("demo_zomato_business.csv").with_size(5_420),
        ],
        vec![FileHandle::new("demo_swiggy_metrics.xlsx").with_size(12_650)],
    )
}

/// "No files selected", or "N file(s): a, b" with the names cut at 40
/// characters.
#[must_use]
pub fn describe_files(files: &[FileHandle]) -> String {
    if files.is_empty() {
        return "No files selected".to_string();
    }

    let names = files
        .iter()
        .map(FileHandle::name)
        .collect::<Vec<_>>()
        .join(", ");
    let shown = if names.chars().count() > STATUS_NAMES_MAX {
        format!("{}...", names.chars().take(STATUS_NAMES_MAX).collect::<String>())
    } else {
        names
    };
    format!("{} file(s): {shown}", files.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::delay::NoDelay;
    use crate::error::{Error, LifecycleError};

    fn dashboard() -> Dashboard {
        Dashboard::builder(ReconciliationEngine::default())
            .delay(Arc::new(NoDelay))
            .seed(11)
            .build()
    }

    #[test]
    fn describe_files_truncates_long_listings() {
        assert_eq!(describe_files(&[]), "No files selected");
        assert_eq!(describe_files(&[FileHandle::new("a.csv")]), "1 file(s): a.csv");

        assert_eq!(demo_files().pos[0].size_bytes(), Some(15_420));

        let long = demo_files().platform_a;
        let status = describe_files(&long);
        assert!(status.starts_with("2 file(s): demo_zomato_orders.csv, demo_zomato_"));
        assert!(status.ends_with("..."));
    }

    #[tokio::test]
    async fn generate_without_files_is_rejected() {
        let dashboard = dashboard();
        let err = dashboard.generate().await.unwrap_err();
        assert!(matches!(err, Error::Lifecycle(LifecycleError::NoFiles)));
        assert_eq!(dashboard.lifecycle(), LifecycleState::Empty);
        assert!(dashboard.report().is_none());
    }

    #[tokio::test]
    async fn upload_then_generate() {
        let dashboard = dashboard();
        let status = dashboard
            .upload(Source::Pos, vec![FileHandle::new("pos.xlsx")])
            .await
            .unwrap();
        assert_eq!(status, "1 file(s): pos.xlsx");
        assert_eq!(dashboard.lifecycle(), LifecycleState::Ready);

        let report = dashboard.generate().await.unwrap();
        assert_eq!(dashboard.lifecycle(), LifecycleState::Generated);
        assert!(report.sources.pos.available);
        assert!(!report.sources.platform_a.available);
    }

    #[tokio::test]
    async fn empty_upload_is_ignored() {
        let dashboard = dashboard();
        let status = dashboard.upload(Source::PlatformA, Vec::new()).await.unwrap();
        assert_eq!(status, "No files selected");
        assert_eq!(dashboard.lifecycle(), LifecycleState::Empty);
    }

    #[tokio::test(start_paused = true)]
    async fn clearing_during_upload_drops_its_files() {
        let dashboard = Arc::new(
            Dashboard::builder(ReconciliationEngine::default())
                .seed(5)
                .build(),
        );

        let uploading = Arc::clone(&dashboard);
        let upload = tokio::spawn(async move {
            uploading
                .upload(Source::Pos, vec![FileHandle::new("pos.xlsx")])
                .await
        });
        tokio::time::sleep(std::time::Duration::from_millis(10)).await;
        assert_eq!(dashboard.lifecycle(), LifecycleState::Uploading);

        dashboard.clear_files().unwrap();
        let status = upload.await.unwrap().unwrap();

        assert_eq!(status, "No files selected");
        assert_eq!(dashboard.lifecycle(), LifecycleState::Empty);
        let err = dashboard.generate().await.unwrap_err();
        assert!(matches!(err, Error::Lifecycle(LifecycleError::NoFiles)));
    }

    #[tokio::test(start_paused = true)]
    async fn generate_waits_for_uploads_in_flight() {
        let dashboard = Arc::new(
            Dashboard::builder(ReconciliationEngine::default())
                .seed(8)
                .build(),
        );
        dashboard.load_demo().unwrap();

        let uploading = Arc::clone(&dashboard);
        let upload = tokio::spawn(async move {
            uploading
                .upload(Source::PlatformB, vec![FileHandle::new("late.csv")])
                .await
        });
        tokio::time::sleep(std::time::Duration::from_millis(10)).await;

        let err = dashboard.generate().await.unwrap_err();
        assert!(matches!(err, Error::Lifecycle(LifecycleError::UploadsPending)));

        upload.await.unwrap().unwrap();
        assert_eq!(dashboard.lifecycle(), LifecycleState::Ready);
    }

    #[tokio::test]
    async fn dropped_upload_settles_state() {
        let dashboard = Dashboard::builder(ReconciliationEngine::default())
            .seed(4)
            .build();

        let outcome = tokio::time::timeout(
            std::time::Duration::from_millis(10),
            dashboard.upload(Source::PlatformA, vec![FileHandle::new("a.csv")]),
        )
        .await;
        assert!(outcome.is_err());
        assert_eq!(dashboard.lifecycle(), LifecycleState::Empty);
        assert_eq!(dashboard.upload_status(Source::PlatformA), "No files selected");
    }

    #[tokio::test]
    async fn dropped_generation_returns_to_ready() {
        let dashboard = Dashboard::builder(ReconciliationEngine::default())
            .seed(3)
            .build();
        dashboard.load_demo().unwrap();

        // Real delay; the timeout drops the future mid-wait.
        let outcome =
            tokio::time::timeout(std::time::Duration::from_millis(10), dashboard.generate()).await;
        assert!(outcome.is_err());
        assert_eq!(dashboard.lifecycle(), LifecycleState::Ready);
        assert!(dashboard.report().is_none());
    }
}
