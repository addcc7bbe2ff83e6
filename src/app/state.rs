//! Dashboard state and the report lifecycle.

use std::fmt;
use std::sync::Arc;

use tracing::debug;

use crate::domain::{FileHandle, Report, ReportPeriod, Source, SourceFiles};
use crate::error::LifecycleError;

/// Where the dashboard is in the upload → generate workflow.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LifecycleState {
    /// No files for any source.
    #[default]
    Empty,
    /// At least one upload is still being processed.
    Uploading,
    /// Files present; a report can be generated.
    Ready,
    /// A report generation is in flight.
    Generating,
    /// The most recent generation completed.
    Generated,
}

impl fmt::Display for LifecycleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Empty => "empty",
            Self::Uploading => "uploading",
            Self::Ready => "ready",
            Self::Generating => "generating",
            Self::Generated => "generated",
        };
        f.write_str(name)
    }
}

/// Snapshot of what a generation works from, taken when it starts.
#[derive(Debug, Clone)]
pub struct GenerationTicket {
    pub files: SourceFiles,
    pub period: ReportPeriod,
}

/// Proof that an upload was started, handed back when it finishes.
///
/// Tickets issued before a clear or reset are stale and their files are
/// discarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UploadTicket {
    pub source: Source,
    epoch: u64,
}

/// Uploaded files, selected period, current report and lifecycle.
///
/// All transitions go through methods so the lifecycle can't drift from the
/// data it describes.
#[derive(Debug, Default)]
pub struct AppState {
    files: SourceFiles,
    period: ReportPeriod,
    lifecycle: LifecycleState,
    pending_uploads: usize,
    upload_epoch: u64,
    report: Option<Arc<Report>>,
}

impl AppState {
    /// Fresh state with the given default period.
    #[must_use]
    pub fn new(period: ReportPeriod) -> Self {
        Self {
            period,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn lifecycle(&self) -> LifecycleState {
        self.lifecycle
    }

    #[must_use]
    pub fn period(&self) -> ReportPeriod {
        self.period
    }

    #[must_use]
    pub fn files(&self) -> &SourceFiles {
        &self.files
    }

    #[must_use]
    pub fn files_for(&self, source: Source) -> &[FileHandle] {
        self.files.get(source)
    }

    /// The last successfully generated report, if any.
    #[must_use]
    pub fn report(&self) -> Option<Arc<Report>> {
        self.report.clone()
    }

    pub fn set_period(&mut self, period: ReportPeriod) {
        self.period = period;
    }

    /// Mark an upload as started.
    pub fn begin_upload(&mut self, source: Source) -> Result<UploadTicket, LifecycleError> {
        self.ensure_not_generating()?;
        self.pending_uploads += 1;
        self.transition(LifecycleState::Uploading, source.key());
        Ok(UploadTicket {
            source,
            epoch: self.upload_epoch,
        })
    }

    /// Record the files of a finished upload, replacing that source's files.
    ///
    /// Returns `false` and keeps the current files when the ticket predates a
    /// clear or reset.
    pub fn complete_upload(&mut self, ticket: UploadTicket, files: Vec<FileHandle>) -> bool {
        if ticket.epoch != self.upload_epoch {
            debug!(source = %ticket.source, "discarding stale upload");
            return false;
        }
        *self.files.get_mut(ticket.source) = files;
        self.settle_upload(ticket.source);
        true
    }

    /// Give up on an upload without touching the files.
    pub fn abandon_upload(&mut self, ticket: UploadTicket) {
        if ticket.epoch == self.upload_epoch {
            self.settle_upload(ticket.source);
        }
    }

    /// Replace all files at once, skipping the upload phase.
    pub fn load_files(&mut self, files: SourceFiles) -> Result<(), LifecycleError> {
        self.ensure_not_generating()?;
        self.files = files;
        self.discard_pending_uploads();
        self.transition(self.idle_state(), "load");
        Ok(())
    }

    /// Start a generation and snapshot its inputs.
    ///
    /// Fails without changing state when nothing has been uploaded, an upload
    /// is still pending or a generation is already running.
    pub fn begin_generation(&mut self) -> Result<GenerationTicket, LifecycleError> {
        self.ensure_not_generating()?;
        if self.pending_uploads > 0 {
            return Err(LifecycleError::UploadsPending);
        }
        if !self.files.has_any() {
            return Err(LifecycleError::NoFiles);
        }
        self.transition(LifecycleState::Generating, "generate");
        Ok(GenerationTicket {
            files: self.files.clone(),
            period: self.period,
        })
    }

    /// Install a freshly generated report, discarding the previous one.
    pub fn complete_generation(&mut self, report: Report) -> Result<Arc<Report>, LifecycleError> {
        if self.lifecycle != LifecycleState::Generating {
            return Err(LifecycleError::NotGenerating);
        }
        let report = Arc::new(report);
        self.report = Some(Arc::clone(&report));
        self.transition(LifecycleState::Generated, "generated");
        Ok(report)
    }

    /// Abandon an in-flight generation. The previous report, if any, stays.
    pub fn fail_generation(&mut self) {
        if self.lifecycle == LifecycleState::Generating {
            let next = self.idle_state();
            self.transition(next, "generation abandoned");
        }
    }

    /// Drop all files and the current report.
    pub fn clear_files(&mut self) -> Result<(), LifecycleError> {
        self.ensure_not_generating()?;
        self.files = SourceFiles::default();
        self.discard_pending_uploads();
        self.report = None;
        self.transition(LifecycleState::Empty, "clear");
        Ok(())
    }

    /// Return to a fresh state with `period` selected.
    pub fn reset(&mut self, period: ReportPeriod) -> Result<(), LifecycleError> {
        self.clear_files()?;
        self.period = period;
        Ok(())
    }

    fn settle_upload(&mut self, source: Source) {
        self.pending_uploads = self.pending_uploads.saturating_sub(1);
        if self.pending_uploads == 0 && self.lifecycle == LifecycleState::Uploading {
            self.transition(self.idle_state(), source.key());
        }
    }

    fn discard_pending_uploads(&mut self) {
        if self.pending_uploads > 0 {
            self.upload_epoch = self.upload_epoch.wrapping_add(1);
            self.pending_uploads = 0;
        }
    }

    fn ensure_not_generating(&self) -> Result<(), LifecycleError> {
        if self.lifecycle == LifecycleState::Generating {
            Err(LifecycleError::GenerationInFlight)
        } else {
            Ok(())
        }
    }

    fn idle_state(&self) -> LifecycleState {
        if self.pending_uploads > 0 {
            LifecycleState::Uploading
        } else if self.files.has_any() {
            LifecycleState::Ready
        } else {
            LifecycleState::Empty
        }
    }

    fn transition(&mut self, next: LifecycleState, cause: &str) {
        if self.lifecycle != next {
            debug!(from = %self.lifecycle, to = %next, cause, "lifecycle transition");
        }
        self.lifecycle = next;
    }
}
