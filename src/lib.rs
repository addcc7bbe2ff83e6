//! Cafe-recon: reconcile a café's POS delivery figures against the reports of
//! two food-delivery platforms.
//!
//! # Modules
//!
//! - [`domain`] - Pure reconciliation logic: aggregates, summary, breakdown,
//!   financial and variance analysis, daily series synthesis
//! - [`app`] - Configuration, persisted settings, ingestion and the stateful
//!   [`Dashboard`](app::Dashboard) that drives the upload → generate lifecycle
//! - [`cli`] - Command-line surface: `generate`, `demo`, `settings`
//! - [`error`] - Error types for the crate
//!
//! # Example
//!
//! ```no_run
//! use cafe_recon::app::{Dashboard, NoDelay};
//! use cafe_recon::domain::{FileHandle, ReconciliationEngine, Source};
//! use std::sync::Arc;
//!
//! # async fn run() -> cafe_recon::error::Result<()> {
//! let dashboard = Dashboard::builder(ReconciliationEngine::default())
//!     .delay(Arc::new(NoDelay))
//!     .build();
//! dashboard.upload(Source::Pos, vec![FileHandle::new("pos.xlsx")]).await?;
//! let report = dashboard.generate().await?;
//! println!("{}", report.summary.status);
//! # Ok(())
//! # }
//! ```

pub mod app;
pub mod cli;
pub mod domain;
pub mod error;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;
