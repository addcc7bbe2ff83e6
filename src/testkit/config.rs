//! Canonical test configurations.
//!
//! Single source of truth for configs and dashboards used across tests.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crate::app::{Config, Dashboard, NoDelay, SimulationConfig};
use crate::domain::ReconciliationEngine;

static COUNTER: AtomicUsize = AtomicUsize::new(0);

/// Default config with no simulated latency and settings at `settings_path`.
pub fn instant(settings_path: &Path) -> Config {
    Config {
        simulation: SimulationConfig::instant(),
        settings_path: Some(settings_path.to_path_buf()),
        ..Config::default()
    }
}

/// Dashboard with the default engine, no delays and fixed seeds.
pub fn dashboard(seed: u64) -> Dashboard {
    dashboard_with(ReconciliationEngine::default(), seed)
}

pub fn dashboard_with(engine: ReconciliationEngine, seed: u64) -> Dashboard {
    Dashboard::builder(engine)
        .simulation(SimulationConfig::instant())
        .delay(Arc::new(NoDelay))
        .seed(seed)
        .build()
}

/// Write `contents` to a unique file under the system temp dir.
pub fn write_temp_file(name: &str, contents: &str) -> PathBuf {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .expect("clock after epoch")
        .as_nanos();
    let id = COUNTER.fetch_add(1, Ordering::Relaxed);
    let dir = std::env::temp_dir().join(format!(
        "cafe-recon-test-{}-{nanos}-{id}",
        std::process::id()
    ));
    std::fs::create_dir_all(&dir).expect("create temp dir");
    let path = dir.join(name);
    std::fs::write(&path, contents).expect("write temp file");
    path
}
