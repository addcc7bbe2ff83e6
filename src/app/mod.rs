//! Application layer: configuration, settings, and the stateful dashboard.

mod config;
mod dashboard;
mod delay;
mod ingest;
mod settings;
mod settings_store;
mod state;

pub use config::{Config, DisplayConfig, LoggingConfig, SimulationConfig};
pub use dashboard::{demo_files, describe_files, Dashboard, DashboardBuilder};
pub use delay::{Delay, NoDelay, TokioDelay};
pub use ingest::{
    ingest_all, Ingestor, PlaceholderIngestor, PLACEHOLDER_ORDERS, PLACEHOLDER_REVENUE,
};
pub use settings::{SaveOutcome, Settings, SettingsManager};
pub use settings_store::{JsonFileStore, MemoryStore, SettingsStore, UnavailableStore};
pub use state::{AppState, GenerationTicket, LifecycleState, UploadTicket};
