//! Where operator settings are persisted between runs.
//!
//! The file store writes JSON atomically (temp file, fsync, rename) so a
//! crash mid-write never leaves a truncated settings file behind.

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use parking_lot::Mutex;

use super::settings::Settings;
use crate::error::PersistenceError;

/// Durable key-value home for [`Settings`].
pub trait SettingsStore: Send + Sync {
    /// Stored settings, or `None` if nothing has been saved yet.
    fn load(&self) -> Result<Option<Settings>, PersistenceError>;

    fn save(&self, settings: &Settings) -> Result<(), PersistenceError>;

    /// Forget any stored settings. Clearing an empty store succeeds.
    fn clear(&self) -> Result<(), PersistenceError>;

    /// Human-readable location, for `settings show`.
    fn describe(&self) -> String;
}

/// Settings stored as pretty JSON in a single file.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> PersistenceError {
        PersistenceError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl SettingsStore for JsonFileStore {
    fn load(&self) -> Result<Option<Settings>, PersistenceError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(self.io_error(e)),
        };

        serde_json::from_str(&content)
            .map(Some)
            .map_err(|source| PersistenceError::Corrupt {
                path: self.path.clone(),
                source,
            })
    }

    fn save(&self, settings: &Settings) -> Result<(), PersistenceError> {
        let json = serde_json::to_string_pretty(settings).map_err(|e| self.io_error(e.into()))?;

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
        }

        let temp_path = self.path.with_extension("tmp");
        let mut file = fs::File::create(&temp_path).map_err(|e| self.io_error(e))?;

        let cleanup_and_err = |e| {
            let _ = fs::remove_file(&temp_path);
            self.io_error(e)
        };

        file.write_all(json.as_bytes()).map_err(cleanup_and_err)?;
        file.sync_all().map_err(cleanup_and_err)?;
        fs::rename(&temp_path, &self.path).map_err(cleanup_and_err)?;

        Ok(())
    }

    fn clear(&self) -> Result<(), PersistenceError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(self.io_error(e)),
        }
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Process-local store, used in tests and when no file location is known.
#[derive(Debug, Default)]
pub struct MemoryStore {
    settings: Mutex<Option<Settings>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(settings: Settings) -> Self {
        Self {
            settings: Mutex::new(Some(settings)),
        }
    }
}

impl SettingsStore for MemoryStore {
    fn load(&self) -> Result<Option<Settings>, PersistenceError> {
        Ok(self.settings.lock().clone())
    }

    fn save(&self, settings: &Settings) -> Result<(), PersistenceError> {
        *self.settings.lock() = Some(settings.clone());
        Ok(())
    }

    fn clear(&self) -> Result<(), PersistenceError> {
        *self.settings.lock() = None;
        Ok(())
    }

    fn describe(&self) -> String {
        "in-memory".to_string()
    }
}

/// A store that refuses every operation.
#[derive(Debug, Clone)]
pub struct UnavailableStore {
    reason: String,
}

impl UnavailableStore {
    #[must_use]
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }

    fn error(&self) -> PersistenceError {
        PersistenceError::Unavailable {
            reason: self.reason.clone(),
        }
    }
}

impl SettingsStore for UnavailableStore {
    fn load(&self) -> Result<Option<Settings>, PersistenceError> {
        Err(self.error())
    }

    fn save(&self, _settings: &Settings) -> Result<(), PersistenceError> {
        Err(self.error())
    }

    fn clear(&self) -> Result<(), PersistenceError> {
        Err(self.error())
    }

    fn describe(&self) -> String {
        format!("unavailable ({})", self.reason)
    }
}
