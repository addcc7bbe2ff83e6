//! Helpers shared by integration tests.

#![allow(dead_code)]

use std::path::PathBuf;

use tempfile::TempDir;

/// A temp directory holding a settings file path that does not exist yet.
pub struct SettingsDir {
    pub dir: TempDir,
}

impl SettingsDir {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("create temp dir"),
        }
    }

    pub fn settings_path(&self) -> PathBuf {
        self.dir.path().join("settings.json")
    }

    /// A config file that points settings into this directory.
    pub fn config_file(&self, extra: &str) -> PathBuf {
        let path = self.dir.path().join("config.toml");
        let body = format!(
            "settings_path = {:?}\n\n[simulation]\nupload_delay_ms = 0\ngeneration_delay_ms = 0\n\n{extra}",
            self.settings_path().display().to_string()
        );
        std::fs::write(&path, body).expect("write config");
        path
    }

    /// Create an export file inside the directory and return its path.
    pub fn export(&self, name: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        std::fs::write(&path, "order_id,amount\n1,250\n").expect("write export");
        path
    }
}
