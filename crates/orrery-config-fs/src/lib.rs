// SPDX-License-Identifier: Apache-2.0
//! Filesystem-backed `ConfigStore` for the viewer (platform config dir).

use directories::ProjectDirs;
use orrery_app_core::config::{ConfigError, ConfigStore};
use std::fs;
use std::path::PathBuf;

/// Reads configs as JSON files under the platform config directory.
pub struct FsConfigStore {
    base: PathBuf,
}

impl FsConfigStore {
    /// Create a store rooted at the user config directory
    /// (e.g., `~/.config/orrery`).
    pub fn new() -> Result<Self, ConfigError> {
        let proj = ProjectDirs::from("dev", "orrery", "orrery")
            .ok_or_else(|| ConfigError::Other("could not resolve config dir".into()))?;
        Ok(Self {
            base: proj.config_dir().to_path_buf(),
        })
    }

    /// Create a store rooted at an explicit directory.
    pub fn with_base(base: PathBuf) -> Self {
        Self { base }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.base.join(format!("{key}.json"))
    }
}

impl ConfigStore for FsConfigStore {
    fn load_raw(&self, key: &str) -> Result<Vec<u8>, ConfigError> {
        match fs::read(self.path_for(key)) {
            Ok(bytes) => Ok(bytes),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Err(ConfigError::NotFound),
            Err(err) => Err(ConfigError::Io(err)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_maps_to_not_found() {
        let store = FsConfigStore::with_base(std::env::temp_dir().join("orrery-config-fs-test"));
        assert!(matches!(
            store.load_raw("no-such-key"),
            Err(ConfigError::NotFound)
        ));
    }

    #[test]
    fn present_file_round_trips() {
        let base = std::env::temp_dir().join("orrery-config-fs-roundtrip");
        fs::create_dir_all(&base).expect("mkdir");
        fs::write(base.join("viewer.json"), b"{}").expect("write");
        let store = FsConfigStore::with_base(base);
        assert_eq!(store.load_raw("viewer").expect("read"), b"{}".to_vec());
    }
}
