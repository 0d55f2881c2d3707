use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};

use crate::app_dirs::AppDirs;
use crate::theme::Theme;

/// Persisted settings. Only the theme survives between runs.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Config {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<Theme>,
}

pub trait ConfigStore {
    fn load(&self) -> Config;
    fn save(&self, cfg: &Config) -> std::io::Result<()>;
}

#[derive(Debug, Clone)]
pub struct FileConfigStore {
    path: PathBuf,
}

impl FileConfigStore {
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        Self {
            path: AppDirs::config_path(),
        }
    }

    pub fn with_path<P: AsRef<Path>>(p: P) -> Self {
        Self {
            path: p.as_ref().to_path_buf(),
        }
    }
}

impl Default for FileConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigStore for FileConfigStore {
    fn load(&self) -> Config {
        if let Ok(bytes) = fs::read(&self.path) {
            if let Ok(cfg) = serde_json::from_slice::<Config>(&bytes) {
                return cfg;
            }
        }
        Config::default()
    }

    fn save(&self, cfg: &Config) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_vec_pretty(cfg).unwrap_or_default();
        fs::write(&self.path, data)
    }
}

/// Keeps the config in memory; used when nothing should touch disk
#[derive(Debug, Default)]
pub struct MemoryConfigStore {
    cfg: RefCell<Config>,
}

impl MemoryConfigStore {
    pub fn new(cfg: Config) -> Self {
        Self {
            cfg: RefCell::new(cfg),
        }
    }
}

impl ConfigStore for MemoryConfigStore {
    fn load(&self) -> Config {
        self.cfg.borrow().clone()
    }

    fn save(&self, cfg: &Config) -> std::io::Result<()> {
        *self.cfg.borrow_mut() = cfg.clone();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn roundtrip_theme() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");
        let store = FileConfigStore::with_path(&path);
        let cfg = Config {
            theme: Some(Theme::Light),
        };
        store.save(&cfg).unwrap();
        assert_eq!(store.load(), cfg);
    }

    #[test]
    fn theme_is_stored_as_plain_string() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        let store = FileConfigStore::with_path(&path);
        store
            .save(&Config {
                theme: Some(Theme::Dark),
            })
            .unwrap();
        let raw: serde_json::Value =
            serde_json::from_slice(&std::fs::read(&path).unwrap()).unwrap();
        assert_eq!(raw["theme"], "dark");
    }

    #[test]
    fn missing_file_loads_default() {
        let dir = tempdir().unwrap();
        let store = FileConfigStore::with_path(dir.path().join("absent.json"));
        assert_eq!(store.load(), Config::default());
        assert!(store.load().theme.is_none());
    }

    #[test]
    fn garbage_file_loads_default() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, b"{ not json").unwrap();
        let store = FileConfigStore::with_path(&path);
        assert_eq!(store.load(), Config::default());
    }

    #[test]
    fn memory_store_keeps_last_save() {
        let store = MemoryConfigStore::default();
        assert!(store.load().theme.is_none());
        store
            .save(&Config {
                theme: Some(Theme::Light),
            })
            .unwrap();
        assert_eq!(store.load().theme, Some(Theme::Light));
    }
}
