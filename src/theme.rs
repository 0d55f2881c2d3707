//! Dark/light preference.
//!
//! The stored value wins. Without one, the terminal's color scheme is
//! guessed from `COLORFGBG` and written back so later runs agree. Storage
//! failures are logged and otherwise ignored; the theme then lives only in
//! memory for this run.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::{Config, ConfigStore};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, strum_macros::Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }

    pub fn is_dark(self) -> bool {
        self == Theme::Dark
    }
}

/// Parses the `fg;bg` (or `fg;default;bg`) convention used by rxvt-style
/// terminals. Background colors 0-6 and 8 are dark.
pub fn parse_colorfgbg(value: &str) -> Option<Theme> {
    let bg = value.split(';').last()?.trim();
    let bg: u8 = bg.parse().ok()?;
    match bg {
        0..=6 | 8 => Some(Theme::Dark),
        7 | 9..=15 => Some(Theme::Light),
        _ => None,
    }
}

/// The host terminal's preference, if it advertises one
pub fn detect_host() -> Option<Theme> {
    std::env::var("COLORFGBG")
        .ok()
        .and_then(|v| parse_colorfgbg(&v))
}

/// Stored theme, else `host` (persisted), else dark
pub fn resolve(store: &dyn ConfigStore, host: Option<Theme>) -> Theme {
    let cfg = store.load();
    if let Some(theme) = cfg.theme {
        return theme;
    }

    let theme = host.unwrap_or_default();
    debug!(%theme, detected = host.is_some(), "no stored theme");
    persist(store, cfg, theme);
    theme
}

/// Flips the theme and stores the new value
pub fn toggle(store: &dyn ConfigStore, current: Theme) -> Theme {
    let next = current.toggled();
    persist(store, store.load(), next);
    next
}

fn persist(store: &dyn ConfigStore, mut cfg: Config, theme: Theme) {
    cfg.theme = Some(theme);
    if let Err(err) = store.save(&cfg) {
        warn!(%err, "could not save theme preference");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{FileConfigStore, MemoryConfigStore};
    use std::io;

    struct BrokenStore;

    impl ConfigStore for BrokenStore {
        fn load(&self) -> Config {
            Config::default()
        }

        fn save(&self, _cfg: &Config) -> io::Result<()> {
            Err(io::Error::new(io::ErrorKind::PermissionDenied, "read-only"))
        }
    }

    #[test]
    fn test_parse_colorfgbg() {
        assert_eq!(parse_colorfgbg("15;0"), Some(Theme::Dark));
        assert_eq!(parse_colorfgbg("0;15"), Some(Theme::Light));
        assert_eq!(parse_colorfgbg("12;default;8"), Some(Theme::Dark));
        assert_eq!(parse_colorfgbg("0;7"), Some(Theme::Light));
        assert_eq!(parse_colorfgbg("0;default"), None);
        assert_eq!(parse_colorfgbg(""), None);
        assert_eq!(parse_colorfgbg("1;200"), None);
    }

    #[test]
    fn test_stored_theme_wins() {
        let store = MemoryConfigStore::new(Config {
            theme: Some(Theme::Light),
        });
        assert_eq!(resolve(&store, Some(Theme::Dark)), Theme::Light);
    }

    #[test]
    fn test_host_preference_is_written_back() {
        let store = MemoryConfigStore::default();
        assert_eq!(resolve(&store, Some(Theme::Light)), Theme::Light);
        assert_eq!(store.load().theme, Some(Theme::Light));
    }

    #[test]
    fn test_defaults_to_dark() {
        let store = MemoryConfigStore::default();
        assert_eq!(resolve(&store, None), Theme::Dark);
        assert_eq!(store.load().theme, Some(Theme::Dark));
    }

    #[test]
    fn test_toggle_persists() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileConfigStore::with_path(dir.path().join("config.json"));
        let theme = resolve(&store, None);
        let theme = toggle(&store, theme);
        assert_eq!(theme, Theme::Light);
        assert_eq!(resolve(&store, None), Theme::Light);
        assert_eq!(toggle(&store, theme), Theme::Dark);
    }

    #[test]
    fn test_broken_storage_degrades_to_memory() {
        assert_eq!(resolve(&BrokenStore, Some(Theme::Light)), Theme::Light);
        assert_eq!(toggle(&BrokenStore, Theme::Light), Theme::Dark);
    }

    #[test]
    fn test_display_matches_stored_value() {
        assert_eq!(Theme::Dark.to_string(), "dark");
        assert_eq!(Theme::Light.to_string(), "light");
        assert_eq!(Theme::Dark.toggled(), Theme::Light);
    }
}
