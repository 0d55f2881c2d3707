use std::fs::{self, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::app_dirs::AppDirs;

const DEFAULT_FILTER: &str = "leave_call=info";

/// Where logs go, if anywhere. The terminal belongs to the UI, so logging is
/// file-only: an explicit path, or the state dir when `RUST_LOG` is set.
pub fn log_target(explicit: Option<PathBuf>) -> Option<PathBuf> {
    explicit.or_else(|| {
        std::env::var_os("RUST_LOG")
            .is_some()
            .then(AppDirs::log_path)
            .flatten()
    })
}

/// Installs a global fmt subscriber writing to `path`
pub fn init(path: &Path) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(path)?;

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .try_init()
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e.to_string()))
}
