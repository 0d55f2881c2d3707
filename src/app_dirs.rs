use directories::ProjectDirs;
use std::path::PathBuf;

const APP_NAME: &str = "leave-call";

/// Centralized application directory resolution
pub struct AppDirs;

impl AppDirs {
    pub fn config_path() -> PathBuf {
        match ProjectDirs::from("", "", APP_NAME) {
            Some(pd) => pd.config_dir().join("config.json"),
            None => PathBuf::from("leave_call_config.json"),
        }
    }

    pub fn log_path() -> Option<PathBuf> {
        if let Ok(home) = std::env::var("HOME") {
            let state_dir = PathBuf::from(home)
                .join(".local")
                .join("state")
                .join(APP_NAME);
            Some(state_dir.join("leave-call.log"))
        } else {
            ProjectDirs::from("", "", APP_NAME)
                .map(|proj_dirs| proj_dirs.data_local_dir().join("leave-call.log"))
        }
    }
}
