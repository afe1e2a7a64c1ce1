//! Runtime configuration resolved from CLI flags and environment.

use std::path::PathBuf;

use crate::args::Cli;

/// Directory name under the platform data directory
pub const APP_DIR_NAME: &str = "account-form";
/// File holding every storage slot
pub const STORE_FILE_NAME: &str = "store.json";

/// Resolved application configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub data_dir: PathBuf,
    pub storage_key: String,
}

impl AppConfig {
    #[must_use]
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            data_dir: cli.data_dir.clone().unwrap_or_else(default_data_dir),
            storage_key: cli.storage_key.clone(),
        }
    }

    /// Path of the JSON store file
    #[must_use]
    pub fn store_file(&self) -> PathBuf {
        self.data_dir.join(STORE_FILE_NAME)
    }
}

/// Platform data directory, falling back to `./.account-form`
fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .map(|dir| dir.join(APP_DIR_NAME))
        .unwrap_or_else(|| PathBuf::from(".").join(format!(".{APP_DIR_NAME}")))
}
