mod config;
pub mod local_store;
pub mod token;

pub use config::{
    ApiConfig, AuthConfig, CalendarConfig, Config, DayGridConfig, FocusConfig, TokenBackend,
};
pub use local_store::{KeyValueStore, KeyringStore, LocalStore, MemoryStore};
pub use token::TokenStore;

use std::path::PathBuf;

use crate::error::StorageError;

/// Returns `~/.config/focusflow[-dev]/` based on FOCUSFLOW_ENV.
///
/// Set FOCUSFLOW_ENV=dev to use the development data directory, or
/// FOCUSFLOW_HOME to point at an explicit directory.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf, StorageError> {
    let dir = match std::env::var_os("FOCUSFLOW_HOME") {
        Some(home) => PathBuf::from(home),
        None => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");

            let env = std::env::var("FOCUSFLOW_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("focusflow-dev")
            } else {
                base_dir.join("focusflow")
            }
        }
    };

    std::fs::create_dir_all(&dir)
        .map_err(|e| StorageError::DataDir(format!("{}: {e}", dir.display())))?;
    Ok(dir)
}
