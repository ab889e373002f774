// SPDX-License-Identifier: MPL-2.0
//! Centralized path management for application directories.
//!
//! # Path Resolution Order
//!
//! 1. **CLI arguments** (`--data-dir`, `--config-dir`) - set via [`init_cli_overrides`]
//! 2. **Environment variables** (`ICED_WALL_DATA_DIR`, `ICED_WALL_CONFIG_DIR`)
//! 3. **Platform default** - via `dirs` crate
//!
//! CLI overrides should be initialized once at startup, before any path
//! resolution function runs.

use std::path::PathBuf;
use std::sync::OnceLock;

/// Application name used for directory naming.
const APP_NAME: &str = "IcedWall";

/// Environment variable to override the data directory.
pub const ENV_DATA_DIR: &str = "ICED_WALL_DATA_DIR";

/// Environment variable to override the config directory.
pub const ENV_CONFIG_DIR: &str = "ICED_WALL_CONFIG_DIR";

/// Global CLI override for data directory (set once at startup).
static CLI_DATA_DIR: OnceLock<Option<PathBuf>> = OnceLock::new();

/// Global CLI override for config directory (set once at startup).
static CLI_CONFIG_DIR: OnceLock<Option<PathBuf>> = OnceLock::new();

/// Initializes CLI overrides for data and config directories.
///
/// # Panics
///
/// Panics if called more than once.
pub fn init_cli_overrides(data_dir: Option<String>, config_dir: Option<String>) {
    CLI_DATA_DIR
        .set(data_dir.map(PathBuf::from))
        .expect("CLI data dir override already initialized");
    CLI_CONFIG_DIR
        .set(config_dir.map(PathBuf::from))
        .expect("CLI config dir override already initialized");
}

/// Returns the application data directory path (watch-state file).
///
/// Returns `None` if no directory can be determined; persistence degrades
/// to in-memory in that case.
pub fn get_app_data_dir() -> Option<PathBuf> {
    if let Some(path) = CLI_DATA_DIR.get().and_then(Clone::clone) {
        return Some(path);
    }
    if let Ok(env_path) = std::env::var(ENV_DATA_DIR) {
        if !env_path.is_empty() {
            return Some(PathBuf::from(env_path));
        }
    }
    dirs::data_dir().map(|mut path| {
        path.push(APP_NAME);
        path
    })
}

/// Returns the application config directory path (settings.toml).
pub fn get_app_config_dir() -> Option<PathBuf> {
    if let Some(path) = CLI_CONFIG_DIR.get().and_then(Clone::clone) {
        return Some(path);
    }
    if let Ok(env_path) = std::env::var(ENV_CONFIG_DIR) {
        if !env_path.is_empty() {
            return Some(PathBuf::from(env_path));
        }
    }
    dirs::config_dir().map(|mut path| {
        path.push(APP_NAME);
        path
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    // Env-var tests mutate process state, so they share one lock.
    use std::sync::{Mutex, OnceLock as TestLock};

    fn env_lock() -> &'static Mutex<()> {
        static LOCK: TestLock<Mutex<()>> = TestLock::new();
        LOCK.get_or_init(|| Mutex::new(()))
    }

    #[test]
    fn env_var_overrides_platform_default_for_data_dir() {
        let _guard = env_lock().lock().expect("failed to lock mutex");
        std::env::set_var(ENV_DATA_DIR, "/tmp/iced_wall_test_data");
        let dir = get_app_data_dir();
        std::env::remove_var(ENV_DATA_DIR);
        assert_eq!(dir, Some(PathBuf::from("/tmp/iced_wall_test_data")));
    }

    #[test]
    fn empty_env_var_falls_back_to_platform_default() {
        let _guard = env_lock().lock().expect("failed to lock mutex");
        std::env::set_var(ENV_DATA_DIR, "");
        let dir = get_app_data_dir();
        std::env::remove_var(ENV_DATA_DIR);
        if let Some(dir) = dir {
            assert!(dir.ends_with(APP_NAME));
        }
    }

    #[test]
    fn env_var_overrides_platform_default_for_config_dir() {
        let _guard = env_lock().lock().expect("failed to lock mutex");
        std::env::set_var(ENV_CONFIG_DIR, "/tmp/iced_wall_test_config");
        let dir = get_app_config_dir();
        std::env::remove_var(ENV_CONFIG_DIR);
        assert_eq!(dir, Some(PathBuf::from("/tmp/iced_wall_test_config")));
    }
}
