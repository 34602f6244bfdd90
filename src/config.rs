use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;

// Default configuration
pub const APP_TITLE: &str = "duet-shell";
pub const DEFAULT_WINDOW_SIZE: [f32; 2] = [1024.0, 800.0];
pub const DEFAULT_MIN_WINDOW_SIZE: [f32; 2] = [800.0, 800.0];
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Environment switches.
pub const DEBUG_ENV: &str = "DUET_SHELL_DEBUG";
pub const START_MINIMIZED_ENV: &str = "START_MINIMIZED";
pub const DATA_DIR_ENV: &str = "DUET_SHELL_DATA_DIR";

/// Persisted window and diagnostics settings.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Settings {
    #[serde(default = "default_window_size")]
    pub window_size: [f32; 2],
    #[serde(default = "default_min_window_size")]
    pub min_window_size: [f32; 2],
    /// Adds Reload / Toggle Developer Tools to the View menu.
    #[serde(default)]
    pub debug_menu: bool,
    #[serde(default)]
    pub start_minimized: bool,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_window_size() -> [f32; 2] {
    DEFAULT_WINDOW_SIZE
}

fn default_min_window_size() -> [f32; 2] {
    DEFAULT_MIN_WINDOW_SIZE
}

fn default_log_level() -> String {
    DEFAULT_LOG_LEVEL.to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            window_size: DEFAULT_WINDOW_SIZE,
            min_window_size: DEFAULT_MIN_WINDOW_SIZE,
            debug_menu: false,
            start_minimized: false,
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

impl Settings {
    /// Apply environment overrides on top of the file values.
    pub fn with_env_overrides(mut self) -> Self {
        self.apply_overrides(|key| env::var(key).ok());
        self
    }

    fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup(DEBUG_ENV) {
            self.debug_menu = is_truthy(&value);
        }
        if let Some(value) = lookup(START_MINIMIZED_ENV) {
            // Any non-empty value counts
            self.start_minimized = !value.trim().is_empty();
        }
    }
}

fn is_truthy(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("com", "duet", APP_TITLE)
}

/// Path of `settings.json`, creating the config dir if needed.
///
/// Runs before tracing is installed, so failures are returned rather than
/// logged; `main` reports them once the subscriber exists.
pub fn settings_path() -> Result<PathBuf, ConfigError> {
    let proj = project_dirs().ok_or(ConfigError::NoConfigDir)?;
    settings_path_in(proj.config_dir())
}

fn settings_path_in(dir: &Path) -> Result<PathBuf, ConfigError> {
    fs::create_dir_all(dir).map_err(|source| ConfigError::CreateDir {
        path: dir.to_path_buf(),
        source,
    })?;
    Ok(dir.join("settings.json"))
}

/// Root directory for local storage and logs.
///
/// `DUET_SHELL_DATA_DIR` wins over the platform data dir.
pub fn data_dir() -> Option<PathBuf> {
    if let Ok(root) = env::var(DATA_DIR_ENV) {
        let root = root.trim();
        if !root.is_empty() {
            return Some(PathBuf::from(root));
        }
    }
    project_dirs().map(|proj| proj.data_dir().to_path_buf())
}

pub fn load_settings() -> Result<Settings, ConfigError> {
    load_settings_from(&settings_path()?)
}

/// A missing file yields the defaults.
pub fn load_settings_from(path: &Path) -> Result<Settings, ConfigError> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Settings::default()),
        Err(e) => return Err(e.into()),
    };
    Ok(serde_json::from_str(&content)?)
}
