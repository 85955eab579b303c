//! Settings file and root-directory resolution.
//!
//! The settings file lives at `~/.config/jtbin-tools/settings.toml`:
//!
//! ```toml
//! [extract]
//! root = "/path/to/jtbin"
//! board = "jtcps1"
//! region = 0
//! ```

use std::ffi::OsString;
use std::fmt;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::MraError;

/// Environment variable naming the JTBIN release tree.
pub const ROOT_ENV: &str = "JTBIN";

/// Canonical path to the settings file: `~/.config/jtbin-tools/settings.toml`.
pub fn settings_path() -> PathBuf {
    let config = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    config.join("jtbin-tools").join("settings.toml")
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub extract: ExtractSettings,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ExtractSettings {
    pub root: Option<PathBuf>,
    pub board: Option<String>,
    pub region: Option<i32>,
}

/// Load settings from the canonical path. A missing file yields defaults.
pub fn load_settings() -> Result<Settings, MraError> {
    load_settings_from(&settings_path())
}

/// Load settings from an explicit path. A missing file yields defaults.
pub fn load_settings_from(path: &Path) -> Result<Settings, MraError> {
    let contents = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Settings::default()),
        Err(e) => return Err(e.into()),
    };
    toml::from_str(&contents)
        .map_err(|e| MraError::settings(format!("{}: {e}", path.display())))
}

/// Where a resolved value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueSource {
    Cli,
    Env,
    SettingsFile,
    Default,
}

impl fmt::Display for ValueSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueSource::Cli => write!(f, "command line"),
            ValueSource::Env => write!(f, "${ROOT_ENV}"),
            ValueSource::SettingsFile => write!(f, "settings file"),
            ValueSource::Default => write!(f, "default"),
        }
    }
}

/// A setting value together with its origin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved<T> {
    pub value: T,
    pub source: ValueSource,
}

impl<T> Resolved<T> {
    fn new(value: T, source: ValueSource) -> Self {
        Self { value, source }
    }
}

/// Resolve the JTBIN root using a priority chain:
///
/// 1. CLI override (if `Some`)
/// 2. `$JTBIN`
/// 3. `extract.root` in `settings.toml`
/// 4. Current working directory
pub fn resolve_root(cli_override: Option<PathBuf>, settings: &Settings) -> Resolved<PathBuf> {
    resolve_root_with(cli_override, std::env::var_os(ROOT_ENV), settings)
}

pub fn resolve_root_with(
    cli_override: Option<PathBuf>,
    env: Option<OsString>,
    settings: &Settings,
) -> Resolved<PathBuf> {
    if let Some(p) = cli_override {
        return Resolved::new(p, ValueSource::Cli);
    }
    if let Some(p) = env.filter(|v| !v.is_empty()) {
        return Resolved::new(PathBuf::from(p), ValueSource::Env);
    }
    if let Some(ref p) = settings.extract.root {
        return Resolved::new(p.clone(), ValueSource::SettingsFile);
    }
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    Resolved::new(cwd, ValueSource::Default)
}

/// Resolve a value that can come from the CLI, the settings file, or a default.
pub fn resolve_value<T>(cli: Option<T>, from_settings: Option<T>, default: T) -> Resolved<T> {
    match (cli, from_settings) {
        (Some(v), _) => Resolved::new(v, ValueSource::Cli),
        (None, Some(v)) => Resolved::new(v, ValueSource::SettingsFile),
        (None, None) => Resolved::new(default, ValueSource::Default),
    }
}

#[cfg(test)]
#[path = "tests/settings_tests.rs"]
mod tests;
