//! Where term-filter keeps its files
//!
//! ```text
//! <config dir>/
//!   config.yaml    editor settings
//!   keymap.yaml    key binding overrides
//!   logs/          daily rotated debug logs
//! ```
//!
//! The config dir is `$TERM_FILTER_CONFIG_DIR` when set. Otherwise it is
//! `$XDG_CONFIG_HOME/term-filter` or `~/.config/term-filter` on Unix and
//! macOS, and `%APPDATA%\term-filter` on Windows.

use std::env;
use std::fs;
use std::path::PathBuf;

const APP_DIR: &str = "term-filter";
const DIR_OVERRIDE: &str = "TERM_FILTER_CONFIG_DIR";

pub fn config_dir() -> Option<PathBuf> {
    if let Some(dir) = env::var_os(DIR_OVERRIDE).filter(|d| !d.is_empty()) {
        return Some(PathBuf::from(dir));
    }

    // dirs::config_dir() is ~/Library/Application Support on macOS; keep ~/.config there
    let base = if cfg!(target_os = "windows") {
        dirs::config_dir()
    } else {
        env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|| dirs::home_dir().map(|home| home.join(".config")))
    };
    base.map(|dir| dir.join(APP_DIR))
}

fn in_config_dir(name: &str) -> Option<PathBuf> {
    config_dir().map(|dir| dir.join(name))
}

pub fn config_file() -> Option<PathBuf> {
    in_config_dir("config.yaml")
}

pub fn keymap_file() -> Option<PathBuf> {
    in_config_dir("keymap.yaml")
}

pub fn logs_dir() -> Option<PathBuf> {
    in_config_dir("logs")
}

/// Create the logs dir (and the config dir above it) if missing
pub fn ensure_logs_dir() -> Result<PathBuf, String> {
    let logs = logs_dir().ok_or_else(|| "no home or config directory".to_string())?;
    fs::create_dir_all(&logs)
        .map_err(|e| format!("cannot create {}: {}", logs.display(), e))?;
    Ok(logs)
}
