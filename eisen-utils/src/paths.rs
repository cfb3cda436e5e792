//! Where eisen keeps its files
//!
//! Locations come from `directories`. Platforms without an XDG state
//! directory get the local data directory instead, and a machine with no
//! resolvable home falls back to dot-directories under `$HOME` or the
//! temp dir.

use std::path::{Path, PathBuf};

use directories::ProjectDirs;

const APP_NAME: &str = "eisen";

/// Name of the config file inside [`config_dir`]
pub const CONFIG_FILE_NAME: &str = "config.toml";

fn home() -> PathBuf {
    std::env::var_os("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(std::env::temp_dir)
}

/// `$XDG_CONFIG_HOME/eisen`, usually `~/.config/eisen`
pub fn config_dir() -> PathBuf {
    match ProjectDirs::from("", "", APP_NAME) {
        Some(dirs) => dirs.config_dir().to_path_buf(),
        None => home().join(".config").join(APP_NAME),
    }
}

pub fn config_file() -> PathBuf {
    config_dir().join(CONFIG_FILE_NAME)
}

/// `$XDG_STATE_HOME/eisen`, usually `~/.local/state/eisen`
pub fn state_dir() -> PathBuf {
    match ProjectDirs::from("", "", APP_NAME) {
        Some(dirs) => dirs
            .state_dir()
            .unwrap_or_else(|| dirs.data_local_dir())
            .to_path_buf(),
        None => home().join(".local").join("state").join(APP_NAME),
    }
}

/// Log files of the interactive board
pub fn log_dir() -> PathBuf {
    state_dir().join("log")
}

/// Create `path` and its parents; succeeds if it already exists
pub fn ensure_dir(path: &Path) -> std::io::Result<()> {
    std::fs::create_dir_all(path)
}
