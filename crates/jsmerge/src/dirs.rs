//! Locations of the user and system `jsmerge.toml` files

use std::env;
use std::path::{Path, PathBuf};

use etcetera::BaseStrategy;

pub const CONFIG_DIR: &str = "jsmerge";

pub const CONFIG_FILE: &str = "jsmerge.toml";

/// Returns `~/.config/jsmerge` (or the platform equivalent).
///
/// On Linux and macOS this honours `XDG_CONFIG_HOME`; on Windows it is the
/// roaming AppData directory.
pub fn user_jsmerge_config_dir() -> Option<PathBuf> {
    etcetera::choose_base_strategy()
        .ok()
        .map(|dirs| dirs.config_dir().join(CONFIG_DIR))
}

/// `<base>/jsmerge/jsmerge.toml`, if it is a regular file
fn config_file_in(base: &Path) -> Option<PathBuf> {
    let candidate = base.join(CONFIG_DIR).join(CONFIG_FILE);
    candidate.is_file().then_some(candidate)
}

/// Search a colon-separated `XDG_CONFIG_DIRS` value, defaulting to `/etc/xdg`
#[cfg(not(windows))]
fn locate_system_config_xdg(value: Option<&str>) -> Option<PathBuf> {
    value
        .filter(|dirs| !dirs.is_empty())
        .unwrap_or("/etc/xdg")
        .split(':')
        .take_while(|dir| !dir.is_empty())
        .find_map(|dir| config_file_in(Path::new(dir)))
}

/// Returns the path to the system configuration file.
///
/// On Unix-like systems, searches `XDG_CONFIG_DIRS` (falling back to `/etc/xdg`)
/// and then `/etc/jsmerge/jsmerge.toml`. On Windows, uses
/// `%SYSTEMDRIVE%\ProgramData\jsmerge\jsmerge.toml`.
pub fn system_config_file() -> Option<PathBuf> {
    #[cfg(windows)]
    {
        let system_drive = env::var_os("SYSTEMDRIVE")?;
        config_file_in(&PathBuf::from(system_drive).join("ProgramData"))
    }

    #[cfg(not(windows))]
    {
        let xdg_config_dirs = env::var("XDG_CONFIG_DIRS").ok();
        locate_system_config_xdg(xdg_config_dirs.as_deref())
            .or_else(|| config_file_in(Path::new("/etc")))
    }
}
