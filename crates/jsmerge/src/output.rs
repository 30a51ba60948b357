//! Persisting build artifacts to disk

use log::info;
use std::fs;
use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;

use crate::error::{BuildError, Result};

/// How an artifact is published to its final path
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum WriteMode {
    /// Truncate and overwrite the destination in place
    #[default]
    Direct,
    /// Write a temporary sibling file, then rename it over the destination
    Atomic,
}

impl WriteMode {
    pub const fn from_atomic(atomic: bool) -> Self {
        if atomic { Self::Atomic } else { Self::Direct }
    }
}

/// Create the parent directory chain of `path` if it does not exist yet
pub fn ensure_parent_dir(path: &Path) -> Result<()> {
    let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) else {
        return Ok(());
    };

    if !dir.exists() {
        fs::create_dir_all(dir).map_err(|e| BuildError::write(dir, e))?;
        info!("created folder: {}", dir.display());
    }
    Ok(())
}

/// Write `content` to `path`, replacing whatever is there.
///
/// In [`WriteMode::Direct`] an interrupted write can leave a truncated file behind;
/// every run regenerates its outputs from scratch so that is accepted.
pub fn write_output(content: &[u8], path: &Path, mode: WriteMode) -> Result<()> {
    ensure_parent_dir(path)?;

    match mode {
        WriteMode::Direct => {
            fs::write(path, content).map_err(|e| BuildError::write(path, e))?;
        }
        WriteMode::Atomic => write_atomic(content, path)?,
    }

    info!("created file: {}", path.display());
    Ok(())
}

fn write_atomic(content: &[u8], path: &Path) -> Result<()> {
    let dir = path
        .parent()
        .filter(|dir| !dir.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));

    let mut staged = NamedTempFile::new_in(dir).map_err(|e| BuildError::write(dir, e))?;
    staged
        .write_all(content)
        .and_then(|()| staged.as_file().sync_all())
        .map_err(|e| BuildError::write(staged.path(), e))?;
    staged
        .persist(path)
        .map_err(|e| BuildError::write(path, e.error))?;
    Ok(())
}

/// Delete an artifact that has been superseded by a later step
pub fn remove_output(path: &Path) -> Result<()> {
    fs::remove_file(path).map_err(|e| BuildError::write(path, e))?;
    info!("removed file: {}", path.display());
    Ok(())
}
