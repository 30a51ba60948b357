//! License banner injection

use log::info;
use std::fs;
use std::path::Path;

use crate::error::{BuildError, Result};
use crate::output::{WriteMode, write_output};

/// Rewrite `target` in place as the banner bytes followed by its original bytes.
///
/// No separator is added; a trailing newline has to come from the banner file itself.
pub fn prepend_banner(banner_path: &Path, target: &Path, mode: WriteMode) -> Result<()> {
    let banner = fs::read(banner_path).map_err(|e| BuildError::read(banner_path, e))?;
    let content = fs::read(target).map_err(|e| BuildError::read(target, e))?;

    let mut bannered = Vec::with_capacity(banner.len() + content.len());
    bannered.extend_from_slice(&banner);
    bannered.extend_from_slice(&content);

    write_output(&bannered, target, mode)?;
    info!("prepended banner to: {}", target.display());
    Ok(())
}
