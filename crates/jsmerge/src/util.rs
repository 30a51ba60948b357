//! Path helpers shared by the build steps

use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Insert a `.min` segment immediately before the file extension.
///
/// `build/PathFinding.js` becomes `build/PathFinding.min.js`; a name without an
/// extension simply gets `.min` appended.
pub fn add_min_to_filename(path: &Path) -> PathBuf {
    let Some(stem) = path.file_stem() else {
        return path.to_path_buf();
    };

    let mut file_name = OsString::from(stem);
    file_name.push(".min");
    if let Some(extension) = path.extension() {
        file_name.push(".");
        file_name.push(extension);
    }
    path.with_file_name(file_name)
}

/// Resolve `path` against `root` unless it is already absolute
pub fn resolve_against(root: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        root.join(path)
    }
}
