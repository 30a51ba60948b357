//! Concatenation of module sources into a single in-memory bundle

use log::debug;
use std::fs;
use std::path::PathBuf;

use crate::error::{BuildError, Result};

/// Read every file in `paths`, in order, and concatenate their raw bytes.
///
/// Nothing is inserted between files and nothing is transformed. The whole
/// bundle is buffered before it is returned, so a missing or unreadable module
/// fails the merge before any output has been written.
pub fn merge_files(paths: &[PathBuf]) -> Result<Vec<u8>> {
    let mut bundle = Vec::new();

    for path in paths {
        let content = fs::read(path).map_err(|e| BuildError::read(path, e))?;
        debug!("Merged {} bytes from {:?}", content.len(), path);
        bundle.extend_from_slice(&content);
    }

    Ok(bundle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BuildErrorKind;
    use tempfile::TempDir;

    #[test]
    fn test_merge_preserves_order_and_bytes() -> anyhow::Result<()> {
        let dir = TempDir::new()?;
        let first = dir.path().join("PathFinding.js");
        let second = dir.path().join("Node.js");
        let third = dir.path().join("Grid.js");
        fs::write(&first, "var PF = {};")?;
        fs::write(&second, "\nPF.Node = function() {};\r\n")?;
        fs::write(&third, [0xEF, 0xBB, 0xBF, b'x'])?;

        let merged = merge_files(&[second.clone(), first.clone(), third.clone()])?;

        let mut expected = fs::read(&second)?;
        expected.extend(fs::read(&first)?);
        expected.extend(fs::read(&third)?);
        assert_eq!(merged, expected);
        Ok(())
    }

    #[test]
    fn test_merge_keeps_duplicates() -> anyhow::Result<()> {
        let dir = TempDir::new()?;
        let path = dir.path().join("a.js");
        fs::write(&path, "a;")?;

        assert_eq!(merge_files(&[path.clone(), path])?, b"a;a;");
        Ok(())
    }

    #[test]
    fn test_merge_empty_list() -> anyhow::Result<()> {
        assert!(merge_files(&[])?.is_empty());
        Ok(())
    }

    #[test]
    fn test_merge_missing_module_is_read_error() -> anyhow::Result<()> {
        let dir = TempDir::new()?;
        let present = dir.path().join("present.js");
        let missing = dir.path().join("missing.js");
        fs::write(&present, "ok")?;

        let err = merge_files(&[present, missing.clone()]).unwrap_err();
        assert_eq!(err.kind(), BuildErrorKind::Read);
        match err {
            BuildError::Read { path, .. } => assert_eq!(path, missing),
            other => panic!("unexpected error: {other}"),
        }
        Ok(())
    }
}
