//! Error types for the build pipeline

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors that can abort a build
#[derive(Debug, Error)]
pub enum BuildError {
    /// A module source, the banner resource or a file being rewritten could not be read
    #[error("failed to read {path:?}")]
    Read {
        /// File that could not be read
        path: PathBuf,
        /// Underlying I/O failure
        #[source]
        source: io::Error,
    },

    /// A directory could not be created, or a file could not be written, renamed or removed
    #[error("failed to write {path:?}")]
    Write {
        /// File or directory that could not be written
        path: PathBuf,
        /// Underlying I/O failure
        #[source]
        source: io::Error,
    },

    /// The external minifier is missing, exited unsuccessfully or produced unusable output
    #[error("minifier {tool:?} failed: {reason}")]
    ToolInvocation {
        /// Minifier executable
        tool: PathBuf,
        /// What went wrong, including the tool's stderr when it exited unsuccessfully
        reason: String,
    },
}

/// Discriminant of [`BuildError`], handy for matching without destructuring
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(missing_docs)]
pub enum BuildErrorKind {
    Read,
    Write,
    ToolInvocation,
}

impl BuildError {
    /// `Read` error for `path`
    pub fn read(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Read {
            path: path.into(),
            source,
        }
    }

    /// `Write` error for `path`
    pub fn write(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Write {
            path: path.into(),
            source,
        }
    }

    /// `ToolInvocation` error for the minifier at `tool`
    pub fn tool(tool: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::ToolInvocation {
            tool: tool.into(),
            reason: reason.into(),
        }
    }

    /// Which of the three error kinds this is
    pub const fn kind(&self) -> BuildErrorKind {
        match self {
            Self::Read { .. } => BuildErrorKind::Read,
            Self::Write { .. } => BuildErrorKind::Write,
            Self::ToolInvocation { .. } => BuildErrorKind::ToolInvocation,
        }
    }
}

/// Result alias used throughout the pipeline
pub type Result<T> = std::result::Result<T, BuildError>;
