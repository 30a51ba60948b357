//! Handoff to the external JavaScript minifier

use log::{debug, info, trace};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use crate::error::{BuildError, Result};
use crate::output::{WriteMode, remove_output, write_output};

/// Flag asking uglify-style minifiers not to keep the leading copyright comment
pub const NO_COPYRIGHT_FLAG: &str = "--no-copyright";

/// An external minifier invoked as `<tool> [--no-copyright] <input>`.
///
/// Whatever the tool prints on stdout is taken as the complete minified source.
/// The call blocks until the tool exits; there is no timeout.
#[derive(Debug, Clone)]
pub struct Minifier {
    tool: PathBuf,
    no_copyright: bool,
    write_mode: WriteMode,
}

impl Minifier {
    /// Minifier at `tool`, passing `--no-copyright` and writing in place by default
    pub fn new(tool: impl Into<PathBuf>) -> Self {
        Self {
            tool: tool.into(),
            no_copyright: true,
            write_mode: WriteMode::Direct,
        }
    }

    /// Whether to pass `--no-copyright`
    #[must_use]
    pub const fn with_no_copyright(mut self, no_copyright: bool) -> Self {
        self.no_copyright = no_copyright;
        self
    }

    /// How the minified output is published
    #[must_use]
    pub const fn with_write_mode(mut self, write_mode: WriteMode) -> Self {
        self.write_mode = write_mode;
        self
    }

    /// Path of the minifier executable
    pub fn tool(&self) -> &Path {
        &self.tool
    }

    /// Minify `input` into `output`, then delete `input`.
    ///
    /// The unminified input is only removed once the tool has succeeded and its
    /// output has been written, so a failing minifier never destroys the only
    /// build artifact.
    pub fn minify(&self, input: &Path, output: &Path) -> Result<()> {
        let minified = self.run(input)?;

        write_output(&minified, output, self.write_mode).map_err(|e| {
            let cause = std::error::Error::source(&e)
                .map(ToString::to_string)
                .unwrap_or_default();
            BuildError::tool(
                &self.tool,
                format!("could not write minified output: {e}: {cause}"),
            )
        })?;
        info!("created minified file: {}", output.display());

        remove_output(input)
    }

    /// Run the tool on `input` and return its captured stdout
    pub fn run(&self, input: &Path) -> Result<Vec<u8>> {
        let mut command = Command::new(&self.tool);
        if self.no_copyright {
            command.arg(NO_COPYRIGHT_FLAG);
        }
        command
            .arg(input)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        debug!("Running minifier: {:?}", command);
        let output = command.output().map_err(|e| self.spawn_error(&e))?;

        let stderr = String::from_utf8_lossy(&output.stderr);
        if !output.status.success() {
            let mut reason = format!("exited with {}", output.status);
            let stderr = stderr.trim();
            if !stderr.is_empty() {
                reason.push_str(": ");
                reason.push_str(stderr);
            }
            return Err(BuildError::tool(&self.tool, reason));
        }
        if !stderr.trim().is_empty() {
            trace!("minifier stderr: {}", stderr.trim());
        }

        let input_is_empty = fs::metadata(input).is_ok_and(|meta| meta.len() == 0);
        if output.stdout.is_empty() && !input_is_empty {
            return Err(BuildError::tool(
                &self.tool,
                format!("produced no output for {}", input.display()),
            ));
        }

        debug!("Minifier produced {} bytes", output.stdout.len());
        Ok(output.stdout)
    }

    fn spawn_error(&self, err: &io::Error) -> BuildError {
        let reason = if err.kind() == io::ErrorKind::NotFound {
            "binary not found".to_owned()
        } else {
            format!("could not be started: {err}")
        };
        BuildError::tool(&self.tool, reason)
    }
}
