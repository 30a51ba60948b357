//! Sequencing of the build steps

use log::{debug, info};
use std::fs;
use std::path::{Path, PathBuf};

use crate::banner::prepend_banner;
use crate::config::Config;
use crate::error::{BuildError, Result};
use crate::merge::merge_files;
use crate::minify::Minifier;
use crate::output::write_output;
use crate::util::add_min_to_filename;

/// Summary of a successful build
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildReport {
    /// The file the build ended with: the bundle, or its `.min` sibling
    pub artifact: PathBuf,
    /// Size of `artifact` on disk
    pub bytes: u64,
    /// Number of modules merged
    pub modules: usize,
    /// Whether the minifier ran
    pub minified: bool,
    /// Whether the banner was prepended
    pub bannered: bool,
}

/// Runs merge → write → minify → banner in a fixed order.
///
/// The first failing step aborts the build. Files written by earlier steps are
/// left as they are; nothing is rolled back. Two builds targeting the same output
/// path must not run at the same time.
#[derive(Debug)]
pub struct BuildOrchestrator {
    config: Config,
}

impl BuildOrchestrator {
    /// Orchestrator for a fixed configuration
    pub const fn new(config: Config) -> Self {
        Self { config }
    }

    /// Configuration this orchestrator builds with
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// Concatenate the configured modules without touching the filesystem
    pub fn merge(&self) -> Result<Vec<u8>> {
        let module_paths = self.config.module_paths();
        debug!("Merging {} modules", module_paths.len());
        merge_files(&module_paths)
    }

    /// Run the whole pipeline and report the final artifact
    pub fn build(&self) -> Result<BuildReport> {
        info!("Starting build");
        debug!("Configuration: {:?}", self.config);

        let bundle = self.merge()?;
        info!(
            "Merged {} modules into {} bytes",
            self.config.modules.len(),
            bundle.len()
        );

        let write_mode = self.config.write_mode();
        let mut artifact = self.config.output_path();
        write_output(&bundle, &artifact, write_mode)?;
        drop(bundle);

        if self.config.minify {
            let minified_path = add_min_to_filename(&artifact);
            Minifier::new(self.config.minifier_path())
                .with_no_copyright(self.config.no_copyright)
                .with_write_mode(write_mode)
                .minify(&artifact, &minified_path)?;
            artifact = minified_path;
        } else {
            debug!("Minification disabled");
        }

        if self.config.banner {
            prepend_banner(&self.config.banner_path(), &artifact, write_mode)?;
        } else {
            debug!("Banner disabled");
        }

        let bytes = artifact_size(&artifact)?;
        info!("Build finished: {} ({} bytes)", artifact.display(), bytes);

        Ok(BuildReport {
            artifact,
            bytes,
            modules: self.config.modules.len(),
            minified: self.config.minify,
            bannered: self.config.banner,
        })
    }
}

fn artifact_size(path: &Path) -> Result<u64> {
    fs::metadata(path)
        .map(|meta| meta.len())
        .map_err(|e| BuildError::read(path, e))
}
