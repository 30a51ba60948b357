//! Layered build configuration: defaults, config files, environment and CLI

use anyhow::{Context, Result};
use serde::Deserialize;
use std::env;
use std::path::{Path, PathBuf};

use crate::combine::Combine;
use crate::dirs::{CONFIG_FILE, system_config_file, user_jsmerge_config_dir};
use crate::output::WriteMode;
use crate::util::resolve_against;

/// Modules of PathFinding.js in the order the browser must evaluate them
pub const DEFAULT_MODULES: &[&str] = &[
    "PathFinding.js",
    "core/Node.js",
    "core/Grid.js",
    "core/BaseFinder.js",
    "modules/Heap.js",
    "modules/Heuristic.js",
    "modules/AStar.js",
    "modules/BreadthFirst.js",
    "modules/BestFirst.js",
    "modules/Dijkstra.js",
    "modules/BiAStar.js",
    "modules/BiBestFirst.js",
    "modules/BiDijkstra.js",
    "modules/BiBreadthFirst.js",
];

/// Fully resolved build configuration.
///
/// Constructed once at start-up and handed to the orchestrator by value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Root that every relative path below is resolved against
    pub project_dir: PathBuf,

    /// Root of the module tree, relative to `project_dir`
    pub src_dir: PathBuf,

    /// Module files relative to `src_dir`, in concatenation order
    pub modules: Vec<PathBuf>,

    /// Unminified bundle path; the minified artifact is derived from it
    pub output: PathBuf,

    /// External minifier executable
    pub minifier: PathBuf,

    /// Pass `--no-copyright` to the minifier
    pub no_copyright: bool,

    /// License banner prepended to the final artifact
    pub banner_file: PathBuf,

    /// Run the external minifier on the bundle
    pub minify: bool,

    /// Prepend the license banner to the final artifact
    pub banner: bool,

    /// Publish artifacts through a temporary file and rename
    pub atomic_writes: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            project_dir: PathBuf::from("."),
            src_dir: PathBuf::from("src"),
            modules: DEFAULT_MODULES.iter().map(PathBuf::from).collect(),
            output: PathBuf::from("build").join("PathFinding.js"),
            minifier: ["utils", "node_modules", ".bin", "uglifyjs"]
                .iter()
                .collect(),
            no_copyright: true,
            banner_file: PathBuf::from("utils").join("banner"),
            minify: true,
            banner: true,
            atomic_writes: false,
        }
    }
}

impl Config {
    /// Absolute (or project-relative) paths of every module, in order
    pub fn module_paths(&self) -> Vec<PathBuf> {
        let src = resolve_against(&self.project_dir, &self.src_dir);
        self.modules
            .iter()
            .map(|module| resolve_against(&src, module))
            .collect()
    }

    /// Where the unminified bundle is written
    pub fn output_path(&self) -> PathBuf {
        resolve_against(&self.project_dir, &self.output)
    }

    /// Minifier executable, resolved against the project
    pub fn minifier_path(&self) -> PathBuf {
        resolve_against(&self.project_dir, &self.minifier)
    }

    /// Banner resource, resolved against the project
    pub fn banner_path(&self) -> PathBuf {
        resolve_against(&self.project_dir, &self.banner_file)
    }

    /// Publication mode selected by `atomic_writes`
    pub const fn write_mode(&self) -> WriteMode {
        WriteMode::from_atomic(self.atomic_writes)
    }

    /// Load a single config file from a path
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<ConfigOptions> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;

        let options: ConfigOptions = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path))?;

        Ok(options)
    }

    fn try_load_and_combine<P: AsRef<Path>>(
        options: &mut ConfigOptions,
        path: P,
        context: &str,
    ) -> Result<()> {
        if path.as_ref().exists() {
            log::debug!("Loading {} from: {:?}", context, path.as_ref());
            let loaded = Self::load_from_file(&path)
                .with_context(|| format!("Failed to load {} from {:?}", context, path.as_ref()))?;
            *options = loaded.combine(std::mem::take(options));
        }
        Ok(())
    }

    /// Load configuration with hierarchical precedence:
    /// 1. CLI-provided config path (highest precedence)
    /// 2. Environment variables (JSMERGE_*)
    /// 3. Project config (jsmerge.toml in current directory)
    /// 4. User config (~/.config/jsmerge/jsmerge.toml)
    /// 5. System config (/etc/jsmerge/jsmerge.toml or equivalent)
    /// 6. Built-in PathFinding.js defaults (lowest precedence)
    pub fn load(cli_config_path: Option<&Path>) -> Result<Self> {
        let mut options = ConfigOptions::default();

        if let Some(system_config_path) = system_config_file() {
            Self::try_load_and_combine(&mut options, &system_config_path, "system config")?;
        }

        if let Some(user_config_dir) = user_jsmerge_config_dir() {
            let user_config_path = user_config_dir.join(CONFIG_FILE);
            Self::try_load_and_combine(&mut options, &user_config_path, "user config")?;
        }

        let project_config_path = PathBuf::from(CONFIG_FILE);
        Self::try_load_and_combine(&mut options, &project_config_path, "project config")?;

        options = ConfigOptions::from_env().combine(options);

        if let Some(cli_config_path) = cli_config_path {
            Self::try_load_and_combine(&mut options, cli_config_path, "CLI config")?;
        }

        Ok(options.into_config())
    }
}

/// One layer of configuration: a config file or the `JSMERGE_*` environment
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
#[allow(missing_docs)]
pub struct ConfigOptions {
    pub project_dir: Option<PathBuf>,
    pub src_dir: Option<PathBuf>,
    pub modules: Option<Vec<PathBuf>>,
    pub output: Option<PathBuf>,
    pub minifier: Option<PathBuf>,
    pub no_copyright: Option<bool>,
    pub banner_file: Option<PathBuf>,
    pub minify: Option<bool>,
    pub banner: Option<bool>,
    pub atomic_writes: Option<bool>,
}

impl Combine for ConfigOptions {
    fn combine(self, other: Self) -> Self {
        Self {
            project_dir: self.project_dir.combine(other.project_dir),
            src_dir: self.src_dir.combine(other.src_dir),
            modules: self.modules.combine(other.modules),
            output: self.output.combine(other.output),
            minifier: self.minifier.combine(other.minifier),
            no_copyright: self.no_copyright.combine(other.no_copyright),
            banner_file: self.banner_file.combine(other.banner_file),
            minify: self.minify.combine(other.minify),
            banner: self.banner.combine(other.banner),
            atomic_writes: self.atomic_writes.combine(other.atomic_writes),
        }
    }
}

impl ConfigOptions {
    /// Load configuration from environment variables with JSMERGE_ prefix
    pub fn from_env() -> Self {
        let path_var = |name: &str| {
            env::var(name)
                .ok()
                .map(|s| s.trim().to_owned())
                .filter(|s| !s.is_empty())
                .map(PathBuf::from)
        };
        let bool_var = |name: &str| env::var(name).ok().and_then(|s| parse_bool(&s));

        // JSMERGE_MODULES - comma-separated module list, order preserved
        let modules = env::var("JSMERGE_MODULES").ok().and_then(|modules_str| {
            let modules: Vec<PathBuf> = modules_str
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(PathBuf::from)
                .collect();
            (!modules.is_empty()).then_some(modules)
        });

        Self {
            project_dir: path_var("JSMERGE_PROJECT_DIR"),
            src_dir: path_var("JSMERGE_SRC_DIR"),
            modules,
            output: path_var("JSMERGE_OUTPUT"),
            minifier: path_var("JSMERGE_MINIFIER"),
            no_copyright: bool_var("JSMERGE_NO_COPYRIGHT"),
            banner_file: path_var("JSMERGE_BANNER_FILE"),
            minify: bool_var("JSMERGE_MINIFY"),
            banner: bool_var("JSMERGE_BANNER"),
            atomic_writes: bool_var("JSMERGE_ATOMIC_WRITES"),
        }
    }

    /// Fill every unset option from the built-in defaults
    pub fn into_config(self) -> Config {
        let defaults = Config::default();
        Config {
            project_dir: self.project_dir.unwrap_or(defaults.project_dir),
            src_dir: self.src_dir.unwrap_or(defaults.src_dir),
            modules: self.modules.unwrap_or(defaults.modules),
            output: self.output.unwrap_or(defaults.output),
            minifier: self.minifier.unwrap_or(defaults.minifier),
            no_copyright: self.no_copyright.unwrap_or(defaults.no_copyright),
            banner_file: self.banner_file.unwrap_or(defaults.banner_file),
            minify: self.minify.unwrap_or(defaults.minify),
            banner: self.banner.unwrap_or(defaults.banner),
            atomic_writes: self.atomic_writes.unwrap_or(defaults.atomic_writes),
        }
    }
}

/// Parse a boolean value from string, supporting various common formats
fn parse_bool(value: &str) -> Option<bool> {
    use cow_utils::CowUtils;
    match value.trim().cow_to_lowercase().as_ref() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}
